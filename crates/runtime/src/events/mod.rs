//! Topic-based event bus.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{Event, Topic};
