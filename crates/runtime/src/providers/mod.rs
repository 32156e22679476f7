//! Action providers.

mod ai;

pub use ai::WeightedAiProvider;
