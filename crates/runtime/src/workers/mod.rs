//! Background tasks internal to the crate.

mod simulation;

pub(crate) use simulation::{Command, SimulationWorker};
