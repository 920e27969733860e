pub mod simulation;

pub use simulation::{OpTiming, SimProps, Simulation};
