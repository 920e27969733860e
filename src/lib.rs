pub mod cell;
pub mod config;
pub mod constants;
pub mod field;
pub mod rng;
pub mod sim;
pub mod sim_op;
pub mod stability;
pub mod vent;
