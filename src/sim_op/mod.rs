// Per-tick operators for the ecosystem simulation
pub mod cell_op;
pub mod diffusion_op;
pub mod progress_reporter_op;
pub mod regeneration_op;
pub mod reservoir_op;
pub mod stability_op;
pub mod vent_op;

pub use cell_op::{CellOp, CellStats};
pub use diffusion_op::DiffusionOp;
pub use progress_reporter_op::ProgressReporterOp;
pub use regeneration_op::RegenerationOp;
pub use reservoir_op::ReservoirOp;
pub use stability_op::StabilityOp;
pub use vent_op::VentOp;

use crate::sim::simulation::Simulation;

/// One stage of the tick pipeline. Ops run in list order and see every
/// change made by the ops before them in the same tick.
pub trait SimOp {
    /// Label used in timing and progress output.
    fn name(&self) -> &str;

    /// Once, before the first tick of `Simulation::run`.
    fn init_sim(&mut self, _sim: &mut Simulation) {}

    fn update_sim(&mut self, _sim: &mut Simulation) {}

    /// Once, after the last tick of `Simulation::run`.
    fn after_sim(&mut self, _sim: &mut Simulation) {}
}

pub struct SimOpHandle {
    pub op: Box<dyn SimOp>,
}

impl SimOpHandle {
    pub fn new(op: Box<dyn SimOp>) -> Self {
        SimOpHandle { op }
    }

    /// Run one update of the wrapped operator outside the normal step loop.
    pub fn execute(&mut self, sim: &mut Simulation) {
        self.op.update_sim(sim);
    }
}
