use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};

/// Couples the grid boundary to the atmosphere and ocean pools.
pub struct ReservoirOp;

impl ReservoirOp {
    pub fn new() -> Self {
        Self
    }

    pub fn handle() -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new()))
    }
}

impl Default for ReservoirOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for ReservoirOp {
    fn name(&self) -> &str {
        "Reservoirs"
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        if sim.config.reservoirs.enabled {
            sim.exchange = sim.reservoirs.couple(&mut sim.env);
        }
    }
}
