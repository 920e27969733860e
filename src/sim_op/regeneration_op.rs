use crate::field::{regenerate, RegenerationTotals};
use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};

/// Ambient light regrowth, photolysis, iron oxidation and sediment fluxes.
pub struct RegenerationOp {
    pub last_totals: RegenerationTotals,
}

impl RegenerationOp {
    pub fn new() -> Self {
        Self {
            last_totals: RegenerationTotals::default(),
        }
    }

    pub fn handle() -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new()))
    }
}

impl Default for RegenerationOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for RegenerationOp {
    fn name(&self) -> &str {
        "Regeneration"
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        self.last_totals = regenerate(&mut sim.env, &sim.config.regeneration);
    }
}
