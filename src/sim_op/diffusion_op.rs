use crate::field::Species;
use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};

/// One double-buffered diffusion pass per diffusing species.
pub struct DiffusionOp {
    /// Total absolute change from the last pass, per species.
    pub activity: [f64; Species::COUNT],
}

impl DiffusionOp {
    pub fn new() -> Self {
        Self {
            activity: [0.0; Species::COUNT],
        }
    }

    pub fn handle() -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new()))
    }
}

impl Default for DiffusionOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for DiffusionOp {
    fn name(&self) -> &str {
        "Diffusion"
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        for species in Species::DIFFUSING {
            if species == Species::Temperature && !sim.config.diffusion.diffuse_temperature {
                continue;
            }
            self.activity[species.as_index()] = sim.env.diffuse_species(species);
        }
    }
}
