use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};

/// Advances vent lifecycles, rolls geological events and injects emissions.
pub struct VentOp {
    pub reporting: bool,
}

impl VentOp {
    pub fn new() -> Self {
        Self { reporting: false }
    }

    pub fn handle() -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new()))
    }

    pub fn with_reporting(mut self, reporting: bool) -> Self {
        self.reporting = reporting;
        self
    }
}

impl Default for VentOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for VentOp {
    fn name(&self) -> &str {
        "Vents"
    }

    fn init_sim(&mut self, sim: &mut Simulation) {
        if self.reporting {
            println!("🌋 {} vents seeded", sim.vents.len());
            for vent in sim.vents.vents() {
                println!(
                    "   #{} {} at col {} row {} intensity {:.2}",
                    vent.id,
                    vent.kind.as_str(),
                    vent.col,
                    vent.row,
                    vent.intensity
                );
            }
        }
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        let stats = sim.vents.update(&mut sim.env, &mut sim.rng, sim.step);
        if self.reporting {
            for event in &stats.events {
                match event.vent_id {
                    Some(id) => println!("💥 step {}: {} (vent #{})", event.tick, event.kind.as_str(), id),
                    None => println!("💥 step {}: {}", event.tick, event.kind.as_str()),
                }
            }
            for (id, from, to) in &stats.transitions {
                println!("🔁 step {}: vent #{} {} -> {}", sim.step, id, from.as_str(), to.as_str());
            }
        }
        sim.vent_stats = stats;
    }
}
