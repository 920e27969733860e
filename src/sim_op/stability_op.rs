use crate::field::Species;
use crate::sim::simulation::Simulation;
use crate::sim_op::{SimOp, SimOpHandle};

/// Re-evaluates the stability scalar every `stability.interval` ticks.
pub struct StabilityOp {
    pub reporting: bool,
}

impl StabilityOp {
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

impl Default for StabilityOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimOp for StabilityOp {
    fn name(&self) -> &str {
        "Stability"
    }

    fn update_sim(&mut self, sim: &mut Simulation) {
        let interval = sim.config.stability.interval.max(1);
        if sim.step % interval != 0 {
            return;
        }
        let max_o2 = sim.env.field(Species::O2).max_value();
        let value = sim.stability.evaluate(sim.agents.len(), max_o2);
        if self.reporting {
            let p = sim.stability.last_penalties;
            println!(
                "⚖️  step {}: stability {:.3} (mortality -{:.3}, volatility -{:.3}, O2 -{:.3})",
                sim.step, value, p.mortality, p.volatility, p.oxygen
            );
        }
    }
}
