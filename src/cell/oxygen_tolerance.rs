use crate::constants::*;

/// Oxidative stress model shared by every agent.
#[derive(Debug, Clone, Copy)]
pub struct OxygenTolerance {
    pub safe_threshold: f64,
    pub damage_rate: f64,
    pub sod_synthesis_rate: f64,
    pub sod_maintenance_cost: f64,
}

impl Default for OxygenTolerance {
    fn default() -> Self {
        Self {
            safe_threshold: OXYGEN_SAFE_THRESHOLD,
            damage_rate: OXIDATIVE_DAMAGE_RATE,
            sod_synthesis_rate: SOD_SYNTHESIS_RATE,
            sod_maintenance_cost: SOD_MAINTENANCE_COST,
        }
    }
}

impl OxygenTolerance {
    pub fn new(safe_threshold: f64, damage_rate: f64) -> Self {
        Self {
            safe_threshold,
            damage_rate,
            ..Self::default()
        }
    }

    /// Structural damage from one tick at `local_o2` with protection `sod_efficiency` in [0, 1].
    pub fn oxidative_damage(&self, local_o2: f64, sod_efficiency: f64) -> f64 {
        let excess = (local_o2 - self.safe_threshold).max(0.0);
        excess * (1.0 - sod_efficiency.clamp(0.0, 1.0)) * self.damage_rate
    }

    /// Moves the expressed SOD level one step toward the genetic target without overshooting.
    pub fn adapt_sod(&self, current: f64, target: f64) -> f64 {
        let target = target.clamp(0.0, 1.0);
        let next = if current < target {
            (current + self.sod_synthesis_rate).min(target)
        } else {
            (current - self.sod_synthesis_rate).max(target)
        };
        next.clamp(0.0, 1.0)
    }

    pub fn sod_maintenance(&self, sod_level: f64) -> f64 {
        sod_level * self.sod_maintenance_cost
    }
}
