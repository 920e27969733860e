use crate::constants::*;

/// Envelope mechanics that scale with cell size and structural damage.
#[derive(Debug, Clone, Copy)]
pub struct Membrane {
    pub permeability: f64,
    pub leak_rate: f64,
}

impl Default for Membrane {
    fn default() -> Self {
        Self {
            permeability: MEMBRANE_PERMEABILITY,
            leak_rate: MEMBRANE_LEAK_RATE,
        }
    }
}

impl Membrane {
    pub fn new(permeability: f64, leak_rate: f64) -> Self {
        Self {
            permeability,
            leak_rate,
        }
    }

    /// Reserve capacity of a cell of `size`; `base` is the capacity at the reference size.
    pub fn storage_capacity(base: f64, size: f64) -> f64 {
        base * (size.max(0.0) / REFERENCE_SIZE).powi(3)
    }

    /// Multiplier on the speed cap. Large cells push more mass.
    pub fn speed_factor(size: f64) -> f64 {
        let ratio = size / REFERENCE_SIZE;
        if ratio <= 0.0 {
            return 1.0;
        }
        (1.0 / ratio).max(MIN_SPEED_FACTOR)
    }

    fn damage_fraction(structural_damage: f64) -> f64 {
        (structural_damage / MAX_STRUCTURAL_DAMAGE).clamp(0.0, 1.0)
    }

    /// Damaged membranes are leakier in both directions.
    pub fn effective_permeability(&self, structural_damage: f64) -> f64 {
        self.permeability * (1.0 + Self::damage_fraction(structural_damage))
    }

    pub fn leak(&self, structural_damage: f64) -> f64 {
        self.leak_rate * (1.0 + 2.0 * Self::damage_fraction(structural_damage))
    }

    /// Passive uptake down the gradient. Zero when the inside is already richer.
    pub fn inflow(&self, outside: f64, inside: f64, room: f64, structural_damage: f64) -> f64 {
        if outside <= inside {
            return 0.0;
        }
        let flow = (outside - inside) * self.effective_permeability(structural_damage) * NUTRIENT_DIFFUSION_SCALE;
        flow.min(outside).min(room.max(0.0))
    }

    /// Nitrogen and phosphorus lost to open water per tick.
    pub fn entropic_loss(&self, structural_damage: f64) -> (f64, f64) {
        let leak = self.leak(structural_damage);
        (leak * NITROGEN_LEAK_SHARE, leak * PHOSPHORUS_LEAK_SHARE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_gt;

    #[test]
    fn storage_scales_with_volume() {
        assert_abs_diff_eq!(Membrane::storage_capacity(130.0, REFERENCE_SIZE), 130.0);
        assert_abs_diff_eq!(Membrane::storage_capacity(130.0, 2.0 * REFERENCE_SIZE), 1040.0);
        assert_abs_diff_eq!(Membrane::storage_capacity(130.0, 0.5 * REFERENCE_SIZE), 16.25);
    }

    #[test]
    fn large_cells_slow_down_to_a_floor() {
        assert_abs_diff_eq!(Membrane::speed_factor(REFERENCE_SIZE), 1.0);
        assert_abs_diff_eq!(Membrane::speed_factor(2.0 * REFERENCE_SIZE), 0.5);
        assert_abs_diff_eq!(Membrane::speed_factor(SIZE_MAX), MIN_SPEED_FACTOR.max(REFERENCE_SIZE / SIZE_MAX));
        assert_abs_diff_eq!(Membrane::speed_factor(10.0 * REFERENCE_SIZE), MIN_SPEED_FACTOR);
        assert_gt!(Membrane::speed_factor(SIZE_MIN), 1.0);
    }

    #[test]
    fn damage_opens_the_membrane() {
        let membrane = Membrane::default();
        assert_abs_diff_eq!(membrane.effective_permeability(0.0), MEMBRANE_PERMEABILITY);
        assert_abs_diff_eq!(membrane.effective_permeability(MAX_STRUCTURAL_DAMAGE), 2.0 * MEMBRANE_PERMEABILITY);
        assert_abs_diff_eq!(membrane.leak(MAX_STRUCTURAL_DAMAGE / 2.0), 2.0 * MEMBRANE_LEAK_RATE);
    }

    #[test]
    fn inflow_follows_the_gradient() {
        let membrane = Membrane::new(0.2, 0.0);
        assert_abs_diff_eq!(membrane.inflow(60.0, 10.0, 100.0, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(membrane.inflow(10.0, 60.0, 100.0, 0.0), 0.0);
        assert_abs_diff_eq!(membrane.inflow(60.0, 10.0, 0.25, 0.0), 0.25);
        assert_abs_diff_eq!(membrane.inflow(60.0, 10.0, -3.0, 0.0), 0.0);
    }

    #[test]
    fn entropic_loss_splits_between_nutrients() {
        let (n, p) = Membrane::default().entropic_loss(0.0);
        assert_abs_diff_eq!(n, MEMBRANE_LEAK_RATE * NITROGEN_LEAK_SHARE);
        assert_abs_diff_eq!(p, MEMBRANE_LEAK_RATE * PHOSPHORUS_LEAK_SHARE);
    }
}
