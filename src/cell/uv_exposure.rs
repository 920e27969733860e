use crate::constants::*;
use crate::rng::SimRng;
use rand::Rng;

/// Rec. 601 luma of the fully saturated colour at `hue` degrees, in [0, 1].
pub fn pigment_brightness(hue: f64) -> f64 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    0.299 * r + 0.587 * g + 0.114 * b
}

/// One UV hit after photoprotection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvHit {
    pub effective_uv: f64,
    /// Energy spent on repair.
    pub repair_cost: f64,
    /// Repair was imperfect; the next child inherits an extra mutation.
    pub mutation: bool,
    pub lethal: bool,
}

/// Probabilistic UV damage. Dark pigments screen part of the local UV.
#[derive(Debug, Clone, Copy)]
pub struct UvExposure {
    pub surface_intensity: f64,
    pub damage_chance_max: f64,
    pub repair_cost_max: f64,
    pub lethal_threshold: f64,
    pub lethal_chance: f64,
}

impl Default for UvExposure {
    fn default() -> Self {
        Self {
            surface_intensity: UV_MAX,
            damage_chance_max: UV_DAMAGE_CHANCE_MAX,
            repair_cost_max: UV_REPAIR_COST_MAX,
            lethal_threshold: UV_LETHAL_THRESHOLD,
            lethal_chance: UV_LETHAL_CHANCE,
        }
    }
}

impl UvExposure {
    /// Divisor applied to incoming UV: 1.0 for white pigment, `PIGMENT_PROTECTION_MAX` for black.
    pub fn photoprotection(&self, hue: f64) -> f64 {
        PIGMENT_PROTECTION_MAX - (PIGMENT_PROTECTION_MAX - 1.0) * pigment_brightness(hue)
    }

    pub fn effective_uv(&self, local_uv: f64, hue: f64) -> f64 {
        local_uv.max(0.0) / self.photoprotection(hue)
    }

    fn intensity_fraction(&self, effective_uv: f64) -> f64 {
        (effective_uv / self.surface_intensity).clamp(0.0, 1.0)
    }

    pub fn damage_chance(&self, effective_uv: f64) -> f64 {
        self.intensity_fraction(effective_uv) * self.damage_chance_max
    }

    /// Poor repair machinery makes every hit more expensive.
    pub fn repair_cost(&self, effective_uv: f64, repair_efficiency: f64) -> f64 {
        self.intensity_fraction(effective_uv) * self.repair_cost_max / repair_efficiency.max(MIN_UV_REPAIR_EFFICIENCY)
    }

    /// Rolls one tick of exposure. `None` when no hit landed.
    pub fn expose(&self, local_uv: f64, hue: f64, repair_efficiency: f64, rng: &mut SimRng) -> Option<UvHit> {
        let effective_uv = self.effective_uv(local_uv, hue);
        if !rng.random_bool(self.damage_chance(effective_uv).clamp(0.0, 1.0)) {
            return None;
        }
        let mutation = rng.random::<f64>() > repair_efficiency;
        let lethal = effective_uv > self.lethal_threshold && rng.random_bool(self.lethal_chance.clamp(0.0, 1.0));
        Some(UvHit {
            effective_uv,
            repair_cost: self.repair_cost(effective_uv, repair_efficiency),
            mutation,
            lethal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use approx::assert_abs_diff_eq;
    use more_asserts::{assert_gt, assert_lt};

    #[test]
    fn blue_pigment_screens_more_than_yellow() {
        let model = UvExposure::default();
        assert_abs_diff_eq!(pigment_brightness(240.0), 0.114, epsilon = 1e-12);
        assert_abs_diff_eq!(pigment_brightness(60.0), 0.886, epsilon = 1e-12);
        assert_abs_diff_eq!(pigment_brightness(-120.0), pigment_brightness(240.0), epsilon = 1e-12);
        assert_gt!(model.photoprotection(240.0), model.photoprotection(60.0));
        assert_lt!(model.effective_uv(100.0, 240.0), model.effective_uv(100.0, 60.0));
    }

    #[test]
    fn chance_and_cost_scale_with_effective_uv() {
        let model = UvExposure::default();
        assert_abs_diff_eq!(model.damage_chance(0.0), 0.0);
        assert_abs_diff_eq!(model.damage_chance(50.0), UV_DAMAGE_CHANCE_MAX / 2.0);
        assert_abs_diff_eq!(model.damage_chance(500.0), UV_DAMAGE_CHANCE_MAX);
        assert_abs_diff_eq!(model.repair_cost(50.0, 0.5), UV_REPAIR_COST_MAX);
        assert_abs_diff_eq!(model.repair_cost(50.0, 0.0), UV_REPAIR_COST_MAX / 2.0 / MIN_UV_REPAIR_EFFICIENCY);
    }

    #[test]
    fn certain_exposure_hits_and_kills_above_threshold() {
        let model = UvExposure {
            surface_intensity: 1.0,
            damage_chance_max: 1.0,
            lethal_chance: 1.0,
            ..UvExposure::default()
        };
        let mut rng = create_rng(3);

        // yellow pigment barely screens full surface UV
        let hit = model.expose(UV_MAX, 60.0, 1.0, &mut rng).unwrap();
        assert_gt!(hit.effective_uv, UV_LETHAL_THRESHOLD);
        assert!(hit.lethal);
        assert!(!hit.mutation);

        let hit = model.expose(UV_MAX, 240.0, 0.0, &mut rng).unwrap();
        assert_lt!(hit.effective_uv, UV_LETHAL_THRESHOLD);
        assert!(!hit.lethal);
        assert!(hit.mutation);
    }

    #[test]
    fn no_uv_means_no_hits() {
        let model = UvExposure::default();
        let mut rng = create_rng(4);
        for _ in 0..10_000 {
            assert!(model.expose(0.0, 30.0, 0.5, &mut rng).is_none());
        }
    }
}
