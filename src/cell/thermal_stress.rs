use crate::constants::{THERMAL_STRESS_CAP, THERMAL_STRESS_MULTIPLIER};

/// Maintenance multiplier for a cell at `temperature`. 1.0 inside the
/// tolerance band, rising linearly outside it up to `1 + THERMAL_STRESS_CAP`.
pub fn thermal_stress_factor(temperature: f64, optimum: f64, tolerance: f64) -> f64 {
    let excess = ((temperature - optimum).abs() - tolerance).max(0.0);
    1.0 + (excess * THERMAL_STRESS_MULTIPLIER).min(THERMAL_STRESS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn no_stress_inside_tolerance() {
        assert_abs_diff_eq!(thermal_stress_factor(65.0, 60.0, 10.0), 1.0);
        assert_abs_diff_eq!(thermal_stress_factor(50.0, 60.0, 10.0), 1.0);
    }

    #[test]
    fn stress_grows_then_caps() {
        assert_abs_diff_eq!(thermal_stress_factor(90.0, 60.0, 10.0), 1.1);
        assert_abs_diff_eq!(thermal_stress_factor(1000.0, 60.0, 10.0), 3.0);
    }
}
