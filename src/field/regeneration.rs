use crate::config::RegenerationConfig;
use crate::constants::*;
use crate::field::environment::Environment;
use crate::field::species::Species;
use crate::field::stratification::Band;

/// Amounts moved by one regeneration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegenerationTotals {
    pub light_change: f64,
    pub photolysis_o2: f64,
    pub iron_oxidized: f64,
    pub sediment_nitrogen: f64,
    pub sediment_h2: f64,
    pub weathered_phosphorus: f64,
}

/// Background production and decay not tied to any vent.
pub fn regenerate(env: &mut Environment, config: &RegenerationConfig) -> RegenerationTotals {
    let mut totals = RegenerationTotals::default();
    let (cols, rows) = (env.cols(), env.rows());
    let surface_row = env.strat.water_start_row;

    for row in 0..rows {
        let band = env.strat.band(row);
        let light_target = env.light_target(row);

        for col in 0..cols {
            let light = env.field(Species::Light).get(col, row);
            let delta = (light_target - light) * config.light_regrowth_rate;
            totals.light_change += env.field_mut(Species::Light).add(col, row, delta);

            if band == Band::Atmosphere || row == surface_row {
                let uv = env.field(Species::Uv).get(col, row);
                if uv > UV_PHOTOLYSIS_THRESHOLD {
                    totals.photolysis_o2 += env
                        .field_mut(Species::O2)
                        .add(col, row, config.uv_photolysis_rate * uv);
                }
            }

            let fe = env.field(Species::Fe2).get(col, row);
            if fe > FE2_DEPLETION_THRESHOLD {
                let o2 = env.field(Species::O2).get(col, row);
                let reacted = config.fe2_oxidation_rate * fe * o2 / O2_MAX;
                let removed = env.field_mut(Species::O2).take(col, row, reacted);
                env.field_mut(Species::Fe2).take(col, row, removed);
                totals.iron_oxidized += removed;
            }

            if band == Band::Sediment {
                totals.sediment_nitrogen += env
                    .field_mut(Species::Nitrogen)
                    .add(col, row, config.sediment_nitrogen_flux);
                totals.sediment_h2 += env.field_mut(Species::H2).add(col, row, config.sediment_h2_flux);
                totals.weathered_phosphorus += env
                    .field_mut(Species::Phosphorus)
                    .add(col, row, config.phosphorus_weathering);
            }
        }
    }
    totals
}

/// Return `fraction` of a dead agent's phosphorus to the cell it died in.
/// Returns what actually landed after the cap.
pub fn recycle_phosphorus(env: &mut Environment, x: f64, y: f64, stored: f64, fraction: f64) -> f64 {
    let amount = stored.max(0.0) * fraction.clamp(0.0, 1.0);
    match env.world_to_grid(x, y) {
        Some((col, row)) => env.field_mut(Species::Phosphorus).add(col, row, amount),
        None => 0.0,
    }
}
