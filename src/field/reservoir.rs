use crate::config::ReservoirConfig;
use crate::constants::*;
use crate::field::environment::Environment;
use crate::field::species::Species;

/// A fixed-concentration pool outside the grid.
#[derive(Debug, Clone, Copy)]
pub struct Pool {
    pub species: Species,
    pub concentration: f64,
    /// Fraction of the gradient exchanged per tick.
    pub diffusion_k: f64,
}

impl Pool {
    pub fn new(species: Species, concentration: f64, diffusion_k: f64) -> Self {
        Self {
            species,
            concentration,
            diffusion_k,
        }
    }

    pub fn flux(&self, grid_value: f64) -> f64 {
        self.diffusion_k * (self.concentration - grid_value)
    }
}

/// Net exchange over one coupling pass. Positive means inflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeTotals {
    pub atmosphere: [f64; Species::COUNT],
    pub ocean: [f64; Species::COUNT],
}

impl ExchangeTotals {
    pub fn net(&self, species: Species) -> f64 {
        self.atmosphere[species.as_index()] + self.ocean[species.as_index()]
    }
}

/// The infinite atmosphere above the surface row and the open ocean beyond the side walls.
#[derive(Debug, Clone)]
pub struct Reservoirs {
    pub atmosphere: Vec<Pool>,
    pub ocean: Vec<Pool>,
}

impl Reservoirs {
    pub fn new(config: &ReservoirConfig) -> Self {
        Self {
            atmosphere: vec![
                Pool::new(Species::O2, config.atmosphere_o2, ATMOSPHERE_O2_K),
                Pool::new(Species::Nitrogen, config.atmosphere_n2, ATMOSPHERE_N2_K),
                Pool::new(Species::Co2, config.atmosphere_co2, ATMOSPHERE_CO2_K),
            ],
            ocean: vec![
                Pool::new(Species::Phosphorus, config.ocean_phosphorus, OCEAN_PHOSPHORUS_K),
                Pool::new(Species::Nitrogen, config.ocean_nitrogen, OCEAN_NITROGEN_K),
                Pool::new(Species::Fe2, config.ocean_fe2, OCEAN_FE2_K),
                Pool::new(Species::O2, config.ocean_o2, OCEAN_O2_K),
            ],
        }
    }

    /// Applies one tick of boundary exchange to `env`.
    pub fn couple(&self, env: &mut Environment) -> ExchangeTotals {
        let mut totals = ExchangeTotals::default();
        let surface_row = env.strat.water_start_row;
        let cols = env.cols();

        for pool in &self.atmosphere {
            let field = env.field_mut(pool.species);
            for col in 0..cols {
                let flux = pool.flux(field.get(col, surface_row));
                totals.atmosphere[pool.species.as_index()] += field.add(col, surface_row, flux);
            }
        }

        let left = env.strat.water_start_col;
        let right = env.strat.water_end_col.saturating_sub(1);
        let edges = if left == right { vec![left] } else { vec![left, right] };
        let water_rows = env.strat.water_rows();
        for pool in &self.ocean {
            let field = env.field_mut(pool.species);
            for row in water_rows.clone() {
                for &col in &edges {
                    let flux = pool.flux(field.get(col, row));
                    totals.ocean[pool.species.as_index()] += field.add(col, row, flux);
                }
            }
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiffusionConfig, GridConfig};
    use approx::assert_abs_diff_eq;

    fn empty_env() -> Environment {
        Environment::empty(&GridConfig::default(), &DiffusionConfig::default()).unwrap()
    }

    #[test]
    fn flux_is_gradient_proportional() {
        let pool = Pool::new(Species::Phosphorus, 50.0, 0.02);
        assert_abs_diff_eq!(pool.flux(0.0), 1.0);
        assert_abs_diff_eq!(pool.flux(50.0), 0.0);
        assert_abs_diff_eq!(pool.flux(100.0), -1.0);
    }

    #[test]
    fn edges_refill_from_ocean() {
        let mut env = empty_env();
        let reservoirs = Reservoirs::new(&ReservoirConfig::default());
        let row = env.strat.water_start_row + 5;
        let totals = reservoirs.couple(&mut env);

        let p = env.field(Species::Phosphorus);
        assert_abs_diff_eq!(p.get(0, row), OCEAN_PHOSPHORUS_POOL * OCEAN_PHOSPHORUS_K);
        assert_abs_diff_eq!(p.get(p.cols - 1, row), OCEAN_PHOSPHORUS_POOL * OCEAN_PHOSPHORUS_K);
        assert_abs_diff_eq!(p.get(p.cols / 2, row), 0.0);
        assert!(totals.net(Species::Phosphorus) > 0.0);
    }

    #[test]
    fn surface_exchanges_with_atmosphere() {
        let mut env = empty_env();
        let surface = env.strat.water_start_row;
        env.field_mut(Species::O2).set(10, surface, 20.0);
        let reservoirs = Reservoirs::new(&ReservoirConfig::default());
        reservoirs.couple(&mut env);

        // oxygen-rich surface water degasses toward the trace atmospheric level
        assert!(env.field(Species::O2).get(10, surface) < 20.0);
        assert!(env.field(Species::Co2).get(10, surface) > 0.0);
        assert!(env.within_bounds());
    }
}
