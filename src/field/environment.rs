use crate::config::{DiffusionConfig, GridConfig};
use crate::constants::*;
use crate::field::chemical_field::ChemicalField;
use crate::field::diffusion::diffuse;
use crate::field::species::Species;
use crate::field::stratification::{Band, Stratification};
use noise::{NoiseFn, Perlin};

/// The grid world: one `ChemicalField` per species plus the band layout.
/// Coordinates in the public API are world units; `resolution` maps them to cells.
#[derive(Debug, Clone)]
pub struct Environment {
    pub strat: Stratification,
    pub resolution: f64,
    fields: Vec<ChemicalField>,
}

impl Environment {
    /// Builds an environment with all fields at zero.
    pub fn empty(grid: &GridConfig, diffusion: &DiffusionConfig) -> Result<Self, String> {
        let strat = Stratification::new(grid, diffusion)?;
        let fields = Species::ALL
            .iter()
            .map(|species| ChemicalField::new(*species, grid.cols, grid.rows))
            .collect();
        let env = Self {
            strat,
            resolution: grid.resolution,
            fields,
        };
        env.check()?;
        Ok(env)
    }

    /// Builds an environment and fills every field from its depth profile.
    pub fn new(grid: &GridConfig, diffusion: &DiffusionConfig, noise_seed: u32) -> Result<Self, String> {
        let mut env = Self::empty(grid, diffusion)?;
        env.seed_fields(noise_seed, grid.noise_amplitude);
        Ok(env)
    }

    fn check(&self) -> Result<(), String> {
        for field in &self.fields {
            if field.cols != self.strat.cols || field.rows != self.strat.rows {
                return Err(format!(
                    "field {} is {}x{} but stratification is {}x{}",
                    field.species.as_str(),
                    field.cols,
                    field.rows,
                    self.strat.cols,
                    self.strat.rows
                ));
            }
        }
        Ok(())
    }

    pub fn cols(&self) -> usize {
        self.strat.cols
    }

    pub fn rows(&self) -> usize {
        self.strat.rows
    }

    pub fn field(&self, species: Species) -> &ChemicalField {
        &self.fields[species.as_index()]
    }

    pub fn field_mut(&mut self, species: Species) -> &mut ChemicalField {
        &mut self.fields[species.as_index()]
    }

    pub fn fields(&self) -> &[ChemicalField] {
        &self.fields
    }

    /// One diffusion pass over a single species using this environment's bands.
    pub fn diffuse_species(&mut self, species: Species) -> f64 {
        diffuse(&mut self.fields[species.as_index()], &self.strat)
    }

    /// World coordinates to grid indices; `None` off-grid.
    pub fn world_to_grid(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.resolution).floor() as usize;
        let row = (y / self.resolution).floor() as usize;
        if col < self.cols() && row < self.rows() {
            Some((col, row))
        } else {
            None
        }
    }

    /// Centre of a grid cell in world units.
    pub fn grid_to_world(&self, col: usize, row: usize) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.resolution,
            (row as f64 + 0.5) * self.resolution,
        )
    }

    pub fn read_field(&self, species: Species, x: f64, y: f64) -> f64 {
        match self.world_to_grid(x, y) {
            Some((col, row)) => self.field(species).get(col, row),
            None => 0.0,
        }
    }

    pub fn consume(&mut self, species: Species, x: f64, y: f64, amount: f64) -> f64 {
        match self.world_to_grid(x, y) {
            Some((col, row)) => self.field_mut(species).take(col, row, amount),
            None => 0.0,
        }
    }

    pub fn produce(&mut self, species: Species, x: f64, y: f64, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        if let Some((col, row)) = self.world_to_grid(x, y) {
            self.field_mut(species).add(col, row, amount);
        }
    }

    pub fn band_at(&self, y: f64) -> Band {
        let row = (y.max(0.0) / self.resolution).floor() as usize;
        self.strat.band(row.min(self.rows().saturating_sub(1)))
    }

    pub fn is_in_sediment(&self, y: f64) -> bool {
        self.band_at(y) == Band::Sediment
    }

    pub fn viscosity_at(&self, y: f64) -> f64 {
        self.strat.viscosity(self.band_at(y))
    }

    /// Water-band limits in world units: (min_x, max_x, min_y, max_y).
    pub fn water_bounds(&self) -> (f64, f64, f64, f64) {
        let r = self.resolution;
        (
            self.strat.water_start_col as f64 * r,
            self.strat.water_end_col as f64 * r,
            self.strat.water_start_row as f64 * r,
            self.strat.water_end_row as f64 * r,
        )
    }

    /// Light level that regeneration pulls each row back toward.
    pub fn light_target(&self, row: usize) -> f64 {
        match self.strat.band(row) {
            Band::Atmosphere => LIGHT_MAX,
            Band::Water => LIGHT_MAX * (-4.0 * self.strat.depth(row)).exp(),
            Band::Sediment => 0.0,
        }
    }

    pub fn uv_profile(row: usize) -> f64 {
        UV_MAX * (-0.15 * row as f64).exp()
    }

    pub fn clamp_all(&mut self) {
        for field in self.fields.iter_mut() {
            field.clamp_all();
        }
    }

    pub fn within_bounds(&self) -> bool {
        self.fields.iter().all(|f| f.within_bounds())
    }

    fn seed_fields(&mut self, noise_seed: u32, amplitude: f64) {
        let perlin = Perlin::new(noise_seed);
        let (cols, rows) = (self.cols(), self.rows());

        for row in 0..rows {
            let band = self.strat.band(row);
            let depth = self.strat.depth(row);
            let light = self.light_target(row);
            let uv = Self::uv_profile(row);

            for col in 0..cols {
                let n = perlin.get([col as f64 * NOISE_SCALE, row as f64 * NOISE_SCALE]);
                let wobble = 1.0 + amplitude * n;
                let unit = (n + 1.0) * 0.5;

                let (h2, nitrogen, phosphorus, fe2, temperature) = match band {
                    Band::Atmosphere => (0.0, 0.0, 0.0, 0.0, BASE_WATER_TEMPERATURE * 0.5),
                    Band::Water => (
                        100.0 * (-4.0 * (1.0 - depth)).exp(),
                        100.0 * (-4.0 * (1.0 - depth)).exp(),
                        80.0 * (-6.0 * (1.0 - depth)).exp(),
                        (FE2_MAX * (-3.0 * (1.0 - depth)).exp()).max(FE2_MIN_INITIAL),
                        BASE_WATER_TEMPERATURE + DEPTH_TEMPERATURE_GAIN * depth,
                    ),
                    Band::Sediment => (
                        100.0,
                        100.0,
                        80.0,
                        FE2_MAX,
                        BASE_WATER_TEMPERATURE + DEPTH_TEMPERATURE_GAIN,
                    ),
                };
                let co2 = CO2_INITIAL_MIN + (CO2_INITIAL_MAX - CO2_INITIAL_MIN) * unit;
                let o2 = O2_INITIAL_MAX * unit;

                self.field_mut(Species::Light).set(col, row, light);
                self.field_mut(Species::Uv).set(col, row, uv);
                self.field_mut(Species::H2).set(col, row, h2 * wobble);
                self.field_mut(Species::Co2).set(col, row, co2);
                self.field_mut(Species::O2).set(col, row, o2);
                self.field_mut(Species::Nitrogen).set(col, row, nitrogen * wobble);
                self.field_mut(Species::Phosphorus).set(col, row, phosphorus * wobble);
                self.field_mut(Species::Fe2).set(col, row, fe2.max(FE2_MIN_INITIAL * wobble));
                self.field_mut(Species::Temperature)
                    .set(col, row, temperature + 5.0 * amplitude * n);
            }
        }
    }
}
