use crate::config::{DiffusionConfig, GridConfig};
use crate::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Atmosphere,
    Water,
    Sediment,
}

impl Band {
    pub fn as_str(self) -> &'static str {
        match self {
            Band::Atmosphere => "atmosphere",
            Band::Water => "water",
            Band::Sediment => "sediment",
        }
    }
}

/// Static band layout of the grid.
///
/// Rows `[0, atmosphere_row)` are air, `[atmosphere_row, sediment_row)` water
/// and `[sediment_row, rows)` sediment.
#[derive(Debug, Clone)]
pub struct Stratification {
    pub cols: usize,
    pub rows: usize,
    pub atmosphere_row: usize,
    pub sediment_row: usize,
    pub water_start_row: usize,
    pub water_end_row: usize,
    pub water_start_col: usize,
    pub water_end_col: usize,
    viscosity: [f64; 3],
    diffusion_rate: [f64; 3],
}

impl Stratification {
    pub fn new(grid: &GridConfig, diffusion: &DiffusionConfig) -> Result<Self, String> {
        let rows = grid.rows;
        let atmosphere_row = (rows as f64 * grid.atmosphere_fraction).floor() as usize;
        let sediment_row = (rows as f64 * grid.sediment_fraction).floor() as usize;
        let strat = Self {
            cols: grid.cols,
            rows,
            atmosphere_row,
            sediment_row,
            water_start_row: atmosphere_row,
            water_end_row: sediment_row,
            water_start_col: 0,
            water_end_col: grid.cols,
            viscosity: [VISCOSITY_ATMOSPHERE, VISCOSITY_WATER, VISCOSITY_SEDIMENT],
            diffusion_rate: [
                diffusion.atmosphere_rate,
                diffusion.water_rate,
                diffusion.sediment_rate,
            ],
        };
        strat.check()?;
        Ok(strat)
    }

    fn check(&self) -> Result<(), String> {
        if self.atmosphere_row >= self.sediment_row || self.sediment_row > self.rows {
            return Err(format!(
                "invalid stratification: atmosphere_row {} sediment_row {} rows {}",
                self.atmosphere_row, self.sediment_row, self.rows
            ));
        }
        Ok(())
    }

    pub fn band(&self, row: usize) -> Band {
        if row < self.atmosphere_row {
            Band::Atmosphere
        } else if row < self.sediment_row {
            Band::Water
        } else {
            Band::Sediment
        }
    }

    fn band_index(band: Band) -> usize {
        match band {
            Band::Atmosphere => 0,
            Band::Water => 1,
            Band::Sediment => 2,
        }
    }

    pub fn viscosity(&self, band: Band) -> f64 {
        self.viscosity[Self::band_index(band)]
    }

    pub fn diffusion_rate(&self, band: Band) -> f64 {
        self.diffusion_rate[Self::band_index(band)]
    }

    pub fn diffusion_rate_at(&self, row: usize) -> f64 {
        self.diffusion_rate(self.band(row))
    }

    /// Fraction of the water column above `row`: 0 at the surface, 1 at the sediment.
    pub fn depth(&self, row: usize) -> f64 {
        let span = (self.sediment_row - self.atmosphere_row).max(1) as f64;
        ((row as f64 - self.atmosphere_row as f64) / span).clamp(0.0, 1.0)
    }

    pub fn water_rows(&self) -> std::ops::Range<usize> {
        self.water_start_row..self.water_end_row
    }

    pub fn sediment_rows(&self) -> std::ops::Range<usize> {
        self.sediment_row..self.rows
    }
}
