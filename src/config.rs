use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Grid geometry and band layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    /// World units per grid cell.
    pub resolution: f64,
    /// Fraction of rows above the water surface.
    pub atmosphere_fraction: f64,
    /// Fraction of rows above the sediment surface.
    pub sediment_fraction: f64,
    /// Amplitude of the Perlin modulation applied to initial fields (0 disables it).
    pub noise_amplitude: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            resolution: DEFAULT_RESOLUTION,
            atmosphere_fraction: ATMOSPHERE_FRACTION,
            sediment_fraction: SEDIMENT_FRACTION,
            noise_amplitude: 0.1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    pub atmosphere_rate: f64,
    pub water_rate: f64,
    pub sediment_rate: f64,
    /// Temperature is diffused with the same scheme when set.
    pub diffuse_temperature: bool,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            atmosphere_rate: DIFFUSION_RATE_ATMOSPHERE,
            water_rate: DIFFUSION_RATE_WATER,
            sediment_rate: DIFFUSION_RATE_SEDIMENT,
            diffuse_temperature: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VentLayout {
    /// One alkaline vent in the middle of the sediment surface.
    #[default]
    Single,
    /// One vent of every type spread evenly along the sediment surface.
    Field,
    /// No vents at start; geological events or callers add them.
    Empty,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VentConfig {
    pub layout: VentLayout,
    pub h2_base_flux: f64,
    pub co2_base_flux: f64,
    pub fe2_base_flux: f64,
    pub phosphorus_flux: f64,
    pub nitrogen_flux: f64,
    /// Width in grid columns given to vents created at world init.
    pub default_width: usize,
    /// Enable spontaneous geological events (earthquake, surge, reactivation, cooling).
    pub geological_events: bool,
    pub earthquake_probability: f64,
    pub surge_probability: f64,
    pub reactivation_probability: f64,
    pub cooling_probability: f64,
}

impl Default for VentConfig {
    fn default() -> Self {
        Self {
            layout: VentLayout::Single,
            h2_base_flux: H2_BASE_FLUX,
            co2_base_flux: CO2_BASE_FLUX,
            fe2_base_flux: FE2_BASE_FLUX,
            phosphorus_flux: VENT_PHOSPHORUS_FLUX,
            nitrogen_flux: VENT_NITROGEN_FLUX,
            default_width: 3,
            geological_events: true,
            earthquake_probability: EARTHQUAKE_PROBABILITY,
            surge_probability: SURGE_PROBABILITY,
            reactivation_probability: REACTIVATION_PROBABILITY,
            cooling_probability: COOLING_PROBABILITY,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservoirConfig {
    pub enabled: bool,
    pub atmosphere_o2: f64,
    pub atmosphere_n2: f64,
    pub atmosphere_co2: f64,
    pub ocean_phosphorus: f64,
    pub ocean_nitrogen: f64,
    pub ocean_fe2: f64,
    pub ocean_o2: f64,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            atmosphere_o2: ATMOSPHERE_O2_POOL,
            atmosphere_n2: ATMOSPHERE_N2_POOL,
            atmosphere_co2: ATMOSPHERE_CO2_POOL,
            ocean_phosphorus: OCEAN_PHOSPHORUS_POOL,
            ocean_nitrogen: OCEAN_NITROGEN_POOL,
            ocean_fe2: OCEAN_FE2_POOL,
            ocean_o2: OCEAN_O2_POOL,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenerationConfig {
    pub light_regrowth_rate: f64,
    pub uv_photolysis_rate: f64,
    pub fe2_oxidation_rate: f64,
    pub sediment_nitrogen_flux: f64,
    pub sediment_h2_flux: f64,
    pub phosphorus_weathering: f64,
    /// Return a share of a dead agent's phosphorus to its grid cell.
    pub phosphorus_recycling: bool,
    pub recycling_fraction: f64,
}

impl Default for RegenerationConfig {
    fn default() -> Self {
        Self {
            light_regrowth_rate: LIGHT_REGROWTH_RATE,
            uv_photolysis_rate: UV_PHOTOLYSIS_RATE,
            fe2_oxidation_rate: FE2_OXIDATION_RATE,
            sediment_nitrogen_flux: SEDIMENT_NITROGEN_FLUX,
            sediment_h2_flux: H2_VENT_PRODUCTION * SEDIMENT_H2_FRACTION,
            phosphorus_weathering: PHOSPHORUS_WEATHERING,
            phosphorus_recycling: true,
            recycling_fraction: PHOSPHORUS_RECYCLING_FRACTION,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub initial_population: usize,
    pub max_population: usize,
    pub max_resources: f64,
    pub initial_energy: f64,
    pub initial_nitrogen: f64,
    pub initial_phosphorus: f64,
    pub base_metabolic_cost: f64,
    pub dormancy_cost_multiplier: f64,
    pub phosphorus_cost: f64,
    pub oxygen_safe_threshold: f64,
    pub oxidative_damage_rate: f64,
    /// Probabilistic UV hits screened by pigment.
    pub uv_radiation: bool,
    pub membrane_permeability: f64,
    pub membrane_leak_rate: f64,
    pub reproduction: bool,
    pub reproduction_chance: f64,
    pub reproduction_cooldown: u32,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            initial_population: DEFAULT_INITIAL_POPULATION,
            max_population: DEFAULT_MAX_POPULATION,
            max_resources: MAX_RESOURCES,
            initial_energy: INITIAL_ENERGY,
            initial_nitrogen: INITIAL_NITROGEN,
            initial_phosphorus: INITIAL_PHOSPHORUS,
            base_metabolic_cost: BASE_METABOLIC_COST,
            dormancy_cost_multiplier: DORMANCY_COST_MULTIPLIER,
            phosphorus_cost: PHOSPHORUS_COST,
            oxygen_safe_threshold: OXYGEN_SAFE_THRESHOLD,
            oxidative_damage_rate: OXIDATIVE_DAMAGE_RATE,
            uv_radiation: true,
            membrane_permeability: MEMBRANE_PERMEABILITY,
            membrane_leak_rate: MEMBRANE_LEAK_RATE,
            reproduction: true,
            reproduction_chance: REPRODUCTION_CHANCE,
            reproduction_cooldown: REPRODUCTION_COOLDOWN,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub rate_min: f64,
    pub rate_max: f64,
    pub rate_change: f64,
    pub pressure_strength: f64,
    pub pressure_min: f64,
    pub pressure_max: f64,
    /// Target mutation rate when stability is 0.
    pub target_rate_unstable: f64,
    /// Target mutation rate when stability is 1.
    pub target_rate_stable: f64,
    pub divergence_chance: f64,
    pub cross_metabolism_chance: f64,
    pub cross_metabolism_mortality: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate_min: MUTATION_RATE_MIN,
            rate_max: MUTATION_RATE_MAX,
            rate_change: MUTATION_RATE_CHANGE,
            pressure_strength: STABILITY_PRESSURE_STRENGTH,
            pressure_min: STABILITY_PRESSURE_MIN,
            pressure_max: STABILITY_PRESSURE_MAX,
            target_rate_unstable: TARGET_RATE_UNSTABLE,
            target_rate_stable: TARGET_RATE_STABLE,
            divergence_chance: DIVERGENCE_CHANCE,
            cross_metabolism_chance: CROSS_METABOLISM_CHANCE,
            cross_metabolism_mortality: CROSS_METABOLISM_MORTALITY,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Ticks between stability evaluations.
    pub interval: u64,
    /// Moving-average window length.
    pub history: usize,
    pub oxygen_safe_threshold: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            interval: STABILITY_CALCULATION_INTERVAL,
            history: STABILITY_HISTORY,
            oxygen_safe_threshold: OXYGEN_SAFE_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible runs.
    pub seed: u64,
    /// Ticks executed by `Simulation::run`.
    pub sim_steps: u64,
    /// Progress report cadence in ticks (0 = silent).
    pub report_interval: u64,
    pub grid: GridConfig,
    pub diffusion: DiffusionConfig,
    pub vents: VentConfig,
    pub reservoirs: ReservoirConfig,
    pub regeneration: RegenerationConfig,
    pub cells: CellConfig,
    pub mutation: MutationConfig,
    pub stability: StabilityConfig,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid simulation config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_steps(mut self, sim_steps: u64) -> Self {
        self.sim_steps = sim_steps;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.validate_grid()?;
        self.validate_mutation()?;
        self.validate_cells()?;
        if self.stability.history == 0 {
            return Err("stability history must hold at least one value".to_string());
        }
        if self.stability.interval == 0 {
            return Err("stability interval must be positive".to_string());
        }
        Ok(())
    }

    fn validate_grid(&self) -> Result<(), String> {
        let grid = &self.grid;
        if grid.cols == 0 || grid.rows == 0 {
            return Err(format!("grid must be non-empty, got {}x{}", grid.cols, grid.rows));
        }
        if !(grid.resolution.is_finite() && grid.resolution > 0.0) {
            return Err(format!("resolution must be positive, got {}", grid.resolution));
        }
        if !(0.0..=1.0).contains(&grid.atmosphere_fraction)
            || !(0.0..=1.0).contains(&grid.sediment_fraction)
        {
            return Err("band fractions must lie in [0, 1]".to_string());
        }
        if grid.atmosphere_fraction >= grid.sediment_fraction {
            return Err(format!(
                "atmosphere fraction {} must be below sediment fraction {}",
                grid.atmosphere_fraction, grid.sediment_fraction
            ));
        }
        Ok(())
    }

    fn validate_mutation(&self) -> Result<(), String> {
        let m = &self.mutation;
        let values = [
            ("rate_min", m.rate_min),
            ("rate_max", m.rate_max),
            ("rate_change", m.rate_change),
            ("pressure_strength", m.pressure_strength),
            ("pressure_min", m.pressure_min),
            ("pressure_max", m.pressure_max),
            ("target_rate_unstable", m.target_rate_unstable),
            ("target_rate_stable", m.target_rate_stable),
            ("divergence_chance", m.divergence_chance),
            ("cross_metabolism_chance", m.cross_metabolism_chance),
            ("cross_metabolism_mortality", m.cross_metabolism_mortality),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(format!("mutation {} must be finite, got {}", name, value));
            }
        }
        if m.rate_change < 0.0 {
            return Err(format!("mutation rate_change must be non-negative, got {}", m.rate_change));
        }
        if m.rate_min > m.rate_max {
            return Err(format!(
                "mutation rate range inverted: {} > {}",
                m.rate_min, m.rate_max
            ));
        }
        if m.pressure_min > m.pressure_max {
            return Err(format!(
                "stability pressure range inverted: {} > {}",
                m.pressure_min, m.pressure_max
            ));
        }
        Ok(())
    }

    fn validate_cells(&self) -> Result<(), String> {
        let c = &self.cells;
        if !(c.max_resources.is_finite() && c.max_resources > 0.0) {
            return Err("max_resources must be positive".to_string());
        }
        for (name, value) in [
            ("membrane_permeability", c.membrane_permeability),
            ("membrane_leak_rate", c.membrane_leak_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }
        if c.initial_population > c.max_population {
            return Err(format!(
                "initial population {} exceeds max population {}",
                c.initial_population, c.max_population
            ));
        }
        Ok(())
    }
}
