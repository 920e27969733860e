// Grid geometry defaults
pub const DEFAULT_COLS: usize = 80;
pub const DEFAULT_ROWS: usize = 60;
pub const DEFAULT_RESOLUTION: f64 = 10.0; // world units per grid cell
pub const ATMOSPHERE_FRACTION: f64 = 0.15;
pub const SEDIMENT_FRACTION: f64 = 0.9;

// Band diffusion rates (fraction moved toward the neighbour average per tick)
pub const DIFFUSION_RATE_ATMOSPHERE: f64 = 0.25;
pub const DIFFUSION_RATE_WATER: f64 = 0.1;
pub const DIFFUSION_RATE_SEDIMENT: f64 = 0.005;

// Band viscosity (velocity retained per tick)
pub const VISCOSITY_ATMOSPHERE: f64 = 0.99;
pub const VISCOSITY_WATER: f64 = 0.95;
pub const VISCOSITY_SEDIMENT: f64 = 0.60;

// Field caps
pub const H2_MAX: f64 = 250.0;
pub const CO2_MAX: f64 = 150.0;
pub const O2_MAX: f64 = 100.0;
pub const NITROGEN_MAX: f64 = 200.0;
pub const PHOSPHORUS_MAX: f64 = 200.0;
pub const FE2_MAX: f64 = 200.0;
pub const LIGHT_MAX: f64 = 100.0;
pub const UV_MAX: f64 = 100.0;
pub const TEMPERATURE_MAX: f64 = 400.0;

// Initial field profiles
pub const FE2_MIN_INITIAL: f64 = 50.0;
pub const CO2_INITIAL_MIN: f64 = 80.0;
pub const CO2_INITIAL_MAX: f64 = 100.0;
pub const O2_INITIAL_MAX: f64 = 1.0;
pub const BASE_WATER_TEMPERATURE: f64 = 50.0;
pub const DEPTH_TEMPERATURE_GAIN: f64 = 30.0;
pub const NOISE_SCALE: f64 = 0.1;

// Vent emission
pub const H2_BASE_FLUX: f64 = 5.0;
pub const CO2_BASE_FLUX: f64 = 2.0;
pub const FE2_BASE_FLUX: f64 = 1.0;
pub const VENT_PHOSPHORUS_FLUX: f64 = 0.5;
pub const VENT_NITROGEN_FLUX: f64 = 0.5;
pub const VENT_MAX_INTENSITY: f64 = 3.0;
pub const PLUME_MAX_HEIGHT: usize = 20;
pub const PLUME_SPREAD_PER_ROW: f64 = 0.2;
pub const PLUME_BUOYANCY_FALLOFF: f64 = 0.02;
pub const PLUME_MIN_WEIGHT: f64 = 0.01;
pub const PLUME_RADIUS_FACTOR: f64 = 3.0;
pub const SUBAERIAL_CONDUCTION: f64 = 0.8;
pub const TRACE_ELEMENT_RANGE: f64 = 400.0; // world units at intensity 1.0

// Vent lifecycle
pub const WANING_THRESHOLD: f64 = 0.3;
pub const DORMANT_THRESHOLD: f64 = 0.01;
pub const WANING_DECAY: f64 = 0.999;
pub const WANING_AGE_FRACTION: f64 = 0.9;
pub const REACTIVATION_INTENSITY: f64 = 1.0;

// Geological events: (probability per tick, cooldown ticks)
pub const EARTHQUAKE_PROBABILITY: f64 = 0.00005;
pub const EARTHQUAKE_COOLDOWN: u32 = 3000;
pub const SURGE_PROBABILITY: f64 = 0.0001;
pub const SURGE_COOLDOWN: u32 = 2000;
pub const SURGE_MULTIPLIER: f64 = 2.0;
pub const SURGE_DURATION: u32 = 300;
pub const REACTIVATION_PROBABILITY: f64 = 0.0002;
pub const REACTIVATION_COOLDOWN: u32 = 1500;
pub const COOLING_PROBABILITY: f64 = 0.0003;
pub const COOLING_COOLDOWN: u32 = 1000;
pub const COOLING_FACTOR: f64 = 0.7;
pub const EVENT_HISTORY_LIMIT: usize = 50;

// Reservoirs
pub const ATMOSPHERE_O2_POOL: f64 = 0.1;
pub const ATMOSPHERE_N2_POOL: f64 = 1000.0;
pub const ATMOSPHERE_CO2_POOL: f64 = 500.0;
pub const ATMOSPHERE_O2_K: f64 = 0.05;
pub const ATMOSPHERE_N2_K: f64 = 0.03;
pub const ATMOSPHERE_CO2_K: f64 = 0.08;
pub const OCEAN_PHOSPHORUS_POOL: f64 = 50.0;
pub const OCEAN_NITROGEN_POOL: f64 = 50.0;
pub const OCEAN_FE2_POOL: f64 = 100.0;
pub const OCEAN_O2_POOL: f64 = 5.0;
pub const OCEAN_PHOSPHORUS_K: f64 = 0.02;
pub const OCEAN_NITROGEN_K: f64 = 0.04;
pub const OCEAN_FE2_K: f64 = 0.03;
pub const OCEAN_O2_K: f64 = 0.04;

// Regeneration
pub const LIGHT_REGROWTH_RATE: f64 = 0.05;
pub const UV_PHOTOLYSIS_THRESHOLD: f64 = 50.0;
pub const UV_PHOTOLYSIS_RATE: f64 = 0.0001;
pub const FE2_OXIDATION_RATE: f64 = 0.015;
pub const FE2_DEPLETION_THRESHOLD: f64 = 10.0;
pub const SEDIMENT_NITROGEN_FLUX: f64 = 0.05;
pub const H2_VENT_PRODUCTION: f64 = 20.0;
pub const SEDIMENT_H2_FRACTION: f64 = 0.025; // of H2_VENT_PRODUCTION per sediment cell
pub const PHOSPHORUS_WEATHERING: f64 = 0.01;
pub const PHOSPHORUS_RECYCLING_FRACTION: f64 = 0.8;

// Agent reserves and costs
pub const MAX_RESOURCES: f64 = 130.0;
pub const INITIAL_ENERGY: f64 = 100.0;
pub const INITIAL_OXYGEN: f64 = 0.0;
pub const INITIAL_NITROGEN: f64 = 50.0;
pub const INITIAL_PHOSPHORUS: f64 = 50.0;
pub const BASE_METABOLIC_COST: f64 = 0.08;
pub const DORMANCY_COST_MULTIPLIER: f64 = 0.3;
pub const NITROGEN_COST: f64 = 0.01;
pub const PHOSPHORUS_COST: f64 = 0.002;
pub const AEROBIC_OXYGEN_COST: f64 = 0.05;
pub const BYPRODUCT_CO2_RATIO: f64 = 0.5;
pub const OXYGEN_UPTAKE: f64 = 0.1;
pub const SPAWN_JITTER: f64 = 5.0; // world units between parent and child
pub const REFERENCE_SIZE: f64 = 15.0;
pub const GEOCHEMICAL_BONUS: f64 = 0.5;
pub const LIGHT_REFERENCE: f64 = 100.0;
pub const LIGHT_ABSORPTION: f64 = 0.05; // share of required light actually removed (shading)

// Oxygen tolerance
pub const OXYGEN_SAFE_THRESHOLD: f64 = 10.0;
pub const OXIDATIVE_DAMAGE_RATE: f64 = 0.05;
pub const SOD_MAINTENANCE_COST: f64 = 0.1;
pub const SOD_SYNTHESIS_RATE: f64 = 0.05;
pub const INITIAL_SOD_LEVEL: f64 = 0.5;

// Membrane
pub const MEMBRANE_PERMEABILITY: f64 = 0.15;
pub const MEMBRANE_LEAK_RATE: f64 = 0.02;
pub const NUTRIENT_DIFFUSION_SCALE: f64 = 0.1; // N/P cross slower than small non-polar molecules
pub const NITROGEN_LEAK_SHARE: f64 = 0.5;
pub const PHOSPHORUS_LEAK_SHARE: f64 = 0.1;
pub const MIN_SPEED_FACTOR: f64 = 0.3;

// UV radiation
pub const UV_DAMAGE_CHANCE_MAX: f64 = 0.01; // per tick at full surface intensity
pub const UV_REPAIR_COST_MAX: f64 = 2.0;
pub const UV_LETHAL_THRESHOLD: f64 = 80.0; // effective UV
pub const UV_LETHAL_CHANCE: f64 = 0.001;
pub const PIGMENT_PROTECTION_MAX: f64 = 2.5; // black pigment divides UV by this
pub const MIN_UV_REPAIR_EFFICIENCY: f64 = 0.05;

// Structural integrity
pub const MAX_STRUCTURAL_DAMAGE: f64 = 100.0;
pub const REPAIR_ENERGY_COST: f64 = 0.5;
pub const BASE_REPAIR_SPEED: f64 = 0.2;

// Thermal stress
pub const THERMAL_OPTIMUM: f64 = 60.0;
pub const THERMAL_TOLERANCE: f64 = 10.0;
pub const THERMAL_STRESS_MULTIPLIER: f64 = 0.005;
pub const THERMAL_STRESS_CAP: f64 = 2.0;

// Movement
pub const BROWNIAN_STRENGTH: f64 = 0.1;
pub const CHEMOTAXIS_STRENGTH: f64 = 0.002;
pub const MAX_SPEED: f64 = 1.5;

// Reproduction
pub const REPRODUCTION_ENERGY_FRACTION: f64 = 0.40;
pub const REPRODUCTION_PHOSPHORUS_FRACTION: f64 = 0.40;
pub const REPRODUCTION_CHANCE: f64 = 0.01;
pub const REPRODUCTION_COOLDOWN: u32 = 300;
pub const REPRODUCTION_MAX_DAMAGE: f64 = 20.0;
pub const DEFAULT_MAX_POPULATION: usize = 400;
pub const DEFAULT_INITIAL_POPULATION: usize = 40;

// Proteome
pub const ENZYME_KM: f64 = 10.0;
pub const ENZYME_DEGRADATION_CHANCE: f64 = 0.001;
pub const COFACTOR_SATURATION: f64 = 0.1;
pub const COFACTOR_BASAL: f64 = 0.1;
pub const GENE_EXPRESSION_INTERVAL: u64 = 100;

// Mutation
pub const MUTATION_RATE_MIN: f64 = 0.01;
pub const MUTATION_RATE_MAX: f64 = 0.3;
pub const MUTATION_RATE_INITIAL: f64 = 0.15;
pub const MUTATION_RATE_CHANGE: f64 = 0.02;
pub const STABILITY_PRESSURE_STRENGTH: f64 = 0.1;
pub const STABILITY_PRESSURE_MIN: f64 = -0.01;
pub const STABILITY_PRESSURE_MAX: f64 = 0.02;
pub const TARGET_RATE_UNSTABLE: f64 = 0.15;
pub const TARGET_RATE_STABLE: f64 = 0.03;
pub const DIVERGENCE_CHANCE: f64 = 0.01;
pub const CROSS_METABOLISM_CHANCE: f64 = 0.00001;
pub const CROSS_METABOLISM_MORTALITY: f64 = 0.8;
pub const METABOLIC_DRIFT_RANGE: f64 = 0.005;
pub const EFFICIENCY_MIN: f64 = 0.5;
pub const EFFICIENCY_MAX: f64 = 2.0;
pub const EFFICIENCY_MUTATION_RANGE: f64 = 0.1;
pub const ORGANELLE_EFFICIENCY_THRESHOLD: f64 = 1.0;
pub const SIZE_MIN: f64 = 5.0;
pub const SIZE_MAX: f64 = 40.0;
pub const SIZE_MUTATION_RANGE: f64 = 2.0;
pub const ERA_PRIMORDIAL_RATE: f64 = 0.15;
pub const ERA_TRANSITION_RATE: f64 = 0.08;

// Stability
pub const STABILITY_CALCULATION_INTERVAL: u64 = 100;
pub const STABILITY_HISTORY: usize = 50;
pub const MORTALITY_PENALTY_SCALE: f64 = 5.0;
pub const MORTALITY_PENALTY_CAP: f64 = 0.5;
pub const VOLATILITY_PENALTY_CAP: f64 = 0.3;
pub const OXYGEN_PENALTY_RANGE: f64 = 50.0;
pub const OXYGEN_PENALTY_CAP: f64 = 0.4;
