use crate::cell::dna::{Dna, EvolutionaryEra};
use crate::cell::membrane::Membrane;
use crate::cell::organelle::Organelle;
use crate::cell::oxygen_tolerance::OxygenTolerance;
use crate::cell::pathway::PathwayKind;
use crate::cell::proteome::Proteome;
use crate::cell::uv_exposure::UvExposure;
use crate::config::CellConfig;
use crate::constants::*;
use crate::field::{Environment, Species};
use crate::rng::SimRng;
use glam::DVec2;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    EnergyStarvation,
    /// Energy ran out while paying for damage repair.
    RepairBankruptcy,
    OxygenDepletion,
    NitrogenDepletion,
    PhosphorusDepletion,
    StructuralOxidative,
    StructuralAccumulation,
    UvRadiation,
    /// Lethal pathway cross-transition at birth.
    CrossMetabolism,
}

impl DeathCause {
    pub const ALL: [DeathCause; 9] = [
        DeathCause::EnergyStarvation,
        DeathCause::RepairBankruptcy,
        DeathCause::OxygenDepletion,
        DeathCause::NitrogenDepletion,
        DeathCause::PhosphorusDepletion,
        DeathCause::StructuralOxidative,
        DeathCause::StructuralAccumulation,
        DeathCause::UvRadiation,
        DeathCause::CrossMetabolism,
    ];

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::EnergyStarvation => "energy_starvation",
            DeathCause::RepairBankruptcy => "repair_bankruptcy",
            DeathCause::OxygenDepletion => "oxygen_depletion",
            DeathCause::NitrogenDepletion => "nitrogen_depletion",
            DeathCause::PhosphorusDepletion => "phosphorus_depletion",
            DeathCause::StructuralOxidative => "structural_oxidative",
            DeathCause::StructuralAccumulation => "structural_accumulation",
            DeathCause::UvRadiation => "uv_radiation",
            DeathCause::CrossMetabolism => "cross_metabolism",
        }
    }
}

/// World-space box agents are confined to: the water band plus the first
/// sediment row, so vent-side cells can reach the geochemical bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Habitat {
    pub min: DVec2,
    pub max: DVec2,
}

impl Habitat {
    pub fn from_env(env: &Environment) -> Self {
        let r = env.resolution;
        let strat = &env.strat;
        let bottom = (strat.sediment_row + 1).min(strat.rows);
        Self {
            min: DVec2::new(strat.water_start_col as f64 * r, strat.water_start_row as f64 * r),
            max: DVec2::new(strat.water_end_col as f64 * r, bottom as f64 * r),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Uniform random point inside the habitat.
    pub fn sample(&self, rng: &mut SimRng) -> DVec2 {
        let span = (self.max - self.min).max(DVec2::ZERO);
        self.min + DVec2::new(rng.random::<f64>() * span.x, rng.random::<f64>() * span.y)
    }

    fn inner_max(&self) -> DVec2 {
        DVec2::new(
            (self.max.x - 1e-6).max(self.min.x),
            (self.max.y - 1e-6).max(self.min.y),
        )
    }

    /// Reflect a position that left the box and flip the matching velocity axis.
    pub fn bounce(&self, position: &mut DVec2, velocity: &mut DVec2) {
        let hi = self.inner_max();
        if position.x < self.min.x {
            position.x = 2.0 * self.min.x - position.x;
            velocity.x = -velocity.x;
        } else if position.x > hi.x {
            position.x = 2.0 * hi.x - position.x;
            velocity.x = -velocity.x;
        }
        if position.y < self.min.y {
            position.y = 2.0 * self.min.y - position.y;
            velocity.y = -velocity.y;
        } else if position.y > hi.y {
            position.y = 2.0 * hi.y - position.y;
            velocity.y = -velocity.y;
        }
        *position = position.clamp(self.min, hi);
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: u64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub energy: f64,
    pub oxygen: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub max_resources: f64,
    pub dna: Dna,
    pub organelles: Vec<Organelle>,
    pub proteome: Proteome,
    pub structural_damage: f64,
    pub sod_level: f64,
    /// An imperfect UV repair left a lesion the next child inherits.
    pub uv_mutation_pending: bool,
    pub reproduction_cooldown: u32,
    pub age: u64,
    pub last_pathway: Option<PathwayKind>,
    /// Oxidative damage taken during the current tick.
    pub oxidative_damage: f64,
    pub death_cause: Option<DeathCause>,
}

impl Agent {
    pub fn new(id: u64, position: DVec2, dna: Dna, config: &CellConfig) -> Self {
        let organelles = Organelle::derive_from(&dna);
        let max = Membrane::storage_capacity(config.max_resources, dna.size);
        Self {
            id,
            position,
            velocity: DVec2::ZERO,
            energy: config.initial_energy.clamp(0.0, max),
            oxygen: INITIAL_OXYGEN.clamp(0.0, max),
            nitrogen: config.initial_nitrogen.clamp(0.0, max),
            phosphorus: config.initial_phosphorus.clamp(0.0, max),
            max_resources: max,
            dna,
            organelles,
            proteome: Proteome::new(),
            structural_damage: 0.0,
            sod_level: INITIAL_SOD_LEVEL,
            uv_mutation_pending: false,
            reproduction_cooldown: 0,
            age: 0,
            last_pathway: None,
            oxidative_damage: 0.0,
            death_cause: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_cause.is_none()
    }

    fn clamp_reserves(&mut self) {
        let max = self.max_resources;
        self.energy = self.energy.clamp(0.0, max);
        self.oxygen = self.oxygen.clamp(0.0, max);
        self.nitrogen = self.nitrogen.clamp(0.0, max);
        self.phosphorus = self.phosphorus.clamp(0.0, max);
    }

    fn size_ratio(&self) -> f64 {
        self.dna.size / REFERENCE_SIZE
    }

    /// Base upkeep before thermal stress and metabolic efficiency.
    pub fn maintenance_cost(&self, base_metabolic_cost: f64) -> f64 {
        let organelles: f64 = self.organelles.iter().map(|o| o.maintenance_cost()).sum();
        base_metabolic_cost * self.size_ratio().sqrt() + organelles
    }

    pub fn movement(&mut self, env: &Environment, habitat: &Habitat, rng: &mut SimRng) {
        let angle = rng.random_range(0.0..TAU);
        let brownian = DVec2::from_angle(angle) * BROWNIAN_STRENGTH;

        let step = env.resolution;
        let (x, y) = (self.position.x, self.position.y);
        let gradient = DVec2::new(
            env.read_field(Species::H2, x + step, y) - env.read_field(Species::H2, x - step, y),
            env.read_field(Species::H2, x, y + step) - env.read_field(Species::H2, x, y - step),
        );
        let chemotaxis = gradient * CHEMOTAXIS_STRENGTH * (1.0 + self.dna.flagella_level);

        self.velocity = ((self.velocity + brownian + chemotaxis) * env.viscosity_at(y))
            .clamp_length_max(MAX_SPEED * Membrane::speed_factor(self.dna.size));
        self.position += self.velocity;
        habitat.bounce(&mut self.position, &mut self.velocity);

        let speed = self.velocity.length();
        let cost: f64 = self.organelles.iter().map(|o| o.movement_cost(speed)).sum();
        self.energy = (self.energy - cost).max(0.0);
    }

    /// Apply the selector's net delta and reserve draw.
    pub fn apply_metabolism(&mut self, pathway: Option<PathwayKind>, reserve_used: f64, energy_delta: f64) {
        self.last_pathway = pathway;
        self.energy -= reserve_used + energy_delta;
        self.clamp_reserves();
    }

    /// Nutrient costs, oxygen handling for O2-using cells, passive N/P exchange through the membrane.
    pub fn upkeep(&mut self, env: &mut Environment, phosphorus_cost: f64, membrane: &Membrane) {
        let ratio = self.size_ratio();
        self.nitrogen -= NITROGEN_COST * ratio;
        self.phosphorus -= phosphorus_cost * ratio;

        let (x, y) = (self.position.x, self.position.y);
        if self.dna.enabled_pathways().any(|k| k.profile().requires_o2) {
            let room = (self.max_resources - self.oxygen).max(0.0);
            self.oxygen += env.consume(Species::O2, x, y, OXYGEN_UPTAKE.min(room));
        }
        if self.dna.needs_oxygen() {
            self.oxygen -= AEROBIC_OXYGEN_COST;
        }

        let damage = self.structural_damage;
        let inflow = membrane.inflow(
            env.read_field(Species::Nitrogen, x, y),
            self.nitrogen,
            self.max_resources - self.nitrogen,
            damage,
        );
        self.nitrogen += env.consume(Species::Nitrogen, x, y, inflow);
        let inflow = membrane.inflow(
            env.read_field(Species::Phosphorus, x, y),
            self.phosphorus,
            self.max_resources - self.phosphorus,
            damage,
        );
        self.phosphorus += env.consume(Species::Phosphorus, x, y, inflow);

        if !env.is_in_sediment(y) {
            let (n_loss, p_loss) = membrane.entropic_loss(damage);
            self.nitrogen -= n_loss;
            self.phosphorus -= p_loss;
        }
    }

    /// Adapt SOD and pay for it, then take oxidative damage at the local O2 level.
    /// Protection comes from the genetic SOD efficiency; the expressed level only sets the upkeep.
    pub fn oxygen_stress(&mut self, local_o2: f64, tolerance: &OxygenTolerance) {
        self.sod_level = tolerance.adapt_sod(self.sod_level, self.dna.sod_efficiency);
        self.energy -= tolerance.sod_maintenance(self.sod_level);
        self.oxidative_damage = tolerance.oxidative_damage(local_o2, self.dna.sod_efficiency);
        self.structural_damage = (self.structural_damage + self.oxidative_damage).min(MAX_STRUCTURAL_DAMAGE);
    }

    /// Returns true when the hit was lethal.
    pub fn uv_stress(&mut self, local_uv: f64, model: &UvExposure, rng: &mut SimRng) -> bool {
        let Some(hit) = model.expose(local_uv, self.dna.hue, self.dna.dna_repair_efficiency, rng) else {
            return false;
        };
        self.energy -= hit.repair_cost;
        self.uv_mutation_pending |= hit.mutation;
        hit.lethal
    }

    /// Repair damage at 0.5 energy per unit; a short reserve gets a partial repair.
    pub fn repair(&mut self) -> f64 {
        let capacity = (BASE_REPAIR_SPEED * self.dna.dna_repair_efficiency).min(self.structural_damage);
        if capacity <= 0.0 {
            return 0.0;
        }
        let cost = capacity * REPAIR_ENERGY_COST;
        let repaired = if self.energy >= cost {
            self.energy -= cost;
            capacity
        } else {
            let partial = self.energy.max(0.0) / REPAIR_ENERGY_COST;
            self.energy = 0.0;
            partial
        };
        self.structural_damage = (self.structural_damage - repaired).max(0.0);
        repaired
    }

    /// First failing condition, in resource order.
    pub fn check_death(&self) -> Option<DeathCause> {
        if self.energy <= 0.0 {
            return Some(if self.oxidative_damage > 0.0 {
                DeathCause::RepairBankruptcy
            } else {
                DeathCause::EnergyStarvation
            });
        }
        if self.dna.needs_oxygen() && self.oxygen <= 0.0 {
            return Some(DeathCause::OxygenDepletion);
        }
        if self.nitrogen <= 0.0 {
            return Some(DeathCause::NitrogenDepletion);
        }
        if self.phosphorus <= 0.0 {
            return Some(DeathCause::PhosphorusDepletion);
        }
        if self.structural_damage >= MAX_STRUCTURAL_DAMAGE {
            return Some(if self.oxidative_damage > 0.0 {
                DeathCause::StructuralOxidative
            } else {
                DeathCause::StructuralAccumulation
            });
        }
        None
    }

    pub fn kill(&mut self, cause: DeathCause) {
        if self.death_cause.is_none() {
            self.death_cause = Some(cause);
        }
    }

    pub fn can_reproduce(&self, config: &CellConfig, population: usize) -> bool {
        self.is_alive()
            && self.energy >= REPRODUCTION_ENERGY_FRACTION * self.max_resources
            && self.phosphorus >= REPRODUCTION_PHOSPHORUS_FRACTION * self.max_resources
            && self.structural_damage <= REPRODUCTION_MAX_DAMAGE
            && self.reproduction_cooldown == 0
            && population < config.max_population
    }

    /// Split reserves evenly with a child carrying `child_dna`. The child's
    /// capacity follows its own size; whatever does not fit is lost.
    pub fn divide(
        &mut self,
        id: u64,
        child_dna: Dna,
        base_storage: f64,
        cooldown: u32,
        habitat: &Habitat,
        rng: &mut SimRng,
    ) -> Agent {
        let offset = DVec2::from_angle(rng.random_range(0.0..TAU)) * SPAWN_JITTER;
        let mut position = self.position + offset;
        let mut velocity = DVec2::ZERO;
        habitat.bounce(&mut position, &mut velocity);

        let organelles = Organelle::derive_from(&child_dna);
        let mut child = Agent {
            id,
            position,
            velocity,
            energy: self.energy * 0.5,
            oxygen: self.oxygen * 0.5,
            nitrogen: self.nitrogen * 0.5,
            phosphorus: self.phosphorus * 0.5,
            max_resources: Membrane::storage_capacity(base_storage, child_dna.size),
            dna: child_dna,
            organelles,
            proteome: Proteome::new(),
            structural_damage: 0.0,
            sod_level: self.sod_level,
            uv_mutation_pending: false,
            reproduction_cooldown: cooldown,
            age: 0,
            last_pathway: None,
            oxidative_damage: 0.0,
            death_cause: None,
        };
        self.energy *= 0.5;
        self.oxygen *= 0.5;
        self.nitrogen *= 0.5;
        self.phosphorus *= 0.5;
        self.reproduction_cooldown = cooldown;
        child.clamp_reserves();
        child
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            position: [self.position.x, self.position.y],
            energy: self.energy,
            oxygen: self.oxygen,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            structural_damage: self.structural_damage,
            sod_level: self.sod_level,
            dna: DnaSummary::from(&self.dna),
            last_pathway: self.last_pathway,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnaSummary {
    pub generation: u32,
    pub mutation_rate: f64,
    pub era: EvolutionaryEra,
    pub dominant_pathway: PathwayKind,
    pub specialization: Option<PathwayKind>,
    pub enabled_pathways: Vec<PathwayKind>,
    pub size: f64,
    pub hue: f64,
}

impl From<&Dna> for DnaSummary {
    fn from(dna: &Dna) -> Self {
        Self {
            generation: dna.generation,
            mutation_rate: dna.mutation_rate,
            era: dna.era(),
            dominant_pathway: dna.dominant_pathway(),
            specialization: dna.specialization,
            enabled_pathways: dna.enabled_pathways().collect(),
            size: dna.size,
            hue: dna.hue,
        }
    }
}

/// Read-only view of an agent handed to collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    pub id: u64,
    pub position: [f64; 2],
    pub energy: f64,
    pub oxygen: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub structural_damage: f64,
    pub sod_level: f64,
    pub dna: DnaSummary,
    pub last_pathway: Option<PathwayKind>,
}
