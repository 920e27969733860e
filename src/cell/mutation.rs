use crate::cell::dna::{Dna, PathwayTrait};
use crate::cell::pathway::PathwayKind;
use crate::config::MutationConfig;
use crate::constants::*;
use crate::rng::SimRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEvent {
    /// A single-pathway lineage gained a specialization.
    Divergence(PathwayKind),
    /// A specialist swapped its specialization and survived.
    CrossTransition { from: PathwayKind, to: PathwayKind },
    LethalCrossTransition { from: PathwayKind, to: PathwayKind },
}

#[derive(Debug, Clone)]
pub struct Offspring {
    pub dna: Dna,
    /// The child is not viable and must not be spawned.
    pub lethal: bool,
    pub event: Option<MutationEvent>,
}

/// Derives child genomes from parents under stability-dependent pressure
/// on the mutation rate itself.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    pub config: MutationConfig,
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new(&MutationConfig::default())
    }
}

fn drift(value: f64, range: f64, rate: f64, min: f64, max: f64, rng: &mut SimRng) -> f64 {
    let delta = rng.random_range(-1.0..=1.0) * range * rate;
    (value + delta).clamp(min, max)
}

impl MutationEngine {
    pub fn new(config: &MutationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Linear from the unstable target at 0 to the stable target at 1.
    pub fn target_rate(&self, stability: f64) -> f64 {
        let s = stability.clamp(0.0, 1.0);
        self.config.target_rate_unstable + (self.config.target_rate_stable - self.config.target_rate_unstable) * s
    }

    pub fn next_rate(&self, parent_rate: f64, stability: f64, rng: &mut SimRng) -> f64 {
        let c = &self.config;
        let noise = rng.random_range(-c.rate_change..=c.rate_change);
        let pressure = ((self.target_rate(stability) - parent_rate) * c.pressure_strength)
            .clamp(c.pressure_min, c.pressure_max);
        (parent_rate + noise + pressure).clamp(c.rate_min, c.rate_max)
    }

    pub fn reproduce(&self, parent: &Dna, stability: f64, rng: &mut SimRng) -> Offspring {
        let rate = parent.mutation_rate;
        let mut child = parent.clone();
        child.generation = parent.generation.saturating_add(1);
        child.mutation_rate = self.next_rate(rate, stability, rng);

        for kind in PathwayKind::ALL {
            let t = child.pathway_mut(kind);
            if t.enabled {
                t.efficiency = drift(t.efficiency, EFFICIENCY_MUTATION_RANGE, rate, 0.0, EFFICIENCY_MAX, rng);
            }
        }
        child.sod_efficiency = drift(child.sod_efficiency, 0.1, rate, 0.0, 1.0, rng);
        child.dna_repair_efficiency = drift(child.dna_repair_efficiency, 0.1, rate, 0.0, 1.0, rng);
        child.metabolic_efficiency = drift(child.metabolic_efficiency, METABOLIC_DRIFT_RANGE, rate, 0.5, 1.5, rng);
        child.size = drift(child.size, SIZE_MUTATION_RANGE, rate, SIZE_MIN, SIZE_MAX, rng);
        child.flagella_level = drift(child.flagella_level, 0.1, rate, 0.0, 1.0, rng);
        child.thermal_optimum = drift(child.thermal_optimum, 2.0, rate, 20.0, 120.0, rng);
        child.thermal_tolerance = drift(child.thermal_tolerance, 1.0, rate, 2.0, 30.0, rng);
        child.hue = (child.hue + rng.random_range(-10.0..=10.0) * rate).rem_euclid(360.0);

        let mut lethal = false;
        let mut event = None;
        match child.specialization {
            None if child.enabled_count() == 1 => {
                if rng.random_bool(self.config.divergence_chance.clamp(0.0, 1.0)) {
                    let kind = PathwayKind::SPECIALIZATIONS[rng.random_range(0..PathwayKind::SPECIALIZATIONS.len())];
                    *child.pathway_mut(kind) = PathwayTrait {
                        enabled: true,
                        efficiency: EFFICIENCY_MIN,
                    };
                    child.specialization = Some(kind);
                    child.hue = kind.profile().hue;
                    event = Some(MutationEvent::Divergence(kind));
                }
            }
            Some(from) => {
                if rng.random_bool(self.config.cross_metabolism_chance.clamp(0.0, 1.0)) {
                    let others: Vec<PathwayKind> = PathwayKind::SPECIALIZATIONS
                        .into_iter()
                        .filter(|k| *k != from)
                        .collect();
                    let to = others[rng.random_range(0..others.len())];
                    if rng.random_bool(self.config.cross_metabolism_mortality.clamp(0.0, 1.0)) {
                        lethal = true;
                        event = Some(MutationEvent::LethalCrossTransition { from, to });
                    } else {
                        let efficiency = child.pathway(from).efficiency;
                        *child.pathway_mut(from) = PathwayTrait::disabled();
                        *child.pathway_mut(to) = PathwayTrait { enabled: true, efficiency };
                        child.specialization = Some(to);
                        child.hue = to.profile().hue;
                        event = Some(MutationEvent::CrossTransition { from, to });
                    }
                }
            }
            None => {}
        }

        Offspring { dna: child, lethal, event }
    }

    /// Extra lesion from an imperfect UV repair: one trait takes a large jump.
    pub fn uv_mutation(&self, dna: &mut Dna, rng: &mut SimRng) {
        match rng.random_range(0..7) {
            0 => dna.size = (dna.size + rng.random_range(-5.0..=5.0)).clamp(SIZE_MIN, SIZE_MAX),
            1 => dna.hue = (dna.hue + rng.random_range(-30.0..=30.0)).rem_euclid(360.0),
            2 => dna.metabolic_efficiency = (dna.metabolic_efficiency + rng.random_range(-0.15..=0.15)).clamp(0.5, 1.5),
            3 => dna.dna_repair_efficiency = (dna.dna_repair_efficiency + rng.random_range(-0.1..=0.1)).clamp(0.0, 1.0),
            4 => dna.sod_efficiency = (dna.sod_efficiency + rng.random_range(-0.1..=0.1)).clamp(0.0, 1.0),
            5 => dna.thermal_optimum = (dna.thermal_optimum + rng.random_range(-5.0..=5.0)).clamp(20.0, 120.0),
            _ => dna.thermal_tolerance = (dna.thermal_tolerance + rng.random_range(-2.0..=2.0)).clamp(2.0, 30.0),
        }
    }
}
