use crate::cell::pathway::PathwayKind;
use crate::constants::*;
use crate::rng::SimRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathwayTrait {
    pub enabled: bool,
    pub efficiency: f64,
}

impl PathwayTrait {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            efficiency: 0.0,
        }
    }

    pub fn is_viable(&self) -> bool {
        self.enabled && self.efficiency > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionaryEra {
    Primordial,
    Transition,
    Modern,
}

impl EvolutionaryEra {
    pub fn from_mutation_rate(rate: f64) -> Self {
        if rate > ERA_PRIMORDIAL_RATE {
            EvolutionaryEra::Primordial
        } else if rate > ERA_TRANSITION_RATE {
            EvolutionaryEra::Transition
        } else {
            EvolutionaryEra::Modern
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvolutionaryEra::Primordial => "primordial",
            EvolutionaryEra::Transition => "transition",
            EvolutionaryEra::Modern => "modern",
        }
    }
}

/// Flat heritable trait vector. Agents never mutate their own copy;
/// reproduction always derives a fresh one through the mutation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dna {
    pub pathways: [PathwayTrait; PathwayKind::COUNT],
    /// The one pathway this lineage diverged into, if any.
    pub specialization: Option<PathwayKind>,
    pub mutation_rate: f64,
    pub sod_efficiency: f64,
    pub dna_repair_efficiency: f64,
    /// Maintenance cost multiplier; 1.0 is baseline.
    pub metabolic_efficiency: f64,
    pub size: f64,
    pub hue: f64,
    pub flagella_level: f64,
    pub thermal_optimum: f64,
    pub thermal_tolerance: f64,
    pub generation: u32,
}

impl Dna {
    /// Ancestral genome: Wood-Ljungdahl only, primitive repair and defences.
    pub fn luca(rng: &mut SimRng) -> Self {
        let mut pathways = [PathwayTrait::disabled(); PathwayKind::COUNT];
        pathways[PathwayKind::Luca.as_index()] = PathwayTrait {
            enabled: true,
            efficiency: rng.random_range(0.7..0.9),
        };
        Self {
            pathways,
            specialization: None,
            mutation_rate: MUTATION_RATE_INITIAL,
            sod_efficiency: rng.random_range(0.3..0.7),
            dna_repair_efficiency: rng.random_range(0.3..0.7),
            metabolic_efficiency: 1.0,
            size: rng.random_range(10.0..20.0),
            hue: PathwayKind::Luca.profile().hue,
            flagella_level: 0.0,
            thermal_optimum: rng.random_range(58.0..62.0),
            thermal_tolerance: rng.random_range(8.0..12.0),
            generation: 0,
        }
    }

    pub fn pathway(&self, kind: PathwayKind) -> &PathwayTrait {
        &self.pathways[kind.as_index()]
    }

    pub fn pathway_mut(&mut self, kind: PathwayKind) -> &mut PathwayTrait {
        &mut self.pathways[kind.as_index()]
    }

    pub fn enabled_pathways(&self) -> impl Iterator<Item = PathwayKind> + '_ {
        PathwayKind::ALL
            .into_iter()
            .filter(|k| self.pathway(*k).is_viable())
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled_pathways().count()
    }

    /// Most efficient enabled pathway; earlier kinds win ties.
    pub fn dominant_pathway(&self) -> PathwayKind {
        let mut best = PathwayKind::Luca;
        let mut best_eff = f64::NEG_INFINITY;
        for kind in self.enabled_pathways() {
            let eff = self.pathway(kind).efficiency;
            if eff > best_eff {
                best = kind;
                best_eff = eff;
            }
        }
        best
    }

    pub fn era(&self) -> EvolutionaryEra {
        EvolutionaryEra::from_mutation_rate(self.mutation_rate)
    }

    /// Specialists in an O2-consuming pathway die without an internal oxygen store.
    pub fn needs_oxygen(&self) -> bool {
        self.specialization.is_some_and(|kind| kind.profile().requires_o2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn luca_has_single_pathway() {
        let dna = Dna::luca(&mut create_rng(9));
        assert_eq!(dna.enabled_count(), 1);
        assert_eq!(dna.dominant_pathway(), PathwayKind::Luca);
        assert_eq!(dna.era(), EvolutionaryEra::Transition);
        assert!(!dna.needs_oxygen());
    }

    #[test]
    fn era_thresholds() {
        assert_eq!(EvolutionaryEra::from_mutation_rate(0.2), EvolutionaryEra::Primordial);
        assert_eq!(EvolutionaryEra::from_mutation_rate(0.1), EvolutionaryEra::Transition);
        assert_eq!(EvolutionaryEra::from_mutation_rate(0.08), EvolutionaryEra::Modern);
    }

    #[test]
    fn only_oxygen_consuming_specialists_need_oxygen() {
        let mut dna = Dna::luca(&mut create_rng(3));
        for kind in PathwayKind::SPECIALIZATIONS {
            dna.specialization = Some(kind);
            assert_eq!(dna.needs_oxygen(), kind == PathwayKind::AerobicRespiration, "{:?}", kind);
        }
    }

    #[test]
    fn dominant_pathway_prefers_earlier_on_tie() {
        let mut dna = Dna::luca(&mut create_rng(1));
        *dna.pathway_mut(PathwayKind::Luca) = PathwayTrait { enabled: true, efficiency: 1.0 };
        *dna.pathway_mut(PathwayKind::Fermentation) = PathwayTrait { enabled: true, efficiency: 1.0 };
        assert_eq!(dna.dominant_pathway(), PathwayKind::Luca);
    }
}
