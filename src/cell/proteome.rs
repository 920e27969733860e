use crate::cell::dna::Dna;
use crate::cell::pathway::PathwayKind;
use crate::constants::*;
use crate::rng::SimRng;
use crate::vent::{TraceElement, VentManager};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnzymeKind {
    /// [NiFe]-hydrogenase feeding the Wood-Ljungdahl route.
    Hydrogenase,
    PyruvateFerredoxinOxidoreductase,
    BacterialReactionCenter,
    PhotosystemII,
    CytochromeOxidase,
}

pub struct EnzymeProfile {
    pub target: PathwayKind,
    pub cofactors: &'static [TraceElement],
    pub amino_acids: u32,
}

impl EnzymeKind {
    pub const ALL: [EnzymeKind; 5] = [
        EnzymeKind::Hydrogenase,
        EnzymeKind::PyruvateFerredoxinOxidoreductase,
        EnzymeKind::BacterialReactionCenter,
        EnzymeKind::PhotosystemII,
        EnzymeKind::CytochromeOxidase,
    ];

    pub fn profile(self) -> EnzymeProfile {
        match self {
            EnzymeKind::Hydrogenase => EnzymeProfile {
                target: PathwayKind::Luca,
                cofactors: &[TraceElement::Ni, TraceElement::Fe],
                amino_acids: 450,
            },
            EnzymeKind::PyruvateFerredoxinOxidoreductase => EnzymeProfile {
                target: PathwayKind::Fermentation,
                cofactors: &[TraceElement::Mg],
                amino_acids: 360,
            },
            EnzymeKind::BacterialReactionCenter => EnzymeProfile {
                target: PathwayKind::AnoxygenicPhotosynthesis,
                cofactors: &[TraceElement::Mg],
                amino_acids: 400,
            },
            EnzymeKind::PhotosystemII => EnzymeProfile {
                target: PathwayKind::OxygenicPhotosynthesis,
                cofactors: &[TraceElement::Mg, TraceElement::Fe],
                amino_acids: 600,
            },
            EnzymeKind::CytochromeOxidase => EnzymeProfile {
                target: PathwayKind::AerobicRespiration,
                cofactors: &[TraceElement::Cu, TraceElement::Fe],
                amino_acids: 520,
            },
        }
    }

    pub fn for_pathway(pathway: PathwayKind) -> EnzymeKind {
        match pathway {
            PathwayKind::Luca => EnzymeKind::Hydrogenase,
            PathwayKind::Fermentation => EnzymeKind::PyruvateFerredoxinOxidoreductase,
            PathwayKind::AnoxygenicPhotosynthesis => EnzymeKind::BacterialReactionCenter,
            PathwayKind::OxygenicPhotosynthesis => EnzymeKind::PhotosystemII,
            PathwayKind::AerobicRespiration => EnzymeKind::CytochromeOxidase,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnzymeKind::Hydrogenase => "hydrogenase",
            EnzymeKind::PyruvateFerredoxinOxidoreductase => "pyruvate_ferredoxin_oxidoreductase",
            EnzymeKind::BacterialReactionCenter => "bacterial_reaction_center",
            EnzymeKind::PhotosystemII => "photosystem_ii",
            EnzymeKind::CytochromeOxidase => "cytochrome_oxidase",
        }
    }
}

/// Trace metal concentrations sampled at one point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraceLevels([f64; 5]);

impl TraceLevels {
    pub fn sample(vents: &VentManager, x: f64, y: f64, resolution: f64) -> Self {
        let mut levels = [0.0; 5];
        for element in TraceElement::ALL {
            levels[element.as_index()] = vents.trace_element_level(element, x, y, resolution);
        }
        Self(levels)
    }

    pub fn uniform(level: f64) -> Self {
        Self([level; 5])
    }

    pub fn get(&self, element: TraceElement) -> f64 {
        self.0[element.as_index()]
    }

    pub fn set(&mut self, element: TraceElement, level: f64) {
        self.0[element.as_index()] = level.max(0.0);
    }
}

/// Efficiency of an enzyme given its cofactors: saturated above the
/// threshold, linear down to the basal floor below it. The scarcest
/// cofactor limits.
pub fn cofactor_efficiency(cofactors: &[TraceElement], trace: &TraceLevels) -> f64 {
    cofactors
        .iter()
        .map(|element| {
            let level = trace.get(*element);
            if level >= COFACTOR_SATURATION {
                1.0
            } else {
                COFACTOR_BASAL + (1.0 - COFACTOR_BASAL) * level / COFACTOR_SATURATION
            }
        })
        .fold(1.0, f64::min)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Proteome {
    enzymes: BTreeMap<EnzymeKind, u32>,
}

impl Proteome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EnzymeKind) -> u32 {
        self.enzymes.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.enzymes.values().sum()
    }

    pub fn synthesis_cost(kind: EnzymeKind, metabolic_efficiency: f64) -> f64 {
        kind.profile().amino_acids as f64 / 100.0 * metabolic_efficiency
    }

    /// Build one enzyme unit out of `energy`. Refuses without touching
    /// anything when the reserve cannot cover the cost.
    pub fn synthesize(&mut self, kind: EnzymeKind, energy: &mut f64, metabolic_efficiency: f64) -> bool {
        let cost = Self::synthesis_cost(kind, metabolic_efficiency);
        if *energy < cost {
            return false;
        }
        *energy -= cost;
        *self.enzymes.entry(kind).or_insert(0) += 1;
        true
    }

    /// Each unit independently breaks down with a small chance. Returns units lost.
    pub fn degrade(&mut self, rng: &mut SimRng) -> u32 {
        let mut lost = 0;
        for count in self.enzymes.values_mut() {
            let survivors = (0..*count)
                .filter(|_| !rng.random_bool(ENZYME_DEGRADATION_CHANCE))
                .count() as u32;
            lost += *count - survivors;
            *count = survivors;
        }
        self.enzymes.retain(|_, count| *count > 0);
        lost
    }

    /// Top up enzymes for every enabled pathway toward `round(efficiency * 5)` units,
    /// one unit per call. Returns units built.
    pub fn express(&mut self, dna: &Dna, energy: &mut f64) -> u32 {
        let mut built = 0;
        for pathway in dna.enabled_pathways() {
            let kind = EnzymeKind::for_pathway(pathway);
            let target = (dna.pathway(pathway).efficiency * 5.0).round() as u32;
            if self.count(kind) < target && self.synthesize(kind, energy, dna.metabolic_efficiency) {
                built += 1;
            }
        }
        built
    }

    /// Throughput multiplier for `pathway`: `1 + sum((cof * n) / (Km + n))`. Never below 1.
    pub fn catalytic_multiplier(&self, pathway: PathwayKind, trace: &TraceLevels) -> f64 {
        let bonus: f64 = self
            .enzymes
            .iter()
            .filter_map(|(kind, count)| {
                let profile = kind.profile();
                if profile.target != pathway || *count == 0 {
                    return None;
                }
                let n = *count as f64;
                Some(cofactor_efficiency(profile.cofactors, trace) * n / (ENZYME_KM + n))
            })
            .sum();
        1.0 + bonus.max(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnzymeKind, u32)> + '_ {
        self.enzymes.iter().map(|(k, v)| (*k, *v))
    }
}
