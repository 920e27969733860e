use crate::cell::dna::Dna;
use crate::cell::pathway::PathwayKind;
use crate::constants::ORGANELLE_EFFICIENCY_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Structures expressed from DNA. The list is derived once when an agent is
/// created and only changes through reproduction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Organelle {
    Ribosome,
    Flagellum { level: f64 },
    Hydrogenosome,
    ChemosyntheticEnzymes,
    Chlorosome,
    Thylakoid,
    Mitochondrion,
}

impl Organelle {
    pub fn derive_from(dna: &Dna) -> Vec<Organelle> {
        let mut organelles = Vec::new();
        let luca = dna.pathway(PathwayKind::Luca);
        if luca.enabled {
            organelles.push(Organelle::Ribosome);
        }
        if dna.flagella_level > 0.0 {
            organelles.push(Organelle::Flagellum {
                level: dna.flagella_level,
            });
        }
        let fermentation = dna.pathway(PathwayKind::Fermentation);
        if fermentation.enabled && fermentation.efficiency > ORGANELLE_EFFICIENCY_THRESHOLD {
            organelles.push(Organelle::Hydrogenosome);
        }
        if luca.enabled && luca.efficiency > ORGANELLE_EFFICIENCY_THRESHOLD {
            organelles.push(Organelle::ChemosyntheticEnzymes);
        }
        if dna.pathway(PathwayKind::AnoxygenicPhotosynthesis).enabled {
            organelles.push(Organelle::Chlorosome);
        }
        if dna.pathway(PathwayKind::OxygenicPhotosynthesis).enabled {
            organelles.push(Organelle::Thylakoid);
        }
        if dna.pathway(PathwayKind::AerobicRespiration).enabled {
            organelles.push(Organelle::Mitochondrion);
        }
        organelles
    }

    /// Energy per tick to keep the structure.
    pub fn maintenance_cost(&self) -> f64 {
        match self {
            Organelle::Ribosome => 0.005,
            Organelle::Flagellum { level } => 0.01 * level,
            Organelle::Hydrogenosome => 0.01,
            Organelle::ChemosyntheticEnzymes => 0.01,
            Organelle::Chlorosome => 0.015,
            Organelle::Thylakoid => 0.02,
            Organelle::Mitochondrion => 0.02,
        }
    }

    /// Extra energy spent moving at `speed`; zero for everything but flagella.
    pub fn movement_cost(&self, speed: f64) -> f64 {
        match self {
            Organelle::Flagellum { level } => 0.01 * level * speed,
            _ => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Organelle::Ribosome => "ribosome",
            Organelle::Flagellum { .. } => "flagellum",
            Organelle::Hydrogenosome => "hydrogenosome",
            Organelle::ChemosyntheticEnzymes => "chemosynthetic_enzymes",
            Organelle::Chlorosome => "chlorosome",
            Organelle::Thylakoid => "thylakoid",
            Organelle::Mitochondrion => "mitochondrion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::dna::PathwayTrait;
    use crate::rng::create_rng;

    #[test]
    fn luca_builds_only_ribosomes() {
        let dna = Dna::luca(&mut create_rng(2));
        assert_eq!(Organelle::derive_from(&dna), vec![Organelle::Ribosome]);
    }

    #[test]
    fn efficient_pathways_express_structures() {
        let mut dna = Dna::luca(&mut create_rng(2));
        dna.pathway_mut(PathwayKind::Luca).efficiency = 1.2;
        *dna.pathway_mut(PathwayKind::AerobicRespiration) = PathwayTrait { enabled: true, efficiency: 0.5 };
        dna.flagella_level = 1.0;
        let organelles = Organelle::derive_from(&dna);
        assert!(organelles.contains(&Organelle::ChemosyntheticEnzymes));
        assert!(organelles.contains(&Organelle::Mitochondrion));
        assert!(organelles.iter().any(|o| o.name() == "flagellum"));
        assert!(!organelles.contains(&Organelle::Hydrogenosome));
    }
}
