use crate::field::Species;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Metabolic pathways, in selection order. Ties in potential yield go to
/// the kind declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PathwayKind {
    /// Wood-Ljungdahl chemosynthesis: H2 + CO2.
    Luca = 0,
    Fermentation = 1,
    AnoxygenicPhotosynthesis = 2,
    OxygenicPhotosynthesis = 3,
    AerobicRespiration = 4,
}

impl PathwayKind {
    pub const COUNT: usize = 5;

    pub const ALL: [PathwayKind; PathwayKind::COUNT] = [
        PathwayKind::Luca,
        PathwayKind::Fermentation,
        PathwayKind::AnoxygenicPhotosynthesis,
        PathwayKind::OxygenicPhotosynthesis,
        PathwayKind::AerobicRespiration,
    ];

    /// Pathways a LUCA-type cell can diverge into.
    pub const SPECIALIZATIONS: [PathwayKind; 4] = [
        PathwayKind::Fermentation,
        PathwayKind::AnoxygenicPhotosynthesis,
        PathwayKind::OxygenicPhotosynthesis,
        PathwayKind::AerobicRespiration,
    ];

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PathwayKind::Luca => "luca",
            PathwayKind::Fermentation => "fermentation",
            PathwayKind::AnoxygenicPhotosynthesis => "anoxygenic_photosynthesis",
            PathwayKind::OxygenicPhotosynthesis => "oxygenic_photosynthesis",
            PathwayKind::AerobicRespiration => "aerobic_respiration",
        }
    }

    pub fn profile(self) -> &'static PathwayProfile {
        &PATHWAY_PROFILES[self.as_index()]
    }
}

/// Where a pathway draws a substrate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substrate {
    /// A grid species at the agent's cell.
    Field(Species),
    /// The agent's own energy reserve.
    Reserve,
}

#[derive(Debug, Clone)]
pub struct PathwayProfile {
    pub kind: PathwayKind,
    /// Required amount per tick at full availability.
    pub substrates: Vec<(Substrate, f64)>,
    pub energy_yield: f64,
    /// Light below this level makes the pathway unavailable.
    pub min_light: f64,
    pub light_dependent: bool,
    /// Gains the sediment bonus near vents.
    pub geochemical_bonus: bool,
    /// O2 released per unit of availability; replaces the CO2 byproduct.
    pub produces_o2: f64,
    pub requires_o2: bool,
    /// Display hue the lineage shifts to on divergence.
    pub hue: f64,
}

pub static PATHWAY_PROFILES: Lazy<[PathwayProfile; PathwayKind::COUNT]> = Lazy::new(|| {
    [
        PathwayProfile {
            kind: PathwayKind::Luca,
            substrates: vec![
                (Substrate::Field(Species::H2), 0.4),
                (Substrate::Field(Species::Co2), 0.2),
            ],
            energy_yield: 1.5,
            min_light: 0.0,
            light_dependent: false,
            geochemical_bonus: true,
            produces_o2: 0.0,
            requires_o2: false,
            hue: 30.0,
        },
        PathwayProfile {
            kind: PathwayKind::Fermentation,
            substrates: vec![(Substrate::Reserve, 1.0)],
            energy_yield: 2.0,
            min_light: 0.0,
            light_dependent: false,
            geochemical_bonus: false,
            produces_o2: 0.0,
            requires_o2: false,
            hue: 300.0,
        },
        PathwayProfile {
            kind: PathwayKind::AnoxygenicPhotosynthesis,
            substrates: vec![
                (Substrate::Field(Species::H2), 0.3),
                (Substrate::Field(Species::Co2), 0.2),
                (Substrate::Field(Species::Light), 50.0),
            ],
            energy_yield: 6.0,
            min_light: 30.0,
            light_dependent: true,
            geochemical_bonus: false,
            produces_o2: 0.0,
            requires_o2: false,
            hue: 270.0,
        },
        PathwayProfile {
            kind: PathwayKind::OxygenicPhotosynthesis,
            substrates: vec![
                (Substrate::Field(Species::Co2), 0.6),
                (Substrate::Field(Species::Light), 80.0),
            ],
            energy_yield: 12.0,
            min_light: 50.0,
            light_dependent: true,
            geochemical_bonus: false,
            produces_o2: 0.6,
            requires_o2: false,
            hue: 120.0,
        },
        PathwayProfile {
            kind: PathwayKind::AerobicRespiration,
            substrates: vec![(Substrate::Reserve, 1.0), (Substrate::Field(Species::O2), 0.6)],
            energy_yield: 36.0,
            min_light: 0.0,
            light_dependent: false,
            geochemical_bonus: false,
            produces_o2: 0.0,
            requires_o2: true,
            hue: 200.0,
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_declaration_order() {
        for kind in PathwayKind::ALL {
            assert_eq!(kind.profile().kind, kind);
        }
    }

    #[test]
    fn only_oxygenic_photosynthesis_releases_oxygen() {
        let producers: Vec<_> = PathwayKind::ALL
            .into_iter()
            .filter(|k| k.profile().produces_o2 > 0.0)
            .collect();
        assert_eq!(producers, vec![PathwayKind::OxygenicPhotosynthesis]);
    }
}
