use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentKind {
    Alkaline,
    BlackSmoker,
    Diffuse,
    ColdSeep,
}

impl VentKind {
    pub const ALL: [VentKind; 4] = [
        VentKind::Alkaline,
        VentKind::BlackSmoker,
        VentKind::Diffuse,
        VentKind::ColdSeep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VentKind::Alkaline => "alkaline",
            VentKind::BlackSmoker => "black_smoker",
            VentKind::Diffuse => "diffuse",
            VentKind::ColdSeep => "cold_seep",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        VentKind::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    pub fn profile(self) -> &'static VentTypeProfile {
        // every kind has an entry; checked by the table test below
        &load_vent_types()[&self]
    }
}

/// Trace metals that act as enzyme cofactors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceElement {
    Fe,
    Ni,
    Mg,
    Cu,
    Zn,
}

impl TraceElement {
    pub const ALL: [TraceElement; 5] = [
        TraceElement::Fe,
        TraceElement::Ni,
        TraceElement::Mg,
        TraceElement::Cu,
        TraceElement::Zn,
    ];

    pub fn as_index(self) -> usize {
        self as usize
    }
}

/// Relative emission weights, multiplied by the base flux of each species.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EmissionWeights {
    pub h2: f64,
    pub co2: f64,
    pub fe2: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VentTypeProfile {
    pub label: String,
    pub emission: EmissionWeights,
    /// Minimum temperature forced at the vent row.
    pub temperature: f64,
    pub trace_elements: HashMap<TraceElement, f64>,
    /// Exponential plume decay per cell of distance.
    pub decay_rate: f64,
    pub buoyancy: f64,
    /// Lifetime in ticks; `None` never ages out.
    pub max_age: Option<u64>,
}

impl VentTypeProfile {
    pub fn trace_weight(&self, element: TraceElement) -> f64 {
        self.trace_elements.get(&element).copied().unwrap_or(0.0)
    }
}

pub fn load_vent_types() -> &'static HashMap<VentKind, VentTypeProfile> {
    static VENT_TYPES: OnceLock<HashMap<VentKind, VentTypeProfile>> = OnceLock::new();
    VENT_TYPES.get_or_init(|| {
        let json_str = include_str!("vent_types.json");
        serde_json::from_str(json_str).expect("Failed to parse vent_types.json")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn every_kind_has_a_profile() {
        let table = load_vent_types();
        for kind in VentKind::ALL {
            assert!(table.contains_key(&kind), "missing {}", kind.as_str());
        }
    }

    #[test]
    fn black_smoker_is_hot_and_iron_rich() {
        let smoker = VentKind::BlackSmoker.profile();
        let alkaline = VentKind::Alkaline.profile();
        assert!(smoker.temperature > alkaline.temperature);
        assert!(smoker.emission.fe2 > alkaline.emission.fe2);
        assert_abs_diff_eq!(smoker.trace_weight(TraceElement::Fe), 2.0);
        assert_abs_diff_eq!(alkaline.trace_weight(TraceElement::Fe), 0.0);
        assert_abs_diff_eq!(alkaline.trace_weight(TraceElement::Ni), 0.5);
    }
}
