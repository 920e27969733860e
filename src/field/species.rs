use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Every scalar quantity tracked on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Species {
    H2 = 0,
    Co2 = 1,
    O2 = 2,
    Nitrogen = 3,
    Phosphorus = 4,
    Fe2 = 5,
    Light = 6,
    Uv = 7,
    Temperature = 8,
}

impl Species {
    pub const COUNT: usize = 9;

    pub const ALL: [Species; Species::COUNT] = [
        Species::H2,
        Species::Co2,
        Species::O2,
        Species::Nitrogen,
        Species::Phosphorus,
        Species::Fe2,
        Species::Light,
        Species::Uv,
        Species::Temperature,
    ];

    /// Species that move between cells by diffusion. Light and UV are
    /// regenerated from the surface instead.
    pub const DIFFUSING: [Species; 7] = [
        Species::H2,
        Species::Co2,
        Species::O2,
        Species::Nitrogen,
        Species::Phosphorus,
        Species::Fe2,
        Species::Temperature,
    ];

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn cap(self) -> f64 {
        match self {
            Species::H2 => H2_MAX,
            Species::Co2 => CO2_MAX,
            Species::O2 => O2_MAX,
            Species::Nitrogen => NITROGEN_MAX,
            Species::Phosphorus => PHOSPHORUS_MAX,
            Species::Fe2 => FE2_MAX,
            Species::Light => LIGHT_MAX,
            Species::Uv => UV_MAX,
            Species::Temperature => TEMPERATURE_MAX,
        }
    }

    /// Concentration below which a substrate counts as absent for metabolism.
    pub fn availability_floor(self) -> f64 {
        match self {
            Species::H2 => 0.5,
            Species::Co2 => 0.5,
            Species::O2 => 1.0,
            Species::Light => 5.0,
            _ => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Species::H2 => "h2",
            Species::Co2 => "co2",
            Species::O2 => "o2",
            Species::Nitrogen => "nitrogen",
            Species::Phosphorus => "phosphorus",
            Species::Fe2 => "fe2",
            Species::Light => "light",
            Species::Uv => "uv",
            Species::Temperature => "temperature",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Species::ALL.into_iter().find(|species| species.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_declaration_order() {
        for (i, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.as_index(), i);
        }
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(Species::from_str("fe2"), Some(Species::Fe2));
        assert_eq!(Species::from_str("unobtainium"), None);
    }
}
