use crate::cell::dna::Dna;
use crate::cell::pathway::{PathwayKind, Substrate};
use crate::cell::proteome::{Proteome, TraceLevels};
use crate::constants::*;
use crate::field::{Environment, Species};
use crate::vent::VentManager;
use glam::DVec2;

/// Everything an agent can sense at its position, captured before any
/// agent writes to the fields this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReadings {
    concentrations: [f64; Species::COUNT],
    pub in_sediment: bool,
    pub trace: TraceLevels,
}

impl LocalReadings {
    pub fn read(env: &Environment, vents: &VentManager, pos: DVec2) -> Self {
        let mut concentrations = [0.0; Species::COUNT];
        for species in Species::ALL {
            concentrations[species.as_index()] = env.read_field(species, pos.x, pos.y);
        }
        Self {
            concentrations,
            in_sediment: env.is_in_sediment(pos.y),
            trace: TraceLevels::sample(vents, pos.x, pos.y, env.resolution),
        }
    }

    pub fn get(&self, species: Species) -> f64 {
        self.concentrations[species.as_index()]
    }

    pub fn with(mut self, species: Species, value: f64) -> Self {
        self.concentrations[species.as_index()] = value;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathwayEvaluation {
    pub kind: PathwayKind,
    pub availability: f64,
    pub potential: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetabolicOutcome {
    /// `None` when the agent went dormant.
    pub pathway: Option<PathwayKind>,
    /// Net energy change to subtract from the reserve; negative is a gain.
    pub energy_delta: f64,
    pub energy_produced: f64,
    /// Energy drawn from the reserve as substrate.
    pub reserve_used: f64,
    pub co2_released: f64,
    pub o2_released: f64,
}

impl MetabolicOutcome {
    pub fn is_dormant(&self) -> bool {
        self.pathway.is_none()
    }
}

/// Picks the best pathway for an agent each tick and applies it to the fields.
#[derive(Debug, Clone)]
pub struct MetabolicSelector {
    pub dormancy_multiplier: f64,
}

impl Default for MetabolicSelector {
    fn default() -> Self {
        Self {
            dormancy_multiplier: DORMANCY_COST_MULTIPLIER,
        }
    }
}

impl MetabolicSelector {
    pub fn new(dormancy_multiplier: f64) -> Self {
        Self { dormancy_multiplier }
    }

    /// Fraction of the pathway's demand that the local chemistry can meet.
    pub fn availability(kind: PathwayKind, readings: &LocalReadings, reserve: f64) -> f64 {
        let profile = kind.profile();
        if profile.light_dependent && readings.get(Species::Light) < profile.min_light {
            return 0.0;
        }
        profile
            .substrates
            .iter()
            .map(|(substrate, amount)| {
                let available = match substrate {
                    Substrate::Field(species) => {
                        let conc = readings.get(*species);
                        if conc < species.availability_floor() {
                            return 0.0;
                        }
                        conc
                    }
                    Substrate::Reserve => reserve,
                };
                (available / amount).min(1.0)
            })
            .fold(1.0, f64::min)
            .max(0.0)
    }

    pub fn evaluate(dna: &Dna, readings: &LocalReadings, reserve: f64) -> Vec<PathwayEvaluation> {
        dna.enabled_pathways()
            .map(|kind| {
                let availability = Self::availability(kind, readings, reserve);
                PathwayEvaluation {
                    kind,
                    availability,
                    potential: kind.profile().energy_yield * dna.pathway(kind).efficiency * availability,
                }
            })
            .collect()
    }

    /// Strictly greatest potential wins; on a tie the earlier pathway stays.
    pub fn select(dna: &Dna, readings: &LocalReadings, reserve: f64) -> Option<PathwayEvaluation> {
        let mut best: Option<PathwayEvaluation> = None;
        for eval in Self::evaluate(dna, readings, reserve) {
            if eval.availability <= 0.0 {
                continue;
            }
            match best {
                Some(b) if eval.potential <= b.potential => {}
                _ => best = Some(eval),
            }
        }
        best
    }

    /// Run one tick of metabolism for an agent at `pos`.
    ///
    /// `maintenance` is the agent's base upkeep before thermal stress and
    /// metabolic efficiency are applied.
    #[allow(clippy::too_many_arguments)]
    pub fn metabolize(
        &self,
        dna: &Dna,
        proteome: &Proteome,
        readings: &LocalReadings,
        reserve: f64,
        maintenance: f64,
        thermal_factor: f64,
        env: &mut Environment,
        pos: DVec2,
    ) -> MetabolicOutcome {
        let Some(choice) = Self::select(dna, readings, reserve) else {
            return MetabolicOutcome {
                pathway: None,
                energy_delta: maintenance * self.dormancy_multiplier,
                ..Default::default()
            };
        };

        let profile = choice.kind.profile();
        let mut fraction: f64 = 1.0;
        let mut reserve_used = 0.0;
        for (substrate, amount) in &profile.substrates {
            let mut request = amount * choice.availability;
            match substrate {
                Substrate::Reserve => {
                    let used = request.min(reserve - reserve_used).max(0.0);
                    if request > 0.0 {
                        fraction = fraction.min(used / request);
                    }
                    reserve_used += used;
                }
                Substrate::Field(species) => {
                    if *species == Species::Light {
                        request *= LIGHT_ABSORPTION;
                    }
                    let taken = env.consume(*species, pos.x, pos.y, request);
                    if request > 0.0 {
                        fraction = fraction.min(taken / request);
                    }
                }
            }
        }

        let mut produced =
            choice.potential * fraction * proteome.catalytic_multiplier(choice.kind, &readings.trace);
        if profile.light_dependent {
            produced *= 0.5 + 0.5 * (readings.get(Species::Light) / LIGHT_REFERENCE).min(1.0);
        }
        if profile.geochemical_bonus && readings.in_sediment {
            produced += GEOCHEMICAL_BONUS * choice.availability * fraction;
        }

        let efficiency = dna.pathway(choice.kind).efficiency;
        let mut outcome = MetabolicOutcome {
            pathway: Some(choice.kind),
            energy_delta: maintenance * thermal_factor * dna.metabolic_efficiency - produced,
            energy_produced: produced,
            reserve_used,
            ..Default::default()
        };
        if profile.produces_o2 > 0.0 {
            let o2 = profile.produces_o2 * choice.availability * fraction;
            env.produce(Species::O2, pos.x, pos.y, o2);
            outcome.o2_released = o2;
        } else {
            let co2 = maintenance * BYPRODUCT_CO2_RATIO * efficiency;
            env.produce(Species::Co2, pos.x, pos.y, co2);
            outcome.co2_released = co2;
        }
        outcome
    }
}
