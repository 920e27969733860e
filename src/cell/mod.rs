pub mod agent;
pub mod dna;
pub mod membrane;
pub mod metabolism;
pub mod mutation;
pub mod organelle;
pub mod oxygen_tolerance;
pub mod pathway;
pub mod proteome;
pub mod thermal_stress;
pub mod uv_exposure;

pub use agent::{Agent, AgentSnapshot, DeathCause, DnaSummary, Habitat};
pub use dna::{Dna, EvolutionaryEra, PathwayTrait};
pub use membrane::Membrane;
pub use metabolism::{LocalReadings, MetabolicOutcome, MetabolicSelector, PathwayEvaluation};
pub use mutation::{MutationEngine, MutationEvent, Offspring};
pub use organelle::Organelle;
pub use oxygen_tolerance::OxygenTolerance;
pub use pathway::{PathwayKind, PathwayProfile, Substrate};
pub use proteome::{EnzymeKind, Proteome, TraceLevels};
pub use thermal_stress::thermal_stress_factor;
pub use uv_exposure::{pigment_brightness, UvExposure, UvHit};
