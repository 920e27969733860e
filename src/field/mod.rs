pub mod chemical_field;
pub mod diffusion;
pub mod environment;
pub mod regeneration;
pub mod reservoir;
pub mod species;
pub mod stratification;

pub use chemical_field::ChemicalField;
pub use environment::Environment;
pub use regeneration::{recycle_phosphorus, regenerate, RegenerationTotals};
pub use reservoir::{ExchangeTotals, Pool, Reservoirs};
pub use species::Species;
pub use stratification::{Band, Stratification};
