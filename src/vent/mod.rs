pub mod geological;
pub mod manager;
#[allow(clippy::module_inception)]
pub mod vent;
pub mod vent_type;

pub use geological::{GeologicalEvent, GeologicalEventKind, GeologicalEvents};
pub use manager::{VentManager, VentTickStats};
pub use vent::{BaseFluxes, Emission, LifecyclePhase, PlumeCell, Vent, VentContext, VentSpec};
pub use vent_type::{TraceElement, VentKind, VentTypeProfile};
