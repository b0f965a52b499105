//! Domain model types for pickup-and-delivery dispatch.
//!
//! Provides tasks and vehicles supplied by the caller, the step/plan
//! representation mutated by the search, executable routes and the plan
//! invariant violation types.

mod plan;
mod route;
mod step;
mod task;
mod vehicle;
mod violation;

pub use plan::Plan;
pub use route::{Action, VehicleRoute};
pub use step::{Step, StepKey, StepKind};
pub use task::Task;
pub use vehicle::Vehicle;
pub use violation::{Violation, ViolationType};
