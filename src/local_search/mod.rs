//! Stochastic local search for pickup-and-delivery plans.
//!
//! - [`reassign_task`] — Inter-vehicle task reassignment
//! - [`swap_steps`] — Intra-vehicle step exchange
//! - [`neighborhood`] — Feasible neighbors around a random loaded vehicle
//! - [`SlsRunner`] — Deadline-bounded search loop

mod config;
mod neighborhood;
mod reassign;
mod reorder;
mod sls;

pub use config::SlsConfig;
pub use neighborhood::{choose_source_vehicle, neighborhood, neighborhood_of};
pub use reassign::reassign_task;
pub use reorder::swap_steps;
pub use sls::{SearchState, SlsResult, SlsRunner, Timer};
