//! # u-dispatch
//!
//! Pickup-and-delivery planning for capacity-constrained fleets: assigns
//! transport tasks to vehicles and orders each vehicle's pickups and
//! deliveries to minimize travel cost within a wall-clock budget.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Task, Vehicle, Step, Plan, VehicleRoute)
//! - [`distance`] — Distance oracle (Topology trait, matrix, road network)
//! - [`evaluation`] — Plan cost, route building and validation
//! - [`constructive`] — Initial plans (round robin, warm start, candidate insertion)
//! - [`local_search`] — Stochastic local search (neighborhood, search loop)
//! - [`planner`] — Centralized and auction planners
//! - [`error`] — Error type

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod planner;

pub use error::PlanError;
