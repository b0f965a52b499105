//! Plan cost, route building and invariant validation.
//!
//! - [`plan_cost`] — Total travel cost of a plan
//! - [`build_routes`] — Conversion into executable move/pickup/delivery routes
//! - [`PlanEvaluator`] — Cost, routes and validation bound to one fleet
//! - [`validate_plan`] — Invariant and conservation check against a task set

mod evaluator;

pub use evaluator::{build_routes, plan_cost, route_distance, validate_plan, PlanEvaluator};
