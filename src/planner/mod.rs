//! Planners built on the constructive heuristics and the local search.
//!
//! - [`CentralizedPlanner`] — Plans a whole task set in one call
//! - [`AuctionPlanner`] — Prices auctioned tasks and plans the won ones

mod auction;
mod centralized;

pub use auction::{AuctionOutcome, AuctionPlanner, BidEvaluation};
pub use centralized::{CentralizedPlanner, PlanOutcome};
