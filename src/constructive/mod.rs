//! Initial plan construction.
//!
//! - [`round_robin`] — Cold start: tasks handed to vehicles in turn, O(nm)
//! - [`shuffled_round_robin`] — Cold start over shuffled task and vehicle orders
//! - [`warm_start`] — Reuses a committed plan, rebinding tasks by ID
//! - [`insert_candidate`] — Adds one task to a plan for bid evaluation

mod insertion;
mod round_robin;
mod warm_start;

pub(crate) use insertion::insert_at_random_span;
pub use insertion::insert_candidate;
pub use round_robin::{round_robin, shuffled_round_robin};
pub use warm_start::{rebind, warm_start};
