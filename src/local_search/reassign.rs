//! Inter-vehicle task reassignment move.
//!
//! # Algorithm
//!
//! Removes both steps of a task from the source vehicle and inserts them into
//! the destination vehicle, at a random span when the destination already
//! has steps, appended otherwise. Both routes are then re-annotated from the
//! edit point; the move is rejected if the destination overloads.

use rand::Rng;

use crate::constructive::insert_at_random_span;
use crate::models::{Plan, StepKey, StepKind};

/// Moves task `task_id` from vehicle `from` to vehicle `to`.
///
/// Returns the resulting plan, or `None` if the task is not on `from`, is
/// heavier than `to`'s capacity, or the chosen insertion overloads `to`. The
/// input plan is never modified.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Plan, Task, Vehicle};
/// use u_dispatch::local_search::reassign_task;
/// use rand::SeedableRng;
///
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 0, 10)];
/// let mut plan = Plan::new(&vehicles);
/// plan.assign_new_task(0, &Task::new(3, 1, 2, 4)).unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let moved = reassign_task(&plan, 0, 1, 3, &mut rng).unwrap();
/// assert_eq!(moved.owning_vehicle(3), Some(1));
/// assert!(moved.route(0).is_empty());
/// assert_eq!(plan.owning_vehicle(3), Some(0));
/// ```
pub fn reassign_task<R: Rng>(
    plan: &Plan,
    from: usize,
    to: usize,
    task_id: usize,
    rng: &mut R,
) -> Option<Plan> {
    debug_assert_ne!(from, to);
    let pickup_key = StepKey {
        kind: StepKind::Pickup,
        task_id,
    };
    let delivery_key = StepKey {
        kind: StepKind::Delivery,
        task_id,
    };
    let removed_at = plan.position(from, pickup_key)?;

    let mut candidate = plan.clone();
    let pickup = candidate.remove_step(from, pickup_key)?;
    let delivery = candidate.remove_step(from, delivery_key)?;
    if pickup.weight() > candidate.capacity(to) {
        return None;
    }

    let inserted_at = if candidate.route(to).len() >= 2 {
        insert_at_random_span(&mut candidate, to, pickup, delivery, rng)
    } else {
        let end = candidate.route(to).len();
        candidate.insert_step(to, end, pickup);
        candidate.insert_step(to, end + 1, delivery);
        end
    };
    candidate.set_owner(task_id, to);

    // removal only frees capacity, but the annotations after it are stale
    let source_ok = candidate.propagate_capacity(from, removed_at);
    let target_ok = candidate.propagate_capacity(to, inserted_at);
    (source_ok && target_ok).then_some(candidate)
}
