//! Intra-vehicle step reordering move.
//!
//! # Algorithm
//!
//! Exchanges the steps at positions `i < j` of one route. Exchanges that
//! would break pickup-before-delivery are rejected up front, without
//! touching any plan; the rest are spliced into a copy through anchor-relative
//! insertion and re-annotated from `i`.
//!
//! # Complexity
//!
//! O(L) per move, L = route length.

use crate::models::Plan;

/// Exchanges the steps at positions `i` and `j` of `vehicle`'s route.
///
/// Returns `None` without copying the plan if `i >= j`, `j` is out of
/// range, both steps belong to the same task, the pickup at `i` would move
/// past its delivery, or the delivery at `j` would move before its pickup.
/// Returns `None` as well if the exchanged route overloads the vehicle.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Plan, Task, Vehicle};
/// use u_dispatch::local_search::swap_steps;
///
/// let vehicles = vec![Vehicle::new(0, 0, 10)];
/// let mut plan = Plan::new(&vehicles);
/// plan.assign_new_task(0, &Task::new(0, 1, 2, 3)).unwrap();
/// plan.assign_new_task(0, &Task::new(1, 3, 4, 3)).unwrap();
///
/// // D0 and P1 are adjacent: exchanging them carries both tasks at once
/// let swapped = swap_steps(&plan, 0, 1, 2).unwrap();
/// assert_eq!(swapped.route(0)[1].task_id(), 1);
/// assert_eq!(swapped.route(0)[1].remaining_capacity(), 4);
///
/// // P0 cannot move past D0
/// assert!(swap_steps(&plan, 0, 0, 1).is_none());
/// ```
pub fn swap_steps(plan: &Plan, vehicle: usize, i: usize, j: usize) -> Option<Plan> {
    let route = plan.route(vehicle);
    if i >= j || j >= route.len() {
        return None;
    }
    let (first, second) = (&route[i], &route[j]);
    if first.task_id() == second.task_id() {
        return None;
    }
    if first.is_pickup() && plan.position(vehicle, first.partner_key())? <= j {
        return None;
    }
    if !second.is_pickup() && plan.position(vehicle, second.partner_key())? >= i {
        return None;
    }

    let (first_key, second_key) = (first.key(), second.key());
    let mut candidate = plan.clone();

    if j == i + 1 {
        let moved = candidate.remove_step(vehicle, first_key)?;
        if !candidate.insert_step_after(vehicle, second_key, moved) {
            return None;
        }
    } else {
        let before_second = route[j - 1].key();
        let before_first = i.checked_sub(1).map(|k| route[k].key());

        let moved_second = candidate.remove_step(vehicle, second_key)?;
        let moved_first = candidate.remove_step(vehicle, first_key)?;
        if !candidate.insert_step_after(vehicle, before_second, moved_first) {
            return None;
        }
        match before_first {
            Some(anchor) => {
                if !candidate.insert_step_after(vehicle, anchor, moved_second) {
                    return None;
                }
            }
            None => candidate.insert_step_front(vehicle, moved_second),
        }
    }

    candidate
        .propagate_capacity(vehicle, i)
        .then_some(candidate)
}
