//! Randomized insertion of a task into an existing plan.

use rand::Rng;

use crate::models::{Plan, Step, Task};

/// Inserts a pickup/delivery pair into a vehicle's route at a random span.
///
/// The route must hold at least two steps. The delivery goes to a uniform
/// index `d` in `[p, len)` and the pickup to a uniform index `p` in
/// `[0, len - 1)`, so the pickup always precedes the delivery. Returns `p`,
/// the first position whose annotation is stale. The owner index is not
/// updated.
pub(crate) fn insert_at_random_span<R: Rng>(
    plan: &mut Plan,
    vehicle: usize,
    pickup: Step,
    delivery: Step,
    rng: &mut R,
) -> usize {
    let len = plan.route(vehicle).len();
    debug_assert!(len >= 2);
    let p = rng.random_range(0..len - 1);
    let d = rng.random_range(p..len);
    plan.insert_step(vehicle, d, delivery);
    plan.insert_step(vehicle, p, pickup);
    p
}

/// Adds a new task to a copy of `plan`, for bid evaluation.
///
/// Vehicles are tried in fleet order; the first one able to carry the task
/// gets it, at a random feasible span of its route when the route is not
/// empty, otherwise (or if the random span overloads the vehicle) appended
/// at the end, which is always feasible since routes end empty.
///
/// Returns `None` when no vehicle can carry the task at all, or when the
/// task is already in the plan.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Plan, Task, Vehicle};
/// use u_dispatch::constructive::insert_candidate;
/// use rand::SeedableRng;
///
/// let vehicles = vec![Vehicle::new(0, 0, 5), Vehicle::new(1, 0, 10)];
/// let plan = Plan::new(&vehicles);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
///
/// let with_task = insert_candidate(&plan, &Task::new(0, 1, 2, 8), &mut rng).unwrap();
/// assert_eq!(with_task.owning_vehicle(0), Some(1));
/// assert!(insert_candidate(&plan, &Task::new(1, 1, 2, 11), &mut rng).is_none());
/// ```
pub fn insert_candidate<R: Rng>(plan: &Plan, task: &Task, rng: &mut R) -> Option<Plan> {
    if let Some(owner) = plan.owning_vehicle(task.id()) {
        tracing::warn!(task = task.id(), vehicle = owner, "task already in plan, not inserted");
        return None;
    }
    for vehicle in 0..plan.num_vehicles() {
        if plan.capacity(vehicle) < task.weight() {
            continue;
        }

        if plan.route(vehicle).len() >= 2 {
            let mut candidate = plan.clone();
            let from = insert_at_random_span(
                &mut candidate,
                vehicle,
                Step::pickup(task, 0),
                Step::delivery(task, 0),
                rng,
            );
            candidate.set_owner(task.id(), vehicle);
            if candidate.propagate_capacity(vehicle, from) {
                return Some(candidate);
            }
        }

        let mut candidate = plan.clone();
        if candidate.assign_new_task(vehicle, task).is_ok() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vehicle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_span_keeps_precedence() {
        let vehicles = vec![Vehicle::new(0, 0, 100)];
        let mut rng = StdRng::seed_from_u64(1);
        for seed in 0..50 {
            let mut plan = Plan::new(&vehicles);
            for i in 0..3 {
                plan.assign_new_task(0, &Task::new(i, 0, 1, 1)).expect("fits");
            }
            let t = Task::new(10 + seed, 2, 3, 1);
            let from = insert_at_random_span(
                &mut plan,
                0,
                Step::pickup(&t, 0),
                Step::delivery(&t, 0),
                &mut rng,
            );
            plan.set_owner(t.id(), 0);
            assert!(plan.propagate_capacity(0, from));
            assert!(plan.check_structure().is_empty());
        }
    }

    #[test]
    fn test_insert_candidate_empty_route_appends() {
        let vehicles = vec![Vehicle::new(0, 0, 10)];
        let plan = Plan::new(&vehicles);
        let mut rng = StdRng::seed_from_u64(3);
        let out = insert_candidate(&plan, &Task::new(4, 1, 2, 10), &mut rng).expect("fits");
        assert_eq!(out.route(0).len(), 2);
        assert!(plan.route(0).is_empty());
    }

    #[test]
    fn test_insert_candidate_always_feasible() {
        // vehicle is full between the existing pickup and delivery, so some
        // random spans overload it and must fall back to appending
        let vehicles = vec![Vehicle::new(0, 0, 4)];
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(0, &Task::new(0, 0, 1, 4)).expect("fits");
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = insert_candidate(&plan, &Task::new(1, 1, 2, 3), &mut rng).expect("fits");
            assert_eq!(out.owning_vehicle(1), Some(0));
            assert_eq!(out.route(0).len(), 4);
            assert!(out.check_structure().is_empty());
        }
    }

    #[test]
    fn test_insert_candidate_rejects_assigned_task() {
        let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 0, 10)];
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(0, &Task::new(0, 1, 2, 3)).expect("fits");
        plan.assign_new_task(0, &Task::new(1, 2, 3, 3)).expect("fits");
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(insert_candidate(&plan, &Task::new(0, 2, 1, 3), &mut rng).is_none());
        }
    }

    #[test]
    fn test_insert_candidate_none_when_too_heavy() {
        let vehicles = vec![Vehicle::new(0, 0, 4), Vehicle::new(1, 0, 6)];
        let plan = Plan::new(&vehicles);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(insert_candidate(&plan, &Task::new(0, 0, 1, 7), &mut rng).is_none());
    }
}
