//! Neighborhood generation around a plan.
//!
//! One source vehicle is drawn per call; the neighborhood is every feasible
//! plan reachable by reassigning one of its tasks to another vehicle plus
//! every feasible exchange of two of its steps.
//!
//! # Complexity
//!
//! O(m × k × L + L³) per call, m = vehicles, k = tasks of the source vehicle,
//! L = route length. Duplicate suppression adds a linear scan per candidate.

use rand::Rng;

use crate::models::Plan;

use super::reassign::reassign_task;
use super::reorder::swap_steps;

/// Draws the source vehicle uniformly among vehicles with a non-empty route.
pub fn choose_source_vehicle<R: Rng>(plan: &Plan, rng: &mut R) -> Option<usize> {
    let loaded: Vec<usize> = (0..plan.num_vehicles())
        .filter(|&v| !plan.route(v).is_empty())
        .collect();
    if loaded.is_empty() {
        return None;
    }
    Some(loaded[rng.random_range(0..loaded.len())])
}

/// Generates the feasible neighbors of `plan` around a random source
/// vehicle.
///
/// Empty when no vehicle carries any task.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Plan, Task, Vehicle};
/// use u_dispatch::local_search::neighborhood;
/// use rand::SeedableRng;
///
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 0, 10)];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(4);
///
/// let empty = Plan::new(&vehicles);
/// assert!(neighborhood(&empty, &mut rng).is_empty());
///
/// let mut plan = Plan::new(&vehicles);
/// plan.assign_new_task(0, &Task::new(0, 1, 2, 3)).unwrap();
/// let neighbors = neighborhood(&plan, &mut rng);
/// assert_eq!(neighbors.len(), 1);
/// assert_eq!(neighbors[0].owning_vehicle(0), Some(1));
/// ```
pub fn neighborhood<R: Rng>(plan: &Plan, rng: &mut R) -> Vec<Plan> {
    match choose_source_vehicle(plan, rng) {
        Some(source) => neighborhood_of(plan, source, rng),
        None => Vec::new(),
    }
}

/// Generates the feasible neighbors of `plan` around a given source
/// vehicle.
pub fn neighborhood_of<R: Rng>(plan: &Plan, source: usize, rng: &mut R) -> Vec<Plan> {
    let mut neighbors = Vec::new();

    let carried: Vec<(usize, i32)> = plan
        .route(source)
        .iter()
        .filter(|s| s.is_pickup())
        .map(|s| (s.task_id(), s.weight()))
        .collect();

    for target in 0..plan.num_vehicles() {
        if target == source {
            continue;
        }
        for &(task_id, weight) in &carried {
            if weight > plan.capacity(target) {
                continue;
            }
            if let Some(candidate) = reassign_task(plan, source, target, task_id, rng) {
                push_unique(&mut neighbors, candidate);
            }
        }
    }

    let len = plan.route(source).len();
    for i in 0..len {
        for j in (i + 1)..len {
            if let Some(candidate) = swap_steps(plan, source, i, j) {
                push_unique(&mut neighbors, candidate);
            }
        }
    }

    neighbors
}

fn push_unique(neighbors: &mut Vec<Plan>, candidate: Plan) {
    if !neighbors.contains(&candidate) {
        neighbors.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::shuffled_round_robin;
    use crate::models::{Task, Vehicle};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fleet() -> Vec<Vehicle> {
        vec![
            Vehicle::new(0, 0, 10),
            Vehicle::new(1, 1, 4),
            Vehicle::new(2, 2, 10),
        ]
    }

    #[test]
    fn test_source_vehicle_is_loaded() {
        let vehicles = fleet();
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(2, &Task::new(0, 1, 2, 1)).expect("fits");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(choose_source_vehicle(&plan, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_neighbors_are_feasible_and_distinct() {
        let vehicles = fleet();
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(0, &Task::new(0, 1, 2, 3)).expect("fits");
        plan.assign_new_task(0, &Task::new(1, 2, 0, 6)).expect("fits");
        plan.assign_new_task(0, &Task::new(2, 0, 1, 4)).expect("fits");

        let mut rng = StdRng::seed_from_u64(11);
        let neighbors = neighborhood_of(&plan, 0, &mut rng);
        assert!(!neighbors.is_empty());
        for (k, n) in neighbors.iter().enumerate() {
            assert!(n.check_structure().is_empty());
            assert_eq!(n.num_tasks(), 3);
            assert_ne!(n, &plan);
            assert!(!neighbors[..k].contains(n));
        }
        // task 1 (weight 6) never lands on vehicle 1 (capacity 4)
        assert!(neighbors.iter().all(|n| n.owning_vehicle(1) != Some(1)));
        assert!(neighbors.iter().any(|n| n.owning_vehicle(0) == Some(1)));
    }

    #[test]
    fn test_neighborhood_leaves_input_untouched() {
        let vehicles = fleet();
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(1, &Task::new(0, 1, 2, 3)).expect("fits");
        plan.assign_new_task(1, &Task::new(1, 2, 0, 1)).expect("fits");
        let snapshot = plan.clone();
        let mut rng = StdRng::seed_from_u64(2);
        let _ = neighborhood(&plan, &mut rng);
        assert_eq!(plan, snapshot);
    }

    #[test]
    fn test_neighborhood_deterministic_for_seed() {
        let vehicles = fleet();
        let mut plan = Plan::new(&vehicles);
        for id in 0..4 {
            plan.assign_new_task(id % 3, &Task::new(id, id % 3, (id + 1) % 3, 2))
                .expect("fits");
        }
        let a = neighborhood(&plan, &mut StdRng::seed_from_u64(8));
        let b = neighborhood(&plan, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    prop_compose! {
        fn fleet_and_tasks()
        (
         capacities in prop::collection::vec(4i32..12, 1..4),
         loads in prop::collection::vec((0usize..6, 0usize..6, 1i32..=4), 1..7),
        ) -> (Vec<Vehicle>, Vec<Task>) {
            let vehicles = capacities
                .iter()
                .enumerate()
                .map(|(i, &c)| Vehicle::new(i, i % 6, c))
                .collect();
            let tasks = loads
                .iter()
                .enumerate()
                .map(|(i, &(from, to, w))| Task::new(i, from, to, w))
                .collect();
            (vehicles, tasks)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_neighbors_keep_invariants((vehicles, tasks) in fleet_and_tasks(), seed in 0u64..500) {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = shuffled_round_robin(&vehicles, &tasks, &mut rng).expect("weights fit");
            let snapshot = plan.clone();

            for neighbor in neighborhood(&plan, &mut rng) {
                prop_assert!(neighbor.check_structure().is_empty());
                let mut ids: Vec<usize> = neighbor.task_ids().collect();
                ids.sort_unstable();
                prop_assert_eq!(ids, (0..tasks.len()).collect::<Vec<_>>());
            }
            prop_assert_eq!(plan, snapshot);
        }

        #[test]
        fn prop_copy_is_independent((vehicles, tasks) in fleet_and_tasks(), seed in 0u64..500) {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = shuffled_round_robin(&vehicles, &tasks, &mut rng).expect("weights fit");
            let mut copy = plan.deep_copy();
            let source = choose_source_vehicle(&copy, &mut rng).expect("plan carries tasks");
            let key = copy.route(source)[0].key();
            prop_assert!(copy.remove_step(source, key).is_some());
            prop_assert_eq!(plan.route(source).len(), copy.route(source).len() + 1);
            prop_assert!(plan.check_structure().is_empty());
        }
    }
}
