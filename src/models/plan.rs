//! Plan: per-vehicle step sequences with a task→vehicle index.

use std::collections::BTreeMap;

use crate::distance::Topology;
use crate::error::PlanError;

use super::{Step, StepKey, StepKind, Task, Vehicle, Violation, ViolationType};

/// Assignment of tasks to vehicles together with each vehicle's step order.
///
/// Vehicles are addressed by their fleet index, i.e. their position in the
/// vehicle slice the plan was created from. Tasks are addressed by ID.
///
/// Every committed plan keeps these invariants:
///
/// - each task on a route has exactly one pickup and one delivery on that
///   same route, pickup first;
/// - every step's remaining capacity is non-negative and matches the value
///   recomputed from the vehicle capacity;
/// - the task→vehicle index agrees with the routes.
///
/// Cloning a plan yields a fully independent copy, so candidates can be
/// mutated freely without touching the plan they were derived from.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Plan, Task, Vehicle};
///
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 0, 10)];
/// let task = Task::new(7, 1, 2, 4);
///
/// let mut plan = Plan::new(&vehicles);
/// plan.assign_new_task(1, &task).unwrap();
/// assert_eq!(plan.owning_vehicle(7), Some(1));
/// assert_eq!(plan.route(1).len(), 2);
/// assert_eq!(plan.first_step(1).unwrap().remaining_capacity(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plan {
    routes: Vec<Vec<Step>>,
    capacities: Vec<i32>,
    owners: BTreeMap<usize, usize>,
}

impl Plan {
    /// Creates an empty plan with one empty route per vehicle.
    pub fn new(vehicles: &[Vehicle]) -> Self {
        Self {
            routes: vec![Vec::new(); vehicles.len()],
            capacities: vehicles.iter().map(|v| v.capacity()).collect(),
            owners: BTreeMap::new(),
        }
    }

    /// Returns an independent copy of this plan.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Number of vehicles (routes, possibly empty).
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Number of assigned tasks.
    pub fn num_tasks(&self) -> usize {
        self.owners.len()
    }

    /// Assigned task IDs in ascending order.
    pub fn task_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.owners.keys().copied()
    }

    /// All routes, indexed by fleet index.
    pub fn routes(&self) -> &[Vec<Step>] {
        &self.routes
    }

    /// Steps of one vehicle in execution order.
    pub fn route(&self, vehicle: usize) -> &[Step] {
        &self.routes[vehicle]
    }

    /// Capacity of a vehicle as captured when the plan was created.
    pub fn capacity(&self, vehicle: usize) -> i32 {
        self.capacities[vehicle]
    }

    /// First step of a vehicle, i.e. what it will act on next.
    pub fn first_step(&self, vehicle: usize) -> Option<&Step> {
        self.routes[vehicle].first()
    }

    /// Vehicle currently responsible for a task.
    pub fn owning_vehicle(&self, task_id: usize) -> Option<usize> {
        self.owners.get(&task_id).copied()
    }

    /// Task IDs owned by a vehicle, in pickup order.
    pub fn tasks_of(&self, vehicle: usize) -> Vec<usize> {
        self.routes[vehicle]
            .iter()
            .filter(|s| s.is_pickup())
            .map(|s| s.task_id())
            .collect()
    }

    /// Position of a step in a vehicle's route.
    pub fn position(&self, vehicle: usize, key: StepKey) -> Option<usize> {
        self.routes[vehicle].iter().position(|s| s.key() == key)
    }

    /// Appends the pickup and delivery of a new task to a vehicle's route.
    ///
    /// The route ends empty, so the pickup leaves `capacity - weight` free
    /// and the delivery restores the full capacity.
    ///
    /// # Errors
    ///
    /// [`PlanError::CapacityExceeded`] if the task is heavier than the
    /// vehicle's capacity. The plan is left unchanged.
    pub fn assign_new_task(&mut self, vehicle: usize, task: &Task) -> Result<(), PlanError> {
        debug_assert!(
            !self.owners.contains_key(&task.id()),
            "task {} is already assigned",
            task.id()
        );
        let capacity = self.capacities[vehicle];
        let free = self.routes[vehicle]
            .last()
            .map_or(capacity, |s| s.remaining_capacity());
        if free < task.weight() {
            return Err(PlanError::CapacityExceeded {
                vehicle,
                task: task.id(),
                weight: task.weight(),
                capacity,
            });
        }
        let route = &mut self.routes[vehicle];
        route.push(Step::pickup(task, free - task.weight()));
        route.push(Step::delivery(task, free));
        self.owners.insert(task.id(), vehicle);
        Ok(())
    }

    /// Inserts `step` right after the step identified by `anchor`.
    ///
    /// Returns `false` and leaves the plan unchanged if the anchor is not in
    /// the vehicle's route. Annotations are not recomputed; call
    /// [`propagate_capacity`](Self::propagate_capacity) afterwards.
    pub fn insert_step_after(&mut self, vehicle: usize, anchor: StepKey, step: Step) -> bool {
        match self.position(vehicle, anchor) {
            Some(pos) => {
                self.routes[vehicle].insert(pos + 1, step);
                true
            }
            None => false,
        }
    }

    /// Inserts `step` at the front of a vehicle's route.
    pub fn insert_step_front(&mut self, vehicle: usize, step: Step) {
        self.routes[vehicle].insert(0, step);
    }

    /// Inserts `step` at `index` of a vehicle's route.
    pub(crate) fn insert_step(&mut self, vehicle: usize, index: usize, step: Step) {
        self.routes[vehicle].insert(index, step);
    }

    /// Removes the step identified by `key` from a vehicle's route.
    pub fn remove_step(&mut self, vehicle: usize, key: StepKey) -> Option<Step> {
        let pos = self.position(vehicle, key)?;
        Some(self.routes[vehicle].remove(pos))
    }

    /// Records `vehicle` as the owner of a task.
    pub(crate) fn set_owner(&mut self, task_id: usize, vehicle: usize) {
        self.owners.insert(task_id, vehicle);
    }

    pub(crate) fn steps_mut(&mut self) -> impl Iterator<Item = &mut Step> {
        self.routes.iter_mut().flatten()
    }

    /// Recomputes remaining capacities from `from_index` to the end of a
    /// vehicle's route.
    ///
    /// The walk is seeded with the predecessor's annotation, or with the
    /// vehicle capacity when `from_index == 0`. Returns `false` as soon as a
    /// step would leave negative free capacity; annotations past that point
    /// are then stale and the plan must be discarded.
    pub fn propagate_capacity(&mut self, vehicle: usize, from_index: usize) -> bool {
        let capacity = self.capacities[vehicle];
        let route = &mut self.routes[vehicle];
        if from_index >= route.len() {
            return true;
        }
        let mut free = if from_index == 0 {
            capacity
        } else {
            route[from_index - 1].remaining_capacity()
        };
        for step in &mut route[from_index..] {
            match step.load_after(free) {
                Some(rem) => {
                    step.set_remaining_capacity(rem);
                    free = rem;
                }
                None => return false,
            }
        }
        true
    }

    /// Total travel cost: for every vehicle, distance walked from home through
    /// its steps times its cost per distance.
    pub fn cost<T: Topology + ?Sized>(&self, vehicles: &[Vehicle], topology: &T) -> f64 {
        crate::evaluation::plan_cost(self, vehicles, topology)
    }

    /// Checks the structural invariants of this plan.
    ///
    /// Returns every violation found; a well-formed plan yields an empty list.
    pub fn check_structure(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut located: BTreeMap<usize, usize> = BTreeMap::new();

        for (v, route) in self.routes.iter().enumerate() {
            let capacity = self.capacities[v];
            let mut free = capacity;
            // task -> (pickup positions, delivery positions)
            let mut positions: BTreeMap<usize, (Vec<usize>, Vec<usize>)> = BTreeMap::new();

            for (pos, step) in route.iter().enumerate() {
                let entry = positions.entry(step.task_id()).or_default();
                match step.kind() {
                    StepKind::Pickup => {
                        free -= step.weight();
                        entry.0.push(pos);
                    }
                    StepKind::Delivery => {
                        free += step.weight();
                        entry.1.push(pos);
                    }
                }
                if free < 0 {
                    violations.push(Violation::new(ViolationType::CapacityExceeded {
                        vehicle: v,
                        position: pos,
                        load: capacity - free,
                        capacity,
                    }));
                }
                if step.remaining_capacity() != free {
                    violations.push(Violation::new(ViolationType::StaleAnnotation {
                        vehicle: v,
                        position: pos,
                    }));
                }
            }

            for (&task, (pickups, deliveries)) in &positions {
                if pickups.len() > 1 || deliveries.len() > 1 {
                    violations.push(Violation::new(ViolationType::DuplicateTask { task }));
                } else if pickups.is_empty() || deliveries.is_empty() {
                    violations.push(Violation::new(ViolationType::IncompleteTask { task }));
                } else if pickups[0] > deliveries[0] {
                    violations.push(Violation::new(ViolationType::PrecedenceViolated { task }));
                }
                if located.insert(task, v).is_some() {
                    violations.push(Violation::new(ViolationType::DuplicateTask { task }));
                }
                if self.owners.get(&task) != Some(&v) {
                    violations.push(Violation::new(ViolationType::OwnerMismatch { task }));
                }
            }
        }

        for &task in self.owners.keys() {
            if !located.contains_key(&task) {
                violations.push(Violation::new(ViolationType::OwnerMismatch { task }));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Vehicle> {
        vec![Vehicle::new(0, 0, 4), Vehicle::new(1, 0, 10)]
    }

    #[test]
    fn test_new_plan_is_empty() {
        let plan = Plan::new(&fleet());
        assert_eq!(plan.num_vehicles(), 2);
        assert_eq!(plan.num_tasks(), 0);
        assert!(plan.first_step(0).is_none());
        assert!(plan.check_structure().is_empty());
    }

    #[test]
    fn test_assign_new_task_appends() {
        let mut plan = Plan::new(&fleet());
        plan.assign_new_task(1, &Task::new(0, 1, 2, 3)).expect("fits");
        plan.assign_new_task(1, &Task::new(1, 2, 3, 6)).expect("fits");
        let route = plan.route(1);
        assert_eq!(route.len(), 4);
        assert_eq!(route[0].remaining_capacity(), 7);
        assert_eq!(route[1].remaining_capacity(), 10);
        assert_eq!(route[2].remaining_capacity(), 4);
        assert_eq!(route[3].remaining_capacity(), 10);
        assert_eq!(plan.tasks_of(1), vec![0, 1]);
        assert!(plan.check_structure().is_empty());
    }

    #[test]
    fn test_assign_new_task_capacity_exceeded() {
        let mut plan = Plan::new(&fleet());
        let before = plan.clone();
        let err = plan.assign_new_task(0, &Task::new(0, 1, 2, 5)).unwrap_err();
        assert_eq!(
            err,
            PlanError::CapacityExceeded {
                vehicle: 0,
                task: 0,
                weight: 5,
                capacity: 4,
            }
        );
        assert_eq!(plan, before);
    }

    #[test]
    fn test_insert_step_after_missing_anchor_is_noop() {
        let mut plan = Plan::new(&fleet());
        plan.assign_new_task(0, &Task::new(0, 1, 2, 1)).expect("fits");
        let before = plan.clone();
        let ghost = StepKey {
            kind: StepKind::Delivery,
            task_id: 99,
        };
        let inserted = plan.insert_step_after(0, ghost, Step::pickup(&Task::new(5, 0, 0, 1), 0));
        assert!(!inserted);
        assert_eq!(plan, before);
    }

    #[test]
    fn test_insert_step_after_anchor() {
        let mut plan = Plan::new(&fleet());
        let a = Task::new(0, 1, 2, 1);
        plan.assign_new_task(1, &a).expect("fits");
        let b = Task::new(1, 3, 4, 2);
        let anchor = Step::pickup(&a, 0).key();
        assert!(plan.insert_step_after(1, anchor, Step::pickup(&b, 0)));
        assert_eq!(plan.route(1)[1].task_id(), 1);
    }

    #[test]
    fn test_propagate_capacity_detects_overload() {
        // capacity 4, weights 2 and 3 carried together -> infeasible
        let vehicles = vec![Vehicle::new(0, 0, 4)];
        let t1 = Task::new(1, 0, 1, 2);
        let t2 = Task::new(2, 0, 1, 3);
        let mut plan = Plan::new(&vehicles);
        plan.assign_new_task(0, &t1).expect("fits");
        plan.assign_new_task(0, &t2).expect("fits");
        assert!(plan.check_structure().is_empty());

        // p1 d1 p2 d2 -> p1 p2 d1 d2
        let mut combined = plan.clone();
        let p2 = combined.remove_step(0, Step::pickup(&t2, 0).key()).expect("present");
        assert!(combined.insert_step_after(0, Step::pickup(&t1, 0).key(), p2));
        assert!(!combined.propagate_capacity(0, 1));

        // original sequential carry stays feasible
        assert!(plan.propagate_capacity(0, 0));
    }

    #[test]
    fn test_propagate_capacity_past_end() {
        let mut plan = Plan::new(&fleet());
        assert!(plan.propagate_capacity(0, 0));
        assert!(plan.propagate_capacity(0, 7));
    }

    #[test]
    fn test_deep_copy_independent() {
        let mut plan = Plan::new(&fleet());
        plan.assign_new_task(1, &Task::new(0, 1, 2, 3)).expect("fits");
        let snapshot = plan.clone();
        let mut copy = plan.deep_copy();
        copy.assign_new_task(1, &Task::new(1, 2, 3, 1)).expect("fits");
        copy.remove_step(1, Step::pickup(&Task::new(0, 1, 2, 3), 0).key());
        assert_eq!(plan, snapshot);
        assert_ne!(plan, copy);
    }

    #[test]
    fn test_check_structure_precedence() {
        let mut plan = Plan::new(&fleet());
        let t = Task::new(0, 1, 2, 3);
        plan.assign_new_task(1, &t).expect("fits");
        let d = plan.remove_step(1, Step::delivery(&t, 0).key()).expect("present");
        plan.insert_step_front(1, d);
        plan.propagate_capacity(1, 0);
        let violations = plan.check_structure();
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::PrecedenceViolated { task: 0 }));
    }

    #[test]
    fn test_check_structure_owner_mismatch() {
        let mut plan = Plan::new(&fleet());
        plan.assign_new_task(1, &Task::new(0, 1, 2, 3)).expect("fits");
        plan.set_owner(0, 0);
        let violations = plan.check_structure();
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::OwnerMismatch { task: 0 })]
        );
    }
}
