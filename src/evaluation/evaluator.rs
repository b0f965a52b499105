//! Plan evaluator: travel cost, executable routes and validation.

use std::collections::BTreeSet;

use crate::distance::Topology;
use crate::models::{Action, Plan, StepKind, Task, Vehicle, VehicleRoute, Violation, ViolationType};

/// Total travel cost of a plan.
///
/// For each vehicle, walks from its home location through the locations of
/// its steps and sums `distance × cost_per_distance`. Vehicles with an empty
/// route cost nothing (there is no return leg).
pub fn plan_cost<T: Topology + ?Sized>(plan: &Plan, vehicles: &[Vehicle], topology: &T) -> f64 {
    debug_assert_eq!(plan.num_vehicles(), vehicles.len());
    vehicles
        .iter()
        .enumerate()
        .map(|(v, vehicle)| route_distance(plan, v, vehicle.home(), topology) * vehicle.cost_per_distance())
        .sum()
}

/// Distance walked by one vehicle from `home` through its steps.
pub fn route_distance<T: Topology + ?Sized>(
    plan: &Plan,
    vehicle: usize,
    home: usize,
    topology: &T,
) -> f64 {
    let mut current = home;
    let mut total = 0.0;
    for step in plan.route(vehicle) {
        if step.location() != current {
            total += topology.distance(current, step.location());
            current = step.location();
        }
    }
    total
}

/// Executable routes of every vehicle of a plan, in fleet order.
///
/// Shorthand for [`PlanEvaluator::build_routes`].
pub fn build_routes<T: Topology + ?Sized>(
    plan: &Plan,
    vehicles: &[Vehicle],
    topology: &T,
) -> Vec<VehicleRoute> {
    PlanEvaluator::new(vehicles, topology).build_routes(plan)
}

/// Evaluates plans against a fleet and a distance oracle.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Action, Plan, Task, Vehicle};
/// use u_dispatch::distance::RoadNetwork;
/// use u_dispatch::evaluation::PlanEvaluator;
///
/// // 0 -- 1 -- 2
/// let net = RoadNetwork::from_roads(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
/// let vehicles = vec![Vehicle::new(0, 0, 10).with_cost_per_distance(2.0)];
/// let mut plan = Plan::new(&vehicles);
/// plan.assign_new_task(0, &Task::new(0, 1, 2, 5)).unwrap();
///
/// let evaluator = PlanEvaluator::new(&vehicles, &net);
/// assert_eq!(evaluator.cost(&plan), 4.0);
///
/// let routes = evaluator.build_routes(&plan);
/// assert_eq!(
///     routes[0].actions(),
///     &[Action::Move(1), Action::Pickup(0), Action::Move(2), Action::Delivery(0)]
/// );
/// ```
pub struct PlanEvaluator<'a, T: Topology + ?Sized> {
    vehicles: &'a [Vehicle],
    topology: &'a T,
}

impl<'a, T: Topology + ?Sized> PlanEvaluator<'a, T> {
    /// Creates a new evaluator for the given fleet and oracle.
    pub fn new(vehicles: &'a [Vehicle], topology: &'a T) -> Self {
        Self { vehicles, topology }
    }

    /// Total travel cost of a plan.
    pub fn cost(&self, plan: &Plan) -> f64 {
        plan_cost(plan, self.vehicles, self.topology)
    }

    /// Builds the executable route of one vehicle.
    ///
    /// Between consecutive steps at different locations, one move action is
    /// emitted per stop of [`Topology::path`].
    pub fn build_route(&self, plan: &Plan, vehicle: usize) -> VehicleRoute {
        let v = &self.vehicles[vehicle];
        let mut route = VehicleRoute::new(v.id(), v.home());
        let mut current = v.home();
        let mut total_distance = 0.0;

        for step in plan.route(vehicle) {
            if step.location() != current {
                total_distance += self.topology.distance(current, step.location());
                for city in self.topology.path(current, step.location()) {
                    route.push_action(Action::Move(city));
                }
                current = step.location();
            }
            route.push_action(match step.kind() {
                StepKind::Pickup => Action::Pickup(step.task_id()),
                StepKind::Delivery => Action::Delivery(step.task_id()),
            });
        }

        route.set_total_distance(total_distance);
        route.set_total_cost(total_distance * v.cost_per_distance());
        route
    }

    /// Builds the executable routes of every vehicle, in fleet order.
    pub fn build_routes(&self, plan: &Plan) -> Vec<VehicleRoute> {
        (0..self.vehicles.len())
            .map(|v| self.build_route(plan, v))
            .collect()
    }

    /// Evaluates a plan against the submitted tasks, returning
    /// `(cost, violations)`.
    ///
    /// A valid plan has an empty violations list.
    pub fn evaluate(&self, plan: &Plan, tasks: &[Task]) -> (f64, Vec<Violation>) {
        (self.cost(plan), validate_plan(plan, tasks))
    }
}

/// Checks every plan invariant against the submitted task set.
///
/// Reports structural violations (capacity, precedence, duplicates, owner
/// index, annotations) plus conservation: every submitted task must be in
/// the plan and the plan must carry nothing else.
pub fn validate_plan(plan: &Plan, tasks: &[Task]) -> Vec<Violation> {
    let mut violations = plan.check_structure();

    let submitted: BTreeSet<usize> = tasks.iter().map(|t| t.id()).collect();
    let planned: BTreeSet<usize> = plan.task_ids().collect();

    for &task in submitted.difference(&planned) {
        violations.push(Violation::new(ViolationType::MissingTask { task }));
    }
    for &task in planned.difference(&submitted) {
        violations.push(Violation::new(ViolationType::UnexpectedTask { task }));
    }

    violations
}
