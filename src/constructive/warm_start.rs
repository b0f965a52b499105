//! Warm-start construction from a previously committed plan.
//!
//! Tasks are matched across planning calls by ID. The previous vehicle
//! assignment and step order are reused unchanged; only the task data held
//! by each step is refreshed from the new task set.

use std::collections::BTreeMap;

use rand::Rng;

use crate::error::PlanError;
use crate::models::{Plan, Task};

use super::insertion::insert_candidate;

/// Copies `previous` and rebinds every step to the task of the same ID in
/// `tasks`, then recomputes all capacity annotations.
///
/// Tasks of `tasks` that are not in `previous` are ignored.
///
/// # Errors
///
/// - [`PlanError::UnknownTask`] if the plan holds a task ID absent from
///   `tasks`.
/// - [`PlanError::CapacityExceeded`] if the refreshed weights no longer fit
///   a route.
pub fn rebind(previous: &Plan, tasks: &[Task]) -> Result<Plan, PlanError> {
    let by_id: BTreeMap<usize, &Task> = tasks.iter().map(|t| (t.id(), t)).collect();
    let mut plan = previous.clone();

    for step in plan.steps_mut() {
        let task = by_id
            .get(&step.task_id())
            .ok_or(PlanError::UnknownTask {
                task: step.task_id(),
            })?;
        step.rebind(task);
    }

    for vehicle in 0..plan.num_vehicles() {
        let capacity = plan.capacity(vehicle);
        let mut free = capacity;
        for step in plan.route(vehicle) {
            free = step.load_after(free).ok_or(PlanError::CapacityExceeded {
                vehicle,
                task: step.task_id(),
                weight: step.weight(),
                capacity,
            })?;
        }
        plan.propagate_capacity(vehicle, 0);
    }

    Ok(plan)
}

/// Builds a starting plan from a previously committed one.
///
/// The previous plan is rebound to `tasks` (see [`rebind`]); tasks not yet
/// in the plan are then added with [`insert_candidate`], so the result
/// carries exactly the tasks of `tasks` that were in `previous` plus the new
/// ones.
///
/// # Errors
///
/// - Errors of [`rebind`].
/// - [`PlanError::InfeasibleFleet`] if a new task fits no vehicle.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Task, Vehicle};
/// use u_dispatch::constructive::{round_robin, warm_start};
/// use rand::SeedableRng;
///
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 0, 10)];
/// let won = vec![Task::new(0, 1, 2, 3), Task::new(1, 2, 3, 4)];
/// let committed = round_robin(&vehicles, &won).unwrap();
///
/// // the final task set carries rewards and one extra task
/// let mut tasks: Vec<Task> = won.iter().map(|t| t.clone().with_reward(50.0)).collect();
/// tasks.push(Task::new(2, 3, 1, 2));
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let plan = warm_start(&committed, &tasks, &mut rng).unwrap();
/// assert_eq!(plan.num_tasks(), 3);
/// assert_eq!(plan.owning_vehicle(0), committed.owning_vehicle(0));
/// ```
pub fn warm_start<R: Rng>(previous: &Plan, tasks: &[Task], rng: &mut R) -> Result<Plan, PlanError> {
    let mut plan = rebind(previous, tasks)?;

    for task in tasks {
        if plan.owning_vehicle(task.id()).is_some() {
            continue;
        }
        plan = insert_candidate(&plan, task, rng).ok_or_else(|| {
            tracing::warn!(
                task = task.id(),
                weight = task.weight(),
                "task fits no vehicle, warm start aborted"
            );
            PlanError::InfeasibleFleet {
                task: task.id(),
                weight: task.weight(),
            }
        })?;
    }

    Ok(plan)
}
