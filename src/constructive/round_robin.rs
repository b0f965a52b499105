//! Round-robin cold-start construction.
//!
//! Hands tasks to vehicles in turn, each task appended to the end of its
//! vehicle's route. A vehicle that cannot carry the task is skipped; a task
//! skipped by every vehicle means no feasible plan exists at all.
//!
//! # Complexity
//!
//! O(n × m) where n = number of tasks, m = number of vehicles.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PlanError;
use crate::models::{Plan, Task, Vehicle};

/// Builds an initial plan by round-robin assignment in the given order.
///
/// # Errors
///
/// [`PlanError::InfeasibleFleet`] if some task is heavier than every
/// vehicle's capacity.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Task, Vehicle};
/// use u_dispatch::constructive::round_robin;
///
/// let vehicles = vec![Vehicle::new(0, 0, 5), Vehicle::new(1, 0, 20)];
/// let tasks = vec![Task::new(0, 1, 2, 3), Task::new(1, 2, 3, 3), Task::new(2, 3, 1, 15)];
///
/// let plan = round_robin(&vehicles, &tasks).unwrap();
/// assert_eq!(plan.owning_vehicle(0), Some(0));
/// assert_eq!(plan.owning_vehicle(1), Some(1));
/// // vehicle 0 is next in turn but too small: skipped
/// assert_eq!(plan.owning_vehicle(2), Some(1));
/// ```
pub fn round_robin(vehicles: &[Vehicle], tasks: &[Task]) -> Result<Plan, PlanError> {
    let order: Vec<usize> = (0..vehicles.len()).collect();
    assign_in_turn(vehicles, tasks.iter(), &order)
}

/// Round-robin construction over shuffled task and vehicle orders.
///
/// Fleet indices in the resulting plan are those of `vehicles`; only the
/// order in which vehicles take their turn is shuffled.
///
/// # Errors
///
/// [`PlanError::InfeasibleFleet`] if some task is heavier than every
/// vehicle's capacity.
pub fn shuffled_round_robin<R: Rng>(
    vehicles: &[Vehicle],
    tasks: &[Task],
    rng: &mut R,
) -> Result<Plan, PlanError> {
    let mut order: Vec<usize> = (0..vehicles.len()).collect();
    order.shuffle(rng);
    let mut shuffled: Vec<&Task> = tasks.iter().collect();
    shuffled.shuffle(rng);
    assign_in_turn(vehicles, shuffled, &order)
}

fn assign_in_turn<'a>(
    vehicles: &[Vehicle],
    tasks: impl IntoIterator<Item = &'a Task>,
    order: &[usize],
) -> Result<Plan, PlanError> {
    let mut plan = Plan::new(vehicles);
    let mut cursor = 0;

    for task in tasks {
        let mut placed = false;
        for _ in 0..order.len() {
            let vehicle = order[cursor];
            cursor = (cursor + 1) % order.len();
            if plan.assign_new_task(vehicle, task).is_ok() {
                placed = true;
                break;
            }
        }
        if !placed {
            tracing::warn!(
                task = task.id(),
                weight = task.weight(),
                "task fits no vehicle, no feasible plan exists"
            );
            return Err(PlanError::InfeasibleFleet {
                task: task.id(),
                weight: task.weight(),
            });
        }
    }

    Ok(plan)
}
