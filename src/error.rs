//! Error types for plan construction and search configuration.

/// Errors surfaced by plan construction and the planners.
///
/// Capacity failures raised while the search explores candidate plans never
/// reach the caller; the candidate is simply discarded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// A task is heavier than the free capacity of the chosen vehicle.
    #[error("task {task} (weight {weight}) exceeds capacity {capacity} of vehicle {vehicle}")]
    CapacityExceeded {
        /// Fleet index of the vehicle.
        vehicle: usize,
        /// Task ID.
        task: usize,
        /// Task weight.
        weight: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// No vehicle of the fleet can ever carry this task.
    #[error("task {task} (weight {weight}) fits no vehicle of the fleet")]
    InfeasibleFleet {
        /// Task ID.
        task: usize,
        /// Task weight.
        weight: i32,
    },
    /// A previous plan refers to a task missing from the current task set.
    #[error("plan refers to unknown task {task}")]
    UnknownTask {
        /// Task ID.
        task: usize,
    },
    /// A task is already assigned in the plan it would be added to.
    #[error("task {task} is already assigned")]
    DuplicateTask {
        /// Task ID.
        task: usize,
    },
    /// Search configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_infeasible_fleet() {
        let e = PlanError::InfeasibleFleet { task: 7, weight: 12 };
        assert_eq!(e.to_string(), "task 7 (weight 12) fits no vehicle of the fleet");
    }

    #[test]
    fn test_display_duplicate_task() {
        let e = PlanError::DuplicateTask { task: 2 };
        assert_eq!(e.to_string(), "task 2 is already assigned");
    }

    #[test]
    fn test_display_capacity_exceeded() {
        let e = PlanError::CapacityExceeded {
            vehicle: 1,
            task: 3,
            weight: 5,
            capacity: 4,
        };
        assert!(e.to_string().contains("capacity 4"));
    }
}
