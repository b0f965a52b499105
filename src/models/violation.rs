//! Plan invariant violation types.

/// A type of invariant violation in a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Carried load exceeds capacity after a step.
    CapacityExceeded {
        /// Fleet index of the vehicle.
        vehicle: usize,
        /// Position of the offending step.
        position: usize,
        /// Load carried after the step.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A delivery precedes the pickup of the same task.
    PrecedenceViolated {
        /// Task ID.
        task: usize,
    },
    /// A task lacks its pickup or its delivery, or has them on two vehicles.
    IncompleteTask {
        /// Task ID.
        task: usize,
    },
    /// A task appears more than once.
    DuplicateTask {
        /// Task ID.
        task: usize,
    },
    /// The task→vehicle index disagrees with the routes.
    OwnerMismatch {
        /// Task ID.
        task: usize,
    },
    /// A step's stored remaining capacity differs from the recomputed value.
    StaleAnnotation {
        /// Fleet index of the vehicle.
        vehicle: usize,
        /// Position of the step.
        position: usize,
    },
    /// A submitted task is not in the plan.
    MissingTask {
        /// Task ID.
        task: usize,
    },
    /// The plan carries a task that was not submitted.
    UnexpectedTask {
        /// Task ID.
        task: usize,
    },
}

/// An invariant violation in a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}
