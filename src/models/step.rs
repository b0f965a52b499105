//! Pickup and delivery steps.

use super::Task;

/// Whether a step loads or unloads its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKind {
    /// Task is loaded at its pickup location.
    Pickup,
    /// Task is unloaded at its delivery location.
    Delivery,
}

/// Identifies a step within a plan regardless of its annotation.
///
/// A task has exactly one pickup and one delivery, so kind plus task ID is
/// enough to find a step again after its position changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepKey {
    /// Step kind.
    pub kind: StepKind,
    /// Task ID.
    pub task_id: usize,
}

/// One route event of a vehicle.
///
/// Carries the task data needed during search (location and weight) so that
/// feasibility and cost never consult the task set. `remaining_capacity` is
/// the vehicle's free capacity after the step executes.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Step, StepKind, Task};
///
/// let task = Task::new(0, 1, 2, 4);
/// let pickup = Step::pickup(&task, 6);
/// assert_eq!(pickup.kind(), StepKind::Pickup);
/// assert_eq!(pickup.location(), 1);
/// assert_eq!(pickup.remaining_capacity(), 6);
/// assert_eq!(pickup.load_after(10), Some(6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    kind: StepKind,
    task_id: usize,
    location: usize,
    weight: i32,
    remaining_capacity: i32,
}

impl Step {
    /// Creates the pickup step of `task`.
    pub fn pickup(task: &Task, remaining_capacity: i32) -> Self {
        Self {
            kind: StepKind::Pickup,
            task_id: task.id(),
            location: task.pickup(),
            weight: task.weight(),
            remaining_capacity,
        }
    }

    /// Creates the delivery step of `task`.
    pub fn delivery(task: &Task, remaining_capacity: i32) -> Self {
        Self {
            kind: StepKind::Delivery,
            task_id: task.id(),
            location: task.delivery(),
            weight: task.weight(),
            remaining_capacity,
        }
    }

    /// Step kind.
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Returns `true` for pickup steps.
    pub fn is_pickup(&self) -> bool {
        self.kind == StepKind::Pickup
    }

    /// ID of the task this step belongs to.
    pub fn task_id(&self) -> usize {
        self.task_id
    }

    /// Location where the step happens.
    pub fn location(&self) -> usize {
        self.location
    }

    /// Weight of the task.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Free capacity after this step.
    pub fn remaining_capacity(&self) -> i32 {
        self.remaining_capacity
    }

    /// Key of this step.
    pub fn key(&self) -> StepKey {
        StepKey {
            kind: self.kind,
            task_id: self.task_id,
        }
    }

    /// Key of the other step of the same task.
    pub fn partner_key(&self) -> StepKey {
        let kind = match self.kind {
            StepKind::Pickup => StepKind::Delivery,
            StepKind::Delivery => StepKind::Pickup,
        };
        StepKey {
            kind,
            task_id: self.task_id,
        }
    }

    /// Free capacity after this step given the free capacity before it.
    ///
    /// Returns `None` if a pickup would overload the vehicle.
    pub fn load_after(&self, before: i32) -> Option<i32> {
        match self.kind {
            StepKind::Pickup => {
                let rem = before - self.weight;
                (rem >= 0).then_some(rem)
            }
            StepKind::Delivery => Some(before + self.weight),
        }
    }

    /// Refreshes the task data from a (possibly newer) task value.
    pub(crate) fn rebind(&mut self, task: &Task) {
        debug_assert_eq!(self.task_id, task.id());
        self.weight = task.weight();
        self.location = match self.kind {
            StepKind::Pickup => task.pickup(),
            StepKind::Delivery => task.delivery(),
        };
    }

    pub(crate) fn set_remaining_capacity(&mut self, remaining: i32) {
        self.remaining_capacity = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_locations() {
        let t = Task::new(4, 1, 9, 3);
        assert_eq!(Step::pickup(&t, 0).location(), 1);
        assert_eq!(Step::delivery(&t, 0).location(), 9);
    }

    #[test]
    fn test_load_after() {
        let t = Task::new(0, 0, 1, 5);
        assert_eq!(Step::pickup(&t, 0).load_after(5), Some(0));
        assert_eq!(Step::pickup(&t, 0).load_after(4), None);
        assert_eq!(Step::delivery(&t, 0).load_after(0), Some(5));
    }

    #[test]
    fn test_partner_key() {
        let t = Task::new(2, 0, 1, 1);
        let p = Step::pickup(&t, 0);
        let d = Step::delivery(&t, 1);
        assert_eq!(p.partner_key(), d.key());
        assert_eq!(d.partner_key(), p.key());
    }

    #[test]
    fn test_rebind_refreshes_data() {
        let old = Task::new(2, 0, 1, 1);
        let new = Task::new(2, 5, 6, 3);
        let mut d = Step::delivery(&old, 0);
        d.rebind(&new);
        assert_eq!(d.location(), 6);
        assert_eq!(d.weight(), 3);
    }
}
