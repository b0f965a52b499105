//! Transport task type.

use serde::{Deserialize, Serialize};

/// A pickup-and-delivery task: carry `weight` units from `pickup` to
/// `delivery`.
///
/// Tasks are identified by a stable `id`; two task values with the same ID
/// denote the same task across planning calls. The reward is only known once
/// the task has been won and never influences feasibility or cost.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Task;
///
/// let t = Task::new(3, 0, 4, 10).with_reward(120.0);
/// assert_eq!(t.id(), 3);
/// assert_eq!(t.pickup(), 0);
/// assert_eq!(t.delivery(), 4);
/// assert_eq!(t.weight(), 10);
/// assert_eq!(t.reward(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: usize,
    pickup: usize,
    delivery: usize,
    weight: i32,
    reward: f64,
}

impl Task {
    /// Creates a task with zero reward.
    pub fn new(id: usize, pickup: usize, delivery: usize, weight: i32) -> Self {
        Self {
            id,
            pickup,
            delivery,
            weight,
            reward: 0.0,
        }
    }

    /// Sets the reward obtained for this task.
    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = reward;
        self
    }

    /// Stable task ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Pickup location.
    pub fn pickup(&self) -> usize {
        self.pickup
    }

    /// Delivery location.
    pub fn delivery(&self) -> usize {
        self.delivery
    }

    /// Load units occupied while the task is carried.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Reward paid for the task (0 until known).
    pub fn reward(&self) -> f64 {
        self.reward
    }
}
