//! Vehicle type with capacity and cost parameters.

use serde::{Deserialize, Serialize};

/// A vehicle that carries tasks.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(0, 3, 30).with_cost_per_distance(5.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.home(), 3);
/// assert_eq!(v.capacity(), 30);
/// assert_eq!(v.cost_per_distance(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    home: usize,
    capacity: i32,
    cost_per_distance: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID, home location and capacity.
    ///
    /// Default: cost_per_distance = 1.0.
    pub fn new(id: usize, home: usize, capacity: i32) -> Self {
        Self {
            id,
            home,
            capacity,
            cost_per_distance: 1.0,
        }
    }

    /// Sets cost per unit distance.
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location where the vehicle starts.
    pub fn home(&self) -> usize {
        self.home
    }

    /// Maximum load carried at any time.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Cost per unit distance traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(0, 2, 200);
        assert_eq!(v.id(), 0);
        assert_eq!(v.home(), 2);
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.cost_per_distance(), 1.0);
    }
}
