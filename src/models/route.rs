//! Executable route types.

use serde::{Deserialize, Serialize};

/// A single instruction of an executable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Drive to the given neighbouring location.
    Move(usize),
    /// Load the task with the given ID.
    Pickup(usize),
    /// Unload the task with the given ID.
    Delivery(usize),
}

/// An ordered list of actions executed by a single vehicle.
///
/// A route starts at the vehicle's home location (not stored in `actions`).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Action, VehicleRoute};
///
/// let mut route = VehicleRoute::new(0, 4);
/// route.push_action(Action::Move(5));
/// route.push_action(Action::Pickup(1));
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.home(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    vehicle_id: usize,
    home: usize,
    actions: Vec<Action>,
    total_distance: f64,
    total_cost: f64,
}

impl VehicleRoute {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize, home: usize) -> Self {
        Self {
            vehicle_id,
            home,
            actions: Vec::new(),
            total_distance: 0.0,
            total_cost: 0.0,
        }
    }

    /// Appends an action to the end of this route.
    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Returns the vehicle this route belongs to.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Start location.
    pub fn home(&self) -> usize {
        self.home
    }

    /// Returns the ordered actions.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the vehicle stays home.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Locations visited by move actions, in order.
    pub fn visited(&self) -> Vec<usize> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Move(city) => Some(*city),
                _ => None,
            })
            .collect()
    }

    /// Total distance of this route (set by the route builder).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total cost of this route (set by the route builder).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total distance.
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, c: f64) {
        self.total_cost = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = VehicleRoute::new(0, 1);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.total_cost(), 0.0);
    }

    #[test]
    fn test_route_visited() {
        let mut r = VehicleRoute::new(1, 0);
        r.push_action(Action::Move(2));
        r.push_action(Action::Pickup(9));
        r.push_action(Action::Move(3));
        r.push_action(Action::Delivery(9));
        assert_eq!(r.visited(), vec![2, 3]);
    }
}
