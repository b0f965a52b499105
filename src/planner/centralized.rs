//! One-shot centralized planning.

use serde::{Deserialize, Serialize};

use crate::constructive::{round_robin, shuffled_round_robin};
use crate::distance::Topology;
use crate::error::PlanError;
use crate::evaluation::{build_routes, validate_plan};
use crate::local_search::{SlsConfig, SlsRunner};
use crate::models::{Plan, Task, Vehicle, VehicleRoute};

/// Result of a planning call.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Best plan found.
    pub plan: Plan,
    /// Travel cost of `plan`.
    pub cost: f64,
    /// Executable route of every vehicle, in fleet order.
    pub routes: Vec<VehicleRoute>,
    /// Search iterations performed.
    pub iterations: usize,
}

/// Assigns a whole task set at once: cold start, search, routes.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::local_search::SlsConfig;
/// use u_dispatch::models::{Task, Vehicle};
/// use u_dispatch::planner::CentralizedPlanner;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)]);
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 2, 10)];
/// let tasks = vec![Task::new(0, 1, 2, 4), Task::new(1, 3, 0, 4), Task::new(2, 2, 3, 4)];
///
/// let planner = CentralizedPlanner::new(SlsConfig::default().with_max_iterations(100).with_seed(5));
/// let outcome = planner.plan(&vehicles, &tasks, &dm).unwrap();
/// assert_eq!(outcome.plan.num_tasks(), 3);
/// assert_eq!(outcome.routes.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralizedPlanner {
    config: SlsConfig,
    shuffle_initial: bool,
}

impl CentralizedPlanner {
    pub fn new(config: SlsConfig) -> Self {
        Self {
            config,
            shuffle_initial: false,
        }
    }

    /// Shuffles the task and vehicle orders of the cold start.
    pub fn with_shuffle_initial(mut self, shuffle: bool) -> Self {
        self.shuffle_initial = shuffle;
        self
    }

    pub fn config(&self) -> &SlsConfig {
        &self.config
    }

    pub fn shuffle_initial(&self) -> bool {
        self.shuffle_initial
    }

    /// Plans `tasks` on `vehicles`.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidConfig`] if the search configuration is out of
    ///   range.
    /// - [`PlanError::InfeasibleFleet`] if some task fits no vehicle.
    pub fn plan<T: Topology + ?Sized>(
        &self,
        vehicles: &[Vehicle],
        tasks: &[Task],
        topology: &T,
    ) -> Result<PlanOutcome, PlanError> {
        self.config.validate()?;
        let mut rng = self.config.create_rng();

        let initial = if self.shuffle_initial {
            shuffled_round_robin(vehicles, tasks, &mut rng)?
        } else {
            round_robin(vehicles, tasks)?
        };

        let result = SlsRunner::run_with_rng(vehicles, topology, initial, &self.config, &mut rng);
        debug_assert!(validate_plan(&result.best, tasks).is_empty());

        let routes = build_routes(&result.best, vehicles, topology);
        Ok(PlanOutcome {
            plan: result.best,
            cost: result.best_cost,
            routes,
            iterations: result.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::RoadNetwork;
    use crate::models::Action;
    use std::time::Duration;

    fn ring() -> RoadNetwork {
        let roads: Vec<(usize, usize, f64)> = (0..6).map(|i| (i, (i + 1) % 6, 1.0 + i as f64)).collect();
        RoadNetwork::from_roads(6, &roads).expect("valid")
    }

    #[test]
    fn test_plan_covers_all_tasks() {
        let net = ring();
        let vehicles = vec![Vehicle::new(0, 0, 8), Vehicle::new(1, 3, 5)];
        let tasks: Vec<Task> = (0..6).map(|i| Task::new(i, i, (i + 2) % 6, 3)).collect();
        let planner =
            CentralizedPlanner::new(SlsConfig::default().with_max_iterations(150).with_seed(1));
        let outcome = planner.plan(&vehicles, &tasks, &net).expect("feasible");

        assert!(validate_plan(&outcome.plan, &tasks).is_empty());
        let delivered: usize = outcome
            .routes
            .iter()
            .flat_map(|r| r.actions())
            .filter(|a| matches!(a, Action::Delivery(_)))
            .count();
        assert_eq!(delivered, 6);
        let route_cost: f64 = outcome.routes.iter().map(|r| r.total_cost()).sum();
        assert!((route_cost - outcome.cost).abs() < 1e-9);
    }

    #[test]
    fn test_plan_shuffled_initial() {
        let net = ring();
        let vehicles = vec![Vehicle::new(0, 0, 8), Vehicle::new(1, 3, 5)];
        let tasks: Vec<Task> = (0..5).map(|i| Task::new(i, (i + 1) % 6, i, 2)).collect();
        let planner = CentralizedPlanner::new(
            SlsConfig::default()
                .with_time_limit(Duration::ZERO)
                .with_seed(2),
        )
        .with_shuffle_initial(true);
        let outcome = planner.plan(&vehicles, &tasks, &net).expect("feasible");
        assert_eq!(outcome.iterations, 0);
        assert!(validate_plan(&outcome.plan, &tasks).is_empty());
    }

    #[test]
    fn test_plan_infeasible_fleet() {
        let net = ring();
        let vehicles = vec![Vehicle::new(0, 0, 2)];
        let tasks = vec![Task::new(4, 1, 2, 3)];
        let planner = CentralizedPlanner::new(SlsConfig::default().with_max_iterations(1));
        assert_eq!(
            planner.plan(&vehicles, &tasks, &net).unwrap_err(),
            PlanError::InfeasibleFleet { task: 4, weight: 3 }
        );
    }

    #[test]
    fn test_plan_rejects_bad_config() {
        let net = ring();
        let vehicles = vec![Vehicle::new(0, 0, 2)];
        let planner = CentralizedPlanner::new(SlsConfig::default().with_selection_probability(-0.1));
        assert!(matches!(
            planner.plan(&vehicles, &[], &net),
            Err(PlanError::InvalidConfig(_))
        ));
    }
}
