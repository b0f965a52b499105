//! Incremental planning inside a sequential auction.
//!
//! For every auctioned task the planner prices the cheapest plan it can find
//! with the task added to the tasks it already holds. That plan stays
//! pending until the auction result arrives: it becomes the committed plan
//! if the bid won and is dropped otherwise. Once the auction closes, the
//! committed plan warm-starts a longer search over the won task set.

use rand::rngs::StdRng;

use crate::constructive::{insert_candidate, warm_start};
use crate::distance::Topology;
use crate::error::PlanError;
use crate::evaluation::{validate_plan, PlanEvaluator};
use crate::local_search::{SlsConfig, SlsRunner};
use crate::models::{Plan, Task, Vehicle};

use super::centralized::PlanOutcome;

/// Cost figures of a hypothetical plan including an auctioned task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidEvaluation {
    /// `new_cost - current_cost`; may be negative when the search also
    /// improved the ordering of the tasks already held.
    pub marginal_cost: f64,
    /// Cost of the best plan found with the task added.
    pub new_cost: f64,
    /// Cost of the committed plan.
    pub current_cost: f64,
}

/// Result of one auction round, from this planner's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuctionOutcome {
    /// The bid won and pays `reward`.
    Won { reward: f64 },
    /// Another bidder got the task.
    Lost,
}

#[derive(Debug, Clone)]
struct PendingBid {
    task: Task,
    plan: Plan,
    cost: f64,
}

/// Auction-side planner: prices bids and keeps the plan of the won tasks.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::local_search::SlsConfig;
/// use u_dispatch::models::{Task, Vehicle};
/// use u_dispatch::planner::{AuctionOutcome, AuctionPlanner};
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// let vehicles = vec![Vehicle::new(0, 0, 10)];
/// let config = SlsConfig::default().with_max_iterations(50).with_seed(1);
/// let mut planner = AuctionPlanner::new(vehicles, dm)
///     .with_bid_config(config.clone())
///     .with_plan_config(config);
///
/// let task = Task::new(0, 1, 2, 5);
/// let bid = planner.evaluate_bid(&task).unwrap().unwrap();
/// assert_eq!(bid.marginal_cost, 10.0);
///
/// planner.auction_result(AuctionOutcome::Won { reward: 25.0 });
/// assert_eq!(planner.committed_cost(), 10.0);
///
/// let won = planner.won_tasks().to_vec();
/// let outcome = planner.final_plan(&won).unwrap();
/// assert_eq!(outcome.plan.owning_vehicle(0), Some(0));
/// ```
#[derive(Debug)]
pub struct AuctionPlanner<T: Topology> {
    vehicles: Vec<Vehicle>,
    topology: T,
    bid_config: SlsConfig,
    plan_config: SlsConfig,
    committed: Plan,
    committed_cost: f64,
    pending: Option<PendingBid>,
    won: Vec<Task>,
    total_reward: f64,
    bid_rng: StdRng,
    plan_rng: StdRng,
}

impl<T: Topology> AuctionPlanner<T> {
    /// Creates a planner holding no task, with default search settings for
    /// both bids and the final plan.
    pub fn new(vehicles: Vec<Vehicle>, topology: T) -> Self {
        let bid_config = SlsConfig::default();
        let plan_config = SlsConfig::default();
        Self {
            committed: Plan::new(&vehicles),
            vehicles,
            topology,
            bid_rng: bid_config.create_rng(),
            plan_rng: plan_config.create_rng(),
            bid_config,
            plan_config,
            committed_cost: 0.0,
            pending: None,
            won: Vec::new(),
            total_reward: 0.0,
        }
    }

    /// Sets the search used to price bids. Bid insertion and bid searches
    /// draw from an RNG seeded by `config.seed`.
    pub fn with_bid_config(mut self, config: SlsConfig) -> Self {
        self.bid_rng = config.create_rng();
        self.bid_config = config;
        self
    }

    /// Sets the search used for the final plan. The warm start and the final
    /// search draw from an RNG seeded by `config.seed`.
    pub fn with_plan_config(mut self, config: SlsConfig) -> Self {
        self.plan_rng = config.create_rng();
        self.plan_config = config;
        self
    }

    /// Search settings used to price bids.
    pub fn bid_config(&self) -> &SlsConfig {
        &self.bid_config
    }

    /// Search settings used for the final plan.
    pub fn plan_config(&self) -> &SlsConfig {
        &self.plan_config
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn committed_plan(&self) -> &Plan {
        &self.committed
    }

    pub fn committed_cost(&self) -> f64 {
        self.committed_cost
    }

    /// Tasks won so far, carrying their rewards.
    pub fn won_tasks(&self) -> &[Task] {
        &self.won
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Total reward minus the cost of the committed plan.
    pub fn profit(&self) -> f64 {
        self.total_reward - self.committed_cost
    }

    /// Prices `task` against the committed plan.
    ///
    /// The task is inserted into a copy of the committed plan and the copy
    /// is improved by a bid-sized search. The result stays pending until
    /// [`auction_result`](Self::auction_result). Returns `Ok(None)`, and
    /// drops any earlier pending plan, when no vehicle can carry the task.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidConfig`] if the bid search configuration is out
    ///   of range.
    /// - [`PlanError::DuplicateTask`] if the task is already committed.
    pub fn evaluate_bid(&mut self, task: &Task) -> Result<Option<BidEvaluation>, PlanError> {
        self.pending = None;
        self.bid_config.validate()?;
        if self.committed.owning_vehicle(task.id()).is_some() {
            tracing::warn!(task = task.id(), "task already committed, bid rejected");
            return Err(PlanError::DuplicateTask { task: task.id() });
        }

        let Some(candidate) = insert_candidate(&self.committed, task, &mut self.bid_rng) else {
            tracing::warn!(
                task = task.id(),
                weight = task.weight(),
                "no vehicle can carry task, bid declined"
            );
            return Ok(None);
        };

        let result = SlsRunner::run_with_rng(
            &self.vehicles,
            &self.topology,
            candidate,
            &self.bid_config,
            &mut self.bid_rng,
        );
        debug_assert!(result.best.check_structure().is_empty());

        let evaluation = BidEvaluation {
            marginal_cost: result.best_cost - self.committed_cost,
            new_cost: result.best_cost,
            current_cost: self.committed_cost,
        };
        tracing::info!(
            task = task.id(),
            marginal_cost = evaluation.marginal_cost,
            new_cost = evaluation.new_cost,
            "bid evaluated"
        );

        self.pending = Some(PendingBid {
            task: task.clone(),
            plan: result.best,
            cost: result.best_cost,
        });
        Ok(Some(evaluation))
    }

    /// Applies the outcome of the round priced by the last
    /// [`evaluate_bid`](Self::evaluate_bid).
    ///
    /// A win commits the pending plan and records the task with its reward;
    /// a loss drops the pending plan. Returns `true` if a plan was
    /// committed. A win without a pending plan commits nothing.
    pub fn auction_result(&mut self, outcome: AuctionOutcome) -> bool {
        let pending = self.pending.take();
        let (AuctionOutcome::Won { reward }, Some(bid)) = (outcome, pending) else {
            return false;
        };

        tracing::info!(
            task = bid.task.id(),
            reward,
            committed_cost = bid.cost,
            "bid won, plan committed"
        );
        self.committed = bid.plan;
        self.committed_cost = bid.cost;
        self.total_reward += reward;
        self.won.push(bid.task.with_reward(reward));
        true
    }

    /// Builds the final plan over `tasks`, warm-started from the committed
    /// plan and improved with the plan search settings.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidConfig`] if the plan search configuration is out
    ///   of range.
    /// - [`PlanError::UnknownTask`] if a committed task is missing from
    ///   `tasks`.
    /// - [`PlanError::InfeasibleFleet`] if a task not yet committed fits no
    ///   vehicle.
    pub fn final_plan(&mut self, tasks: &[Task]) -> Result<PlanOutcome, PlanError> {
        self.plan_config.validate()?;
        let initial = warm_start(&self.committed, tasks, &mut self.plan_rng)?;

        let result = SlsRunner::run_with_rng(
            &self.vehicles,
            &self.topology,
            initial,
            &self.plan_config,
            &mut self.plan_rng,
        );
        debug_assert!(validate_plan(&result.best, tasks).is_empty());

        let routes = PlanEvaluator::new(&self.vehicles, &self.topology).build_routes(&result.best);
        Ok(PlanOutcome {
            plan: result.best,
            cost: result.best_cost,
            routes,
            iterations: result.iterations,
        })
    }
}
