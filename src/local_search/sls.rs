//! Stochastic local search over plans.
//!
//! # Algorithm
//!
//! 1. Start from a feasible plan; it is both the current plan and the
//!    incumbent.
//! 2. While the search budget lasts, generate the neighborhood of the current
//!    plan and collect the neighbors of minimum cost.
//! 3. With probability `p` move to one of them (ties broken uniformly),
//!    otherwise stay. Moves may worsen the current plan.
//! 4. Keep the cheapest plan seen as the incumbent.
//!
//! The deadline is polled before each iteration, so a run never starts an
//! iteration past its budget, and a zero budget returns the initial plan.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::distance::Topology;
use crate::evaluation::plan_cost;
use crate::models::{Plan, Vehicle};

use super::config::SlsConfig;
use super::neighborhood::neighborhood;

/// Wall-clock timer started at construction.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a timer now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time since the timer started, in milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed().as_millis()
    }
}

/// State of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Budget left; another iteration will run.
    Searching,
    /// Deadline or iteration cap reached.
    Done,
}

/// Outcome of a search run.
#[derive(Debug, Clone)]
pub struct SlsResult {
    /// Cheapest plan seen.
    pub best: Plan,
    /// Cost of `best`.
    pub best_cost: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Number of times the incumbent improved.
    pub improvements: usize,
    /// Incumbent cost after each improvement, as `(iteration, cost)`,
    /// starting with `(0, initial cost)`.
    pub cost_history: Vec<(usize, f64)>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Runs the stochastic local search.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::round_robin;
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::local_search::{SlsConfig, SlsRunner};
/// use u_dispatch::models::{Task, Vehicle};
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
/// let vehicles = vec![Vehicle::new(0, 0, 10), Vehicle::new(1, 1, 10)];
/// let tasks = vec![Task::new(0, 1, 2, 3), Task::new(1, 2, 1, 3), Task::new(2, 0, 1, 3)];
/// let initial = round_robin(&vehicles, &tasks).unwrap();
///
/// let config = SlsConfig::default().with_max_iterations(200).with_seed(42);
/// let result = SlsRunner::run(&vehicles, &dm, initial.clone(), &config);
/// assert!(result.best_cost <= initial.cost(&vehicles, &dm));
/// assert_eq!(result.best.num_tasks(), 3);
/// ```
pub struct SlsRunner;

impl SlsRunner {
    /// Runs with an RNG created from `config`.
    pub fn run<T: Topology + ?Sized>(
        vehicles: &[Vehicle],
        topology: &T,
        initial: Plan,
        config: &SlsConfig,
    ) -> SlsResult {
        let mut rng = config.create_rng();
        Self::run_with_rng(vehicles, topology, initial, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<T: Topology + ?Sized, R: Rng>(
        vehicles: &[Vehicle],
        topology: &T,
        initial: Plan,
        config: &SlsConfig,
        rng: &mut R,
    ) -> SlsResult {
        let timer = Timer::start();
        let budget = config.search_budget();
        let p = selection_probability(config);

        let mut best_cost = plan_cost(&initial, vehicles, topology);
        let mut best = initial.clone();
        let mut current = initial;
        let mut cost_history = vec![(0, best_cost)];
        let mut iterations = 0;
        let mut improvements = 0;
        let mut state = SearchState::Searching;

        while state == SearchState::Searching {
            let out_of_iterations = config.max_iterations.is_some_and(|max| iterations >= max);
            if out_of_iterations || timer.elapsed() >= budget {
                state = SearchState::Done;
                continue;
            }
            iterations += 1;

            let neighbors = neighborhood(&current, rng);
            let Some((next, next_cost)) = local_choice(neighbors, vehicles, topology, p, rng) else {
                continue;
            };
            current = next;

            if next_cost < best_cost {
                debug_assert!(current.check_structure().is_empty());
                best = current.clone();
                best_cost = next_cost;
                improvements += 1;
                cost_history.push((iterations, best_cost));
                tracing::debug!(iteration = iterations, cost = best_cost, "new best plan");
            }
        }

        tracing::info!(
            iterations,
            improvements,
            best_cost,
            elapsed_ms = timer.elapsed_millis() as u64,
            "local search finished"
        );
        let elapsed = timer.elapsed();

        SlsResult {
            best,
            best_cost,
            iterations,
            improvements,
            cost_history,
            elapsed,
        }
    }
}

/// Selection probability clamped to `[0, 1]`; NaN falls back to the default.
fn selection_probability(config: &SlsConfig) -> f64 {
    let p = config.selection_probability;
    if p.is_nan() {
        tracing::warn!("selection probability is NaN, using the default");
        return SlsConfig::default().selection_probability;
    }
    p.clamp(0.0, 1.0)
}

/// Picks one of the cheapest neighbors with probability `p`.
///
/// Returns `None` when there are no neighbors or the draw says stay.
fn local_choice<T: Topology + ?Sized, R: Rng>(
    neighbors: Vec<Plan>,
    vehicles: &[Vehicle],
    topology: &T,
    p: f64,
    rng: &mut R,
) -> Option<(Plan, f64)> {
    if neighbors.is_empty() {
        return None;
    }

    let costs: Vec<f64> = neighbors
        .iter()
        .map(|n| plan_cost(n, vehicles, topology))
        .collect();
    let min = costs.iter().copied().fold(f64::INFINITY, f64::min);
    let mut cheapest: Vec<(Plan, f64)> = neighbors
        .into_iter()
        .zip(costs)
        .filter(|(_, c)| *c == min)
        .collect();
    if cheapest.is_empty() || !rng.random_bool(p) {
        return None;
    }

    let pick = rng.random_range(0..cheapest.len());
    Some(cheapest.swap_remove(pick))
}
