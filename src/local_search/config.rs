//! Search configuration.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Configuration of one local search run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_dispatch::local_search::SlsConfig;
///
/// let config = SlsConfig::default()
///     .with_time_limit(Duration::from_secs(2))
///     .with_max_iterations(500)
///     .with_seed(42);
/// assert_eq!(config.search_budget(), Duration::from_millis(1700));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlsConfig {
    /// Wall-clock budget of the call.
    pub time_limit: Duration,
    /// Share of the budget kept back for the caller.
    pub safety_margin: Duration,
    /// Probability of moving to a best neighbor in an iteration.
    pub selection_probability: f64,
    /// Optional cap on the number of iterations.
    pub max_iterations: Option<usize>,
    /// RNG seed; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SlsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            safety_margin: Duration::from_millis(300),
            selection_probability: 0.5,
            max_iterations: None,
            seed: None,
        }
    }
}

impl SlsConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_safety_margin(mut self, margin: Duration) -> Self {
        self.safety_margin = margin;
        self
    }

    pub fn with_selection_probability(mut self, p: f64) -> Self {
        self.selection_probability = p;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time the search may actually spend: the limit minus the margin,
    /// floored at zero.
    pub fn search_budget(&self) -> Duration {
        self.time_limit.saturating_sub(self.safety_margin)
    }

    /// Checks that the selection probability is a finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<(), PlanError> {
        let p = self.selection_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PlanError::InvalidConfig(format!(
                "selection_probability must be within [0, 1], got {p}"
            )));
        }
        Ok(())
    }

    /// RNG for a run: seeded when `seed` is set.
    pub fn create_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
