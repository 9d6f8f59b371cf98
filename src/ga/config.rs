//! GA run configuration.
//!
//! Builder-style and `Deserialize` with per-field defaults, so a host can
//! either chain `with_*` calls or load a partial JSON/TOML document.

use serde::{Deserialize, Serialize};

use super::FitnessWeights;
use crate::models::ShiftWindows;

/// Configuration for one timetable optimization run.
///
/// # Example
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_generations(30)
///     .with_seed(42);
/// assert_eq!(config.tournament_size, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Sample size for tournament selection.
    pub tournament_size: usize,
    /// Probability that a child undergoes swap mutation.
    pub mutation_rate: f64,
    /// RNG seed. `None` = seed from the OS.
    pub seed: Option<u64>,
    /// Start-time windows per shift type.
    pub shift_windows: ShiftWindows,
    /// Fitness bonuses and penalties.
    pub weights: FitnessWeights,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            tournament_size: 5,
            mutation_rate: 0.1,
            seed: None,
            shift_windows: ShiftWindows::default(),
            weights: FitnessWeights::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the mutation rate (clamped to 0.0..=1.0).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the shift windows.
    pub fn with_shift_windows(mut self, windows: ShiftWindows) -> Self {
        self.shift_windows = windows;
        self
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }
}
