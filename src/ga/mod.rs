//! GA-based timetable optimization.
//!
//! Evolves weekly timetables with a generational genetic algorithm:
//! tournament selection, per-agent splice crossover, and inter-agent swap
//! mutation, scored by a multi-term constraint fitness.
//!
//! # Encoding
//!
//! A chromosome is a [`Timetable`](crate::models::Timetable): agent id →
//! ordered slot list. Every population member owns its slot lists.
//!
//! # Submodules
//!
//! - [`operators`]: Tournament selection and configurable variation
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
mod config;
mod fitness;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::{best_index, splice_crossover, swap_mutation, TimetableChromosome};
pub use config::GaConfig;
pub use fitness::{AgentScore, FitnessBreakdown, FitnessEvaluator, FitnessWeights, GapKind};
pub use problem::{InterventionInfo, TimetableProblem};
pub use runner::{EvolutionState, Evolution, GaResult, GenerationReport, TimetableGa};
