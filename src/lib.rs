//! Weekly workforce timetabling for the U-Engine ecosystem.
//!
//! Assigns recurring, shift-bound interventions to a pool of agents across
//! a seven-day horizon, subject to weekly capacity, skill match, overlap,
//! rest-break, and night-shift-frequency constraints. The optimizer is a
//! best-effort genetic algorithm: it returns the fittest timetable it
//! found, which may still break constraints.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Agent`, `Intervention`, `ShiftType`,
//!   `ShiftWindows`, `Timeslot`, `Timetable`
//! - **`ga`**: The GA engine — initializer, fitness evaluator, operators,
//!   and the generational driver (`TimetableGa`, `Evolution`)
//! - **`kpi`**: Load, utilization, and itemized constraint violations
//! - **`validation`**: Fail-fast checks on inputs and run configuration
//!
//! # Logging
//!
//! Emits `tracing` events (run start/end at `info`, per-generation at
//! `debug`, unheld skills at `warn`). No subscriber is installed.
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"

pub mod error;
pub mod ga;
pub mod kpi;
pub mod models;
pub mod validation;

pub use error::TimetableError;
