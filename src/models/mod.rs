//! Timetabling domain models.
//!
//! Provides the core data types for representing a weekly workforce
//! timetabling problem and its candidate solutions.
//!
//! # Domain Mappings
//!
//! | u-timetable | Security | Facilities | Healthcare |
//! |-------------|----------|------------|------------|
//! | Agent | Guard | Technician | Nurse |
//! | Intervention | Patrol | Maintenance round | Home visit |
//! | Timeslot | Patrol shift | Work order slot | Visit slot |
//! | Timetable | Weekly roster | Weekly plan | Care rota |
//!
//! # Time Model
//! A timeslot is placed on a day of the week (`0..DAYS_IN_WEEK`) and starts
//! at a clock offset in milliseconds after that day's midnight. Offsets may
//! exceed 24h for night work that runs past midnight; such a slot still
//! belongs to the day it started on.

mod agent;
mod intervention;
mod shift;
mod timeslot;
mod timetable;

pub use agent::Agent;
pub use intervention::{interventions_by_client, Intervention};
pub use shift::{ShiftType, ShiftWindow, ShiftWindows};
pub use timeslot::Timeslot;
pub use timetable::Timetable;

/// Days in the planning horizon.
pub const DAYS_IN_WEEK: u8 = 7;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Converts milliseconds to fractional hours.
#[inline]
pub fn ms_to_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}
