//! Intervention model.
//!
//! An intervention is a recurring task a client needs done: it requires
//! (at most) one skill, takes place in a zone, belongs to a shift type,
//! and lasts a fixed duration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ms_to_hours, ShiftType, MS_PER_HOUR};

/// A task to be placed in the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    /// Client this intervention is performed for.
    pub client_id: u32,
    /// Required skill. `None` = any agent may perform it.
    #[serde(default)]
    pub skill_required: Option<String>,
    /// Zone the intervention takes place in.
    #[serde(default)]
    pub zone: String,
    /// Shift type (decides the start-time window).
    pub shift_type: ShiftType,
    /// Duration (ms).
    pub duration_ms: i64,
}

impl Intervention {
    /// Creates a one-hour intervention with no skill requirement.
    pub fn new(client_id: u32, shift_type: ShiftType) -> Self {
        Self {
            client_id,
            skill_required: None,
            zone: String::new(),
            shift_type,
            duration_ms: MS_PER_HOUR,
        }
    }

    /// Sets the required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill_required = Some(skill.into());
        self
    }

    /// Sets the zone.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Sets the duration in hours.
    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.duration_ms = (hours * MS_PER_HOUR as f64).round() as i64;
        self
    }

    /// Sets the duration in milliseconds.
    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Duration in fractional hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        ms_to_hours(self.duration_ms)
    }

    /// Whether this intervention counts toward the night-shift cap.
    #[inline]
    pub fn is_night(&self) -> bool {
        self.shift_type.is_night()
    }
}

/// Flattens client-grouped interventions into one ordered list.
///
/// Clients are visited in key order and each client's interventions keep
/// their order. Every intervention is stamped with its client's id.
pub fn interventions_by_client(grouped: BTreeMap<u32, Vec<Intervention>>) -> Vec<Intervention> {
    grouped
        .into_iter()
        .flat_map(|(client_id, list)| {
            list.into_iter().map(move |mut i| {
                i.client_id = client_id;
                i
            })
        })
        .collect()
}
