//! Timeslot model: one placed occurrence of an intervention.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Intervention;

/// An intervention placed on a day at a start time.
///
/// The intervention itself is shared (`Arc`) and immutable; cloning a
/// timeslot never copies intervention data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeslot {
    /// Day of the week (0..DAYS_IN_WEEK).
    pub day: u8,
    /// Start time (ms after the day's midnight).
    pub start_ms: i64,
    /// The intervention performed in this slot.
    pub intervention: Arc<Intervention>,
}

impl Timeslot {
    /// Creates a new timeslot.
    pub fn new(day: u8, start_ms: i64, intervention: Arc<Intervention>) -> Self {
        Self {
            day,
            start_ms,
            intervention,
        }
    }

    /// Duration (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.intervention.duration_ms
    }

    /// End time (ms after the day's midnight).
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.duration_ms()
    }

    /// Whether this slot is night work.
    #[inline]
    pub fn is_night(&self) -> bool {
        self.intervention.is_night()
    }

    /// Whether two slots overlap in time on the same day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start_ms < other.end_ms() && other.start_ms < self.end_ms()
    }

    /// Gap from the end of this slot to the start of `next` (ms).
    ///
    /// Negative when the slots overlap.
    #[inline]
    pub fn gap_to(&self, next: &Self) -> i64 {
        next.start_ms - self.end_ms()
    }

    /// Sort key: (day, start).
    #[inline]
    pub fn sort_key(&self) -> (u8, i64) {
        (self.day, self.start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftType, MS_PER_HOUR, MS_PER_MINUTE};

    fn slot(day: u8, start_h: i64, hours: f64) -> Timeslot {
        let i = Intervention::new(1, ShiftType::Day).with_duration_hours(hours);
        Timeslot::new(day, start_h * MS_PER_HOUR, Arc::new(i))
    }

    #[test]
    fn test_end_time() {
        let s = slot(0, 5, 4.0);
        assert_eq!(s.end_ms(), 9 * MS_PER_HOUR);
        assert_eq!(s.duration_ms(), 4 * MS_PER_HOUR);
    }

    #[test]
    fn test_overlap() {
        let a = slot(1, 5, 4.0);
        let b = slot(1, 8, 2.0);
        let c = slot(1, 9, 2.0);
        let d = slot(2, 5, 4.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // back-to-back
        assert!(!a.overlaps(&d)); // different day
    }

    #[test]
    fn test_gap() {
        let a = slot(0, 5, 3.0);
        let mut b = slot(0, 8, 1.0);
        b.start_ms += 10 * MS_PER_MINUTE;
        assert_eq!(a.gap_to(&b), 10 * MS_PER_MINUTE);

        let c = slot(0, 6, 1.0);
        assert!(a.gap_to(&c) < 0);
    }

    #[test]
    fn test_clone_shares_intervention() {
        let a = slot(0, 5, 3.0);
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.intervention, &b.intervention));
    }
}
