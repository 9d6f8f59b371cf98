//! Shift types and their clock windows.
//!
//! Each intervention belongs to a shift type; the shift type decides the
//! clock window its start time is sampled from. Windows are configuration,
//! not business rules: a deployment may move or widen them freely.

use serde::{Deserialize, Serialize};

use super::MS_PER_HOUR;

/// Shift classification of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Early day shift (default window 05:00–09:00).
    EarlyDay,
    /// Late day shift (default window 12:00–16:00).
    LateDay,
    /// Night shift (default window 22:00–02:00).
    Night,
    /// Generic day shift when early/late is not distinguished.
    Day,
}

impl ShiftType {
    /// All shift types, in declaration order.
    pub const ALL: [ShiftType; 4] = [
        ShiftType::EarlyDay,
        ShiftType::LateDay,
        ShiftType::Night,
        ShiftType::Day,
    ];

    /// Whether this shift counts toward the night-shift cap.
    #[inline]
    pub fn is_night(self) -> bool {
        matches!(self, ShiftType::Night)
    }
}

/// A start-time window [start, end), in ms after midnight.
///
/// `end_ms` may exceed 24h so that windows spanning midnight stay
/// monotonic (22:00–02:00 is stored as 22h..26h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Earliest start (ms, inclusive).
    pub start_ms: i64,
    /// Latest start (ms, exclusive).
    pub end_ms: i64,
}

impl ShiftWindow {
    /// Creates a new window.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Creates a window from whole clock hours.
    ///
    /// An `end_hour` lower than `start_hour` is read as the next day.
    pub fn from_hours(start_hour: i64, end_hour: i64) -> Self {
        let end_hour = if end_hour < start_hour {
            end_hour + 24
        } else {
            end_hour
        };
        Self::new(start_hour * MS_PER_HOUR, end_hour * MS_PER_HOUR)
    }

    /// Width of the window (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether a start time falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether the window is well-formed (non-negative width).
    pub fn is_valid(&self) -> bool {
        self.start_ms >= 0 && self.end_ms >= self.start_ms
    }
}

/// Start-time windows for every shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftWindows {
    /// Early day window.
    pub early_day: ShiftWindow,
    /// Late day window.
    pub late_day: ShiftWindow,
    /// Night window.
    pub night: ShiftWindow,
    /// Generic day window.
    pub day: ShiftWindow,
}

impl Default for ShiftWindows {
    fn default() -> Self {
        Self {
            early_day: ShiftWindow::from_hours(5, 9),
            late_day: ShiftWindow::from_hours(12, 16),
            night: ShiftWindow::from_hours(22, 2),
            day: ShiftWindow::from_hours(5, 16),
        }
    }
}

impl ShiftWindows {
    /// Returns the window for a shift type.
    pub fn window(&self, shift: ShiftType) -> ShiftWindow {
        match shift {
            ShiftType::EarlyDay => self.early_day,
            ShiftType::LateDay => self.late_day,
            ShiftType::Night => self.night,
            ShiftType::Day => self.day,
        }
    }

    /// Replaces the window for a shift type.
    pub fn with_window(mut self, shift: ShiftType, window: ShiftWindow) -> Self {
        match shift {
            ShiftType::EarlyDay => self.early_day = window,
            ShiftType::LateDay => self.late_day = window,
            ShiftType::Night => self.night = window,
            ShiftType::Day => self.day = window,
        }
        self
    }
}
