//! Duty segment: an immutable `[start, end)` span carrying a duty status
//! and an optional event label.

use chrono::{DateTime, Utc};

/// One of the four FMCSA duty statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyStatus {
    Off,
    Sleeper,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DutyStatus::Off => "off",
            DutyStatus::Sleeper => "sleeper",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
        }
    }

    /// Whether segments of this status contribute to the 11h driving cap.
    pub fn counts_toward_driving(&self) -> bool {
        matches!(self, DutyStatus::Driving)
    }

    /// Whether segments of this status contribute to the 70h cycle.
    pub fn counts_toward_cycle(&self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }
}

/// An immutable, contiguous span of one duty status.
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: DutyStatus,
    pub label: &'static str,
}

impl Segment {
    pub fn new(start: DateTime<Utc>, minutes: i64, status: DutyStatus, label: &'static str) -> Self {
        debug_assert!(minutes > 0, "segments must have positive duration");
        Self {
            start,
            end: start + chrono::Duration::minutes(minutes),
            status,
            label,
        }
    }

    pub fn duration_min(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
