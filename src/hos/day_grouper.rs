//! Day Grouper: partitions the emitted segment sequence into calendar days
//! keyed by each segment's `start` date, and totals per-day driving and
//! window minutes.

use chrono::NaiveDate;

use super::segment::{DutyStatus, Segment};

/// A contiguous run of segments that all started on the same calendar date.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub segments: Vec<Segment>,
}

impl DayPlan {
    pub fn drive_minutes(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.status == DutyStatus::Driving)
            .map(|s| s.duration_min())
            .sum()
    }

    pub fn window_minutes(&self) -> i64 {
        self.segments.iter().map(|s| s.duration_min()).sum()
    }
}

/// Partition the emitted segment sequence into day-keyed groups. The
/// planner loop only ever advances the wall clock forward, so a segment's
/// date never regresses relative to the one before it — each day's
/// segments are exactly the contiguous run seen while that date holds.
pub fn group_by_day(segments: Vec<Segment>) -> Vec<DayPlan> {
    let mut days: Vec<DayPlan> = Vec::new();

    for seg in segments {
        let date = seg.start.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => day.segments.push(seg),
            _ => days.push(DayPlan {
                date,
                segments: vec![seg],
            }),
        }
    }

    days
}
