//! Output Assembler: packages the route echo, the chronologically sorted
//! stop ledger, and the day plans into the external response shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::day_grouper::DayPlan;
use super::segment::Segment;
use super::stop::Stop;

#[derive(Debug, Clone, Serialize)]
pub struct RouteEcho {
    pub distance_mi: f64,
    pub duration_hr: f64,
    pub polyline: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopOut {
    pub r#type: &'static str,
    pub eta: DateTime<Utc>,
    pub duration_min: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentOut {
    pub t0: String,
    pub t1: String,
    pub status: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlanOut {
    pub index: u32,
    pub date: NaiveDate,
    pub segments: Vec<SegmentOut>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    pub route: RouteEcho,
    pub stops: Vec<StopOut>,
    pub days: Vec<DayPlanOut>,
}

/// Assemble the three output sections from the loop's raw results. A pure
/// mapping over already-computed state — no further HOS logic lives here.
pub fn assemble(
    distance_mi: f64,
    duration_min: i64,
    polyline: Option<String>,
    stops: Vec<Stop>,
    days: Vec<DayPlan>,
) -> PlanOutput {
    let route = RouteEcho {
        distance_mi: round_to(distance_mi, 1),
        duration_hr: round_to(duration_min as f64 / 60.0, 2),
        polyline,
    };

    let stops = stops
        .into_iter()
        .map(|s| StopOut {
            r#type: s.r#type.as_str(),
            eta: s.eta,
            duration_min: s.duration_min,
        })
        .collect();

    let days = days
        .into_iter()
        .enumerate()
        .map(|(i, day)| day_to_out(i as u32 + 1, day))
        .collect();

    PlanOutput { route, stops, days }
}

fn day_to_out(index: u32, day: DayPlan) -> DayPlanOut {
    let drive_minutes = day.drive_minutes();
    let window_minutes = day.window_minutes();
    let date = day.date;
    let segments = day.segments.iter().map(segment_to_out).collect();

    DayPlanOut {
        index,
        date,
        segments,
        notes: format!(
            "Day total: {:.2}h driving; window used: {:.2}h",
            drive_minutes as f64 / 60.0,
            window_minutes as f64 / 60.0
        ),
    }
}

fn segment_to_out(seg: &Segment) -> SegmentOut {
    SegmentOut {
        t0: seg.start.format("%H:%M").to_string(),
        t1: seg.end.format("%H:%M").to_string(),
        status: seg.status.as_str(),
        label: seg.label.to_string(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::segment::DutyStatus;
    use chrono::TimeZone;

    #[test]
    fn route_echo_rounds_distance_and_duration() {
        let days = Vec::new();
        let out = assemble(1234.56, 1441, None, Vec::new(), days);
        assert_eq!(out.route.distance_mi, 1234.6);
        assert_eq!(out.route.duration_hr, 24.02);
        assert!(out.route.polyline.is_none());
    }

    #[test]
    fn day_notes_report_drive_and_window_hours() {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        let day = DayPlan {
            date: start.date_naive(),
            segments: vec![
                Segment::new(start, 60, DutyStatus::OnDuty, "Pickup"),
                Segment::new(start + chrono::Duration::minutes(60), 120, DutyStatus::Driving, ""),
            ],
        };
        let out = assemble(200.0, 120, None, Vec::new(), vec![day]);
        assert_eq!(out.days.len(), 1);
        assert_eq!(out.days[0].index, 1);
        assert_eq!(out.days[0].notes, "Day total: 2.00h driving; window used: 3.00h");
    }
}
