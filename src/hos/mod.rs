//! HOS simulation core.
//!
//! A deterministic state machine that turns a driving workload and the
//! driver's accumulated 70-hour cycle usage into a sequence of duty-status
//! segments that respects the FMCSA hours-of-service limits, grouped into
//! calendar days with an ordered stop ledger.
//!
//! The core performs no I/O: [`Planner::plan`] is a pure function of its
//! [`PlanRequest`] input.

mod clocks;
mod constants;
mod day_grouper;
mod error;
mod mileage;
mod output;
mod planner;
mod segment;
mod stop;

pub use constants::*;
pub use error::PlannerError;
pub use output::{DayPlanOut, PlanOutput, RouteEcho, SegmentOut, StopOut};
pub use planner::{PlanRequest, Planner};
pub use segment::{DutyStatus, Segment};
pub use stop::{Stop, StopType};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap()
    }

    /// Scenario 1 from the conformance target: short trip, no splits.
    #[test]
    fn short_trip_no_splits() {
        let req = PlanRequest {
            distance_mi: 200.0,
            duration_hr: 4.0,
            current_cycle_used_hours: 10.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        assert_eq!(out.days.len(), 1);
        let segs = &out.days[0].segments;
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].label, "Pickup");
        assert_eq!(segs[0].t0, "08:00");
        assert_eq!(segs[0].t1, "09:00");
        assert_eq!(segs[1].status, "driving");
        assert_eq!(segs[1].t0, "09:00");
        assert_eq!(segs[1].t1, "13:00");
        assert_eq!(segs[2].label, "Drop");
        assert_eq!(segs[2].t0, "13:00");
        assert_eq!(segs[2].t1, "14:00");

        assert_eq!(out.stops.iter().filter(|s| s.r#type == "fuel").count(), 0);
        assert_eq!(out.stops.iter().filter(|s| s.r#type == "break").count(), 0);
        assert!(!out
            .days
            .iter()
            .flat_map(|d| &d.segments)
            .any(|s| s.label.contains("Restart") || s.label.contains("reset")));
    }

    /// Scenario 2: single fuel split on a long haul.
    #[test]
    fn single_fuel_split() {
        let req = PlanRequest {
            distance_mi: 1200.0,
            duration_hr: 24.0,
            current_cycle_used_hours: 0.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        let fuel_stops: Vec<_> = out.stops.iter().filter(|s| s.r#type == "fuel").collect();
        assert_eq!(fuel_stops.len(), 1);

        let total_driving: i64 = out
            .days
            .iter()
            .flat_map(|d| &d.segments)
            .filter(|s| s.status == "driving")
            .map(|s| minutes_between(&s.t0, &s.t1))
            .sum();
        assert_eq!(total_driving, 1440);
        assert!(out.days.len() >= 2);
    }

    /// Scenario 3: a single break after 8h cumulative driving.
    #[test]
    fn break_after_eight_hours() {
        let req = PlanRequest {
            distance_mi: 500.0,
            duration_hr: 9.0,
            current_cycle_used_hours: 0.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        let breaks: Vec<_> = out.stops.iter().filter(|s| s.r#type == "break").collect();
        assert_eq!(breaks.len(), 1);
    }

    /// Scenario 4: daily reset splits an 14h driving day.
    #[test]
    fn daily_reset_splits_driving() {
        let req = PlanRequest {
            distance_mi: 700.0,
            duration_hr: 14.0,
            current_cycle_used_hours: 0.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        let resets = out
            .days
            .iter()
            .flat_map(|d| &d.segments)
            .filter(|s| s.label == "Off Duty (reset)")
            .count();
        assert_eq!(resets, 1);

        assert_eq!(out.days.len(), 2);
        let day1_drive: i64 = out.days[0]
            .segments
            .iter()
            .filter(|s| s.status == "driving")
            .map(|s| minutes_between(&s.t0, &s.t1))
            .sum();
        assert_eq!(day1_drive, 660);
    }

    /// Scenario 5: cycle restart triggered mid-trip.
    #[test]
    fn cycle_restart_triggered() {
        let req = PlanRequest {
            distance_mi: 300.0,
            duration_hr: 6.0,
            current_cycle_used_hours: 68.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        let restarts = out
            .days
            .iter()
            .flat_map(|d| &d.segments)
            .filter(|s| s.label == "34h Restart")
            .count();
        assert_eq!(restarts, 1);
    }

    /// Scenario 6: pre-pickup drive splits the first leg.
    #[test]
    fn pickup_boundary_split() {
        let req = PlanRequest {
            distance_mi: 400.0,
            duration_hr: 8.0,
            current_cycle_used_hours: 0.0,
            pre_pickup_drive_min: 120,
            start_dt: Some(start()),
        };
        let out = Planner::new(req).unwrap().plan();

        let all_segs: Vec<_> = out.days.iter().flat_map(|d| &d.segments).collect();
        assert_eq!(all_segs[0].status, "driving");
        assert_eq!(minutes_between(&all_segs[0].t0, &all_segs[0].t1), 120);
        assert_eq!(all_segs[1].label, "Pickup");

        let pickups = out.stops.iter().filter(|s| s.r#type == "pickup").count();
        let drops = out.stops.iter().filter(|s| s.r#type == "drop").count();
        assert_eq!(pickups, 1);
        assert_eq!(drops, 1);
    }

    #[test]
    fn rejects_negative_distance() {
        let req = PlanRequest {
            distance_mi: -1.0,
            duration_hr: 4.0,
            current_cycle_used_hours: 0.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        assert!(matches!(
            Planner::new(req),
            Err(PlannerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_cycle_over_seventy_hours() {
        let req = PlanRequest {
            distance_mi: 100.0,
            duration_hr: 2.0,
            current_cycle_used_hours: 71.0,
            pre_pickup_drive_min: 0,
            start_dt: Some(start()),
        };
        assert!(matches!(
            Planner::new(req),
            Err(PlannerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn determinism() {
        let req = PlanRequest {
            distance_mi: 850.0,
            duration_hr: 17.0,
            current_cycle_used_hours: 22.0,
            pre_pickup_drive_min: 45,
            start_dt: Some(start()),
        };
        let out1 = Planner::new(req.clone()).unwrap().plan();
        let out2 = Planner::new(req).unwrap().plan();
        assert_eq!(
            serde_json::to_string(&out1).unwrap(),
            serde_json::to_string(&out2).unwrap()
        );
    }

    fn minutes_between(t0: &str, t1: &str) -> i64 {
        let (h0, m0) = parse_hm(t0);
        let (h1, m1) = parse_hm(t1);
        (h1 * 60 + m1) - (h0 * 60 + m0)
    }

    fn parse_hm(s: &str) -> (i64, i64) {
        let mut parts = s.split(':');
        let h: i64 = parts.next().unwrap().parse().unwrap();
        let m: i64 = parts.next().unwrap().parse().unwrap();
        (h, m)
    }
}
