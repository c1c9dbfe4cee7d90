//! Planner Loop: the scheduler that interleaves the Cycle Clock, Daily
//! Budget, Break Trigger, and Mileage Planner, emitting exactly one duty
//! segment per iteration until the driving workload is exhausted.
//!
//! This is the sole mutator in the HOS core. It is a pure function of its
//! [`PlanRequest`]: no I/O, no blocking, no shared state across instances.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use super::clocks::{BreakTrigger, CycleClock, DailyBudget};
use super::constants::*;
use super::day_grouper::{self};
use super::error::PlannerError;
use super::mileage::{MileagePlan, SplitKind};
use super::output::{self, PlanOutput};
use super::segment::{DutyStatus, Segment};
use super::stop;

/// Input to the HOS core. All fields are validated by [`Planner::new`];
/// once constructed, planning is total — it cannot fail.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub distance_mi: f64,
    pub duration_hr: f64,
    pub current_cycle_used_hours: f64,
    pub pre_pickup_drive_min: i64,
    pub start_dt: Option<DateTime<Utc>>,
}

/// The HOS simulation core. Owns its clocks and its emitted segment log;
/// shares no global state with any other planner instance.
pub struct Planner {
    req: PlanRequest,
    duration_min: i64,
    cycle: CycleClock,
    day: DailyBudget,
    break_trigger: BreakTrigger,
    mileage: MileagePlan,
    cursor: DateTime<Utc>,
    segments: Vec<Segment>,
}

impl Planner {
    /// Validate the request and construct a planner ready to run. Rejects
    /// negative or non-finite numeric inputs and a cycle-used figure
    /// outside `[0, 70]` hours before any simulation begins.
    pub fn new(req: PlanRequest) -> Result<Self, PlannerError> {
        if !req.distance_mi.is_finite() || req.distance_mi < 0.0 {
            return Err(PlannerError::invalid(
                "distance_mi",
                req.distance_mi,
                "must be finite and >= 0",
            ));
        }
        if !req.duration_hr.is_finite() || req.duration_hr < 0.0 {
            return Err(PlannerError::invalid(
                "duration_hr",
                req.duration_hr,
                "must be finite and >= 0",
            ));
        }
        if !req.current_cycle_used_hours.is_finite()
            || req.current_cycle_used_hours < 0.0
            || req.current_cycle_used_hours > 70.0
        {
            return Err(PlannerError::invalid(
                "current_cycle_used_hours",
                req.current_cycle_used_hours,
                "must be within [0, 70]",
            ));
        }
        if req.pre_pickup_drive_min < 0 {
            return Err(PlannerError::invalid(
                "pre_pickup_drive_min",
                req.pre_pickup_drive_min,
                "must be >= 0",
            ));
        }

        let duration_min = (req.duration_hr * 60.0).round() as i64;
        let cycle_used_min = (req.current_cycle_used_hours * 60.0).round() as i64;
        let cursor = req.start_dt.unwrap_or_else(default_start);
        let mileage = MileagePlan::new(req.distance_mi, duration_min);

        Ok(Self {
            req,
            duration_min,
            cycle: CycleClock::new(cycle_used_min),
            day: DailyBudget::default(),
            break_trigger: BreakTrigger::default(),
            mileage,
            cursor,
            segments: Vec::new(),
        })
    }

    /// Run the planner loop to completion and assemble the external output.
    pub fn plan(self) -> PlanOutput {
        self.plan_with_polyline(None)
    }

    /// Run the planner loop, echoing `polyline` (supplied by an upstream
    /// router, if any) in the output's route section. The core itself
    /// never produces or inspects a polyline.
    pub fn plan_with_polyline(mut self, polyline: Option<String>) -> PlanOutput {
        let mut driving_left_min = self.duration_min;
        let mut driven_min: i64 = 0;
        let pre_pickup = self.req.pre_pickup_drive_min;
        let mut pickup_done = pre_pickup == 0;

        if pickup_done {
            self.emit(PICKUP_DROP_BLOCK_MIN, DutyStatus::OnDuty, "Pickup");
        }

        while driving_left_min > 0 {
            if !pickup_done && driven_min >= pre_pickup {
                self.emit(PICKUP_DROP_BLOCK_MIN, DutyStatus::OnDuty, "Pickup");
                pickup_done = true;
                continue;
            }

            if self.cycle.exhausted() {
                self.emit(CYCLE_RESET_MIN, DutyStatus::Off, "34h Restart");
                self.cycle.restart();
                self.break_trigger.reset();
                self.start_new_day();
                self.day.reset();
                continue;
            }

            if self.break_trigger.due() {
                self.emit(BREAK_BLOCK_MIN, DutyStatus::Off, "30m Break");
                self.break_trigger.reset();
                continue;
            }

            if self.day.exhausted() {
                self.emit(OFF_DUTY_RESET_MIN, DutyStatus::Off, "Off Duty (reset)");
                self.break_trigger.reset();
                self.start_new_day();
                self.day.reset();
                continue;
            }

            let chunk = self
                .day
                .drive_room_min()
                .min(self.break_trigger.room_min())
                .min(self.cycle.room_min())
                .min(driving_left_min)
                .max(MIN_DRIVE_CHUNK_MIN)
                .min(driving_left_min);

            match self
                .mileage
                .next_split(driven_min, chunk, pickup_done, pre_pickup)
            {
                Some(split) => {
                    let drive_first = split.at_min - driven_min;
                    self.emit(drive_first, DutyStatus::Driving, "");
                    driven_min += drive_first;
                    driving_left_min -= drive_first;

                    match split.kind {
                        SplitKind::Pickup => {
                            self.emit(PICKUP_DROP_BLOCK_MIN, DutyStatus::OnDuty, "Pickup");
                            pickup_done = true;
                        }
                        SplitKind::Fuel => {
                            self.emit(FUEL_BLOCK_MIN, DutyStatus::OnDuty, "Fuel");
                        }
                    }
                }
                None => {
                    self.emit(chunk, DutyStatus::Driving, "");
                    driven_min += chunk;
                    driving_left_min -= chunk;
                }
            }
        }

        self.emit(PICKUP_DROP_BLOCK_MIN, DutyStatus::OnDuty, "Drop");

        let stops = stop::stops_from_segments(&self.segments);
        let days = day_grouper::group_by_day(self.segments);
        output::assemble(self.req.distance_mi, self.duration_min, polyline, stops, days)
    }

    /// Emit one segment, advance the cursor, and update every budget that
    /// the emitted status/label combination touches.
    fn emit(&mut self, minutes: i64, status: DutyStatus, label: &'static str) {
        let seg = Segment::new(self.cursor, minutes, status, label);
        self.cursor = seg.end;

        if status.counts_toward_driving() {
            self.day.accrue_drive(minutes);
            self.break_trigger.accrue(minutes);
        }
        if status.counts_toward_cycle() {
            self.cycle.accrue(minutes);
        }

        match status {
            DutyStatus::Driving => {}
            DutyStatus::OnDuty => {
                self.day.accrue_window(minutes);
                self.break_trigger.reset();
            }
            DutyStatus::Off | DutyStatus::Sleeper => {
                if label == "30m Break" {
                    self.day.accrue_window(minutes);
                }
                self.break_trigger.reset();
            }
        }

        self.segments.push(seg);
    }

    /// Advance the wall clock to 08:00 on the date the preceding off-duty
    /// block ended. The gap between that block's `end` and this new
    /// `start` stays implicit — no padding segment is inserted.
    ///
    /// When the block ends after 08:00 on that date (e.g. a 34h restart
    /// starting mid-morning), this steps the cursor backward relative to
    /// the block's `end`. Inherited verbatim from `start_new_day` in the
    /// original implementation; see Open Question 1 in DESIGN.md.
    fn start_new_day(&mut self) {
        self.cursor = self
            .cursor
            .with_hour(WORKDAY_START_HOUR)
            .and_then(|d| d.with_minute(0))
            .and_then(|d| d.with_second(0))
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(self.cursor);
    }
}

fn default_start() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), WORKDAY_START_HOUR, 0, 0)
        .single()
        .unwrap_or(now)
}
