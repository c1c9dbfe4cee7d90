//! HOS constants, all in minutes unless noted.

/// 14-hour on-duty window per workday.
pub const DAY_WINDOW_MIN: i64 = 14 * 60;
/// 11-hour driving cap per workday.
pub const DAY_DRIVE_MAX_MIN: i64 = 11 * 60;
/// Mandatory 30-minute break after this much cumulative driving.
pub const BREAK_AFTER_DRIVE_MIN: i64 = 8 * 60;
/// Duration of the mandatory break.
pub const BREAK_BLOCK_MIN: i64 = 30;
/// 10-hour off-duty reset between workdays.
pub const OFF_DUTY_RESET_MIN: i64 = 10 * 60;
/// 70-hour/8-day cycle cap.
pub const CYCLE_MAX_MIN: i64 = 70 * 60;
/// 34-hour restart duration.
pub const CYCLE_RESET_MIN: i64 = 34 * 60;
/// Fuel stop every this many miles.
pub const FUEL_EVERY_MILES: f64 = 1000.0;
/// Duration of a fuel stop.
pub const FUEL_BLOCK_MIN: i64 = 30;
/// Duration of the pickup and drop stops.
pub const PICKUP_DROP_BLOCK_MIN: i64 = 60;
/// Minimum drive chunk floor (never produces a zero-minute segment).
pub const MIN_DRIVE_CHUNK_MIN: i64 = 15;
/// Canonical workday start hour, local to the trip's timezone.
pub const WORKDAY_START_HOUR: u32 = 8;
