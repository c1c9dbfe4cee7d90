//! Mileage Planner: converts the linear mileage schedule into driving-minute
//! thresholds for fuel stops and pickup placement, computed once at planner
//! start.

use super::constants::FUEL_EVERY_MILES;

/// Which boundary a [`Split`] marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    Fuel,
    Pickup,
}

/// A threshold, expressed against the cumulative `driven_min` counter, at
/// which the current driving chunk must be cut short.
#[derive(Debug, Clone, Copy)]
pub struct Split {
    pub at_min: i64,
    pub kind: SplitKind,
}

/// Ascending driving-minute thresholds at which fuel stops must be
/// inserted. Thresholds track cumulative driving minutes, not wall-clock
/// time, so breaks and resets never shift fuel placement.
#[derive(Debug, Clone)]
pub struct MileagePlan {
    fuel_thresholds: Vec<i64>,
}

impl MileagePlan {
    pub fn new(distance_mi: f64, duration_min: i64) -> Self {
        if distance_mi < FUEL_EVERY_MILES || distance_mi <= 0.0 {
            return Self {
                fuel_thresholds: Vec::new(),
            };
        }

        let fuel_stops = (distance_mi / FUEL_EVERY_MILES).floor() as i64;
        let fuel_thresholds = (1..=fuel_stops)
            .map(|k| {
                let miles = k as f64 * FUEL_EVERY_MILES;
                ((miles / distance_mi) * duration_min as f64).round() as i64
            })
            .collect();

        Self { fuel_thresholds }
    }

    pub fn fuel_stop_count(&self) -> usize {
        self.fuel_thresholds.len()
    }

    /// The nearest remaining split inside `(driven_min, driven_min + chunk]`:
    /// the lower of the next unreached fuel threshold and (if the pickup
    /// leg isn't done yet) the pre-pickup boundary. Ties favor the pickup
    /// split, matching its higher dispatch priority elsewhere in the loop.
    pub fn next_split(
        &self,
        driven_min: i64,
        chunk: i64,
        pickup_done: bool,
        pre_pickup_drive_min: i64,
    ) -> Option<Split> {
        let window_end = driven_min + chunk;

        let fuel = self
            .fuel_thresholds
            .iter()
            .copied()
            .find(|&t| t > driven_min && t <= window_end)
            .map(|at_min| Split {
                at_min,
                kind: SplitKind::Fuel,
            });

        let pickup = (!pickup_done
            && pre_pickup_drive_min > driven_min
            && pre_pickup_drive_min <= window_end)
            .then_some(Split {
                at_min: pre_pickup_drive_min,
                kind: SplitKind::Pickup,
            });

        match (fuel, pickup) {
            (Some(f), Some(p)) => Some(if p.at_min <= f.at_min { p } else { f }),
            (Some(f), None) => Some(f),
            (None, Some(p)) => Some(p),
            (None, None) => None,
        }
    }
}
