//! Stop ledger: the chronological list of labeled events derived from
//! emitted segments.

use chrono::{DateTime, Utc};

use super::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopType {
    Pickup,
    Drop,
    Fuel,
    Break,
}

impl StopType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopType::Pickup => "pickup",
            StopType::Drop => "drop",
            StopType::Fuel => "fuel",
            StopType::Break => "break",
        }
    }

    /// Map a segment label to its stop type, if the label denotes a stop.
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pickup" => Some(StopType::Pickup),
            "Drop" => Some(StopType::Drop),
            "Fuel" => Some(StopType::Fuel),
            "30m Break" => Some(StopType::Break),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub r#type: StopType,
    pub eta: DateTime<Utc>,
    pub duration_min: i64,
}

/// Project the emitted segment sequence onto its stop ledger: a pure
/// filter-and-map, not a side effect of emission.
pub fn stops_from_segments(segments: &[Segment]) -> Vec<Stop> {
    let mut stops: Vec<Stop> = segments
        .iter()
        .filter_map(|seg| {
            StopType::from_label(seg.label).map(|t| Stop {
                r#type: t,
                eta: seg.start,
                duration_min: seg.duration_min(),
            })
        })
        .collect();
    stops.sort_by_key(|s| s.eta);
    stops
}
