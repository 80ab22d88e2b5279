//! Dimension keys used to name gaps and clarification focus.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RiasecAxis;

/// A resolvable dimension of the assessment.
///
/// Each axis is resolved individually; motivators and interests are each
/// resolved as a group. Derived ordering follows declaration order
/// (R, I, A, S, E, C, motivators, interests) and is the tie-break order
/// when choosing a focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKey {
    Axis(RiasecAxis),
    Motivators,
    Interests,
}

impl DimensionKey {
    /// Every dimension key in declaration order.
    pub fn all() -> Vec<DimensionKey> {
        RiasecAxis::ALL
            .into_iter()
            .map(DimensionKey::Axis)
            .chain([DimensionKey::Motivators, DimensionKey::Interests])
            .collect()
    }

    pub fn is_axis(&self) -> bool {
        matches!(self, DimensionKey::Axis(_))
    }

    /// Parses `motivators`, `interests`, or any axis name or letter.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.eq_ignore_ascii_case("motivators") {
            Some(DimensionKey::Motivators)
        } else if key.eq_ignore_ascii_case("interests") {
            Some(DimensionKey::Interests)
        } else {
            RiasecAxis::parse(key).map(DimensionKey::Axis)
        }
    }
}

impl From<RiasecAxis> for DimensionKey {
    fn from(axis: RiasecAxis) -> Self {
        DimensionKey::Axis(axis)
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKey::Axis(axis) => write!(f, "{}", axis),
            DimensionKey::Motivators => write!(f, "motivators"),
            DimensionKey::Interests => write!(f, "interests"),
        }
    }
}
