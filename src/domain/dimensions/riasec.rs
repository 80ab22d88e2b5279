//! RIASEC personality axes (Holland model).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six Holland personality axes.
///
/// Declaration order is the canonical R, I, A, S, E, C ordering and is
/// relied on for tie-breaking wherever axes are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiasecAxis {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl RiasecAxis {
    /// All axes in canonical order.
    pub const ALL: [RiasecAxis; 6] = [
        RiasecAxis::Realistic,
        RiasecAxis::Investigative,
        RiasecAxis::Artistic,
        RiasecAxis::Social,
        RiasecAxis::Enterprising,
        RiasecAxis::Conventional,
    ];

    /// Single-letter Holland code for this axis.
    pub fn letter(&self) -> char {
        match self {
            RiasecAxis::Realistic => 'R',
            RiasecAxis::Investigative => 'I',
            RiasecAxis::Artistic => 'A',
            RiasecAxis::Social => 'S',
            RiasecAxis::Enterprising => 'E',
            RiasecAxis::Conventional => 'C',
        }
    }

    /// Lower-case axis name as used in option payloads.
    pub fn name(&self) -> &'static str {
        match self {
            RiasecAxis::Realistic => "realistic",
            RiasecAxis::Investigative => "investigative",
            RiasecAxis::Artistic => "artistic",
            RiasecAxis::Social => "social",
            RiasecAxis::Enterprising => "enterprising",
            RiasecAxis::Conventional => "conventional",
        }
    }

    /// Parses an axis from its name or its Holland letter, ignoring case.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|axis| {
            key.eq_ignore_ascii_case(axis.name())
                || (key.len() == 1 && key.eq_ignore_ascii_case(&axis.letter().to_string()))
        })
    }
}

impl fmt::Display for RiasecAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
