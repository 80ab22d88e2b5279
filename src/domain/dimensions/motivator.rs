//! Career motivator categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve fixed career-driver categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivator {
    Compensation,
    Growth,
    Purpose,
    Autonomy,
    WorkLifeBalance,
    Recognition,
    Creativity,
    Stability,
    Learning,
    Collaboration,
    Challenge,
    Leadership,
}

impl Motivator {
    /// All motivators in declaration order.
    pub const ALL: [Motivator; 12] = [
        Motivator::Compensation,
        Motivator::Growth,
        Motivator::Purpose,
        Motivator::Autonomy,
        Motivator::WorkLifeBalance,
        Motivator::Recognition,
        Motivator::Creativity,
        Motivator::Stability,
        Motivator::Learning,
        Motivator::Collaboration,
        Motivator::Challenge,
        Motivator::Leadership,
    ];

    /// Snake-case key used in option payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Motivator::Compensation => "compensation",
            Motivator::Growth => "growth",
            Motivator::Purpose => "purpose",
            Motivator::Autonomy => "autonomy",
            Motivator::WorkLifeBalance => "work_life_balance",
            Motivator::Recognition => "recognition",
            Motivator::Creativity => "creativity",
            Motivator::Stability => "stability",
            Motivator::Learning => "learning",
            Motivator::Collaboration => "collaboration",
            Motivator::Challenge => "challenge",
            Motivator::Leadership => "leadership",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Motivator::Compensation => "Compensation",
            Motivator::Growth => "Growth",
            Motivator::Purpose => "Purpose",
            Motivator::Autonomy => "Autonomy",
            Motivator::WorkLifeBalance => "Work-Life Balance",
            Motivator::Recognition => "Recognition",
            Motivator::Creativity => "Creativity",
            Motivator::Stability => "Stability",
            Motivator::Learning => "Learning",
            Motivator::Collaboration => "Collaboration",
            Motivator::Challenge => "Challenge",
            Motivator::Leadership => "Leadership",
        }
    }

    /// Parses a motivator from its key or its label, ignoring case.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|m| key.eq_ignore_ascii_case(m.key()) || key.eq_ignore_ascii_case(m.label()))
    }
}

impl fmt::Display for Motivator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
