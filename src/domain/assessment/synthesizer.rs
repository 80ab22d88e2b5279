//! Profile Synthesizer - converts final evidence into the delivered profile.
//!
//! Tiers are relative to the strongest signal observed in the journey, since
//! the absolute evidence scale grows with the number of turns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AxisScores, ConfidenceScorer};
use crate::domain::dimensions::Motivator;
use crate::domain::foundation::{Confidence, JourneyId, Timestamp};
use crate::domain::journey::{EvidenceLedger, Journey, JourneyError, JourneyStatus};

const TOP_MOTIVATOR_SHARE: f64 = 0.75;
const MODERATE_MOTIVATOR_SHARE: f64 = 0.4;
const MAX_TOP_MOTIVATORS: usize = 3;

const PRIMARY_INTEREST_SHARE: f64 = 0.7;
const SECONDARY_INTEREST_SHARE: f64 = 0.4;
const MAX_PRIMARY_INTERESTS: usize = 5;
const MAX_SECONDARY_INTERESTS: usize = 5;
const MAX_EMERGING_INTERESTS: usize = 3;

/// RIASEC part of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiasecProfile {
    pub scores: AxisScores,
    pub riasec_code: String,
}

/// One ranked motivator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMotivator {
    pub motivator: Motivator,
    pub label: String,
    pub evidence: f64,
    /// Evidence relative to the strongest motivator (0..=1).
    pub relative_strength: f64,
    pub mentions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotivatorProfile {
    pub top: Vec<RankedMotivator>,
    pub moderate: Vec<RankedMotivator>,
    pub low: Vec<RankedMotivator>,
}

/// Interests of one category, strongest specifics first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCategory {
    pub category: String,
    pub evidence: f64,
    pub relative_strength: f64,
    pub specifics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestProfile {
    pub primary: Vec<InterestCategory>,
    pub secondary: Vec<InterestCategory>,
    pub emerging: Vec<InterestCategory>,
}

/// The profile delivered once a journey completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub journey_id: JourneyId,
    pub riasec: RiasecProfile,
    pub motivators: MotivatorProfile,
    pub interests: InterestProfile,
    pub questions_answered: u32,
    pub turn_count: u32,
    pub confidence_at_completion: Confidence,
    pub completed_at: Timestamp,
}

/// Deterministic profile builder.
#[derive(Debug, Clone, Default)]
pub struct ProfileSynthesizer {
    scorer: ConfidenceScorer,
}

impl ProfileSynthesizer {
    pub fn new(scorer: ConfidenceScorer) -> Self {
        Self { scorer }
    }

    /// Builds the profile of a completed journey.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the journey is completed
    pub fn synthesize(&self, journey: &Journey) -> Result<Profile, JourneyError> {
        let completed_at = match (journey.status(), journey.completed_at()) {
            (JourneyStatus::Completed, Some(at)) => *at,
            _ => {
                return Err(JourneyError::invalid_state(format!(
                    "profile requires a completed journey, {} is {:?}",
                    journey.id(),
                    journey.status()
                )))
            }
        };

        let scores = self.scorer.axis_scores(journey.evidence());
        let riasec = RiasecProfile {
            riasec_code: scores.top_code(),
            scores,
        };

        Ok(Profile {
            journey_id: *journey.id(),
            riasec,
            motivators: rank_motivators(journey.evidence()),
            interests: rank_interests(journey.evidence()),
            questions_answered: journey.questions_answered(),
            turn_count: journey.turn_count(),
            confidence_at_completion: journey.confidence_at_completion().unwrap_or_default(),
            completed_at,
        })
    }
}

fn rank_motivators(ledger: &EvidenceLedger) -> MotivatorProfile {
    let mut ranked: Vec<(Motivator, f64, u32)> = ledger
        .motivators()
        .filter(|(_, e)| !e.is_empty())
        .map(|(m, e)| (m, e.weighted_sum(), e.weight_count()))
        .collect();
    // Stable: equal evidence keeps declaration order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let max = ranked.first().map_or(0.0, |r| r.1);
    let mut profile = MotivatorProfile::default();
    for (motivator, evidence, mentions) in ranked {
        let relative = relative(evidence, max);
        let entry = RankedMotivator {
            motivator,
            label: motivator.label().to_string(),
            evidence,
            relative_strength: relative,
            mentions,
        };
        if relative >= TOP_MOTIVATOR_SHARE && profile.top.len() < MAX_TOP_MOTIVATORS {
            profile.top.push(entry);
        } else if relative >= MODERATE_MOTIVATOR_SHARE {
            profile.moderate.push(entry);
        } else {
            profile.low.push(entry);
        }
    }
    profile
}

fn rank_interests(ledger: &EvidenceLedger) -> InterestProfile {
    let mut by_category: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    for interest in ledger.interests() {
        by_category
            .entry(interest.key.category())
            .or_default()
            .push((interest.key.specific(), interest.evidence.weighted_sum()));
    }

    let mut categories: Vec<(String, f64, Vec<String>)> = by_category
        .into_iter()
        .map(|(category, mut specifics)| {
            specifics.sort_by(|a, b| b.1.total_cmp(&a.1));
            let evidence = specifics.iter().map(|s| s.1).sum();
            let names = specifics.into_iter().map(|s| s.0.to_string()).collect();
            (category.to_string(), evidence, names)
        })
        .collect();
    categories.sort_by(|a, b| b.1.total_cmp(&a.1));

    let max = categories.first().map_or(0.0, |c| c.1);
    let mut profile = InterestProfile::default();
    for (category, evidence, specifics) in categories {
        let relative = relative(evidence, max);
        let entry = InterestCategory {
            category,
            evidence,
            relative_strength: relative,
            specifics,
        };
        if relative >= PRIMARY_INTEREST_SHARE && profile.primary.len() < MAX_PRIMARY_INTERESTS {
            profile.primary.push(entry);
        } else if relative >= SECONDARY_INTEREST_SHARE
            && profile.secondary.len() < MAX_SECONDARY_INTERESTS
        {
            profile.secondary.push(entry);
        } else if profile.emerging.len() < MAX_EMERGING_INTERESTS {
            profile.emerging.push(entry);
        }
    }
    profile
}

fn relative(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimensions::{InterestKey, SignalSet};

    fn ledger_with(motivators: &[(Motivator, u32)], interests: &[(&str, &str, u32)]) -> EvidenceLedger {
        let mut ledger = EvidenceLedger::new();
        for &(motivator, mentions) in motivators {
            for _ in 0..mentions {
                let mut signals = SignalSet::default();
                signals.motivators.insert(motivator, 1.0);
                ledger.record(&signals);
            }
        }
        for &(category, specific, mentions) in interests {
            for _ in 0..mentions {
                let mut signals = SignalSet::default();
                signals
                    .interests
                    .insert(InterestKey::new(category, Some(specific)).unwrap(), 1.0);
                ledger.record(&signals);
            }
        }
        ledger
    }

    fn motivators_of(tier: &[RankedMotivator]) -> Vec<Motivator> {
        tier.iter().map(|m| m.motivator).collect()
    }

    fn categories_of(tier: &[InterestCategory]) -> Vec<&str> {
        tier.iter().map(|c| c.category.as_str()).collect()
    }

    #[test]
    fn top_motivators_overflow_into_moderate() {
        let ledger = ledger_with(
            &[
                (Motivator::Growth, 4),
                (Motivator::Purpose, 4),
                (Motivator::Autonomy, 4),
                (Motivator::Learning, 4),
                (Motivator::Stability, 2),
                (Motivator::Creativity, 1),
            ],
            &[],
        );

        let profile = rank_motivators(&ledger);

        assert_eq!(
            motivators_of(&profile.top),
            vec![Motivator::Growth, Motivator::Purpose, Motivator::Autonomy]
        );
        assert_eq!(
            motivators_of(&profile.moderate),
            vec![Motivator::Learning, Motivator::Stability]
        );
        assert_eq!(motivators_of(&profile.low), vec![Motivator::Creativity]);
        assert_eq!(profile.low[0].relative_strength, 0.25);
        assert_eq!(profile.top[0].mentions, 4);
    }

    #[test]
    fn motivator_tier_boundaries_are_inclusive() {
        // 3/4 = 0.75 is top; 2/5 = 0.4 is moderate.
        let top = rank_motivators(&ledger_with(
            &[(Motivator::Growth, 4), (Motivator::Purpose, 3)],
            &[],
        ));
        assert_eq!(top.top.len(), 2);

        let moderate = rank_motivators(&ledger_with(
            &[(Motivator::Growth, 5), (Motivator::Purpose, 2), (Motivator::Autonomy, 1)],
            &[],
        ));
        assert_eq!(motivators_of(&moderate.moderate), vec![Motivator::Purpose]);
        assert_eq!(motivators_of(&moderate.low), vec![Motivator::Autonomy]);
    }

    #[test]
    fn interests_spread_over_secondary_and_emerging() {
        let ledger = ledger_with(
            &[],
            &[
                ("technology", "software", 10),
                ("science", "research", 8),
                ("arts", "design", 5),
                ("business", "sales", 3),
                ("education", "teaching", 2),
                ("finance", "investing", 1),
            ],
        );

        let profile = rank_interests(&ledger);

        assert_eq!(categories_of(&profile.primary), vec!["technology", "science"]);
        assert_eq!(categories_of(&profile.secondary), vec!["arts"]);
        assert_eq!(
            categories_of(&profile.emerging),
            vec!["business", "education", "finance"]
        );
    }

    #[test]
    fn emerging_interests_are_capped_at_three() {
        let ledger = ledger_with(
            &[],
            &[
                ("technology", "software", 10),
                ("arts", "design", 3),
                ("business", "sales", 3),
                ("education", "teaching", 2),
                ("finance", "investing", 1),
            ],
        );

        let profile = rank_interests(&ledger);

        assert_eq!(profile.emerging.len(), 3);
        assert_eq!(categories_of(&profile.emerging), vec!["arts", "business", "education"]);
        let listed = profile.primary.len() + profile.secondary.len() + profile.emerging.len();
        assert_eq!(listed, 4);
    }

    #[test]
    fn primary_interests_overflow_into_secondary() {
        let categories = ["arts", "business", "education", "finance", "science", "technology", "health"];
        let interests: Vec<(&str, &str, u32)> = categories.iter().map(|c| (*c, "core", 2)).collect();

        let profile = rank_interests(&ledger_with(&[], &interests));

        assert_eq!(profile.primary.len(), 5);
        assert_eq!(profile.secondary.len(), 2);
        assert!(profile.emerging.is_empty());
    }

    #[test]
    fn specifics_are_ordered_by_evidence_within_a_category() {
        let ledger = ledger_with(&[], &[("arts", "music", 1), ("arts", "design", 3)]);

        let profile = rank_interests(&ledger);

        assert_eq!(profile.primary.len(), 1);
        assert_eq!(profile.primary[0].specifics, vec!["design", "music"]);
        assert_eq!(profile.primary[0].evidence, 4.0);
    }

    #[test]
    fn empty_ledger_yields_empty_tiers() {
        let ledger = EvidenceLedger::new();
        assert_eq!(rank_motivators(&ledger), MotivatorProfile::default());
        assert_eq!(rank_interests(&ledger), InterestProfile::default());
    }
}
