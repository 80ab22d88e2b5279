//! Confidence Scorer - derives calibrated confidence from accumulated evidence.
//!
//! Snapshots are always recomputed in full from the evidence ledger and the
//! turn/skip counters, never patched incrementally.

use serde::{Deserialize, Serialize};

use super::DecisionPolicy;
use crate::domain::dimensions::{DimensionKey, RiasecAxis};
use crate::domain::foundation::{Confidence, ValidationError};
use crate::domain::journey::{DimensionEvidence, EvidenceLedger, Journey};

/// Tunable parameters of the confidence curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    /// Credit per contribution, independent of its weight.
    pub volume_weight: f64,
    /// Penalty per unit of squared deviation between contributions.
    pub dispersion_penalty: f64,
    /// Effective evidence at which an axis reaches ~63% confidence.
    pub axis_scale: f64,

    pub motivator_scale: f64,
    pub motivator_coverage_target: u32,
    pub motivator_coverage_share: f64,

    pub interest_scale: f64,
    pub interest_diversity_target: u32,
    pub interest_diversity_share: f64,

    pub axis_blend: f64,
    pub motivator_blend: f64,
    pub interest_blend: f64,

    /// Points subtracted from overall confidence per skipped turn.
    pub skip_penalty: f64,

    pub axis_min_evidence: u32,
    pub motivator_min_evidence: u32,
    pub interest_min_evidence: u32,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            volume_weight: 0.25,
            dispersion_penalty: 0.25,
            axis_scale: 4.0,
            motivator_scale: 8.0,
            motivator_coverage_target: 6,
            motivator_coverage_share: 0.6,
            interest_scale: 6.0,
            interest_diversity_target: 4,
            interest_diversity_share: 0.4,
            axis_blend: 0.5,
            motivator_blend: 0.3,
            interest_blend: 0.2,
            skip_penalty: 10.0,
            axis_min_evidence: 3,
            motivator_min_evidence: 5,
            interest_min_evidence: 5,
        }
    }
}

impl ScoringParameters {
    /// Checks the constraints the confidence contracts depend on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("axis_scale", self.axis_scale),
            ("motivator_scale", self.motivator_scale),
            ("interest_scale", self.interest_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::out_of_range(field, f64::MIN_POSITIVE, f64::MAX, value));
            }
        }

        for (field, value) in [
            ("volume_weight", self.volume_weight),
            ("dispersion_penalty", self.dispersion_penalty),
            ("skip_penalty", self.skip_penalty),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value));
            }
        }

        for (field, value) in [
            ("motivator_coverage_share", self.motivator_coverage_share),
            ("interest_diversity_share", self.interest_diversity_share),
            ("axis_blend", self.axis_blend),
            ("motivator_blend", self.motivator_blend),
            ("interest_blend", self.interest_blend),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
            }
        }

        if self.volume_weight < self.dispersion_penalty {
            return Err(ValidationError::invalid_format(
                "dispersion_penalty",
                "must not exceed volume_weight",
            ));
        }

        let blend = self.axis_blend + self.motivator_blend + self.interest_blend;
        if (blend - 1.0).abs() > 1e-6 {
            return Err(ValidationError::invalid_format(
                "blend",
                format!("axis, motivator and interest blends must sum to 1, got {}", blend),
            ));
        }

        if self.motivator_coverage_target == 0 || self.interest_diversity_target == 0 {
            return Err(ValidationError::invalid_format(
                "coverage_target",
                "coverage targets must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Confidence per RIASEC axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    pub realistic: Confidence,
    pub investigative: Confidence,
    pub artistic: Confidence,
    pub social: Confidence,
    pub enterprising: Confidence,
    pub conventional: Confidence,
}

impl AxisScores {
    /// Builds scores by evaluating `f` for each axis.
    pub fn from_fn(mut f: impl FnMut(RiasecAxis) -> Confidence) -> Self {
        Self {
            realistic: f(RiasecAxis::Realistic),
            investigative: f(RiasecAxis::Investigative),
            artistic: f(RiasecAxis::Artistic),
            social: f(RiasecAxis::Social),
            enterprising: f(RiasecAxis::Enterprising),
            conventional: f(RiasecAxis::Conventional),
        }
    }

    pub fn get(&self, axis: RiasecAxis) -> Confidence {
        match axis {
            RiasecAxis::Realistic => self.realistic,
            RiasecAxis::Investigative => self.investigative,
            RiasecAxis::Artistic => self.artistic,
            RiasecAxis::Social => self.social,
            RiasecAxis::Enterprising => self.enterprising,
            RiasecAxis::Conventional => self.conventional,
        }
    }

    /// Scores in canonical axis order.
    pub fn iter(&self) -> impl Iterator<Item = (RiasecAxis, Confidence)> + '_ {
        RiasecAxis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, c)| c.value()).sum::<f64>() / RiasecAxis::ALL.len() as f64
    }

    /// Three highest axes, descending, ties in canonical order.
    pub fn top_code(&self) -> String {
        let mut ranked: Vec<(RiasecAxis, Confidence)> = self.iter().collect();
        // Stable sort keeps canonical order among equal scores.
        ranked.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));
        ranked.iter().take(3).map(|(axis, _)| axis.letter()).collect()
    }
}

/// Confidence derived from a journey's evidence at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSnapshot {
    pub turn_count: u32,
    pub skip_count: u32,
    pub axes: AxisScores,
    pub motivator_confidence: Confidence,
    pub interest_confidence: Confidence,
    pub overall_confidence: Confidence,
    pub ready_to_complete: bool,
    pub gaps_remaining: Vec<DimensionKey>,
}

impl ConfidenceSnapshot {
    /// Confidence of one dimension key.
    pub fn confidence_of(&self, key: DimensionKey) -> Confidence {
        match key {
            DimensionKey::Axis(axis) => self.axes.get(axis),
            DimensionKey::Motivators => self.motivator_confidence,
            DimensionKey::Interests => self.interest_confidence,
        }
    }
}

/// Pure scorer over evidence, turn count and skip count.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    params: ScoringParameters,
    policy: DecisionPolicy,
}

impl ConfidenceScorer {
    pub fn new(params: ScoringParameters, policy: DecisionPolicy) -> Self {
        Self { params, policy }
    }

    pub fn params(&self) -> &ScoringParameters {
        &self.params
    }

    /// Scores a journey's current evidence.
    pub fn score(&self, journey: &Journey) -> ConfidenceSnapshot {
        self.score_evidence(journey.evidence(), journey.turn_count(), journey.skip_count())
    }

    pub fn score_evidence(
        &self,
        ledger: &EvidenceLedger,
        turn_count: u32,
        skip_count: u32,
    ) -> ConfidenceSnapshot {
        let axes = self.axis_scores(ledger);
        let motivator_confidence = self.motivator_confidence(ledger);
        let interest_confidence = self.interest_confidence(ledger);

        let p = &self.params;
        let blended = p.axis_blend * axes.mean()
            + p.motivator_blend * motivator_confidence.value()
            + p.interest_blend * interest_confidence.value();
        let overall_confidence = Confidence::new(blended).minus(p.skip_penalty * f64::from(skip_count));

        ConfidenceSnapshot {
            turn_count,
            skip_count,
            axes,
            motivator_confidence,
            interest_confidence,
            overall_confidence,
            ready_to_complete: self.policy.would_complete(turn_count, overall_confidence),
            gaps_remaining: self.gaps(ledger),
        }
    }

    pub fn axis_scores(&self, ledger: &EvidenceLedger) -> AxisScores {
        AxisScores::from_fn(|axis| self.axis_confidence(&ledger.axis(axis)))
    }

    /// Saturating confidence for one axis; zero without evidence.
    pub fn axis_confidence(&self, evidence: &DimensionEvidence) -> Confidence {
        if evidence.is_empty() {
            return Confidence::ZERO;
        }
        let effective = self.effective(evidence);
        Confidence::from_fraction(saturate(effective, self.params.axis_scale))
    }

    /// Blend of how many motivators have been touched and how much evidence
    /// they carry in total.
    pub fn motivator_confidence(&self, ledger: &EvidenceLedger) -> Confidence {
        let p = &self.params;
        let total: f64 = ledger.motivators().map(|(_, e)| self.effective(&e)).sum();
        let coverage = coverage(ledger.distinct_motivators(), p.motivator_coverage_target);
        Confidence::from_fraction(
            p.motivator_coverage_share * coverage
                + (1.0 - p.motivator_coverage_share) * saturate(total, p.motivator_scale),
        )
    }

    /// Same shape as motivators, measured over distinct interest categories.
    pub fn interest_confidence(&self, ledger: &EvidenceLedger) -> Confidence {
        let p = &self.params;
        let total: f64 = ledger
            .interests()
            .iter()
            .map(|i| self.effective(&i.evidence))
            .sum();
        let diversity = coverage(
            ledger.distinct_interest_categories(),
            p.interest_diversity_target,
        );
        Confidence::from_fraction(
            p.interest_diversity_share * diversity
                + (1.0 - p.interest_diversity_share) * saturate(total, p.interest_scale),
        )
    }

    /// Dimensions still below their minimum evidence, in declaration order.
    pub fn gaps(&self, ledger: &EvidenceLedger) -> Vec<DimensionKey> {
        let p = &self.params;
        let mut gaps: Vec<DimensionKey> = RiasecAxis::ALL
            .into_iter()
            .filter(|&axis| ledger.axis(axis).weight_count() < p.axis_min_evidence)
            .map(DimensionKey::Axis)
            .collect();
        if ledger.motivator_contributions() < p.motivator_min_evidence {
            gaps.push(DimensionKey::Motivators);
        }
        if ledger.interest_contributions() < p.interest_min_evidence {
            gaps.push(DimensionKey::Interests);
        }
        gaps
    }

    fn effective(&self, evidence: &DimensionEvidence) -> f64 {
        evidence
            .effective(self.params.volume_weight, self.params.dispersion_penalty)
            .max(0.0)
    }
}

fn saturate(evidence: f64, scale: f64) -> f64 {
    1.0 - (-evidence / scale).exp()
}

fn coverage(distinct: usize, target: u32) -> f64 {
    (distinct as f64 / f64::from(target.max(1))).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimensions::WeightMap;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::default()
    }

    fn record(ledger: &mut EvidenceLedger, map: WeightMap) {
        ledger.record(&map.validate().unwrap());
    }

    #[test]
    fn default_parameters_are_valid() {
        assert!(ScoringParameters::default().validate().is_ok());
    }

    #[test]
    fn dispersion_penalty_above_volume_weight_is_rejected() {
        let params = ScoringParameters {
            dispersion_penalty: 0.5,
            ..ScoringParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn blends_must_sum_to_one() {
        let params = ScoringParameters {
            axis_blend: 0.6,
            ..ScoringParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn empty_journey_scores_zero_with_every_gap() {
        let snapshot = scorer().score_evidence(&EvidenceLedger::new(), 0, 0);
        assert_eq!(snapshot.overall_confidence, Confidence::ZERO);
        assert_eq!(snapshot.gaps_remaining, DimensionKey::all());
        assert!(!snapshot.ready_to_complete);
    }

    #[test]
    fn axis_confidence_saturates_toward_full() {
        let mut e = DimensionEvidence::default();
        for _ in 0..40 {
            e.record(0.9);
        }
        let c = scorer().axis_confidence(&e);
        assert!(c.value() > 99.0 && c.value() <= 100.0);
    }

    #[test]
    fn consistent_axis_signal_scores_higher_than_spread_signal() {
        let mut steady = DimensionEvidence::default();
        let mut spread = DimensionEvidence::default();
        for w in [0.5, 0.5, 0.5, 0.5] {
            steady.record(w);
        }
        for w in [1.0, 0.0, 1.0, 0.0] {
            spread.record(w);
        }
        assert!(scorer().axis_confidence(&steady) > scorer().axis_confidence(&spread));
    }

    #[test]
    fn skips_subtract_fixed_points_from_overall() {
        let mut ledger = EvidenceLedger::new();
        for _ in 0..6 {
            record(
                &mut ledger,
                WeightMap::new()
                    .with_axis("I", 0.9)
                    .with_axis("R", 0.1)
                    .with_motivator("growth", 0.6)
                    .with_interest("science", None, 0.5),
            );
        }
        let base = scorer().score_evidence(&ledger, 6, 0).overall_confidence;
        let skipped = scorer().score_evidence(&ledger, 8, 2).overall_confidence;

        assert!(base.value() > 20.0);
        assert!((base.value() - skipped.value() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn skip_penalty_floors_at_zero() {
        let snapshot = scorer().score_evidence(&EvidenceLedger::new(), 3, 3);
        assert_eq!(snapshot.overall_confidence, Confidence::ZERO);
    }

    #[test]
    fn gaps_clear_once_minimum_evidence_exists() {
        let mut ledger = EvidenceLedger::new();
        for _ in 0..5 {
            record(
                &mut ledger,
                WeightMap::new()
                    .with_axis("R", 0.2)
                    .with_axis("I", 0.2)
                    .with_axis("A", 0.2)
                    .with_axis("S", 0.2)
                    .with_axis("E", 0.2)
                    .with_axis("C", 0.2)
                    .with_motivator("growth", 0.5)
                    .with_interest("arts", None, 0.5),
            );
        }
        assert!(scorer().gaps(&ledger).is_empty());
    }

    #[test]
    fn gaps_list_axes_before_groups() {
        let mut ledger = EvidenceLedger::new();
        for _ in 0..3 {
            record(&mut ledger, WeightMap::new().with_axis("R", 0.5));
        }
        let gaps = scorer().gaps(&ledger);
        assert_eq!(gaps.first(), Some(&DimensionKey::Axis(RiasecAxis::Investigative)));
        assert_eq!(gaps.last(), Some(&DimensionKey::Interests));
        assert!(!gaps.contains(&DimensionKey::Axis(RiasecAxis::Realistic)));
    }

    #[test]
    fn top_code_breaks_ties_in_canonical_order() {
        let scores = AxisScores::from_fn(|axis| match axis {
            RiasecAxis::Investigative => Confidence::new(90.0),
            _ => Confidence::new(40.0),
        });
        assert_eq!(scores.top_code(), "IRA");
    }

    #[test]
    fn snapshot_reports_dimension_confidence() {
        let mut ledger = EvidenceLedger::new();
        record(&mut ledger, WeightMap::new().with_axis("S", 0.8));
        let snapshot = scorer().score_evidence(&ledger, 1, 0);
        assert!(snapshot.confidence_of(DimensionKey::Axis(RiasecAxis::Social)).value() > 0.0);
        assert_eq!(
            snapshot.confidence_of(DimensionKey::Axis(RiasecAxis::Realistic)),
            Confidence::ZERO
        );
    }
}
