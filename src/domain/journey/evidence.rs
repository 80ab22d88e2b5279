//! Running per-dimension evidence.
//!
//! Evidence only ever grows within a journey. Corrections arrive as new
//! turns, never as edits to what has been recorded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::dimensions::{InterestKey, Motivator, RiasecAxis, SignalSet};

/// Accumulated signal for one dimension.
///
/// Besides the weighted sum and contribution count, keeps the running sum of
/// squared deviations from the mean (Welford), which is how agreement
/// between contributions is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionEvidence {
    weighted_sum: f64,
    weight_count: u32,
    squared_deviation: f64,
}

impl DimensionEvidence {
    /// Records one contribution.
    pub fn record(&mut self, weight: f64) {
        let previous_mean = self.mean();
        self.weight_count += 1;
        self.weighted_sum += weight;
        let delta = weight - previous_mean;
        if self.weight_count > 1 {
            self.squared_deviation += delta * (weight - self.mean());
        }
    }

    pub fn weighted_sum(&self) -> f64 {
        self.weighted_sum
    }

    pub fn weight_count(&self) -> u32 {
        self.weight_count
    }

    pub fn squared_deviation(&self) -> f64 {
        self.squared_deviation
    }

    pub fn mean(&self) -> f64 {
        if self.weight_count == 0 {
            0.0
        } else {
            self.weighted_sum / f64::from(self.weight_count)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight_count == 0
    }

    /// Effective evidence: volume plus magnitude, less a penalty for disagreement.
    ///
    /// With `volume_weight >= dispersion_penalty` and weights in `[0, 1]`,
    /// every recorded contribution leaves this value no lower than before.
    pub fn effective(&self, volume_weight: f64, dispersion_penalty: f64) -> f64 {
        volume_weight * f64::from(self.weight_count) + self.weighted_sum
            - dispersion_penalty * self.squared_deviation
    }
}

/// Evidence recorded for one interest key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestEvidence {
    pub key: InterestKey,
    pub evidence: DimensionEvidence,
}

/// All evidence accumulated by a journey.
///
/// Axes and motivators are closed sets and are present from the start;
/// interests are created on first mention and kept sorted by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceLedger {
    axes: BTreeMap<RiasecAxis, DimensionEvidence>,
    motivators: BTreeMap<Motivator, DimensionEvidence>,
    interests: Vec<InterestEvidence>,
}

impl Default for EvidenceLedger {
    fn default() -> Self {
        Self {
            axes: RiasecAxis::ALL
                .into_iter()
                .map(|axis| (axis, DimensionEvidence::default()))
                .collect(),
            motivators: Motivator::ALL
                .into_iter()
                .map(|m| (m, DimensionEvidence::default()))
                .collect(),
            interests: Vec::new(),
        }
    }
}

impl EvidenceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every signal of one response to the ledger.
    pub fn record(&mut self, signals: &SignalSet) {
        for (&axis, &weight) in &signals.axes {
            self.axes.entry(axis).or_default().record(weight);
        }
        for (&motivator, &weight) in &signals.motivators {
            self.motivators.entry(motivator).or_default().record(weight);
        }
        for (key, &weight) in &signals.interests {
            match self.interests.binary_search_by(|e| e.key.cmp(key)) {
                Ok(pos) => self.interests[pos].evidence.record(weight),
                Err(pos) => {
                    let mut evidence = DimensionEvidence::default();
                    evidence.record(weight);
                    self.interests.insert(
                        pos,
                        InterestEvidence {
                            key: key.clone(),
                            evidence,
                        },
                    );
                }
            }
        }
    }

    pub fn axis(&self, axis: RiasecAxis) -> DimensionEvidence {
        self.axes.get(&axis).copied().unwrap_or_default()
    }

    pub fn motivator(&self, motivator: Motivator) -> DimensionEvidence {
        self.motivators.get(&motivator).copied().unwrap_or_default()
    }

    pub fn motivators(&self) -> impl Iterator<Item = (Motivator, DimensionEvidence)> + '_ {
        self.motivators.iter().map(|(&m, &e)| (m, e))
    }

    pub fn interests(&self) -> &[InterestEvidence] {
        &self.interests
    }

    /// Total motivator contributions across all categories.
    pub fn motivator_contributions(&self) -> u32 {
        self.motivators.values().map(|e| e.weight_count()).sum()
    }

    /// Number of motivator categories with at least one contribution.
    pub fn distinct_motivators(&self) -> usize {
        self.motivators.values().filter(|e| !e.is_empty()).count()
    }

    /// Total interest contributions across all keys.
    pub fn interest_contributions(&self) -> u32 {
        self.interests.iter().map(|i| i.evidence.weight_count()).sum()
    }

    /// Number of distinct interest categories mentioned.
    pub fn distinct_interest_categories(&self) -> usize {
        let mut categories: Vec<&str> = self.interests.iter().map(|i| i.key.category()).collect();
        categories.dedup();
        categories.len()
    }
}
