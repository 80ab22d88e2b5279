//! Weight payloads carried by options and produced by free-text analysis.
//!
//! `WeightMap` is the loosely-typed shape collaborators deliver (string keys).
//! `SignalSet` is the validated, typed form the accumulator consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{InterestKey, Motivator, RiasecAxis};
use crate::domain::foundation::ValidationError;

/// A single interest weight inside a `WeightMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestWeight {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific: Option<String>,
    pub weight: f64,
}

/// Untyped weight payload as authored on an option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightMap {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub riasec: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub motivators: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<InterestWeight>,
}

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.riasec.insert(key.into(), weight);
        self
    }

    pub fn with_motivator(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.motivators.insert(key.into(), weight);
        self
    }

    pub fn with_interest(
        mut self,
        category: impl Into<String>,
        specific: Option<&str>,
        weight: f64,
    ) -> Self {
        self.interests.push(InterestWeight {
            category: category.into(),
            specific: specific.map(str::to_string),
            weight,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.riasec.is_empty() && self.motivators.is_empty() && self.interests.is_empty()
    }

    /// Validates keys and weights, producing a typed signal set.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for an unknown axis or motivator key, or for a
    ///   dimension named twice (e.g. `R` and `realistic`)
    /// - `OutOfRange` for a weight that is NaN or outside `[0, 1]`
    /// - `EmptyField` for an interest with a blank category
    pub fn validate(&self) -> Result<SignalSet, ValidationError> {
        let mut signals = SignalSet::default();

        for (key, &weight) in &self.riasec {
            let axis = RiasecAxis::parse(key).ok_or_else(|| {
                ValidationError::invalid_format("riasec", format!("unknown axis '{}'", key))
            })?;
            check_weight(&format!("riasec.{}", key), weight)?;
            if signals.axes.insert(axis, weight).is_some() {
                return Err(duplicate("riasec", axis.name()));
            }
        }

        for (key, &weight) in &self.motivators {
            let motivator = Motivator::parse(key).ok_or_else(|| {
                ValidationError::invalid_format("motivators", format!("unknown motivator '{}'", key))
            })?;
            check_weight(&format!("motivators.{}", key), weight)?;
            if signals.motivators.insert(motivator, weight).is_some() {
                return Err(duplicate("motivators", motivator.key()));
            }
        }

        for interest in &self.interests {
            let key = InterestKey::new(&interest.category, interest.specific.as_deref())?;
            check_weight(&format!("interests.{}", key.category()), interest.weight)?;
            if signals.interests.contains_key(&key) {
                return Err(duplicate("interests", &key.to_string()));
            }
            signals.interests.insert(key, interest.weight);
        }

        Ok(signals)
    }
}

fn check_weight(field: &str, weight: f64) -> Result<(), ValidationError> {
    if weight.is_nan() || !(0.0..=1.0).contains(&weight) {
        return Err(ValidationError::out_of_range(field, 0.0, 1.0, weight));
    }
    Ok(())
}

fn duplicate(field: &str, name: &str) -> ValidationError {
    ValidationError::invalid_format(field, format!("'{}' is named more than once", name))
}

/// Validated per-dimension weights for one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSet {
    pub axes: BTreeMap<RiasecAxis, f64>,
    pub motivators: BTreeMap<Motivator, f64>,
    pub interests: BTreeMap<InterestKey, f64>,
}

impl SignalSet {
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() && self.motivators.is_empty() && self.interests.is_empty()
    }

    /// Merges another set into this one, keeping the larger weight per dimension.
    pub fn merge_max(&mut self, other: &SignalSet) {
        for (&axis, &w) in &other.axes {
            let slot = self.axes.entry(axis).or_insert(w);
            *slot = slot.max(w);
        }
        for (&motivator, &w) in &other.motivators {
            let slot = self.motivators.entry(motivator).or_insert(w);
            *slot = slot.max(w);
        }
        for (key, &w) in &other.interests {
            let slot = self.interests.entry(key.clone()).or_insert(w);
            *slot = slot.max(w);
        }
    }
}

impl From<&SignalSet> for WeightMap {
    fn from(signals: &SignalSet) -> Self {
        WeightMap {
            riasec: signals
                .axes
                .iter()
                .map(|(axis, &w)| (axis.name().to_string(), w))
                .collect(),
            motivators: signals
                .motivators
                .iter()
                .map(|(m, &w)| (m.key().to_string(), w))
                .collect(),
            interests: signals
                .interests
                .iter()
                .map(|(key, &w)| InterestWeight {
                    category: key.category().to_string(),
                    specific: Some(key.specific().to_string()),
                    weight: w,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_mixed_key_forms() {
        let map = WeightMap::new()
            .with_axis("I", 0.9)
            .with_axis("artistic", 0.2)
            .with_motivator("Work-Life Balance", 0.5)
            .with_interest("Science", None, 0.7);

        let signals = map.validate().unwrap();

        assert_eq!(signals.axes.get(&RiasecAxis::Investigative), Some(&0.9));
        assert_eq!(signals.axes.get(&RiasecAxis::Artistic), Some(&0.2));
        assert_eq!(signals.motivators.get(&Motivator::WorkLifeBalance), Some(&0.5));
        let key = InterestKey::new("science", None).unwrap();
        assert_eq!(signals.interests.get(&key), Some(&0.7));
    }

    #[test]
    fn validate_rejects_unknown_axis() {
        let err = WeightMap::new().with_axis("Q", 0.5).validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn validate_rejects_unknown_motivator() {
        assert!(WeightMap::new().with_motivator("fame", 0.5).validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(WeightMap::new().with_axis("R", 1.2).validate().is_err());
        assert!(WeightMap::new().with_axis("R", -0.1).validate().is_err());
        assert!(WeightMap::new().with_motivator("growth", f64::NAN).validate().is_err());
        assert!(WeightMap::new()
            .with_interest("arts", None, 2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn validate_rejects_same_axis_named_twice() {
        let map = WeightMap::new().with_axis("R", 0.5).with_axis("realistic", 0.5);
        assert!(map.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_interest() {
        let map = WeightMap::new()
            .with_interest("Arts", None, 0.5)
            .with_interest("arts", None, 0.3);
        assert!(map.validate().is_err());
    }

    #[test]
    fn boundary_weights_are_accepted() {
        let map = WeightMap::new().with_axis("R", 0.0).with_axis("C", 1.0);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn merge_max_keeps_larger_weight() {
        let mut a = WeightMap::new()
            .with_axis("R", 0.3)
            .with_motivator("growth", 0.9)
            .validate()
            .unwrap();
        let b = WeightMap::new()
            .with_axis("realistic", 0.6)
            .with_axis("S", 0.4)
            .with_motivator("growth", 0.2)
            .validate()
            .unwrap();

        a.merge_max(&b);

        assert_eq!(a.axes.get(&RiasecAxis::Realistic), Some(&0.6));
        assert_eq!(a.axes.get(&RiasecAxis::Social), Some(&0.4));
        assert_eq!(a.motivators.get(&Motivator::Growth), Some(&0.9));
    }

    #[test]
    fn weight_map_deserializes_from_yaml() {
        let yaml = r#"
riasec:
  I: 0.8
motivators:
  learning: 0.6
interests:
  - category: science
    specific: research
    weight: 0.7
"#;
        let map: WeightMap = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(map.riasec.get("I"), Some(&0.8));
        assert_eq!(map.interests.len(), 1);
        assert!(map.validate().is_ok());
    }
}
