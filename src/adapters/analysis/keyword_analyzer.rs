//! Lexicon-based free-text analyzer.
//!
//! Each keyword stem maps to a set of dimension weights. A word is claimed by
//! the longest stem it starts with, unless it starts with one of that rule's
//! exceptions (`care` never claims `career`). Claimed rules contribute their
//! weights, merged per dimension by maximum so the result stays inside
//! `[0, 1]` however many keywords match.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::dimensions::{InterestKey, Motivator, RiasecAxis, SignalSet, WeightMap};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::journey::Question;
use crate::ports::FreeTextAnalyzer;

/// One lexicon entry.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    stem: String,
    exceptions: Vec<String>,
    signals: SignalSet,
}

impl KeywordRule {
    /// Builds a rule from an untyped weight map.
    pub fn new(stem: impl Into<String>, weights: &WeightMap) -> Result<Self, DomainError> {
        let stem = stem.into().trim().to_lowercase();
        if stem.is_empty() {
            return Err(DomainError::new(ErrorCode::AnalyzerError, "keyword stem is empty"));
        }
        let signals = weights.validate().map_err(|e| {
            DomainError::new(ErrorCode::AnalyzerError, e.to_string()).with_detail("stem", &stem)
        })?;
        Ok(Self {
            stem,
            exceptions: Vec::new(),
            signals,
        })
    }

    /// Words starting with any of `prefixes` are not claimed by this rule.
    pub fn except<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions
            .extend(prefixes.into_iter().map(|p| p.into().trim().to_lowercase()));
        self
    }

    fn typed(
        stem: &str,
        axes: &[(RiasecAxis, f64)],
        motivators: &[(Motivator, f64)],
        interest: Option<(&str, &str, f64)>,
    ) -> Self {
        let mut signals = SignalSet::default();
        signals.axes.extend(axes.iter().copied());
        signals.motivators.extend(motivators.iter().copied());
        if let Some((category, specific, weight)) = interest {
            if let Ok(key) = InterestKey::new(category, Some(specific)) {
                signals.interests.insert(key, weight);
            }
        }
        Self {
            stem: stem.to_string(),
            exceptions: Vec::new(),
            signals,
        }
    }

    fn matches(&self, token: &str) -> bool {
        token.starts_with(&self.stem) && !self.exceptions.iter().any(|e| token.starts_with(e))
    }
}

static DEFAULT_LEXICON: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    use Motivator::*;
    use RiasecAxis::*;

    vec![
        // Realistic
        KeywordRule::typed("build", &[(Realistic, 0.7)], &[], None),
        KeywordRule::typed("fix", &[(Realistic, 0.7)], &[(Challenge, 0.3)], None),
        KeywordRule::typed("hands", &[(Realistic, 0.6)], &[], None),
        KeywordRule::typed("machin", &[(Realistic, 0.7)], &[], Some(("engineering", "mechanics", 0.6))),
        KeywordRule::typed("outdoor", &[(Realistic, 0.6)], &[], Some(("environment", "fieldwork", 0.5))),
        // Investigative
        KeywordRule::typed("research", &[(Investigative, 0.8)], &[(Learning, 0.4)], Some(("science", "research", 0.6))),
        KeywordRule::typed("analy", &[(Investigative, 0.7)], &[], None),
        KeywordRule::typed("data", &[(Investigative, 0.6), (Conventional, 0.3)], &[], Some(("technology", "data analysis", 0.6))),
        KeywordRule::typed("puzzl", &[(Investigative, 0.6)], &[(Challenge, 0.5)], None),
        KeywordRule::typed("scien", &[(Investigative, 0.7)], &[], Some(("science", "general interest in science", 0.6))),
        // Artistic
        KeywordRule::typed("creat", &[(Artistic, 0.7)], &[(Creativity, 0.7)], None),
        KeywordRule::typed("design", &[(Artistic, 0.7)], &[(Creativity, 0.5)], Some(("arts", "design", 0.6))),
        KeywordRule::typed("music", &[(Artistic, 0.8)], &[], Some(("arts", "music", 0.7))),
        KeywordRule::typed("writ", &[(Artistic, 0.6)], &[], Some(("arts", "writing", 0.6))),
        KeywordRule::typed("paint", &[(Artistic, 0.8)], &[], Some(("arts", "painting", 0.7))),
        // Social
        KeywordRule::typed("help", &[(Social, 0.7)], &[(Purpose, 0.4)], None).except(["helpless"]),
        KeywordRule::typed("people", &[(Social, 0.6)], &[(Collaboration, 0.3)], None),
        KeywordRule::typed("teach", &[(Social, 0.8)], &[(Purpose, 0.4)], Some(("education", "teaching", 0.7))),
        KeywordRule::typed("care", &[(Social, 0.6)], &[(Purpose, 0.4)], Some(("healthcare", "general interest in healthcare", 0.5)))
            .except(["career", "careless", "carefre"]),
        KeywordRule::typed("team", &[(Social, 0.4)], &[(Collaboration, 0.7)], None),
        // Enterprising
        KeywordRule::typed("lead", &[(Enterprising, 0.8)], &[(Leadership, 0.8)], None),
        KeywordRule::typed("sell", &[(Enterprising, 0.7)], &[(Compensation, 0.3)], Some(("business", "sales", 0.6))),
        KeywordRule::typed("persuad", &[(Enterprising, 0.7)], &[], None),
        KeywordRule::typed("business", &[(Enterprising, 0.6)], &[], Some(("business", "general interest in business", 0.6))),
        KeywordRule::typed("compet", &[(Enterprising, 0.5)], &[(Challenge, 0.5)], None).except(["competen"]),
        // Conventional
        KeywordRule::typed("organi", &[(Conventional, 0.7)], &[], None).except(["organic", "organism"]),
        KeywordRule::typed("detail", &[(Conventional, 0.7)], &[], None),
        KeywordRule::typed("plan", &[(Conventional, 0.6), (Enterprising, 0.2)], &[], None)
            .except(["planet", "plant", "plane", "plank"]),
        KeywordRule::typed("spreadsheet", &[(Conventional, 0.8)], &[], Some(("finance", "accounting", 0.5))),
        KeywordRule::typed("routine", &[(Conventional, 0.6)], &[(Stability, 0.5)], None),
        // Motivators
        KeywordRule::typed("money", &[], &[(Compensation, 0.8)], None),
        KeywordRule::typed("salary", &[], &[(Compensation, 0.8)], None),
        KeywordRule::typed("grow", &[], &[(Growth, 0.7)], None),
        KeywordRule::typed("career", &[], &[(Growth, 0.5)], None),
        KeywordRule::typed("meaning", &[], &[(Purpose, 0.8)], None),
        KeywordRule::typed("impact", &[], &[(Purpose, 0.7)], None),
        KeywordRule::typed("freedom", &[], &[(Autonomy, 0.8)], None),
        KeywordRule::typed("independen", &[], &[(Autonomy, 0.8)], None),
        KeywordRule::typed("balance", &[], &[(WorkLifeBalance, 0.8)], None),
        KeywordRule::typed("family", &[], &[(WorkLifeBalance, 0.6)], None),
        KeywordRule::typed("recogni", &[], &[(Recognition, 0.7)], None),
        KeywordRule::typed("stab", &[], &[(Stability, 0.7)], None).except(["stabb"]),
        KeywordRule::typed("secur", &[], &[(Stability, 0.7)], None),
        KeywordRule::typed("learn", &[], &[(Learning, 0.8)], None),
        KeywordRule::typed("challeng", &[], &[(Challenge, 0.8)], None),
        // Interests
        KeywordRule::typed("software", &[(Investigative, 0.4)], &[], Some(("technology", "software", 0.8))),
        KeywordRule::typed("code", &[(Investigative, 0.4)], &[], Some(("technology", "software", 0.8))),
        KeywordRule::typed("nature", &[(Realistic, 0.3)], &[], Some(("environment", "nature", 0.7))),
        KeywordRule::typed("health", &[(Social, 0.3)], &[], Some(("healthcare", "general interest in healthcare", 0.7))),
        KeywordRule::typed("invest", &[(Enterprising, 0.3)], &[(Compensation, 0.4)], Some(("finance", "investing", 0.7)))
            .except(["investigat"]),
    ]
});

/// Free-text analyzer driven by a keyword lexicon.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    rules: Vec<KeywordRule>,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self {
            rules: DEFAULT_LEXICON.clone(),
        }
    }
}

impl KeywordAnalyzer {
    /// Analyzer with the built-in lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with a custom lexicon.
    pub fn with_rules(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Merged signals of every rule that claims a word of `text`.
    pub fn signals_for(&self, text: &str) -> SignalSet {
        let lowered = text.to_lowercase();
        let claimed: BTreeSet<usize> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .filter_map(|token| self.claiming_rule(token))
            .collect();

        let mut merged = SignalSet::default();
        for index in claimed {
            merged.merge_max(&self.rules[index].signals);
        }
        merged
    }

    /// Index of the longest-stem rule matching `token`. Ties go to the
    /// earlier rule.
    fn claiming_rule(&self, token: &str) -> Option<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(token))
            .min_by_key(|(index, rule)| (Reverse(rule.stem.len()), *index))
            .map(|(index, _)| index)
    }
}

#[async_trait]
impl FreeTextAnalyzer for KeywordAnalyzer {
    async fn analyze(&self, text: &str, _question: &Question) -> Result<WeightMap, DomainError> {
        let signals = self.signals_for(text);
        tracing::debug!(
            axes = signals.axes.len(),
            motivators = signals.motivators.len(),
            interests = signals.interests.len(),
            "analyzed free-text response"
        );
        Ok(WeightMap::from(&signals))
    }
}
