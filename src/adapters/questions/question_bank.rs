//! YAML-backed question source.
//!
//! Serves authored scenario questions in order. Focus requests prefer an
//! unused question tagged with that focus; once every question has been used
//! for a journey the bank starts over. Each issue gets a fresh question id.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::dimensions::DimensionKey;
use crate::domain::foundation::{DomainError, ErrorCode, JourneyId, QuestionId};
use crate::domain::journey::{AnswerOption, Question};
use crate::ports::{QuestionRequest, QuestionSource};

const DEFAULT_BANK: &str = include_str!("../../../data/question_bank.yaml");

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    prompt: String,
    #[serde(default)]
    focus: Option<String>,
    #[serde(default)]
    allows_free_text: bool,
    options: Vec<AnswerOption>,
}

#[derive(Debug, Clone)]
struct QuestionTemplate {
    prompt: String,
    focus: Option<DimensionKey>,
    allows_free_text: bool,
    options: Vec<AnswerOption>,
}

/// Question source backed by an authored YAML bank.
#[derive(Debug)]
pub struct QuestionBank {
    templates: Vec<QuestionTemplate>,
    used: Mutex<HashMap<JourneyId, HashSet<usize>>>,
}

impl QuestionBank {
    /// The bank shipped with the crate.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_yaml_str(DEFAULT_BANK)
    }

    /// Loads a bank from a YAML file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            bank_error(format!("cannot read question bank: {}", e))
                .with_detail("path", path.display().to_string())
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Parses and validates a bank.
    ///
    /// # Errors
    ///
    /// - `QuestionSourceError` if the YAML is malformed, the bank is empty,
    ///   a question has no options or duplicate option ids, a focus is
    ///   unknown, or any option carries invalid weights
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        let file: BankFile = serde_yaml::from_str(yaml)
            .map_err(|e| bank_error(format!("malformed question bank: {}", e)))?;

        if file.questions.is_empty() {
            return Err(bank_error("question bank has no questions"));
        }

        let mut templates = Vec::with_capacity(file.questions.len());
        for (index, raw) in file.questions.into_iter().enumerate() {
            templates.push(Self::template(index, raw)?);
        }

        Ok(Self {
            templates,
            used: Mutex::new(HashMap::new()),
        })
    }

    fn template(index: usize, raw: RawQuestion) -> Result<QuestionTemplate, DomainError> {
        let at = |msg: String| bank_error(format!("question {}: {}", index + 1, msg));

        if raw.options.is_empty() {
            return Err(at("has no options".to_string()));
        }

        let focus = match raw.focus.as_deref() {
            Some(f) => Some(
                DimensionKey::parse(f).ok_or_else(|| at(format!("unknown focus '{}'", f)))?,
            ),
            None => None,
        };

        let mut ids = HashSet::new();
        for option in &raw.options {
            if !ids.insert(option.id.as_str()) {
                return Err(at(format!("duplicate option id '{}'", option.id)));
            }
            option
                .weights
                .validate()
                .map_err(|e| at(format!("option '{}': {}", option.id, e)))?;
        }

        Ok(QuestionTemplate {
            prompt: raw.prompt,
            focus,
            allows_free_text: raw.allows_free_text,
            options: raw.options,
        })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Forgets which questions a journey has seen.
    pub async fn forget(&self, journey_id: &JourneyId) {
        self.used.lock().await.remove(journey_id);
    }

    fn pick(&self, used: &HashSet<usize>, focus: Option<DimensionKey>) -> Option<usize> {
        let mut first_unused = None;
        for (index, template) in self.templates.iter().enumerate() {
            if used.contains(&index) {
                continue;
            }
            if focus.is_some() && template.focus == focus {
                return Some(index);
            }
            first_unused.get_or_insert(index);
        }
        first_unused
    }
}

fn bank_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::QuestionSourceError, message)
}

#[async_trait]
impl QuestionSource for QuestionBank {
    async fn next_question(&self, request: &QuestionRequest) -> Result<Question, DomainError> {
        let mut used = self.used.lock().await;
        let seen = used.entry(request.journey_id).or_default();

        let index = match self.pick(seen, request.focus) {
            Some(index) => index,
            None => {
                seen.clear();
                self.pick(seen, request.focus)
                    .ok_or_else(|| bank_error("question bank has no questions"))?
            }
        };
        seen.insert(index);

        let template = &self.templates[index];
        Ok(Question {
            id: QuestionId::new(),
            number: request.question_number,
            prompt: template.prompt.clone(),
            options: template.options.clone(),
            allows_free_text: template.allows_free_text,
            focus: request.focus.or(template.focus),
            is_clarification: request.is_clarification,
        })
    }
}
