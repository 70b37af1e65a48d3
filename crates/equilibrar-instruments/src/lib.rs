//! equilibrar-instruments
//!
//! The weekly self-assessment instruments: question sets, the Likert scale
//! they are answered on, category scoring, and the linear assessment flow
//! that collects one rating per question.

pub mod assessment;
pub mod error;
pub mod scoring;

use std::sync::Arc;

use equilibrar_core::models::clinical::GuiltScores;

use error::InstrumentError;
use scoring::{AnswerSet, Question, Rating, ScoreRange, ScoreType, ValidationError};

/// Trait implemented by each self-assessment instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "test_culpa").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Questions in the order they are asked.
    fn questions(&self) -> &[Question];

    /// The scale every question is answered on.
    fn scale(&self) -> ScoreRange {
        ScoreRange::LIKERT_5
    }

    /// Check a raw value against the scale.
    fn rating(&self, value: u8) -> Result<Rating, ValidationError> {
        let scale = self.scale();
        if scale.contains(f64::from(value)) {
            Ok(Rating::new_unchecked(value))
        } else {
            Err(ValidationError {
                question_id: None,
                value: f64::from(value),
                expected_range: scale,
                score_type: ScoreType::Rating,
                message: format!(
                    "{}: rating {} is outside range [{}, {}]",
                    self.name(),
                    value,
                    scale.min,
                    scale.max,
                ),
            })
        }
    }

    /// Validate a set of answers: every answer must belong to a question of
    /// this instrument and lie on its scale, and every question needs one.
    fn validate_answers(&self, answers: &AnswerSet) -> Vec<ValidationError> {
        let scale = self.scale();
        let mut errors = Vec::new();
        for (id, rating) in answers.iter() {
            let value = f64::from(rating.value());
            let message = if !self.questions().iter().any(|q| q.id == id) {
                format!("{}: unknown question {id}", self.name())
            } else if !scale.contains(value) {
                format!(
                    "{}: question {id} rating {value} is outside range [{}, {}]",
                    self.name(),
                    scale.min,
                    scale.max,
                )
            } else {
                continue;
            };
            errors.push(ValidationError {
                question_id: Some(id),
                value,
                expected_range: scale,
                score_type: ScoreType::Rating,
                message,
            });
        }
        for question in self.questions() {
            if answers.get(question.id).is_none() {
                errors.push(ValidationError {
                    question_id: Some(question.id),
                    value: 0.0,
                    expected_range: scale,
                    score_type: ScoreType::Rating,
                    message: format!("{}: question {} is unanswered", self.name(), question.id),
                });
            }
        }
        errors
    }

    /// Sum the ratings of each category.
    fn score(&self, answers: &AnswerSet) -> GuiltScores {
        let mut scores = GuiltScores::default();
        for question in self.questions() {
            if let Some(rating) = answers.get(question.id) {
                scores.add(question.category, u32::from(rating.value()));
            }
        }
        scores
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Arc<dyn Instrument>> {
    vec![Arc::new(instruments::guilt_test::GuiltTest)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Arc<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, failing with [`InstrumentError::UnknownInstrument`].
pub fn require_instrument(id: &str) -> Result<Arc<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
