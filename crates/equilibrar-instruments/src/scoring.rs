use std::collections::BTreeMap;
use std::fmt;

use equilibrar_core::models::clinical::GuiltDimension;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The type of score a question produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    /// Unscaled count or sum.
    Raw,
    /// Likert-style rating (e.g., 1–5).
    Rating,
}

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const LIKERT_5: ScoreRange = ScoreRange {
        min: 1.0,
        max: 5.0,
        step: Some(1.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    /// Every value on a stepped scale, lowest first.
    pub fn points(&self) -> Vec<u8> {
        let step = self.step.unwrap_or(1.0);
        let mut points = Vec::new();
        let mut value = self.min;
        while value <= self.max + 1e-9 {
            points.push(value.round() as u8);
            value += step;
        }
        points
    }
}

/// Opaque question identifier. Ids are not contiguous and never index
/// into the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: GuiltDimension,
}

/// A rating on an instrument's scale. Ratings read back from JSON are only
/// checked by [`crate::Instrument::validate_answers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub(crate) fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Answers collected during one assessment, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, Rating>);

impl AnswerSet {
    pub(crate) fn record(&mut self, id: QuestionId, rating: Rating) {
        self.0.insert(id, rating);
    }

    pub fn get(&self, id: QuestionId) -> Option<Rating> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Rating)> + '_ {
        self.0.iter().map(|(id, r)| (*id, *r))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: Option<QuestionId>,
    pub value: f64,
    pub expected_range: ScoreRange,
    pub score_type: ScoreType,
    pub message: String,
}
