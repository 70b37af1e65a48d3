//! The linear assessment flow.
//!
//! A session asks each question of an instrument exactly once, in order.
//! Every accepted rating either advances to the next question or, after the
//! last one, completes the session. Completion is reported once; a
//! cancelled session is consumed and its answers are gone.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use equilibrar_core::models::clinical::{GuiltScores, TestScore};
use equilibrar_core::models::progress::ProgramWeek;
use equilibrar_core::models::user::UserId;
use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;
use crate::scoring::{AnswerSet, Question};
use crate::{Instrument, require_instrument};

/// Pause before the next question is shown, so the selected rating stays
/// highlighted. Purely cosmetic.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum AssessmentState {
    AskingQuestion(usize),
    Completed,
}

/// Outcome of one accepted rating.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Advanced { next: usize, delay: Duration },
    Completed(CompletedAssessment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAssessment {
    pub instrument_id: String,
    pub answers: AnswerSet,
    pub scores: GuiltScores,
}

impl CompletedAssessment {
    /// Check the answers against the instrument they claim to come from,
    /// failing on the first problem.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        let instrument = require_instrument(&self.instrument_id)?;
        match instrument.validate_answers(&self.answers).into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// What is left of a cancelled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled {
    pub discarded: usize,
}

pub struct AssessmentSession {
    instrument: Arc<dyn Instrument>,
    state: AssessmentState,
    answers: AnswerSet,
    advance_delay: Duration,
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("instrument", &self.instrument.id())
            .field("state", &self.state)
            .field("answers", &self.answers)
            .finish()
    }
}

impl AssessmentSession {
    pub fn start(instrument: Arc<dyn Instrument>) -> Result<Self, InstrumentError> {
        if instrument.questions().is_empty() {
            return Err(InstrumentError::EmptyInstrument(instrument.id().to_string()));
        }
        Ok(Self {
            instrument,
            state: AssessmentState::AskingQuestion(0),
            answers: AnswerSet::default(),
            advance_delay: DEFAULT_ADVANCE_DELAY,
        })
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.instrument.questions().len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            AssessmentState::AskingQuestion(i) => self.instrument.questions().get(i),
            AssessmentState::Completed => None,
        }
    }

    /// One-based position shown in the header ("3/7").
    pub fn position(&self) -> usize {
        match self.state {
            AssessmentState::AskingQuestion(i) => i + 1,
            AssessmentState::Completed => self.question_count(),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        self.position() as f64 * 100.0 / self.question_count() as f64
    }

    /// Record a rating for the current question.
    ///
    /// Out-of-range ratings are rejected and leave the session untouched.
    pub fn answer(&mut self, value: u8) -> Result<Step, InstrumentError> {
        let AssessmentState::AskingQuestion(index) = self.state else {
            return Err(InstrumentError::AlreadyCompleted);
        };
        let rating = self.instrument.rating(value)?;
        let question_id = self.instrument.questions()[index].id;
        self.answers.record(question_id, rating);

        if index + 1 < self.question_count() {
            self.state = AssessmentState::AskingQuestion(index + 1);
            Ok(Step::Advanced {
                next: index + 1,
                delay: self.advance_delay,
            })
        } else {
            self.state = AssessmentState::Completed;
            tracing::debug!(
                instrument = self.instrument.id(),
                answers = self.answers.len(),
                "assessment completed"
            );
            Ok(Step::Completed(CompletedAssessment {
                instrument_id: self.instrument.id().to_string(),
                answers: self.answers.clone(),
                scores: self.instrument.score(&self.answers),
            }))
        }
    }

    /// Abandon the session, dropping every collected answer.
    pub fn cancel(self) -> Cancelled {
        Cancelled {
            discarded: self.answers.len(),
        }
    }
}

/// A completed assessment attributed to a client and program week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub client_id: UserId,
    pub week: ProgramWeek,
    pub date: jiff::civil::Date,
    pub result: CompletedAssessment,
}

impl AssessmentSubmission {
    /// The `clinicalData.testScores` entry this submission would produce.
    pub fn to_test_score(&self) -> TestScore {
        TestScore {
            date: self.date,
            week: self.week,
            scores: self.result.scores,
        }
    }
}

/// Where completed assessments go.
pub trait ResultsSink: Send + Sync {
    fn submit(&self, submission: AssessmentSubmission) -> Result<(), InstrumentError>;
}

/// Logs the submission and drops it. Nothing is merged into the client's
/// clinical data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardResults;

impl ResultsSink for DiscardResults {
    fn submit(&self, submission: AssessmentSubmission) -> Result<(), InstrumentError> {
        tracing::info!(
            client_id = %submission.client_id,
            week = submission.week.number(),
            instrument = %submission.result.instrument_id,
            answers = submission.result.answers.len(),
            "assessment results discarded"
        );
        Ok(())
    }
}
