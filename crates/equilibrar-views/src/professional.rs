//! Professional view: patient follow-up and the weekly guilt test.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use equilibrar_audit::events::{AuditAction, AuditEvent};
use equilibrar_core::content::{self, GuideStep, WeekContent, week_content};
use equilibrar_core::error::CoreError;
use equilibrar_core::metrics;
use equilibrar_core::models::client::ClientProfile;
use equilibrar_core::models::clinical::{GuiltDimension, GuiltScores};
use equilibrar_core::models::roster::Roster;
use equilibrar_core::models::user::{User, UserId};
use equilibrar_core::schedule::{self, NextMeeting};
use equilibrar_instruments::assessment::{
    AssessmentSession, AssessmentSubmission, CompletedAssessment, ResultsSink, Step,
};
use equilibrar_instruments::instruments::guilt_test;
use equilibrar_instruments::require_instrument;

use crate::charts::{self, Bar, ScoreSeries};
use crate::context::{DashboardConfig, ViewContext};
use crate::dashboard::{UserCard, WeekRow};
use crate::error::ViewError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfessionalAction {
    SelectPatient { client_id: UserId },
    Back,
    StartAssessment { client_id: UserId },
    Answer { rating: u8 },
    CancelAssessment,
    /// Submit a finished assessment again after the results sink failed.
    RetrySubmission,
    DismissResult,
}

/// An assessment being taken on behalf of a client.
#[derive(Debug)]
struct ActiveAssessment {
    client_id: UserId,
    session: AssessmentSession,
    /// Set once every question is answered; cleared by a successful submit.
    unsubmitted: Option<CompletedAssessment>,
}

pub struct ProfessionalView {
    user: User,
    roster: Roster,
    config: DashboardConfig,
    sink: Arc<dyn ResultsSink>,
    selected_patient: Option<UserId>,
    assessment: Option<ActiveAssessment>,
    last_completed: Option<AssessmentSubmission>,
}

impl fmt::Debug for ProfessionalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfessionalView")
            .field("user", &self.user.id)
            .field("selected_patient", &self.selected_patient)
            .field("assessment", &self.assessment)
            .field("last_completed", &self.last_completed)
            .finish()
    }
}

impl ProfessionalView {
    pub fn new(
        user: User,
        roster: Roster,
        config: DashboardConfig,
        sink: Arc<dyn ResultsSink>,
    ) -> Self {
        Self {
            user,
            roster,
            config,
            sink,
            selected_patient: None,
            assessment: None,
            last_completed: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn selected_patient(&self) -> Option<&UserId> {
        self.selected_patient.as_ref()
    }

    pub fn assessment(&self) -> Option<&AssessmentSession> {
        self.assessment.as_ref().map(|a| &a.session)
    }

    pub fn last_completed(&self) -> Option<&AssessmentSubmission> {
        self.last_completed.as_ref()
    }

    pub fn dispatch(
        &mut self,
        action: ProfessionalAction,
        ctx: &ViewContext,
    ) -> Result<(), ViewError> {
        match action {
            ProfessionalAction::SelectPatient { client_id } => {
                self.roster.client(&client_id)?;
                self.selected_patient = Some(client_id);
            }
            ProfessionalAction::Back => self.selected_patient = None,
            ProfessionalAction::StartAssessment { client_id } => {
                if self.assessment.is_some() {
                    return Err(ViewError::Unavailable(
                        "an assessment is already in progress".to_string(),
                    ));
                }
                self.roster.client(&client_id)?;
                let session = AssessmentSession::start(require_instrument(guilt_test::ID)?)?
                    .with_advance_delay(Duration::from_millis(self.config.advance_delay_ms));
                self.last_completed = None;
                self.assessment = Some(ActiveAssessment {
                    client_id,
                    session,
                    unsubmitted: None,
                });
            }
            ProfessionalAction::Answer { rating } => {
                let active = self
                    .assessment
                    .as_mut()
                    .ok_or_else(|| ViewError::Unavailable("no assessment in progress".to_string()))?;
                if let Step::Completed(result) = active.session.answer(rating)? {
                    active.unsubmitted = Some(result);
                    self.submit(ctx)?;
                }
            }
            ProfessionalAction::RetrySubmission => self.submit(ctx)?,
            ProfessionalAction::CancelAssessment => {
                let active = self
                    .assessment
                    .take()
                    .ok_or_else(|| ViewError::Unavailable("no assessment in progress".to_string()))?;
                let cancelled = active.session.cancel();
                AuditEvent::new(
                    AuditAction::AssessmentCancelled,
                    "client",
                    active.client_id.as_str(),
                    self.user.id.clone(),
                )
                .with_details(serde_json::json!({ "discarded": cancelled.discarded }))
                .emit();
            }
            ProfessionalAction::DismissResult => self.last_completed = None,
        }
        Ok(())
    }

    /// Hand the finished assessment to the results sink. The session stays
    /// open until the sink accepts it.
    fn submit(&mut self, ctx: &ViewContext) -> Result<(), ViewError> {
        let Some(ActiveAssessment {
            client_id,
            unsubmitted: Some(result),
            ..
        }) = &self.assessment
        else {
            return Err(ViewError::Unavailable(
                "no finished assessment to submit".to_string(),
            ));
        };
        result.validate()?;
        let week = self.roster.client(client_id)?.current_week;
        let submission = AssessmentSubmission {
            client_id: client_id.clone(),
            week,
            date: ctx.today(),
            result: result.clone(),
        };
        if let Err(err) = self.sink.submit(submission.clone()) {
            tracing::warn!(client_id = %submission.client_id, error = %err, "assessment submission failed");
            return Err(err.into());
        }

        self.assessment = None;
        AuditEvent::new(
            AuditAction::AssessmentCompleted,
            "client",
            submission.client_id.as_str(),
            self.user.id.clone(),
        )
        .with_details(serde_json::json!({
            "instrument": submission.result.instrument_id,
            "week": week,
            "scores": submission.result.scores,
        }))
        .emit();
        self.last_completed = Some(submission);
        Ok(())
    }

    pub fn page(&self, ctx: &ViewContext) -> Result<ProfessionalPage, ViewError> {
        let body = match &self.selected_patient {
            Some(id) => {
                ProfessionalBody::PatientDetail(self.patient_detail(self.roster.client(id)?, ctx)?)
            }
            None => ProfessionalBody::Overview(self.overview(ctx)?),
        };

        let assessment = match &self.assessment {
            Some(active) => Some(self.assessment_page(active)?),
            None => None,
        };

        let last_result = match &self.last_completed {
            Some(submission) => Some(ResultSummary {
                client_name: self.roster.client(&submission.client_id)?.user.name.clone(),
                week: submission.week.number(),
                scores: dimension_scores(&submission.result.scores),
            }),
            None => None,
        };

        Ok(ProfessionalPage {
            view: "professional",
            current_user: UserCard::from_user(&self.user),
            body,
            assessment,
            last_result,
        })
    }

    fn overview(&self, ctx: &ViewContext) -> Result<ProfessionalOverview, ViewError> {
        let clients = self.roster.require_clients()?;

        let mut upcoming_sessions = 0;
        for client in &clients {
            if let Some(at) = client.next_session
                && at.to_zoned(ctx.tz.clone()).map_err(CoreError::from)?.timestamp() >= ctx.now
            {
                upcoming_sessions += 1;
            }
        }

        Ok(ProfessionalOverview {
            stats: ProfessionalStats {
                active_patients: clients.iter().filter(|c| c.user.status.is_active()).count(),
                upcoming_sessions,
            },
            patients: clients
                .into_iter()
                .take(self.config.patient_list_limit)
                .map(|c| PatientRow::new(c, ctx))
                .collect(),
        })
    }

    fn patient_detail(
        &self,
        client: &ClientProfile,
        ctx: &ViewContext,
    ) -> Result<PatientDetail, ViewError> {
        let records = &client.clinical_data.audio_usage;
        let week_of = records
            .iter()
            .map(|r| r.date)
            .max()
            .unwrap_or_else(|| ctx.today());
        let audio = metrics::audio_usage_series(records, week_of, ctx.locale)?;

        Ok(PatientDetail {
            patient: UserCard::from_user(&client.user),
            current_week: client.current_week.number(),
            program: week_content(client.current_week),
            guide: content::guide(client.current_week),
            guide_completed: client.progress.get(client.current_week).guide_completed,
            meeting: schedule::client_meeting(client, ctx.now, &ctx.tz, ctx.locale)?,
            next_session: schedule::session_label(client.next_session, ctx.locale),
            weeks: WeekRow::for_client(client),
            latest_scores: client
                .clinical_data
                .latest_score()
                .map(|s| dimension_scores(&s.scores))
                .unwrap_or_default(),
            score_history: charts::score_history(&client.clinical_data.test_scores),
            has_audio: !records.is_empty(),
            audio_chart: charts::minutes_chart(&audio),
            total_audio_minutes: metrics::total_minutes_listened(records),
        })
    }

    fn assessment_page(&self, active: &ActiveAssessment) -> Result<AssessmentPage, ViewError> {
        let session = &active.session;
        let instrument = session.instrument();
        Ok(AssessmentPage {
            instrument: instrument.name().to_string(),
            client_name: self.roster.client(&active.client_id)?.user.name.clone(),
            position: session.position(),
            total: session.question_count(),
            progress_percent: format!("{:.0}", session.progress_percent()),
            question: session.current_question().map(|q| q.text.clone()),
            scale: instrument.scale().points(),
            awaiting_submission: active.unsubmitted.is_some(),
        })
    }
}

fn dimension_scores(scores: &GuiltScores) -> Vec<DimensionScore> {
    GuiltDimension::ALL
        .into_iter()
        .map(|d| DimensionScore {
            label: d.label(),
            value: scores.get(d),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessionalPage {
    pub view: &'static str,
    pub current_user: UserCard,
    pub body: ProfessionalBody,
    pub assessment: Option<AssessmentPage>,
    pub last_result: Option<ResultSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfessionalBody {
    Overview(ProfessionalOverview),
    PatientDetail(PatientDetail),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessionalStats {
    pub active_patients: usize,
    pub upcoming_sessions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessionalOverview {
    pub stats: ProfessionalStats,
    pub patients: Vec<PatientRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientRow {
    pub patient: UserCard,
    pub current_week: u8,
    pub phase: &'static str,
    pub progress_percent: u32,
    pub next_session: String,
}

impl PatientRow {
    fn new(client: &ClientProfile, ctx: &ViewContext) -> Self {
        Self {
            patient: UserCard::from_user(&client.user),
            current_week: client.current_week.number(),
            phase: week_content(client.current_week).title,
            progress_percent: metrics::program_progress_percent(client.current_week),
            next_session: schedule::session_label(client.next_session, ctx.locale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientDetail {
    pub patient: UserCard,
    pub current_week: u8,
    pub program: &'static WeekContent,
    pub guide: &'static [GuideStep],
    pub guide_completed: bool,
    pub meeting: NextMeeting,
    pub next_session: String,
    pub weeks: Vec<WeekRow>,
    pub latest_scores: Vec<DimensionScore>,
    pub score_history: Vec<ScoreSeries>,
    pub has_audio: bool,
    pub audio_chart: Vec<Bar>,
    pub total_audio_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentPage {
    pub instrument: String,
    pub client_name: String,
    pub position: usize,
    pub total: usize,
    pub progress_percent: String,
    pub question: Option<String>,
    pub scale: Vec<u8>,
    pub awaiting_submission: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    pub client_name: String,
    pub week: u8,
    pub scores: Vec<DimensionScore>,
}
