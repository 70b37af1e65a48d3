use equilibrar_core::models::user::{AccountStatus, UserId};
use serde::Serialize;
use tracing::info;

/// What a local mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Logout,
    StatusChanged,
    UserCreated,
    SessionScheduled,
    AssessmentCompleted,
    AssessmentCancelled,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::StatusChanged => "status_changed",
            AuditAction::UserCreated => "user_created",
            AuditAction::SessionScheduled => "session_scheduled",
            AuditAction::AssessmentCompleted => "assessment_completed",
            AuditAction::AssessmentCancelled => "assessment_cancelled",
        }
    }
}

/// A structured audit event for a dashboard action.
///
/// State in the dashboard is never persisted; these events are the only
/// trace a mutation leaves once the view is gone.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: UserId,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        actor: UserId,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status_changed(actor: UserId, target: &UserId, status: AccountStatus) -> Self {
        Self::new(AuditAction::StatusChanged, "user", target.as_str(), actor)
            .with_details(serde_json::json!({ "status": status }))
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(serde_json::Value::to_string)
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor = %self.actor,
            audit.details = %details,
            "audit event"
        );
    }
}
