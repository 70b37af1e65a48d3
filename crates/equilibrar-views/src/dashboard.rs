//! Role gating and the login session.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use equilibrar_audit::events::{AuditAction, AuditEvent};
use equilibrar_core::content::week_content;
use equilibrar_core::metrics;
use equilibrar_core::models::client::ClientProfile;
use equilibrar_core::models::roster::Roster;
use equilibrar_core::models::user::{AccountStatus, Role, User, UserId};
use equilibrar_instruments::assessment::ResultsSink;

use crate::admin::{AdminAction, AdminView};
use crate::context::{DashboardConfig, ViewContext};
use crate::coordinator::{CoordinatorAction, CoordinatorView};
use crate::error::ViewError;
use crate::professional::{ProfessionalAction, ProfessionalView};
use crate::render::Renderer;

/// A user as every view lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCard {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub role_label: &'static str,
    pub status: AccountStatus,
    pub status_label: &'static str,
    pub initials: String,
    pub active: bool,
}

impl UserCard {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
            role_label: user.role.label(),
            status: user.status,
            status_label: user.status.label(),
            initials: metrics::initials(&user.name),
            active: user.status.is_active(),
        }
    }
}

/// One program week of a client, as shown in detail screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub number: u8,
    pub title: &'static str,
    pub is_current: bool,
    pub is_locked: bool,
    pub is_completed: bool,
    pub guide_completed: bool,
    pub audio_listened: u32,
}

impl WeekRow {
    pub fn for_client(client: &ClientProfile) -> Vec<WeekRow> {
        let audio = metrics::client_audio_minutes(&client.progress);
        client
            .progress
            .iter()
            .zip(audio)
            .map(|((week, progress), audio)| WeekRow {
                number: week.number(),
                title: week_content(week).title,
                is_current: week == client.current_week,
                is_locked: progress.is_locked,
                is_completed: progress.is_completed,
                guide_completed: progress.guide_completed,
                audio_listened: audio.minutes,
            })
            .collect()
    }
}

/// The view mounted for the logged-in user. Exactly one exists per login.
#[derive(Debug)]
pub enum Dashboard {
    Admin(AdminView),
    Coordinator(CoordinatorView),
    /// Also mounted for clients, who have no view of their own here.
    Professional(ProfessionalView),
}

impl Dashboard {
    pub fn mount(
        user: User,
        roster: Roster,
        config: DashboardConfig,
        sink: Arc<dyn ResultsSink>,
    ) -> Self {
        match user.role {
            Role::Admin => Dashboard::Admin(AdminView::new(user, roster, config)),
            Role::Coordinator => Dashboard::Coordinator(CoordinatorView::new(user, roster, config)),
            Role::Professional | Role::Client => {
                Dashboard::Professional(ProfessionalView::new(user, roster, config, sink))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Dashboard::Admin(_) => "admin",
            Dashboard::Coordinator(_) => "coordinator",
            Dashboard::Professional(_) => "professional",
        }
    }

    pub fn dispatch(&mut self, action: DashboardAction, ctx: &ViewContext) -> Result<(), ViewError> {
        let view = self.kind();
        match (self, action) {
            (Dashboard::Admin(v), DashboardAction::Admin(a)) => v.dispatch(a),
            (Dashboard::Coordinator(v), DashboardAction::Coordinator(a)) => v.dispatch(a, ctx),
            (Dashboard::Professional(v), DashboardAction::Professional(a)) => v.dispatch(a, ctx),
            _ => Err(ViewError::WrongView { view }),
        }
    }

    pub fn render(&self, ctx: &ViewContext, renderer: &Renderer) -> Result<String, ViewError> {
        match self {
            Dashboard::Admin(v) => renderer.render("admin.html", &v.page(ctx)?),
            Dashboard::Coordinator(v) => renderer.render("coordinator.html", &v.page(ctx)?),
            Dashboard::Professional(v) => renderer.render("professional.html", &v.page(ctx)?),
        }
    }
}

/// An action addressed to one of the role views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "payload", rename_all = "snake_case")]
pub enum DashboardAction {
    Admin(AdminAction),
    Coordinator(CoordinatorAction),
    Professional(ProfessionalAction),
}

#[derive(Debug, Clone, Serialize)]
struct LoginPage {
    view: &'static str,
    users: Vec<UserCard>,
}

/// Who is logged in, and the view they see.
///
/// Every login mounts a fresh view over a copy of the base roster, so
/// nothing a previous user did survives a logout.
pub struct Session {
    roster: Roster,
    config: DashboardConfig,
    sink: Arc<dyn ResultsSink>,
    dashboard: Option<Dashboard>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("members", &self.roster.len())
            .field("dashboard", &self.dashboard)
            .finish()
    }
}

impl Session {
    pub fn new(roster: Roster, config: DashboardConfig, sink: Arc<dyn ResultsSink>) -> Self {
        Self {
            roster,
            config,
            sink,
            dashboard: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.dashboard.as_ref().map(|d| match d {
            Dashboard::Admin(v) => v.user(),
            Dashboard::Coordinator(v) => v.user(),
            Dashboard::Professional(v) => v.user(),
        })
    }

    /// Log in as `user_id`, replacing whoever was logged in.
    pub fn login(&mut self, user_id: &UserId) -> Result<&Dashboard, ViewError> {
        let user = self.roster.get(user_id)?.user().clone();
        AuditEvent::new(AuditAction::Login, "session", user.id.as_str(), user.id.clone())
            .with_details(serde_json::json!({ "role": user.role }))
            .emit();
        let dashboard = Dashboard::mount(
            user,
            self.roster.clone(),
            self.config.clone(),
            Arc::clone(&self.sink),
        );
        Ok(self.dashboard.insert(dashboard))
    }

    /// Drop the mounted view. Returns whether anyone was logged in.
    pub fn logout(&mut self) -> bool {
        let Some(user) = self.current_user().cloned() else {
            return false;
        };
        AuditEvent::new(AuditAction::Logout, "session", user.id.as_str(), user.id.clone()).emit();
        self.dashboard = None;
        true
    }

    pub fn dispatch(&mut self, action: DashboardAction, ctx: &ViewContext) -> Result<(), ViewError> {
        self.dashboard
            .as_mut()
            .ok_or(ViewError::LoggedOut)?
            .dispatch(action, ctx)
    }

    /// The mounted view, or the user picker when nobody is logged in.
    pub fn render(&self, ctx: &ViewContext, renderer: &Renderer) -> Result<String, ViewError> {
        match &self.dashboard {
            Some(dashboard) => dashboard.render(ctx, renderer),
            None => self.render_login(renderer),
        }
    }

    pub fn render_login(&self, renderer: &Renderer) -> Result<String, ViewError> {
        renderer.render(
            "login.html",
            &LoginPage {
                view: "login",
                users: self.roster.users().map(UserCard::from_user).collect(),
            },
        )
    }
}
