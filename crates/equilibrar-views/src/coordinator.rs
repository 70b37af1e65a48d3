//! Coordinator view: client management, scheduling and the month calendar.

use jiff::civil::{Date, Time};
use jiff::Span;
use serde::{Deserialize, Serialize};

use equilibrar_audit::events::{AuditAction, AuditEvent};
use equilibrar_core::content::week_content;
use equilibrar_core::error::CoreError;
use equilibrar_core::fixtures::avatar_url;
use equilibrar_core::metrics;
use equilibrar_core::models::client::ClientProfile;
use equilibrar_core::models::clinical::ClinicalData;
use equilibrar_core::models::progress::{ProgramWeek, Progress};
use equilibrar_core::models::roster::{Member, Roster};
use equilibrar_core::models::user::{AccountStatus, Role, User, UserId};
use equilibrar_core::schedule::{self, MonthGrid, NextMeeting};

use crate::context::{DashboardConfig, ViewContext};
use crate::dashboard::{UserCard, WeekRow};
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorTab {
    #[default]
    Dashboard,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorModal {
    CreateUser,
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Video,
    InPerson,
}

impl SessionKind {
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Video => "Videollamada",
            SessionKind::InPerson => "Presencial",
        }
    }
}

/// Fields of the "Nuevo Usuario" modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub start_week: u8,
}

impl NewUserForm {
    fn into_member(self, roster: &Roster, today: Date) -> Result<Member, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("name", "must not be empty"));
        }

        let email = self.email.trim().to_lowercase();
        let Some(local) = email_local_part(&email) else {
            return Err(invalid("email", "must look like name@domain.tld"));
        };

        let prefix = match self.role {
            Role::Client => "c",
            Role::Professional | Role::Coordinator => "u",
            Role::Admin => return Err(invalid("role", "administrators cannot be created here")),
        };
        let start_week = ProgramWeek::try_from(self.start_week)?;

        if roster.find_by_email(&email).is_some() {
            return Err(CoreError::DuplicateUser(email));
        }

        let avatar_seed = u32::try_from(roster.len() + 1).unwrap_or(u32::MAX);
        let user = User {
            id: unused_id(roster, &format!("{prefix}-{local}")),
            name: name.to_string(),
            email: email.clone(),
            role: self.role,
            avatar: avatar_url(avatar_seed),
            status: AccountStatus::Active,
        };

        Ok(match self.role {
            Role::Client => Member::Client(ClientProfile {
                user,
                current_week: start_week,
                start_date: today,
                next_session: None,
                progress: Progress::starting_at(start_week),
                clinical_data: ClinicalData::default(),
            }),
            Role::Admin | Role::Professional | Role::Coordinator => Member::Staff(user),
        })
    }
}

/// The part before the `@` of a `name@domain.tld` address.
fn email_local_part(email: &str) -> Option<&str> {
    if email.chars().any(char::is_whitespace) {
        return None;
    }
    let (local, domain) = email.split_once('@')?;
    let (host, tld) = domain.rsplit_once('.')?;
    if local.is_empty() || domain.contains('@') || host.is_empty() || tld.is_empty() {
        return None;
    }
    Some(local)
}

/// `base`, or `base-2`, `base-3`... when another member already owns it.
fn unused_id(roster: &Roster, base: &str) -> UserId {
    let mut id = UserId::from(base);
    let mut n = 2;
    while roster.find(&id).is_some() {
        id = UserId::new(format!("{base}-{n}"));
        n += 1;
    }
    id
}

fn invalid(field: &str, reason: &str) -> CoreError {
    CoreError::InvalidField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Fields of the "Agendar Sesión" modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleForm {
    pub date: Date,
    pub time: Time,
    pub kind: SessionKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoordinatorAction {
    SelectTab { tab: CoordinatorTab },
    SelectClient { client_id: UserId },
    Back,
    ToggleStatus { client_id: UserId },
    OpenCreateUser,
    OpenSchedule,
    CloseModal,
    CreateUser { form: NewUserForm },
    ConfirmSchedule { form: ScheduleForm },
    PreviousMonth,
    NextMonth,
}

/// How many months the calendar pages away from its anchor, either way.
pub const MAX_MONTH_OFFSET: i32 = 12 * 100;

#[derive(Debug, Clone)]
pub struct CoordinatorView {
    user: User,
    roster: Roster,
    config: DashboardConfig,
    tab: CoordinatorTab,
    selected_client: Option<UserId>,
    modal: Option<CoordinatorModal>,
    /// Months away from the calendar anchor.
    month_offset: i32,
}

impl CoordinatorView {
    pub fn new(user: User, roster: Roster, config: DashboardConfig) -> Self {
        Self {
            user,
            roster,
            config,
            tab: CoordinatorTab::default(),
            selected_client: None,
            modal: None,
            month_offset: 0,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn tab(&self) -> CoordinatorTab {
        self.tab
    }

    pub fn selected_client(&self) -> Option<&UserId> {
        self.selected_client.as_ref()
    }

    pub fn modal(&self) -> Option<CoordinatorModal> {
        self.modal
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn dispatch(
        &mut self,
        action: CoordinatorAction,
        ctx: &ViewContext,
    ) -> Result<(), ViewError> {
        match action {
            CoordinatorAction::SelectTab { tab } => {
                self.tab = tab;
                self.selected_client = None;
                self.modal = None;
            }
            CoordinatorAction::SelectClient { client_id } => {
                self.roster.client(&client_id)?;
                self.selected_client = Some(client_id);
                self.modal = None;
            }
            CoordinatorAction::Back => {
                self.selected_client = None;
                self.modal = None;
            }
            CoordinatorAction::ToggleStatus { client_id } => {
                self.roster.client(&client_id)?;
                let status = self.roster.toggle_status(&client_id)?;
                AuditEvent::status_changed(self.user.id.clone(), &client_id, status).emit();
            }
            CoordinatorAction::OpenCreateUser => {
                if self.tab != CoordinatorTab::Dashboard || self.selected_client.is_some() {
                    return Err(ViewError::Unavailable(
                        "user creation is only offered on the overview".to_string(),
                    ));
                }
                self.modal = Some(CoordinatorModal::CreateUser);
            }
            CoordinatorAction::OpenSchedule => {
                if self.selected_client.is_none() {
                    return Err(ViewError::Unavailable(
                        "select a client before scheduling".to_string(),
                    ));
                }
                self.modal = Some(CoordinatorModal::Schedule);
            }
            CoordinatorAction::CloseModal => self.modal = None,
            CoordinatorAction::CreateUser { form } => {
                self.require_modal(CoordinatorModal::CreateUser)?;
                let member = form.into_member(&self.roster, ctx.today())?;
                let id = member.user().id.clone();
                let role = member.role();
                self.roster.insert(member)?;
                self.modal = None;
                AuditEvent::new(AuditAction::UserCreated, "user", id.as_str(), self.user.id.clone())
                    .with_details(serde_json::json!({ "role": role }))
                    .emit();
            }
            CoordinatorAction::ConfirmSchedule { form } => {
                self.require_modal(CoordinatorModal::Schedule)?;
                let client_id = self
                    .selected_client
                    .clone()
                    .ok_or_else(|| ViewError::Unavailable("no client selected".to_string()))?;
                let at = form.date.to_datetime(form.time);
                self.roster.client_mut(&client_id)?.next_session = Some(at);
                self.modal = None;
                AuditEvent::new(
                    AuditAction::SessionScheduled,
                    "client",
                    client_id.as_str(),
                    self.user.id.clone(),
                )
                .with_details(serde_json::json!({ "at": at, "kind": form.kind }))
                .emit();
            }
            CoordinatorAction::PreviousMonth => self.step_month(-1)?,
            CoordinatorAction::NextMonth => self.step_month(1)?,
        }
        Ok(())
    }

    fn step_month(&mut self, step: i32) -> Result<(), ViewError> {
        let offset = self.month_offset + step;
        if offset.abs() > MAX_MONTH_OFFSET {
            return Err(ViewError::Unavailable(format!(
                "the calendar only reaches {MAX_MONTH_OFFSET} months from its anchor"
            )));
        }
        self.month_offset = offset;
        Ok(())
    }

    fn require_modal(&self, modal: CoordinatorModal) -> Result<(), ViewError> {
        if self.modal == Some(modal) {
            Ok(())
        } else {
            Err(ViewError::Unavailable(format!("{modal:?} modal is not open")))
        }
    }

    pub fn page(&self, ctx: &ViewContext) -> Result<CoordinatorPage, ViewError> {
        let body = match (self.tab, &self.selected_client) {
            (CoordinatorTab::Calendar, _) => CoordinatorBody::Calendar(self.calendar(ctx)?),
            (CoordinatorTab::Dashboard, Some(id)) => {
                CoordinatorBody::ClientDetail(self.client_detail(self.roster.client(id)?, ctx)?)
            }
            (CoordinatorTab::Dashboard, None) => CoordinatorBody::Overview(self.overview(ctx)?),
        };

        let modal = match (self.modal, &self.selected_client) {
            (Some(CoordinatorModal::CreateUser), _) => Some(ModalPage::CreateUser {
                roles: [Role::Client, Role::Professional, Role::Coordinator]
                    .into_iter()
                    .map(|role| RoleOption {
                        role,
                        label: role.label(),
                    })
                    .collect(),
                weeks: ProgramWeek::ALL.map(ProgramWeek::number).to_vec(),
            }),
            (Some(CoordinatorModal::Schedule), Some(id)) => Some(ModalPage::Schedule {
                client: UserCard::from_user(&self.roster.client(id)?.user),
                kinds: [SessionKind::Video, SessionKind::InPerson]
                    .into_iter()
                    .map(|kind| KindOption {
                        kind,
                        label: kind.label(),
                    })
                    .collect(),
            }),
            _ => None,
        };

        Ok(CoordinatorPage {
            view: "coordinator",
            current_user: UserCard::from_user(&self.user),
            tab: self.tab,
            body,
            modal,
        })
    }

    fn overview(&self, ctx: &ViewContext) -> Result<CoordinatorOverview, ViewError> {
        let clients = self.roster.require_clients()?;
        let today = ctx.today();

        let mut sessions_today = 0;
        for client in &clients {
            let scheduled = client.next_session.is_some_and(|at| at.date() == today);
            let meeting = week_content(client.current_week).has_meet
                && schedule::meeting_date(client.start_date, client.current_week)? == today;
            if scheduled || meeting {
                sessions_today += 1;
            }
        }

        let pending_reviews = clients
            .iter()
            .filter(|c| c.progress.get(c.current_week).initial_test_done != Some(true))
            .count();

        Ok(CoordinatorOverview {
            stats: CoordinatorStats {
                total_clients: clients.len(),
                sessions_today,
                pending_reviews,
            },
            clients: clients
                .into_iter()
                .map(|c| ClientRow::new(c, ctx))
                .collect(),
        })
    }

    fn client_detail(
        &self,
        client: &ClientProfile,
        ctx: &ViewContext,
    ) -> Result<ClientDetail, ViewError> {
        let content = week_content(client.current_week);
        Ok(ClientDetail {
            client: UserCard::from_user(&client.user),
            start_date: client.start_date.to_string(),
            current_week: client.current_week.number(),
            phase: content.title,
            phase_subtitle: content.subtitle,
            progress_percent: metrics::program_progress_percent(client.current_week),
            meeting: schedule::client_meeting(client, ctx.now, &ctx.tz, ctx.locale)?,
            next_session: schedule::session_label(client.next_session, ctx.locale),
            weeks: WeekRow::for_client(client),
        })
    }

    fn calendar(&self, ctx: &ViewContext) -> Result<MonthGrid, ViewError> {
        let anchor = self.config.calendar_anchor.unwrap_or_else(|| ctx.today());
        let month = anchor
            .first_of_month()
            .checked_add(Span::new().try_months(self.month_offset).map_err(CoreError::from)?)
            .map_err(CoreError::from)?;
        let events = schedule::client_events(self.roster.clients(), |w| week_content(w).has_meet)?;
        Ok(schedule::month_grid(
            month.year(),
            month.month(),
            Some(ctx.today()),
            &events,
            ctx.locale,
        )?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorPage {
    pub view: &'static str,
    pub current_user: UserCard,
    pub tab: CoordinatorTab,
    pub body: CoordinatorBody,
    pub modal: Option<ModalPage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinatorBody {
    Overview(CoordinatorOverview),
    ClientDetail(ClientDetail),
    Calendar(MonthGrid),
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorStats {
    pub total_clients: usize,
    pub sessions_today: usize,
    pub pending_reviews: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorOverview {
    pub stats: CoordinatorStats,
    pub clients: Vec<ClientRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientRow {
    pub client: UserCard,
    pub current_week: u8,
    pub progress_percent: u32,
    pub progress_label: &'static str,
    pub active: bool,
    pub next_session: String,
}

impl ClientRow {
    pub fn new(client: &ClientProfile, ctx: &ViewContext) -> Self {
        Self {
            client: UserCard::from_user(&client.user),
            current_week: client.current_week.number(),
            progress_percent: metrics::program_progress_percent(client.current_week),
            progress_label: metrics::progress_label(client.current_week, client.user.status),
            active: client.user.status.is_active(),
            next_session: schedule::session_label(client.next_session, ctx.locale),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    pub client: UserCard,
    pub start_date: String,
    pub current_week: u8,
    pub phase: &'static str,
    pub phase_subtitle: &'static str,
    pub progress_percent: u32,
    pub meeting: NextMeeting,
    pub next_session: String,
    pub weeks: Vec<WeekRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleOption {
    pub role: Role,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindOption {
    pub kind: SessionKind,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "modal", rename_all = "snake_case")]
pub enum ModalPage {
    CreateUser {
        roles: Vec<RoleOption>,
        weeks: Vec<u8>,
    },
    Schedule {
        client: UserCard,
        kinds: Vec<KindOption>,
    },
}
