//! Administrator view: global overview and user management.

use serde::{Deserialize, Serialize};

use equilibrar_audit::events::AuditEvent;
use equilibrar_core::fixtures::{self, ActivityEntry};
use equilibrar_core::metrics::{self, RoleCounts};
use equilibrar_core::models::roster::{Member, Roster};
use equilibrar_core::models::user::{Role, User, UserId};

use crate::charts::{self, Bar};
use crate::context::{DashboardConfig, ViewContext};
use crate::dashboard::UserCard;
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    #[default]
    Dashboard,
    Users,
    Files,
    Settings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserFilter {
    #[default]
    All,
    Admin,
    Professional,
    Coordinator,
}

impl UserFilter {
    pub const ALL: [UserFilter; 4] = [
        UserFilter::All,
        UserFilter::Admin,
        UserFilter::Professional,
        UserFilter::Coordinator,
    ];

    pub fn matches(self, user: &User) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Admin => user.role == Role::Admin,
            UserFilter::Professional => user.role == Role::Professional,
            UserFilter::Coordinator => user.role == Role::Coordinator,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserFilter::All => "Todos",
            UserFilter::Admin => "Admin",
            UserFilter::Professional => "Profesional",
            UserFilter::Coordinator => "Coordinador",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminAction {
    SelectTab { tab: AdminTab },
    SetFilter { filter: UserFilter },
    SelectUser { user_id: UserId },
    Back,
    ToggleStatus { user_id: UserId },
}

#[derive(Debug, Clone)]
pub struct AdminView {
    user: User,
    roster: Roster,
    config: DashboardConfig,
    tab: AdminTab,
    filter: UserFilter,
    selected_user: Option<UserId>,
}

impl AdminView {
    pub fn new(user: User, roster: Roster, config: DashboardConfig) -> Self {
        Self {
            user,
            roster,
            config,
            tab: AdminTab::default(),
            filter: UserFilter::default(),
            selected_user: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn filter(&self) -> UserFilter {
        self.filter
    }

    pub fn selected_user(&self) -> Option<&UserId> {
        self.selected_user.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn dispatch(&mut self, action: AdminAction) -> Result<(), ViewError> {
        match action {
            AdminAction::SelectTab { tab } => {
                self.tab = tab;
                self.selected_user = None;
            }
            AdminAction::SetFilter { filter } => self.filter = filter,
            AdminAction::SelectUser { user_id } => {
                self.roster.get(&user_id)?;
                self.selected_user = Some(user_id);
            }
            AdminAction::Back => self.selected_user = None,
            AdminAction::ToggleStatus { user_id } => {
                let status = self.roster.toggle_status(&user_id)?;
                AuditEvent::status_changed(self.user.id.clone(), &user_id, status).emit();
            }
        }
        Ok(())
    }

    pub fn filtered_users(&self) -> Vec<&User> {
        self.roster
            .users()
            .filter(|u| self.filter.matches(u))
            .collect()
    }

    pub fn page(&self, _ctx: &ViewContext) -> Result<AdminPage, ViewError> {
        let body = if let Some(id) = &self.selected_user {
            AdminBody::UserDetail(self.user_detail(self.roster.get(id)?)?)
        } else {
            match self.tab {
                AdminTab::Users => AdminBody::Users(self.user_list()),
                AdminTab::Dashboard | AdminTab::Files | AdminTab::Settings => {
                    AdminBody::Overview(self.overview())
                }
            }
        };

        Ok(AdminPage {
            view: "admin",
            current_user: UserCard::from_user(&self.user),
            tab: self.tab,
            body,
        })
    }

    fn overview(&self) -> AdminOverview {
        AdminOverview {
            counts: RoleCounts::from_roster(&self.roster),
            completion_rate: format!("{:.1}", metrics::completion_rate(&self.roster)),
            completion_goal: format!("{:.0}", self.config.completion_goal_percent),
            audio_chart: charts::minutes_chart(&metrics::weekly_audio_usage_series()),
            activity: fixtures::activity_log(),
        }
    }

    fn user_list(&self) -> AdminUserList {
        let users: Vec<UserCard> = self
            .filtered_users()
            .into_iter()
            .map(UserCard::from_user)
            .collect();
        AdminUserList {
            filters: UserFilter::ALL
                .into_iter()
                .map(|f| FilterChip {
                    filter: f,
                    label: f.label(),
                    active: f == self.filter,
                })
                .collect(),
            result_count: users.len(),
            users,
        }
    }

    fn user_detail(&self, member: &Member) -> Result<AdminUserDetail, ViewError> {
        let user = member.user();
        let section = match member.role() {
            Role::Coordinator => {
                let active = RoleCounts::from_roster(&self.roster).active_clients;
                let capacity = self.config.coordinator_capacity;
                let percent = if capacity == 0 { 0 } else { active * 100 / capacity };
                RoleSection::Coordinator {
                    active_clients: active,
                    capacity,
                    percent_used: percent,
                    free_slots: capacity.saturating_sub(active),
                }
            }
            Role::Professional => RoleSection::Professional {
                patients: self.roster.require_clients()?.len(),
            },
            Role::Client => {
                let client = member
                    .as_client()
                    .ok_or_else(|| ViewError::Unavailable(format!("{} has no profile", user.id)))?;
                RoleSection::Client {
                    current_week: client.current_week.number(),
                    progress_percent: metrics::program_progress_percent(client.current_week),
                }
            }
            Role::Admin => RoleSection::Admin,
        };

        let title = match member.role() {
            Role::Professional => "Perfil Profesional",
            Role::Coordinator => "Detalle de Coordinador",
            Role::Admin | Role::Client => "Perfil de Usuario",
        };

        Ok(AdminUserDetail {
            title,
            display_id: user.id.as_str().to_uppercase(),
            user: UserCard::from_user(user),
            section,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminPage {
    pub view: &'static str,
    pub current_user: UserCard,
    pub tab: AdminTab,
    pub body: AdminBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminBody {
    Overview(AdminOverview),
    Users(AdminUserList),
    UserDetail(AdminUserDetail),
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub counts: RoleCounts,
    pub completion_rate: String,
    pub completion_goal: String,
    pub audio_chart: Vec<Bar>,
    pub activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterChip {
    pub filter: UserFilter,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminUserList {
    pub filters: Vec<FilterChip>,
    pub result_count: usize,
    pub users: Vec<UserCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleSection {
    Admin,
    Coordinator {
        active_clients: usize,
        capacity: usize,
        percent_used: usize,
        free_slots: usize,
    },
    Professional {
        patients: usize,
    },
    Client {
        current_week: u8,
        progress_percent: u32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminUserDetail {
    pub title: &'static str,
    pub display_id: String,
    pub user: UserCard,
    pub section: RoleSection,
}
