use axum::extract::State;
use axum::Json;
use serde::Serialize;

use equilibrar_core::models::user::{AccountStatus, Role, UserId};

use crate::state::AppState;

#[derive(Serialize)]
pub struct UserSummary {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    status: AccountStatus,
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserSummary>> {
    let session = state.session.lock().await;
    let users = session
        .roster()
        .users()
        .map(|u| UserSummary {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            status: u.status,
        })
        .collect();
    Json(users)
}
