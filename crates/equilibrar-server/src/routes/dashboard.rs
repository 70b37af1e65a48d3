use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;

use equilibrar_core::models::user::UserId;
use equilibrar_views::dashboard::DashboardAction;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: UserId,
}

/// The mounted dashboard, or the user picker.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let ctx = state.view_context();
    let session = state.session.lock().await;
    Ok(Html(session.render(&ctx, &state.renderer)?))
}

pub async fn login(
    State(state): State<AppState>,
    req: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Html<String>, ApiError> {
    let Json(req) = req?;
    let ctx = state.view_context();
    let mut session = state.session.lock().await;
    let kind = session.login(&req.user_id)?.kind();
    tracing::info!(user_id = %req.user_id, view = kind, "dashboard mounted");
    Ok(Html(session.render(&ctx, &state.renderer)?))
}

pub async fn logout(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut session = state.session.lock().await;
    if !session.logout() {
        tracing::debug!("logout without a session");
    }
    Ok(Html(session.render_login(&state.renderer)?))
}

/// Dispatch one action to the mounted view and return the re-rendered page.
pub async fn dispatch_action(
    State(state): State<AppState>,
    action: Result<Json<DashboardAction>, JsonRejection>,
) -> Result<Html<String>, ApiError> {
    let Json(action) = action?;
    let ctx = state.view_context();
    let mut session = state.session.lock().await;
    session.dispatch(action, &ctx)?;
    Ok(Html(session.render(&ctx, &state.renderer)?))
}
