use axum::extract::{Path, Query, State};
use axum::Json;
use jiff::civil::Date;
use serde::Deserialize;

use equilibrar_core::metrics::{self, DailyMinutes};
use equilibrar_core::models::user::UserId;
use equilibrar_core::schedule::{self, NextMeeting};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn next_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NextMeeting>, ApiError> {
    let ctx = state.view_context();
    let session = state.session.lock().await;
    let client = session.roster().client(&UserId::new(id))?;
    Ok(Json(schedule::client_meeting(
        client, ctx.now, &ctx.tz, ctx.locale,
    )?))
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any day of the week to report; defaults to the week of the latest record.
    pub week_of: Option<Date>,
}

pub async fn weekly_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Vec<DailyMinutes>>, ApiError> {
    let ctx = state.view_context();
    let session = state.session.lock().await;
    let client = session.roster().client(&UserId::new(id))?;
    let records = &client.clinical_data.audio_usage;
    let week_of = query
        .week_of
        .or_else(|| records.iter().map(|r| r.date).max())
        .unwrap_or_else(|| ctx.today());
    Ok(Json(metrics::audio_usage_series(records, week_of, ctx.locale)?))
}
