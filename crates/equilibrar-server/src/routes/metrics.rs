use axum::Json;

use equilibrar_core::metrics::{self, DailyMinutes};

pub async fn weekly_audio_usage() -> Json<Vec<DailyMinutes>> {
    Json(metrics::weekly_audio_usage_series())
}
