use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use equilibrar_instruments::scoring::{Question, ScoreRange};
use equilibrar_instruments::{all_instruments, require_instrument};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    question_count: usize,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    description: String,
    scale: ScoreRange,
    questions: Vec<Question>,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            question_count: i.questions().len(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = require_instrument(&id)?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        description: instrument.description().to_string(),
        scale: instrument.scale(),
        questions: instrument.questions().to_vec(),
    }))
}
