use thiserror::Error;

use equilibrar_core::error::CoreError;
use equilibrar_instruments::error::InstrumentError;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("action not available in the {view} view")]
    WrongView { view: &'static str },

    #[error("action not available: {0}")]
    Unavailable(String),

    #[error("no user logged in")]
    LoggedOut,
}

impl From<tera::Error> for ViewError {
    fn from(e: tera::Error) -> Self {
        ViewError::TemplateRender(e.to_string())
    }
}
