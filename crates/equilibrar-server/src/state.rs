use std::sync::Arc;

use jiff::tz::TimeZone;
use jiff::Timestamp;
use tokio::sync::Mutex;

use equilibrar_core::fixtures;
use equilibrar_core::locale::Locale;
use equilibrar_instruments::assessment::{DiscardResults, ResultsSink};
use equilibrar_views::context::ViewContext;
use equilibrar_views::dashboard::Session;
use equilibrar_views::render::Renderer;

use crate::config::ServerConfig;

/// Where request handlers read the current time from.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(Timestamp),
}

impl Clock {
    pub fn now(self) -> Timestamp {
        match self {
            Clock::System => Timestamp::now(),
            Clock::Fixed(ts) => ts,
        }
    }
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub renderer: Arc<Renderer>,
    pub tz: TimeZone,
    pub locale: Locale,
    pub clock: Clock,
}

impl AppState {
    /// State over the demo roster, with completed assessments discarded.
    pub fn new(config: &ServerConfig) -> eyre::Result<Self> {
        Self::with_sink(config, Arc::new(DiscardResults))
    }

    pub fn with_sink(config: &ServerConfig, sink: Arc<dyn ResultsSink>) -> eyre::Result<Self> {
        let roster = fixtures::roster();
        roster.validate()?;
        tracing::info!(members = roster.len(), "roster loaded");

        Ok(Self {
            session: Arc::new(Mutex::new(Session::new(
                roster,
                config.dashboard.clone(),
                sink,
            ))),
            renderer: Arc::new(Renderer::new()?),
            tz: config.time_zone()?,
            locale: config.locale,
            clock: Clock::System,
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(self.clock.now(), self.tz.clone(), self.locale)
    }
}
