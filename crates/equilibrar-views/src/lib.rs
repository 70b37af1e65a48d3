//! equilibrar-views
//!
//! Role-gated dashboard composition. A [`dashboard::Session`] mounts exactly
//! one role view for the logged-in user; each view owns its navigation
//! state and a local copy of the roster, handles its own actions, and
//! renders deterministically through Tera templates.

pub mod admin;
pub mod charts;
pub mod context;
pub mod coordinator;
pub mod dashboard;
pub mod error;
pub mod professional;
pub mod render;
