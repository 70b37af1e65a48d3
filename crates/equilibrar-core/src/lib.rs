//! equilibrar-core
//!
//! Pure domain types for the Equilibrar coaching dashboard: users and roles,
//! client program progress, clinical data, program content, fixtures and the
//! date/metric helpers the views derive from them. No I/O.

pub mod content;
pub mod error;
pub mod fixtures;
pub mod locale;
pub mod metrics;
pub mod models;
pub mod schedule;
