//! equilibrar-audit
//!
//! Structured audit events for view-local mutations, emitted via `tracing`.

pub mod events;
