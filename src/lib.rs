// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod engine;
pub mod evaluators;
pub mod metrics;
pub mod outlets;
pub mod photos;
pub mod registry;
pub mod report;
pub mod reputation;
pub mod result;
pub mod signal;
pub mod sources;
pub mod telemetry;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::config::EngineConfig;
pub use crate::engine::{ConfidenceEngine, EngineBuilder};
pub use crate::report::{GeoPoint, IncidentCategory, ReportInput};
pub use crate::result::{Breakdown, ConfidenceLevel, ConfidenceResult, SignalBreakdown};
pub use crate::signal::{Evidence, SignalKind, SignalResult};
