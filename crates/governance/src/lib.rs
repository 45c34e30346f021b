#![deny(unused)]
//! Observability for the review service.
//!
//! This crate provides:
//! - Structured logging with optional OpenTelemetry export
//! - Prometheus metrics and recording helpers

pub mod metrics;
pub mod tracing_layer;

pub use metrics::{setup_metrics_recorder, track_cache_lookup, track_request, track_tokens};
pub use tracing_layer::configure_tracing;
