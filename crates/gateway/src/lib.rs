#![deny(unused)]
//! HTTP gateway for the review service.
//!
//! Exposes the analysis pipeline as `POST /review`, plus health and
//! Prometheus endpoints.

pub mod server;

pub use server::{GatewayConfig, GatewayServer, ReviewRequest, ReviewResponse};
