#![deny(unused)]
//! Core types, traits, and error definitions for the code review service.
//!
//! This crate provides the building blocks shared by every layer: the error
//! taxonomy, configuration, the repository/request data model, and the
//! collaborator traits the pipeline is assembled from.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
