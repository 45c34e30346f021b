//! Core type definitions for the code review service.
//!
//! Split into the repository side (references, listing entries) and the
//! request side (candidate level, analysis request, cache keys).

pub mod repository;
pub mod request;

pub use repository::*;
pub use request::*;
