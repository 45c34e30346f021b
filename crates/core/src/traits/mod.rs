//! Collaborator traits for the review pipeline.
//!
//! Traits are organized by the external dependency they stand for:
//! - `hosting`: repository listing and raw content retrieval
//! - `store`: the content cache
//! - `llm`: the completion service

pub mod hosting;
pub mod store;
pub mod llm;

pub use hosting::*;
pub use store::*;
pub use llm::*;
