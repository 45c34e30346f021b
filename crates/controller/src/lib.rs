#![deny(unused)]
//! Review pipeline controller.
//!
//! Composes the repository host, prompt assembly, the assessment cache and
//! the completion service into a single `analyze` operation.

pub mod builder;
pub mod fingerprint;
pub mod orchestrator;
pub mod prompt;

pub use builder::AnalysisBuilder;
pub use fingerprint::{fingerprint, fingerprint_request, request_fingerprint};
pub use orchestrator::{AnalysisConfig, AnalysisOrchestrator};
pub use prompt::PromptAssembler;
