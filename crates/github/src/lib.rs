#![deny(unused)]
//! GitHub integration for the code review service.
//!
//! Implements `RepositoryHost` (paginated contents listing) and
//! `ContentSource` (raw file download) over reqwest.

pub mod client;

pub use client::{GitHubClient, GitHubClientConfig, GITHUB_ACCEPT};
