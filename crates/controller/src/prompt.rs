//! Review prompt assembly.

use std::sync::Arc;

use code_review_core::{
    traits::ContentSource,
    types::{CandidateLevel, FileEntry},
};

/// Characters of each file embedded in the prompt.
pub const FILE_CONTENT_LIMIT: usize = 500;

/// Appended after every file excerpt, whether or not it was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Stand-in for a file whose content could not be retrieved.
pub const FETCH_FAILED_PLACEHOLDER: &str = "Failed to fetch file content";

/// Closing instruction of every prompt.
pub const REVIEW_INSTRUCTION: &str =
    "Please review the code for quality issues, potential improvements, and suggest a rating.\n";

/// First `limit` characters of `content` (not bytes).
pub fn truncate_chars(content: &str, limit: usize) -> &str {
    match content.char_indices().nth(limit) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Builds bounded review prompts from a repository listing.
///
/// Only top-level `file` entries contribute; directories are never
/// traversed. Files are fetched one after another in listing order.
pub struct PromptAssembler {
    content: Arc<dyn ContentSource>,
}

impl PromptAssembler {
    pub fn new(content: Arc<dyn ContentSource>) -> Self {
        Self { content }
    }

    /// Assemble the prompt for one analysis.
    pub async fn build_prompt(
        &self,
        listing: &[FileEntry],
        description: &str,
        level: CandidateLevel,
    ) -> String {
        let mut prompt = format!(
            "You are a code reviewer analyzing a project for a {} developer.\n",
            level
        );
        prompt.push_str(&format!("Assignment: {}\n\n", description));
        prompt.push_str("Here are the contents of the files:\n\n");

        for entry in listing.iter().filter(|e| e.is_file()) {
            let content = self.file_content(entry).await;
            prompt.push_str(&format!(
                "File: {}\n{}{}\n\n",
                entry.name,
                truncate_chars(&content, FILE_CONTENT_LIMIT),
                TRUNCATION_MARKER
            ));
        }

        prompt.push_str(REVIEW_INSTRUCTION);
        prompt
    }

    async fn file_content(&self, entry: &FileEntry) -> String {
        let Some(ref locator) = entry.download_url else {
            tracing::warn!(file = %entry.name, "File entry has no download URL");
            return FETCH_FAILED_PLACEHOLDER.to_string();
        };

        match self.content.fetch_raw(locator).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(file = %entry.name, error = %e, "Failed to fetch file content");
                FETCH_FAILED_PLACEHOLDER.to_string()
            }
        }
    }
}
