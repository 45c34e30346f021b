use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

// =============================================================================
// Repository Reference
// =============================================================================

/// An (owner, name) pair resolved from a repository locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepositoryReference {
    /// Create a reference from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a locator such as `https://github.com/owner/name/`.
    ///
    /// The last two non-empty path segments are taken as owner and name;
    /// trailing separators are ignored.
    pub fn parse(locator: &str) -> Result<Self> {
        let url = url::Url::parse(locator.trim())
            .map_err(|e| Error::invalid_request(format!("Invalid repository URL '{}': {}", locator, e)))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [.., owner, name] => Ok(Self::new(*owner, *name)),
            _ => Err(Error::invalid_request(format!(
                "Repository URL '{}' must contain an owner and a repository name",
                locator
            ))),
        }
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// =============================================================================
// Listing Entries
// =============================================================================

/// Type tag of a listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file with retrievable content.
    File,
    /// A directory. Never traversed.
    Directory,
    /// Symlinks, submodules, or an absent/unknown tag, kept verbatim so
    /// page comparison and fingerprints see the wire value. Skipped like
    /// directories.
    Other(String),
}

impl Default for EntryKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl EntryKind {
    /// Wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
            Self::Other(tag) => tag,
        }
    }
}

impl Serialize for EntryKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(if tag == "file" {
            Self::File
        } else if tag == "dir" || tag == "directory" {
            Self::Directory
        } else {
            Self::Other(tag)
        })
    }
}

/// One item of a repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// Entry name.
    pub name: String,
    /// Entry type.
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    /// Raw content locator (files only).
    #[serde(default)]
    pub download_url: Option<String>,
}

impl FileEntry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            download_url: Some(download_url.into()),
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            download_url: None,
        }
    }

    /// Whether this entry contributes content to a prompt.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}
