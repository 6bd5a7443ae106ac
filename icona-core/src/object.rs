//! Git object identifiers and tree payloads.
//!
//! The Git Data API hands back a sha for every object it creates. Each kind of
//! sha gets its own newtype so a publish step cannot consume the wrong one:
//! a tree is built from blob shas, a commit from a tree sha, a ref from a
//! commit sha. The ordering of the publish chain is therefore enforced by the
//! types, not by call-site discipline.

use serde::{Deserialize, Serialize};

/// File mode for a regular (non-executable) file in a Git tree.
pub const FILE_MODE: &str = "100644";

/// Sha of an uploaded blob object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobSha(String);

impl BlobSha {
    /// Create from a sha string returned by the blob endpoint.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// Get the sha as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sha of a created tree object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeSha(String);

impl TreeSha {
    /// Create from a sha string returned by the tree endpoint.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// Get the sha as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TreeSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sha of a commit object (a branch HEAD or a newly created commit).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitSha(String);

impl CommitSha {
    /// Create from a sha string returned by the ref or commit endpoints.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// Get the sha as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file to publish: repository-relative path plus raw UTF-8 content.
///
/// Built by the caller before publishing; never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Repository-relative path (e.g. `.icona/release.md`).
    pub path: String,
    /// Raw file content.
    pub content: String,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// One element of the `POST /git/trees` payload.
///
/// Always references an uploaded blob with mode `100644`; Icona never
/// publishes executables, symlinks, or submodules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Repository-relative path.
    pub path: String,
    /// Git file mode.
    pub mode: String,
    /// Object type, always `"blob"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sha of the uploaded blob.
    pub sha: BlobSha,
}

impl TreeEntry {
    /// Create a tree entry for a regular file backed by an uploaded blob.
    pub fn from_blob(path: impl Into<String>, sha: BlobSha) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE.to_string(),
            kind: "blob".to_string(),
            sha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha_display() {
        let sha = CommitSha::new("abc123");
        assert_eq!(sha.to_string(), "abc123");
        assert_eq!(sha.as_str(), "abc123");
    }

    #[test]
    fn test_tree_entry_from_blob() {
        let entry = TreeEntry::from_blob("svg/check.svg", BlobSha::new("b1"));
        assert_eq!(entry.path, "svg/check.svg");
        assert_eq!(entry.mode, "100644");
        assert_eq!(entry.kind, "blob");
        assert_eq!(entry.sha, BlobSha::new("b1"));
    }

    #[test]
    fn test_tree_entry_wire_format() {
        let entry = TreeEntry::from_blob(".icona/release.md", BlobSha::new("b2"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["path"], ".icona/release.md");
        assert_eq!(json["mode"], "100644");
        assert_eq!(json["type"], "blob");
        assert_eq!(json["sha"], "b2");
    }

    #[test]
    fn test_sha_serde_transparent() {
        let sha: BlobSha = serde_json::from_str("\"deadbeef\"").unwrap();
        assert_eq!(sha, BlobSha::new("deadbeef"));
    }
}
