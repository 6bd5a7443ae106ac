//! Git Data API trait seam.
//!
//! The publish workflows run against this trait rather than a concrete HTTP
//! client, so tests can drive them with a scripted implementation and assert
//! on exact call order and arguments.

use async_trait::async_trait;

use icona_core::object::{BlobSha, CommitSha, TreeEntry, TreeSha};

use crate::error::Result;

/// An existing file read through the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Blob sha of the file at the base branch.
    pub sha: String,
    /// Decoded UTF-8 content.
    pub content: String,
}

/// An opened pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number assigned by GitHub.
    pub number: u64,
    /// Browser URL of the PR.
    pub html_url: String,
}

/// Low-level Git Data API operations against a single repository.
///
/// All operations are independent network calls with no retry; any error is
/// terminal for the publish sequence that issued it.
#[async_trait]
pub trait GitDataApi: Send + Sync {
    /// Upload raw UTF-8 content as a blob object.
    async fn upload_blob(&self, content: &str) -> Result<BlobSha>;

    /// Read the tip commit of a branch.
    async fn get_head(&self, branch: &str) -> Result<CommitSha>;

    /// Read an existing file's sha and decoded content.
    async fn get_content(&self, path: &str) -> Result<FileContent>;

    /// Create a tree from `entries` layered over `base_tree`, so files not
    /// listed in `entries` are carried over unchanged.
    async fn create_tree(&self, entries: Vec<TreeEntry>, base_tree: &CommitSha)
        -> Result<TreeSha>;

    /// Create a commit pointing at `tree` with the given parents.
    async fn create_commit(
        &self,
        tree: &TreeSha,
        message: &str,
        parents: &[CommitSha],
    ) -> Result<CommitSha>;

    /// Create a new branch ref pointing at `start`.
    async fn create_branch(&self, branch: &str, start: &CommitSha) -> Result<()>;

    /// Move an existing branch ref to point at `commit`.
    async fn update_ref(&self, branch: &str, commit: &CommitSha) -> Result<()>;

    /// Open a pull request merging `head` into `base`.
    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;
}
