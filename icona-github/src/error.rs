//! Error taxonomy for the GitHub publishing client.
//!
//! Errors are classified by the step that failed rather than by transport
//! detail, so a caller (or a log line) can tell exactly how far a publish got
//! before it was aborted. There is no retry and no cleanup at this layer;
//! every variant is terminal for the publish that produced it.

/// Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, GithubError>;

/// Kind of Git object a write operation was producing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitObjectKind {
    Blob,
    Tree,
    Commit,
    Ref,
}

impl std::fmt::Display for GitObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GitObjectKind::Blob => "blob",
            GitObjectKind::Tree => "tree",
            GitObjectKind::Commit => "commit",
            GitObjectKind::Ref => "ref",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur while publishing to GitHub.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// The token was rejected (401) or lacks permission (403).
    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The base branch does not exist, so there is nothing to build on.
    #[error("Branch not found: {branch}")]
    RefNotFound { branch: String },

    /// The generated branch name collided with an existing ref.
    #[error("Branch already exists: {branch}")]
    RefAlreadyExists { branch: String },

    /// A file the workflow needs to read is not in the repository.
    #[error("File not found in repository: {path}")]
    ContentNotFound { path: String },

    /// The remote rejected a blob/tree/commit/ref write.
    #[error("Failed to write {object} object ({status}): {message}")]
    ObjectWrite {
        object: GitObjectKind,
        status: u16,
        message: String,
    },

    /// The pull request could not be opened (e.g. no diff against base).
    /// The branch and commit created before this point remain on the remote.
    #[error("Pull request creation failed ({status}): {message}")]
    PullRequest { status: u16, message: String },

    /// The remote answered a read with a status the workflow has no mapping for.
    #[error("GitHub API error ({status}) at {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response parsed as JSON but not as the expected shape.
    #[error("Malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },

    /// The request never produced an HTTP response.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_display() {
        assert_eq!(GitObjectKind::Blob.to_string(), "blob");
        assert_eq!(GitObjectKind::Ref.to_string(), "ref");
    }

    #[test]
    fn test_error_messages_identify_step() {
        let err = GithubError::ObjectWrite {
            object: GitObjectKind::Tree,
            status: 422,
            message: "tree.sha is invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write tree object (422): tree.sha is invalid"
        );

        let err = GithubError::PullRequest {
            status: 422,
            message: "No commits between main and icona-deploy".to_string(),
        };
        assert!(err.to_string().starts_with("Pull request creation failed"));
    }
}
