//! HTTP client for the GitHub Git Data API.
//!
//! Wraps the eight REST calls a publish needs against a single repository:
//! - Object writes: `POST /git/blobs`, `POST /git/trees`, `POST /git/commits`
//! - Ref handling: `GET/POST /git/refs`, `PATCH /git/refs/heads/{branch}`
//! - Reads: `GET /contents/{path}`
//! - `POST /pulls`
//!
//! Every request carries the token and API-version headers; responses are
//! status-checked and shape-checked before any field is extracted, so a
//! non-2xx status or an unexpected body surfaces as a classified
//! [`GithubError`] instead of a stray parse failure.

use async_trait::async_trait;
use base64::prelude::{Engine, BASE64_STANDARD};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use icona_core::object::{BlobSha, CommitSha, TreeEntry, TreeSha};

use crate::api::{FileContent, GitDataApi, PullRequest};
use crate::error::{GitObjectKind, GithubError, Result};

/// Pinned GitHub REST API version sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = concat!("icona/", env!("CARGO_PKG_VERSION"));

/// Client bound to one repository and one access token.
pub struct GithubClient {
    api_url: String,
    token: String,
    http: reqwest::Client,
}

impl GithubClient {
    /// Create a client for `https://api.github.com/repos/{owner}/{repo}`.
    pub fn new(owner: &str, repo: &str, token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.github.com", owner, repo, token)
    }

    /// Create a client against a non-default API host (e.g. a test server).
    pub fn with_base_url(
        base_url: &str,
        owner: &str,
        repo: &str,
        token: impl Into<String>,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_url: format!("{}/repos/{}/{}", base, owner, repo),
            token: token.into(),
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_url, path))
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    /// Read the status and best-effort error message from a failed response.
    async fn failure_parts(resp: Response) -> (u16, String) {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        (status, api_message(&body))
    }

    async fn parse_success<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| GithubError::MalformedResponse {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }
}

/// Extract the `message` field GitHub puts in error bodies, falling back to
/// the raw body when it is not JSON (or not shaped like an API error).
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Classify a failed object/ref write.
fn write_error(object: GitObjectKind, status: u16, message: String) -> GithubError {
    match status {
        401 | 403 => GithubError::Unauthorized { status, message },
        _ => GithubError::ObjectWrite {
            object,
            status,
            message,
        },
    }
}

/// Decode the base64 (with embedded newlines) content of a contents response.
fn decode_content(encoded: &str) -> std::result::Result<String, String> {
    let compact: String = encoded.split_whitespace().collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("content is not UTF-8: {}", e))
}

#[derive(Debug, Deserialize)]
struct ShaResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    content: String,
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
}

#[async_trait]
impl GitDataApi for GithubClient {
    async fn upload_blob(&self, content: &str) -> Result<BlobSha> {
        let resp = self
            .request(Method::POST, "/git/blobs")
            .json(&json!({ "content": content, "encoding": "utf-8" }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(write_error(GitObjectKind::Blob, status, message));
        }

        let blob: ShaResponse = Self::parse_success("POST /git/blobs", resp).await?;
        debug!(sha = %blob.sha, "uploaded blob");
        Ok(BlobSha::new(blob.sha))
    }

    async fn get_head(&self, branch: &str) -> Result<CommitSha> {
        let endpoint = format!("GET /git/refs/heads/{}", branch);
        let resp = self
            .request(Method::GET, &format!("/git/refs/heads/{}", branch))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(match status {
                401 | 403 => GithubError::Unauthorized { status, message },
                404 => GithubError::RefNotFound {
                    branch: branch.to_string(),
                },
                _ => GithubError::Api {
                    endpoint,
                    status,
                    message,
                },
            });
        }

        let head: RefResponse = Self::parse_success(&endpoint, resp).await?;
        debug!(branch, sha = %head.object.sha, "resolved branch head");
        Ok(CommitSha::new(head.object.sha))
    }

    async fn get_content(&self, path: &str) -> Result<FileContent> {
        let endpoint = format!("GET /contents/{}", path);
        let resp = self
            .request(Method::GET, &format!("/contents/{}", path))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(match status {
                401 | 403 => GithubError::Unauthorized { status, message },
                404 => GithubError::ContentNotFound {
                    path: path.to_string(),
                },
                _ => GithubError::Api {
                    endpoint,
                    status,
                    message,
                },
            });
        }

        let file: ContentResponse = Self::parse_success(&endpoint, resp).await?;
        if file.encoding != "base64" {
            return Err(GithubError::MalformedResponse {
                endpoint,
                detail: format!("unexpected content encoding: {}", file.encoding),
            });
        }
        let content = decode_content(&file.content).map_err(|detail| {
            GithubError::MalformedResponse {
                endpoint: endpoint.clone(),
                detail,
            }
        })?;
        debug!(path, sha = %file.sha, bytes = content.len(), "fetched file content");
        Ok(FileContent {
            sha: file.sha,
            content,
        })
    }

    async fn create_tree(
        &self,
        entries: Vec<TreeEntry>,
        base_tree: &CommitSha,
    ) -> Result<TreeSha> {
        let entry_count = entries.len();
        let resp = self
            .request(Method::POST, "/git/trees")
            .json(&json!({ "tree": entries, "base_tree": base_tree }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(write_error(GitObjectKind::Tree, status, message));
        }

        let tree: ShaResponse = Self::parse_success("POST /git/trees", resp).await?;
        debug!(sha = %tree.sha, entries = entry_count, "created tree");
        Ok(TreeSha::new(tree.sha))
    }

    async fn create_commit(
        &self,
        tree: &TreeSha,
        message: &str,
        parents: &[CommitSha],
    ) -> Result<CommitSha> {
        let resp = self
            .request(Method::POST, "/git/commits")
            .json(&json!({ "tree": tree, "message": message, "parents": parents }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(write_error(GitObjectKind::Commit, status, message));
        }

        let commit: ShaResponse = Self::parse_success("POST /git/commits", resp).await?;
        debug!(sha = %commit.sha, "created commit");
        Ok(CommitSha::new(commit.sha))
    }

    async fn create_branch(&self, branch: &str, start: &CommitSha) -> Result<()> {
        let resp = self
            .request(Method::POST, "/git/refs")
            .json(&json!({ "ref": format!("refs/heads/{}", branch), "sha": start }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(match status {
                422 => GithubError::RefAlreadyExists {
                    branch: branch.to_string(),
                },
                _ => write_error(GitObjectKind::Ref, status, message),
            });
        }

        debug!(branch, start = %start, "created branch");
        Ok(())
    }

    async fn update_ref(&self, branch: &str, commit: &CommitSha) -> Result<()> {
        let resp = self
            .request(Method::PATCH, &format!("/git/refs/heads/{}", branch))
            .json(&json!({ "sha": commit }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(write_error(GitObjectKind::Ref, status, message));
        }

        debug!(branch, commit = %commit, "moved branch ref");
        Ok(())
    }

    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let resp = self
            .request(Method::POST, "/pulls")
            .json(&json!({ "head": head, "base": base, "title": title, "body": body }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let (status, message) = Self::failure_parts(resp).await;
            return Err(match status {
                401 | 403 => GithubError::Unauthorized { status, message },
                _ => GithubError::PullRequest { status, message },
            });
        }

        let pr: PullResponse = Self::parse_success("POST /pulls", resp).await?;
        debug!(number = pr.number, url = %pr.html_url, "opened pull request");
        Ok(PullRequest {
            number: pr.number,
            html_url: pr.html_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_extracts_json_field() {
        assert_eq!(api_message(r#"{"message":"Bad credentials"}"#), "Bad credentials");
        assert_eq!(api_message("plain text error"), "plain text error");
        assert_eq!(api_message(r#"{"error":"other shape"}"#), r#"{"error":"other shape"}"#);
    }

    #[test]
    fn test_write_error_classifies_auth() {
        let err = write_error(GitObjectKind::Blob, 401, "Bad credentials".into());
        assert!(matches!(err, GithubError::Unauthorized { status: 401, .. }));

        let err = write_error(GitObjectKind::Blob, 422, "invalid payload".into());
        assert!(matches!(
            err,
            GithubError::ObjectWrite {
                object: GitObjectKind::Blob,
                status: 422,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_content_handles_newlines() {
        // "# Release Note\n" as base64, split the way the contents API does.
        let encoded = "IyBSZWxl\nYXNlIE5v\ndGUK\n";
        assert_eq!(decode_content(encoded).unwrap(), "# Release Note\n");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(decode_content("!!!not base64!!!").is_err());
    }

    #[test]
    fn test_tree_entry_payload_shape() {
        let entries = vec![TreeEntry::from_blob(".icona/config.yml", BlobSha::new("b1"))];
        let payload = json!({ "tree": entries, "base_tree": CommitSha::new("h1") });
        assert_eq!(payload["base_tree"], "h1");
        assert_eq!(payload["tree"][0]["sha"], "b1");
        assert_eq!(payload["tree"][0]["type"], "blob");
    }
}
