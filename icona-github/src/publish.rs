//! Publish workflows: setup and deploy pull requests.
//!
//! Both workflows are the same strictly ordered chain over [`GitDataApi`]:
//! resolve base HEAD, upload blobs, build a tree over the base HEAD, commit,
//! create a branch at the base HEAD, move the branch to the new commit, open
//! a PR. Each step consumes the previous step's typed sha, so the ordering is
//! enforced by the data flow. Any failure aborts the remaining steps; objects
//! already created on the remote are left behind.

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{debug, info};

use icona_core::config::{IconaConfig, CONFIG_PATH};
use icona_core::object::{CommitSha, FileEntry, TreeEntry};
use icona_core::release::{append_release_entry, initial_release_notes, RELEASE_NOTES_PATH};

use crate::api::{GitDataApi, PullRequest};
use crate::error::{GithubError, Result};

/// Default branch that publish PRs target.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Everything a single publish needs besides the base branch.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Name of the branch to create for this publish.
    pub branch: String,
    /// Files to write in the publish commit.
    pub files: Vec<FileEntry>,
    /// Commit message.
    pub commit_message: String,
    /// Pull request title.
    pub pr_title: String,
    /// Pull request body.
    pub pr_body: String,
}

/// Terminal result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Branch the publish commit landed on.
    pub branch: String,
    /// Sha of the publish commit.
    pub commit: CommitSha,
    /// The opened pull request.
    pub pull_request: PullRequest,
}

/// Runs the setup and deploy workflows against one repository.
pub struct Publisher<A: GitDataApi> {
    api: A,
    base_branch: String,
}

impl<A: GitDataApi> Publisher<A> {
    /// Create a publisher targeting the default base branch.
    pub fn new(api: A) -> Self {
        Self::with_base_branch(api, DEFAULT_BASE_BRANCH)
    }

    /// Create a publisher targeting a specific base branch.
    pub fn with_base_branch(api: A, base_branch: impl Into<String>) -> Self {
        Self {
            api,
            base_branch: base_branch.into(),
        }
    }

    /// Access the underlying API implementation.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Bootstrap the `.icona/` directory in a repository that has never been
    /// configured: commits `config.yml` and an empty release notes file, then
    /// opens a PR titled "Setting up Icona".
    pub async fn create_setting_pr(&self, config: &IconaConfig) -> Result<PublishOutcome> {
        let request = PublishRequest {
            branch: unique_branch_name("icona-setting"),
            files: vec![
                FileEntry::new(CONFIG_PATH, config.to_yaml()),
                FileEntry::new(RELEASE_NOTES_PATH, initial_release_notes()),
            ],
            commit_message: "chore: add icona.yml".to_string(),
            pr_title: "Setting up Icona".to_string(),
            pr_body: "This PR is created by Icona.".to_string(),
        };

        self.publish(request).await
    }

    /// Record a deploy: appends a dated entry to the existing release notes
    /// and opens a PR titled "Update Icona".
    ///
    /// Fails with `ContentNotFound` if the repository was never set up; no
    /// release notes file is synthesized.
    pub async fn create_deploy_pr(&self) -> Result<PublishOutcome> {
        let base_head = self.api.get_head(&self.base_branch).await?;
        let release = self.api.get_content(RELEASE_NOTES_PATH).await?;
        let updated = append_release_entry(&release.content, Utc::now());

        let request = PublishRequest {
            branch: unique_branch_name("icona-deploy"),
            files: vec![FileEntry::new(RELEASE_NOTES_PATH, updated)],
            commit_message: "chore: update release.md".to_string(),
            pr_title: "Update Icona".to_string(),
            pr_body: String::new(),
        };

        self.publish_onto(base_head, request).await
    }

    /// Publish an arbitrary set of files as a pull request against the base
    /// branch: resolve the base HEAD, then run the object chain on top of it.
    pub async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome> {
        let base_head = self.api.get_head(&self.base_branch).await?;
        self.publish_onto(base_head, request).await
    }

    /// The shared blob -> tree -> commit -> branch -> ref -> PR chain,
    /// built on top of an already resolved base HEAD.
    async fn publish_onto(
        &self,
        base_head: CommitSha,
        request: PublishRequest,
    ) -> Result<PublishOutcome> {
        debug!(
            branch = %request.branch,
            base = %self.base_branch,
            files = request.files.len(),
            "starting publish"
        );

        // Sibling uploads only depend on the base HEAD, so they may run
        // concurrently; the tree must wait for all of them.
        let uploads = request.files.iter().map(|file| async move {
            let sha = self.api.upload_blob(&file.content).await?;
            Ok::<TreeEntry, GithubError>(TreeEntry::from_blob(&file.path, sha))
        });
        let entries = try_join_all(uploads).await?;

        let tree = self.api.create_tree(entries, &base_head).await?;
        let commit = self
            .api
            .create_commit(&tree, &request.commit_message, std::slice::from_ref(&base_head))
            .await?;

        self.api.create_branch(&request.branch, &base_head).await?;
        self.api.update_ref(&request.branch, &commit).await?;

        let pull_request = self
            .api
            .create_pull_request(
                &request.branch,
                &self.base_branch,
                &request.pr_title,
                &request.pr_body,
            )
            .await?;

        info!(
            branch = %request.branch,
            commit = %commit,
            pr = pull_request.number,
            "publish complete"
        );

        Ok(PublishOutcome {
            branch: request.branch,
            commit,
            pull_request,
        })
    }
}

/// Generate a branch name unique to this publish.
///
/// Millisecond timestamps alone can collide across concurrent publishes or
/// skewed clocks, so a short random suffix is added. A collision is still
/// possible and surfaces as `RefAlreadyExists`.
fn unique_branch_name(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, millis, &suffix[..6])
}
