//! Icona GitHub Publishing Client
//!
//! Publishes Icona bookkeeping files to a GitHub repository as a reviewable
//! pull request using the Git Data API's low-level object model:
//! - [`api`] — the `GitDataApi` trait the workflows run against
//! - [`client`] — the reqwest implementation bound to one repository + token
//! - [`publish`] — the setup and deploy workflows
//! - [`error`] — the step-classified error taxonomy

pub mod api;
pub mod client;
pub mod error;
pub mod publish;

pub use api::{FileContent, GitDataApi, PullRequest};
pub use client::{GithubClient, GITHUB_API_VERSION};
pub use error::{GitObjectKind, GithubError, Result};
pub use publish::{PublishOutcome, PublishRequest, Publisher, DEFAULT_BASE_BRANCH};
