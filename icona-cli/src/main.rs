//! icona — GitHub publishing tool for Icona icon repositories.
//!
//! Supports:
//! - Storing repository settings locally (configure/info)
//! - Bootstrapping a repository's `.icona/` directory (setup)
//! - Recording a deploy in the release notes via a PR (deploy)
//!
//! # Usage
//!
//! ```bash
//! # Store the repository, token, and Figma binding
//! icona configure --repo-url https://github.com/acme/icons --token ghp_xxx \
//!     --frame-id 42 --file-key abc
//!
//! # Open the "Setting up Icona" PR
//! icona setup
//!
//! # Open an "Update Icona" PR recording a deploy
//! icona deploy --icons ./exported-svgs
//!
//! # Show the stored settings
//! icona info
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use icona_core::config::IconaConfig;
use icona_core::icons::IconSet;
use icona_core::settings::{parse_repo_url, Settings};
use icona_github::client::GithubClient;
use icona_github::publish::{PublishOutcome, Publisher};

#[derive(Parser, Debug)]
#[command(name = "icona")]
#[command(author = "Icona Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Publish Icona icon repository updates as GitHub pull requests")]
struct Cli {
    /// Settings file path
    #[arg(long, global = true, default_value = "icona-settings.json")]
    settings: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store repository settings locally
    Configure {
        /// GitHub repository URL (e.g. https://github.com/acme/icons)
        #[arg(long)]
        repo_url: String,
        /// GitHub access token
        #[arg(long)]
        token: String,
        /// Branch that PRs target
        #[arg(long, default_value = "main")]
        base_branch: String,
        /// Figma frame id holding the icon components
        #[arg(long)]
        frame_id: Option<String>,
        /// Figma file key the icons are extracted from
        #[arg(long)]
        file_key: Option<String>,
    },

    /// Open a PR that bootstraps the .icona/ directory
    Setup,

    /// Open a PR that records a deploy in the release notes
    Deploy {
        /// Directory of exported .svg files (reported, not committed)
        #[arg(long)]
        icons: Option<PathBuf>,
    },

    /// Display the stored settings
    Info,
}

fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load(path)?
        .ok_or_else(|| anyhow!("No settings found at {:?}; run `icona configure` first", path))
}

fn publisher_for(settings: &Settings) -> Publisher<GithubClient> {
    let client = GithubClient::new(&settings.owner, &settings.repo, settings.token.clone());
    Publisher::with_base_branch(client, settings.base_branch.clone())
}

fn report_outcome(outcome: &PublishOutcome) {
    println!("Branch:       {}", outcome.branch);
    println!("Commit:       {}", outcome.commit);
    println!(
        "Pull request: #{} ({})",
        outcome.pull_request.number, outcome.pull_request.html_url
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    match cli.command {
        Commands::Configure {
            repo_url,
            token,
            base_branch,
            frame_id,
            file_key,
        } => {
            let (owner, repo) = parse_repo_url(&repo_url)?;
            let settings = Settings {
                owner,
                repo,
                token,
                base_branch,
                icon_frame_id: frame_id,
                figma_file_key: file_key,
            };
            settings.save(&cli.settings)?;
            println!(
                "Saved settings for {}/{} to {:?}",
                settings.owner, settings.repo, cli.settings
            );
        }

        Commands::Setup => {
            let settings = load_settings(&cli.settings)?;
            let frame_id = settings
                .icon_frame_id
                .clone()
                .ok_or_else(|| anyhow!("Settings are missing the Figma frame id"))?;
            let file_key = settings
                .figma_file_key
                .clone()
                .ok_or_else(|| anyhow!("Settings are missing the Figma file key"))?;

            info!("Setting up {}/{}", settings.owner, settings.repo);
            let publisher = publisher_for(&settings);
            let outcome = publisher
                .create_setting_pr(&IconaConfig::new(frame_id, file_key))
                .await?;

            println!("Opened setup PR for {}/{}", settings.owner, settings.repo);
            report_outcome(&outcome);
        }

        Commands::Deploy { icons } => {
            let settings = load_settings(&cli.settings)?;

            if let Some(dir) = icons {
                let set = IconSet::from_dir(&dir)?;
                if set.is_empty() {
                    return Err(anyhow!("No .svg files found in {:?}", dir));
                }
                info!("Deploying {} icons from {:?}", set.len(), dir);
            }

            let publisher = publisher_for(&settings);
            let outcome = publisher.create_deploy_pr().await?;

            println!("Opened deploy PR for {}/{}", settings.owner, settings.repo);
            report_outcome(&outcome);
        }

        Commands::Info => {
            let settings = load_settings(&cli.settings)?;
            println!("Repository:  {}/{}", settings.owner, settings.repo);
            println!("Base branch: {}", settings.base_branch);
            println!(
                "Frame id:    {}",
                settings.icon_frame_id.as_deref().unwrap_or("(not set)")
            );
            println!(
                "File key:    {}",
                settings.figma_file_key.as_deref().unwrap_or("(not set)")
            );
        }
    }

    Ok(())
}
