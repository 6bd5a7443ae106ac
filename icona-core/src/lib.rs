//! Icona Core Library
//!
//! Core functionality for Icona including:
//! - Git object identifiers (blob, tree, commit shas)
//! - File entries and tree entry payloads for the Git Data API
//! - `.icona/config.yml` and `.icona/release.md` file formats
//! - Icon set boundary type (icon name -> SVG markup)
//! - Local settings storage for the deploy tooling

pub mod config;
pub mod icons;
pub mod object;
pub mod release;
pub mod settings;

pub use config::{IconaConfig, CONFIG_PATH};
pub use icons::IconSet;
pub use object::{BlobSha, CommitSha, FileEntry, TreeEntry, TreeSha, FILE_MODE};
pub use release::{append_release_entry, initial_release_notes, RELEASE_NOTES_PATH};
pub use settings::{parse_repo_url, Settings};
