//! Local settings storage for the Icona tooling.
//!
//! The plugin host keeps the repository URL, access token, and deploy options
//! in its local key-value storage; the CLI keeps the same data in a JSON file.
//! Saves go through a temp file and rename so a crash never leaves a
//! half-written settings file behind.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_base_branch() -> String {
    "main".to_string()
}

/// Persisted settings for publishing to a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// GitHub access token used for every API call.
    pub token: String,
    /// Branch that publish PRs target.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
    /// Id of the Figma frame that holds the icon components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_frame_id: Option<String>,
    /// Key of the Figma file the icons are extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figma_file_key: Option<String>,
}

impl Settings {
    /// Load settings from `path`. Returns `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Settings =
            serde_json::from_str(&data).with_context(|| "Failed to parse settings JSON")?;
        Ok(Some(settings))
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = path.with_extension("tmp");
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

/// Parse a GitHub repository URL into `(owner, repo)`.
///
/// Accepts `https://github.com/{owner}/{repo}` with an optional trailing
/// slash or `.git` suffix, and the short `{owner}/{repo}` form.
pub fn parse_repo_url(url: &str) -> Result<(String, String)> {
    let trimmed = url
        .trim()
        .trim_start_matches("https://github.com/")
        .trim_start_matches("http://github.com/")
        .trim_end_matches('/')
        .trim_end_matches(".git");

    let mut parts = trimmed.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(anyhow!("Invalid GitHub repository URL: {}", url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_settings() -> Settings {
        Settings {
            owner: "acme".to_string(),
            repo: "icons".to_string(),
            token: "ghp_test".to_string(),
            base_branch: "main".to_string(),
            icon_frame_id: Some("42".to_string()),
            figma_file_key: Some("abc".to_string()),
        }
    }

    #[test]
    fn test_settings_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let settings = sample_settings();
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let loaded = Settings::load(&tmp.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_base_branch_defaults_to_main() {
        let json = r#"{"owner":"acme","repo":"icons","token":"t"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.base_branch, "main");
        assert!(settings.icon_frame_id.is_none());
    }

    #[test]
    fn test_parse_repo_url_forms() {
        assert_eq!(
            parse_repo_url("https://github.com/acme/icons").unwrap(),
            ("acme".to_string(), "icons".to_string())
        );
        assert_eq!(
            parse_repo_url("https://github.com/acme/icons.git").unwrap(),
            ("acme".to_string(), "icons".to_string())
        );
        assert_eq!(
            parse_repo_url("acme/icons/").unwrap(),
            ("acme".to_string(), "icons".to_string())
        );
    }

    #[test]
    fn test_parse_repo_url_rejects_garbage() {
        assert!(parse_repo_url("https://github.com/acme").is_err());
        assert!(parse_repo_url("not a url").is_err());
        assert!(parse_repo_url("a/b/c").is_err());
    }
}
