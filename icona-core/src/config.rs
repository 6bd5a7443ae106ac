//! The `.icona/config.yml` file format.
//!
//! Written once by the setup workflow to record which Figma file and frame an
//! icon repository is bound to. The format is two `key: value` lines behind a
//! generated-file comment header; it is deliberately simple enough to parse
//! without a YAML dependency.

use thiserror::Error;

/// Repository-relative path of the Icona configuration file.
pub const CONFIG_PATH: &str = ".icona/config.yml";

/// Errors from parsing `.icona/config.yml`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing key in config: {0}")]
    MissingKey(&'static str),
}

/// Configuration committed by the setup workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconaConfig {
    /// Id of the Figma frame that holds the icon components.
    pub icon_frame_id: String,
    /// Key of the Figma file the icons are extracted from.
    pub figma_file_key: String,
}

impl IconaConfig {
    /// Create a new configuration.
    pub fn new(icon_frame_id: impl Into<String>, figma_file_key: impl Into<String>) -> Self {
        Self {
            icon_frame_id: icon_frame_id.into(),
            figma_file_key: figma_file_key.into(),
        }
    }

    /// Render the config file content committed to the repository.
    pub fn to_yaml(&self) -> String {
        format!(
            "# This file is generated by icona\n\
             # Don't edit this file directly\n\
             icon-frame-id: {}\n\
             figma-file-key: {}\n",
            self.icon_frame_id, self.figma_file_key
        )
    }

    /// Parse a config file previously written by [`IconaConfig::to_yaml`].
    ///
    /// Comment lines and unknown keys are skipped.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut icon_frame_id = None;
        let mut figma_file_key = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                match key.trim() {
                    "icon-frame-id" => icon_frame_id = Some(value.trim().to_string()),
                    "figma-file-key" => figma_file_key = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        Ok(Self {
            icon_frame_id: icon_frame_id.ok_or(ConfigError::MissingKey("icon-frame-id"))?,
            figma_file_key: figma_file_key.ok_or(ConfigError::MissingKey("figma-file-key"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_render() {
        let config = IconaConfig::new("42", "abc");
        let yaml = config.to_yaml();
        assert_eq!(
            yaml,
            "# This file is generated by icona\n\
             # Don't edit this file directly\n\
             icon-frame-id: 42\n\
             figma-file-key: abc\n"
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let config = IconaConfig::new("1:23", "FiLeKeY99");
        let parsed = IconaConfig::from_yaml(&config.to_yaml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_missing_key() {
        let err = IconaConfig::from_yaml("icon-frame-id: 42\n").unwrap_err();
        assert_eq!(err, ConfigError::MissingKey("figma-file-key"));
    }
}
