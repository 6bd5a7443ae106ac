//! Icon set boundary type.
//!
//! The extraction side (the design-tool plugin) produces a mapping from icon
//! name to raw SVG markup. This module models that contract and provides a
//! directory loader for tooling that works from exported `.svg` files instead
//! of a live plugin session.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// An ordered mapping from icon name to raw SVG markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSet {
    icons: BTreeMap<String, String>,
}

impl IconSet {
    /// Create an empty icon set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `.svg` file in a directory; the file stem becomes the
    /// icon name. Non-SVG entries and subdirectories are skipped.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut icons = BTreeMap::new();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read icon directory {:?}", dir))?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "svg") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let svg = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read icon {:?}", path))?;
            icons.insert(name.to_string(), svg);
        }

        Ok(Self { icons })
    }

    /// Add or replace an icon.
    pub fn insert(&mut self, name: impl Into<String>, svg: impl Into<String>) {
        self.icons.insert(name.into(), svg.into());
    }

    /// Get an icon's SVG markup by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }

    /// Number of icons in the set.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the set contains no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Iterate over `(name, svg)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.icons.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_icon_set_insert_get() {
        let mut set = IconSet::new();
        set.insert("check", "<svg>check</svg>");
        assert_eq!(set.get("check"), Some("<svg>check</svg>"));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_from_dir_reads_svg_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("arrow.svg"), "<svg>arrow</svg>").unwrap();
        fs::write(tmp.path().join("check.svg"), "<svg>check</svg>").unwrap();
        fs::write(tmp.path().join("readme.txt"), "not an icon").unwrap();

        let set = IconSet::from_dir(tmp.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("arrow"), Some("<svg>arrow</svg>"));
        assert_eq!(set.get("check"), Some("<svg>check</svg>"));
        assert_eq!(set.get("readme"), None);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let mut set = IconSet::new();
        set.insert("zoom", "z");
        set.insert("arrow", "a");
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["arrow", "zoom"]);
    }

    #[test]
    fn test_from_dir_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(IconSet::from_dir(&missing).is_err());
    }
}
