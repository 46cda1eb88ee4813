//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Date format shown on pages (Moment.js-style pattern)
    pub date_format: String,

    // Syntect theme for fenced code blocks
    pub highlight_theme: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: "A statically generated blog".to_string(),
            author: "Your Name".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM D, YYYY".to_string(),
            highlight_theme: "base16-ocean.dark".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.root, "/");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Next Blog
author: Test User
content_dir: articles
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Next Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "articles");
        // Unspecified fields fall back to defaults
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let yaml = "title: X\ngithub_username: someone\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.extra.get("github_username").and_then(|v| v.as_str()),
            Some("someone")
        );
    }
}
