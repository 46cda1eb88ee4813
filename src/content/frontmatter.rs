//! Front-matter parsing

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ContentError;

/// Front-matter fields as they appear on disk, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<String>,
    date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    extra: HashMap<String, serde_yaml::Value>,
}

/// Validated front-matter from a post file
///
/// `title` and `date` are required; a file without them is rejected at
/// parse time rather than patched up with defaults.
#[derive(Debug, Clone, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,

    /// Additional custom fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        let rest = content
            .strip_prefix("---")
            .ok_or(ContentError::MissingFrontMatter)?;
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Find the closing ---
        let end_pos = rest.find("\n---").ok_or(ContentError::MissingFrontMatter)?;
        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let raw: RawFrontMatter = serde_yaml::from_str(yaml_content)?;

        let title = raw.title.ok_or(ContentError::MissingField("title"))?;
        let date = raw.date.ok_or(ContentError::MissingField("date"))?;

        Ok((
            Self {
                title,
                date,
                extra: raw.extra,
            },
            remaining,
        ))
    }

    /// Parse the date string into a date
    pub fn parse_date(&self) -> Result<NaiveDate> {
        parse_date_string(&self.date)
            .ok_or_else(|| ContentError::BadDate(self.date.clone()).into())
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Try RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}
