//! Post models

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A fully loaded blog post
///
/// Immutable after construction; re-derived from its source file on every
/// build, never cached across runs.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Slug derived from the source file name (extension stripped)
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Rendered HTML content
    pub content: String,

    /// Raw markdown body (front-matter stripped)
    pub raw: String,

    /// Full source file path
    pub source: PathBuf,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// A post reference without its content, used for listings
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
}
