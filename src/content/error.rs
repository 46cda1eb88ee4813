//! Content errors
//!
//! Everything here is fatal at generation time; callers only need enough
//! structure to tell "not found" apart from "bad file".

use thiserror::Error;

/// Errors raised while loading and parsing content files
#[derive(Debug, Error)]
pub enum ContentError {
    /// No source file exists for the requested slug
    #[error("no post found for slug '{0}'")]
    PostNotFound(String),

    /// The file has no front-matter block, or the block is unterminated
    #[error("missing front-matter block (expected a leading '---' section)")]
    MissingFrontMatter,

    /// A required front-matter field is absent
    #[error("missing required front-matter field '{0}'")]
    MissingField(&'static str),

    /// Two source files share the same stem and would collide on one slug
    #[error("duplicate slug '{0}' (multiple source files share this name)")]
    DuplicateSlug(String),

    /// The date field could not be parsed in any supported format
    #[error("unrecognized date '{0}'")]
    BadDate(String),
}
