//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Miniblog;

/// Remove the generated site
pub fn run(blog: &Miniblog) -> Result<()> {
    if blog.public_dir.exists() {
        fs::remove_dir_all(&blog.public_dir)?;
        tracing::info!("Removed {:?}", blog.public_dir);
    }
    Ok(())
}
