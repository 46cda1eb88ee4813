//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Miniblog;

/// Create a new post file named after the slugified title
pub fn run(blog: &Miniblog, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.content_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} produces an empty slug", title);
    }

    let file_path = blog.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n\n",
        title,
        now.format("%Y-%m-%d")
    );
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
