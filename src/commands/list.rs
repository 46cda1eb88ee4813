//! List site content

use anyhow::Result;

use crate::Miniblog;

/// Print all posts, newest first
pub fn run(blog: &Miniblog) -> Result<()> {
    let summaries = blog.store().load_summaries()?;

    println!("Posts ({}):", summaries.len());
    for summary in summaries {
        println!(
            "  {} - {} [{}]",
            summary.date.format("%Y-%m-%d"),
            summary.title,
            summary.id
        );
    }

    Ok(())
}
