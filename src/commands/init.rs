//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Miniblog;

const DEFAULT_CONFIG: &str = r#"# miniblog configuration

# Site
title: My Blog
description: A statically generated blog
author: Your Name
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: posts
public_dir: public

# Date shown on pages
date_format: MMMM D, YYYY

# Syntect theme for code blocks
highlight_theme: base16-ocean.dark
"#;

const SAMPLE_PRE_RENDERING: &str = r#"---
title: Two Forms of Pre-rendering
date: 2020-01-01
---

Instead of rendering in the browser, a page can be **pre-rendered**: its HTML
is produced in advance, instead of being assembled by client-side
JavaScript on every visit.

There are two forms of pre-rendering:

- **Static Generation** produces the HTML at **build time**. The
  pre-rendered pages are then reused on each request.
- **Server-side Rendering** produces the HTML on **each request**.

Importantly, a site can choose which form to use per page, creating a
"hybrid" site where most pages are statically generated and a few are
rendered on demand.
"#;

const SAMPLE_SSG_SSR: &str = r#"---
title: When to Use Static Generation v.s. Server-side Rendering
date: 2020-01-02
---

We recommend using **Static Generation** (with and without data) whenever
possible because a page can be built once and served by a CDN, which makes
it much faster than rendering it on every request.

You can use Static Generation for many types of pages, including:

- Marketing pages
- Blog posts
- E-commerce product listings
- Help and documentation

Ask yourself: "Can I pre-render this page **ahead** of a user's request?"
If the answer is yes, then you should choose Static Generation.

On the other hand, Static Generation is **not** a good idea if you cannot
pre-render a page ahead of a user's request. Maybe the page shows
frequently updated data, and the content changes on every request. In that
case, you can render the page on each request instead.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;

    fs::write(target_dir.join("_config.yml"), DEFAULT_CONFIG)?;

    // Sample content so `generate` works out of the box
    fs::write(
        target_dir.join("posts/pre-rendering.md"),
        SAMPLE_PRE_RENDERING,
    )?;
    fs::write(target_dir.join("posts/ssg-ssr.md"), SAMPLE_SSG_SSR)?;

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(blog: &Miniblog) -> Result<()> {
    init_site(&blog.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_a_working_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").is_file());
        assert!(dir.path().join("posts/pre-rendering.md").is_file());
        assert!(dir.path().join("posts/ssg-ssr.md").is_file());

        // The scaffolded site must generate cleanly
        let blog = Miniblog::new(dir.path()).unwrap();
        blog.generate().unwrap();
        assert!(blog.public_dir.join("index.html").is_file());
        assert!(blog
            .public_dir
            .join("posts/pre-rendering/index.html")
            .is_file());
    }
}
