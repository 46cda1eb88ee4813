//! Content store - loads posts from the content directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{ContentError, FrontMatter, MarkdownRenderer, Post, PostSummary};

/// Loads and renders posts from a directory of markdown files
///
/// Each post is identified by its slug, the file name with the extension
/// stripped. Two source files sharing a stem (`x.md` and `x.markdown`)
/// would collide on one slug; listing rejects that instead of letting one
/// file shadow the other.
pub struct ContentStore {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    /// Create a store over a content directory
    pub fn new<P: AsRef<Path>>(content_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// List all post slugs (file names with the extension stripped)
    ///
    /// A missing or unreadable content directory is a hard error, as is a
    /// slug collision between two source files.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.content_dir).with_context(|| {
            format!("failed to read content directory {:?}", self.content_dir)
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_markdown_file(&path) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(ContentError::DuplicateSlug(pair[0].clone()).into());
        }
        Ok(ids)
    }

    /// Load and render a single post by slug
    pub fn load(&self, id: &str) -> Result<Post> {
        let path = self
            .source_path(id)
            .ok_or_else(|| ContentError::PostNotFound(id.to_string()))?;

        let content =
            fs::read_to_string(&path).with_context(|| format!("failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)
            .with_context(|| format!("invalid front-matter in {:?}", path))?;
        let date = fm
            .parse_date()
            .with_context(|| format!("invalid date in {:?}", path))?;

        let content_html = self.renderer.render(body)?;

        Ok(Post {
            id: id.to_string(),
            title: fm.title,
            date,
            content: content_html,
            raw: body.to_string(),
            source: path,
            extra: fm.extra,
        })
    }

    /// Load summaries of all posts, sorted by date descending (newest first)
    ///
    /// Only front-matter is parsed; bodies are not rendered.
    pub fn load_summaries(&self) -> Result<Vec<PostSummary>> {
        let mut summaries = Vec::new();

        for id in self.list_ids()? {
            let path = self
                .source_path(&id)
                .ok_or_else(|| ContentError::PostNotFound(id.clone()))?;
            let content =
                fs::read_to_string(&path).with_context(|| format!("failed to read {:?}", path))?;
            let (fm, _body) = FrontMatter::parse(&content)
                .with_context(|| format!("invalid front-matter in {:?}", path))?;
            let date = fm
                .parse_date()
                .with_context(|| format!("invalid date in {:?}", path))?;

            summaries.push(PostSummary {
                id,
                title: fm.title,
                date,
            });
        }

        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(summaries)
    }

    /// Load and render every post, sorted by date descending
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for id in self.list_ids()? {
            posts.push(self.load(&id)?);
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    /// Resolve the source file for a slug
    fn source_path(&self, id: &str) -> Option<PathBuf> {
        for ext in ["md", "markdown"] {
            let candidate = self.content_dir.join(format!("{}.{}", id, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str, body: &str) {
        let content = format!("---\ntitle: {}\ndate: {}\n---\n\n{}\n", title, date, body);
        fs::write(dir.join(name), content).unwrap();
    }

    fn store(dir: &TempDir) -> ContentStore {
        ContentStore::new(dir.path(), MarkdownRenderer::new())
    }

    #[test]
    fn test_list_ids_strips_extension() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "pre-rendering.md", "Pre-rendering", "2020-01-01", "a");
        write_post(dir.path(), "ssg-ssr.md", "SSG and SSR", "2020-01-02", "b");
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();

        let ids = store(&dir).list_ids().unwrap();
        assert_eq!(ids, vec!["pre-rendering", "ssg-ssr"]);
    }

    #[test]
    fn test_load_uses_filename_as_id() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "hello-world.md", "Hello", "2020-01-01", "Hi there.");

        let post = store(&dir).load("hello-world").unwrap();
        assert_eq!(post.id, "hello-world");
        assert_eq!(post.title, "Hello");
        assert!(post.content.contains("<p>Hi there.</p>"));
        assert_eq!(post.raw.trim(), "Hi there.");
    }

    #[test]
    fn test_load_unknown_slug_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).load("nope").unwrap_err();
        let not_found = err
            .downcast_ref::<ContentError>()
            .map(|e| matches!(e, ContentError::PostNotFound(_)))
            .unwrap_or(false);
        assert!(not_found, "got: {}", err);
    }

    #[test]
    fn test_load_summaries_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "older.md", "Older", "2020-01-01", "a");
        write_post(dir.path(), "newer.md", "Newer", "2020-01-02", "b");

        let summaries = store(&dir).load_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "newer");
        assert_eq!(summaries[1].id, "older");
    }

    #[test]
    fn test_every_listed_slug_loads() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", "A", "2020-01-01", "first");
        write_post(dir.path(), "b.markdown", "B", "2020-01-02", "second");
        write_post(dir.path(), "c.md", "C", "2020-01-03", "third");

        let store = store(&dir);
        for id in store.list_ids().unwrap() {
            let post = store.load(&id).unwrap();
            assert_eq!(post.id, id);
        }
    }

    #[test]
    fn test_duplicate_stem_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "x.md", "From md", "2020-01-01", "a");
        write_post(dir.path(), "x.markdown", "From markdown", "2020-01-02", "b");

        let store = store(&dir);
        let err = store.list_ids().unwrap_err();
        assert!(err.to_string().contains("duplicate slug 'x'"), "got: {}", err);

        // The collision also aborts a full build instead of shadowing
        // one file with the other
        assert!(store.load_all().is_err());
        assert!(store.load_summaries().is_err());
    }

    #[test]
    fn test_missing_metadata_fails_loudly() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: No Date\n---\nbody\n").unwrap();

        let store = store(&dir);
        assert!(store.load("bad").is_err());
        assert!(store.load_summaries().is_err());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("missing"), MarkdownRenderer::new());
        assert!(store.list_ids().is_err());
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "p.md",
            "P",
            "2020-01-01",
            "# Heading\n\nBody with `code`.",
        );

        let store = store(&dir);
        let first = store.load("p").unwrap();
        let second = store.load("p").unwrap();
        assert_eq!(first.content, second.content);
    }
}
