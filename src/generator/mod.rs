//! Generator module - writes static HTML files using built-in Tera templates

use anyhow::Result;
use std::fs;
use tera::Context;

use crate::content::Post;
use crate::helpers::format_date;
use crate::templates::{ConfigData, PostData, TemplateRenderer};
use crate::Miniblog;

/// Static site generator
///
/// Output layout:
///   index.html             - post listing, newest first
///   posts/<id>/index.html  - one page per post
///   css/style.css          - global stylesheet
pub struct Generator {
    blog: Miniblog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Miniblog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        // Sort posts by date (newest first)
        let mut sorted_posts: Vec<&Post> = posts.iter().collect();
        sorted_posts.sort_by(|a, b| b.date.cmp(&a.date));

        let config_data = self.build_config_data();

        self.write_stylesheet()?;
        self.generate_index(&sorted_posts, &config_data)?;
        self.generate_post_pages(&sorted_posts, &config_data)?;

        Ok(())
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        ConfigData {
            title: self.blog.config.title.clone(),
            description: self.blog.config.description.clone(),
            author: self.blog.config.author.clone(),
            language: self.blog.config.language.clone(),
            url: self.blog.config.url.clone(),
            root: self.blog.config.root.clone(),
        }
    }

    /// Build template data for a post
    fn build_post_data(&self, post: &Post, with_content: bool) -> PostData {
        PostData {
            id: post.id.clone(),
            title: post.title.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            date_display: format_date(&post.date, &self.blog.config.date_format),
            path: format!(
                "{}/posts/{}/",
                self.blog.config.root.trim_end_matches('/'),
                post.id
            ),
            content: if with_content {
                post.content.clone()
            } else {
                String::new()
            },
        }
    }

    /// Generate the index page
    fn generate_index(&self, posts: &[&Post], config_data: &ConfigData) -> Result<()> {
        let post_data: Vec<PostData> = posts
            .iter()
            .map(|p| self.build_post_data(p, false))
            .collect();

        let mut context = Context::new();
        context.insert("config", config_data);
        context.insert("posts", &post_data);

        let html = self.renderer.render("index.html", &context)?;

        let output_path = self.blog.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[&Post], config_data: &ConfigData) -> Result<()> {
        for post in posts {
            let mut context = Context::new();
            context.insert("config", config_data);
            context.insert("post", &self.build_post_data(post, true));

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .blog
                .public_dir
                .join("posts")
                .join(&post.id)
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Write the global stylesheet
    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.blog.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), TemplateRenderer::stylesheet())?;
        Ok(())
    }
}
