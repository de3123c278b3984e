//! `folio render` and `folio render-all` command implementations.
//!
//! Static rendering reads markdown from `content.source_dir`, wraps it in
//! `content.static_template` and writes `.html` pages under
//! `content.output_dir`, mirroring the source layout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use folio_config::Config;
use folio_renderer::{RenderConfig, derive_title};
use folio_site::PageRenderer;
use folio_storage::{FsStorage, Storage};
use tokio::task::JoinSet;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file, relative to the source directory.
    #[arg(short, long)]
    file: String,

    /// Output file, relative to the output directory (default: the source
    /// path with an `.html` extension).
    #[arg(short, long)]
    out: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let renderer = StaticRenderer::from_config(&config);

        let out = self.out.unwrap_or_else(|| html_path(&self.file));
        let written = renderer.render(&self.file, &out).await?;

        output.success(&format!("Rendered {} to {}", self.file, written.display()));
        Ok(())
    }
}

/// Arguments for the render-all command.
#[derive(Args)]
pub(crate) struct RenderAllArgs {
    /// Source subdirectory to render.
    #[arg(short, long, default_value = "articles")]
    dir: String,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderAllArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let renderer = StaticRenderer::from_config(&config);

        output.info(&format!(
            "Source: {}",
            config.content_resolved.source_dir.join(&self.dir).display()
        ));
        output.info(&format!(
            "Output: {}",
            config.content_resolved.output_dir.join(&self.dir).display()
        ));

        let written = renderer.render_all(&self.dir).await?;
        for path in &written {
            output.info(&format!("  {}", path.display()));
        }

        output.success(&format!("Rendered {} pages", written.len()));
        Ok(())
    }
}

/// Renders markdown sources into static pages on disk.
#[derive(Clone)]
struct StaticRenderer {
    pages: PageRenderer,
    output_dir: PathBuf,
}

impl StaticRenderer {
    fn new(storage: Arc<dyn Storage>, template: &str, output_dir: PathBuf) -> Self {
        let pages =
            PageRenderer::new(storage, Arc::new(RenderConfig::new())).with_template(template);
        Self { pages, output_dir }
    }

    fn from_config(config: &Config) -> Self {
        let content = &config.content_resolved;
        Self::new(
            Arc::new(FsStorage::new(content.source_dir.clone())),
            &content.static_template,
            content.output_dir.clone(),
        )
    }

    /// Render `file`, titled from its full path, and write it to `out`
    /// under the output directory.
    async fn render(&self, file: &str, out: &str) -> Result<PathBuf, CliError> {
        self.render_titled(&derive_title(file), file, out).await
    }

    async fn render_titled(
        &self,
        title: &str,
        file: &str,
        out: &str,
    ) -> Result<PathBuf, CliError> {
        let html = self.pages.render_markdown_from_asset(title, file).await?;

        let target = self.output_dir.join(out.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, html).await?;

        tracing::info!(file, out = %target.display(), "Rendered page");
        Ok(target)
    }

    /// Render every `*.md` directly inside `dir`, concurrently.
    ///
    /// Pages are titled from the bare file name, so a statically rendered
    /// article carries the same title as the one served at
    /// `/articles/{slug}`. Returns the written paths, sorted. The first
    /// failure aborts the run.
    async fn render_all(&self, dir: &str) -> Result<Vec<PathBuf>, CliError> {
        let sources = self.pages.storage().list(dir).await?;

        let mut tasks = JoinSet::new();
        for file in sources.into_iter().filter(|p| is_markdown(p)) {
            let renderer = self.clone();
            tasks.spawn(async move {
                let out = html_path(&file);
                let title = derive_title(file_name(&file));
                renderer.render_titled(&title, &file, &out).await
            });
        }

        let mut written = Vec::new();
        while let Some(result) = tasks.join_next().await {
            written.push(result??);
        }

        written.sort();
        Ok(written)
    }
}

fn is_markdown(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "md")
}

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Swap a trailing `.md` for `.html`, or append `.html`.
fn html_path(file: &str) -> String {
    let stem = file.strip_suffix(".md").unwrap_or(file);
    format!("{stem}.html")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const TEMPLATE: &str = "<title>{{title}}</title><article>{{body}}</article>";

    fn setup() -> (TempDir, StaticRenderer) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join("articles")).unwrap();
        fs::write(source.join("articles/article-template.html"), TEMPLATE).unwrap();
        fs::write(source.join("articles/first-post.md"), "# First\n\nHello.\n").unwrap();
        fs::write(source.join("articles/second-post.md"), "# Second\n").unwrap();
        fs::write(source.join("articles/diagram.png"), [0u8, 1, 2]).unwrap();

        let renderer = StaticRenderer::new(
            Arc::new(FsStorage::new(source)),
            "articles/article-template.html",
            temp.path().join("bucket"),
        );
        (temp, renderer)
    }

    #[test]
    fn test_html_path() {
        assert_eq!(html_path("articles/a.md"), "articles/a.html");
        assert_eq!(html_path("articles/readme"), "articles/readme.html");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("articles/first-post.md"), "first-post.md");
        assert_eq!(file_name("first-post.md"), "first-post.md");
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("articles/a.md"));
        assert!(!is_markdown("articles/a.png"));
        assert!(!is_markdown("articles/md"));
    }

    #[tokio::test]
    async fn test_render_single_file() {
        let (temp, renderer) = setup();

        let written = renderer
            .render("articles/first-post.md", "articles/first-post.html")
            .await
            .unwrap();

        assert_eq!(written, temp.path().join("bucket/articles/first-post.html"));
        let html = fs::read_to_string(written).unwrap();
        assert!(html.starts_with("<title>Articles - First Post</title>"));
        assert!(html.contains(r#"<h1 id="first">First</h1>"#));
    }

    #[tokio::test]
    async fn test_render_missing_file() {
        let (_temp, renderer) = setup();

        let err = renderer.render("articles/nope.md", "nope.html").await;

        assert!(matches!(err, Err(CliError::Storage(e)) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_render_all_skips_non_markdown() {
        let (temp, renderer) = setup();

        let written = renderer.render_all("articles").await.unwrap();

        let bucket = temp.path().join("bucket/articles");
        assert_eq!(
            written,
            vec![
                bucket.join("first-post.html"),
                bucket.join("second-post.html")
            ]
        );
        assert!(!bucket.join("diagram.html").exists());
        let second = fs::read_to_string(bucket.join("second-post.html")).unwrap();
        assert!(second.contains("<title>Second Post</title>"));
        let first = fs::read_to_string(bucket.join("first-post.html")).unwrap();
        assert!(first.starts_with("<title>First Post</title>"));
    }

    #[tokio::test]
    async fn test_render_all_missing_dir() {
        let (_temp, renderer) = setup();

        assert!(renderer.render_all("drafts").await.is_err());
    }
}
