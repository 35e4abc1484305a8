//! Content creation through the site generator.
//!
//! The [`ContentCreator`] trait is the seam between the outliner and the
//! external tool. The production implementation is [`HugoCreator`], which runs
//!
//! ```text
//! hugo new --kind chapter intro/_index.ja.md      # chapters
//! hugo new intro/install/_index.ja.md             # sections
//! ```
//!
//! from the site root and waits for it. Hugo resolves the path against its
//! content directory and fills the file from the matching archetype.
//!
//! Exit status is reported back in [`Creation::success`]; whether a failure
//! aborts the run is the caller's decision (`generator.fail_on_error`).

use crate::config::GeneratorConfig;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreatorError {
    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// Archetype kind requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Chapter landing page (`--kind <chapter_kind>`).
    Chapter,
    /// Whatever the generator picks by default.
    Default,
}

/// Outcome of one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    /// Captured standard error, lossily decoded.
    pub stderr: String,
    /// Whether the generator exited successfully.
    pub success: bool,
}

/// Creates a content file at a path relative to the content root.
pub trait ContentCreator {
    fn create(&self, kind: ContentKind, path: &Path) -> Result<Creation, CreatorError>;
}

/// Path of a chapter's index page: `<chapter>/_index.<locale>.md`.
pub fn chapter_path(chapter: &str, locale: &str) -> PathBuf {
    PathBuf::from(chapter).join(index_file_name(locale))
}

/// Path of a section's index page: `<chapter>/<section>/_index.<locale>.md`.
pub fn section_path(chapter: &str, section: &str, locale: &str) -> PathBuf {
    PathBuf::from(chapter)
        .join(section)
        .join(index_file_name(locale))
}

fn index_file_name(locale: &str) -> String {
    format!("_index.{locale}.md")
}

/// Runs the Hugo binary as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct HugoCreator {
    binary: String,
    chapter_kind: String,
    site_root: PathBuf,
}

impl HugoCreator {
    pub fn new(config: &GeneratorConfig, site_root: &Path) -> Self {
        Self {
            binary: config.binary.clone(),
            chapter_kind: config.chapter_kind.clone(),
            site_root: site_root.to_path_buf(),
        }
    }

    /// Arguments passed after the binary name.
    pub fn args(&self, kind: ContentKind, path: &Path) -> Vec<String> {
        let mut args = vec!["new".to_string()];
        if kind == ContentKind::Chapter {
            args.push("--kind".to_string());
            args.push(self.chapter_kind.clone());
        }
        // Hugo expects forward slashes regardless of platform.
        let path = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        args.push(path);
        args
    }
}

impl ContentCreator for HugoCreator {
    fn create(&self, kind: ContentKind, path: &Path) -> Result<Creation, CreatorError> {
        let output = Command::new(&self.binary)
            .args(self.args(kind, path))
            .current_dir(&self.site_root)
            .output()
            .map_err(|source| CreatorError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;
        Ok(Creation {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
