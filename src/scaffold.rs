//! Outline scaffolding: validate, order, create, rewrite.
//!
//! A run is one pass over the outline:
//!
//! 1. [`validate_outline`] rejects bad outlines before anything is touched.
//! 2. [`plan`] resolves the order of every chapter and section and computes
//!    the path, numbering and weight each file will get.
//! 3. [`scaffold`] creates the content root, then for each chapter in order
//!    asks the generator for its index page and rewrites its front matter,
//!    followed by the same for each of its sections.
//!
//! Processing is strictly sequential. A failure stops the run where it is;
//! files already written stay written. Running the same outline again is
//! safe: Hugo refuses to overwrite existing files, and the rewrite produces
//! the same bytes.
//!
//! ## Numbering
//!
//! ```text
//! Chapter  order 1        → pre = "<b>1. </b>"     weight = chapter weight
//! Section  order 2 of 1   → pre = "<b>1.2. </b>"   weight = section weight
//! ```

use crate::config::OutlinerConfig;
use crate::creator::{ContentCreator, ContentKind, CreatorError, chapter_path, section_path};
use crate::front_matter::{FrontMatterError, FrontMatterUpdate, rewrite_front_matter};
use crate::order::{OrderError, resolve_order};
use crate::outline::Outline;
use crate::validate::{Group, ValidationError, check_weights, validate_outline};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid outline: {0}")]
    Validation(#[from] ValidationError),
    #[error("Ordering error: {0}")]
    Order(#[from] OrderError),
    #[error("Generator error: {0}")]
    Creator(#[from] CreatorError),
    #[error("Generator failed to create {path}:\n{stderr}")]
    GeneratorFailed { path: PathBuf, stderr: String },
    #[error("{0}")]
    FrontMatter(#[from] FrontMatterError),
}

/// A Hugo site the outline is scaffolded into.
#[derive(Debug, Clone)]
pub struct Site {
    /// Site root; the generator runs here.
    pub root: PathBuf,
    pub config: OutlinerConfig,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, config: OutlinerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.config.content_root)
    }
}

/// One file the run will create and rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub kind: ContentKind,
    /// Path relative to the content root.
    pub path: PathBuf,
    /// Display number without trailing dot: `"2"` or `"2.3"`.
    pub number: String,
    pub update: FrontMatterUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChapter {
    pub entry: PlannedEntry,
    /// Sections in resolved order.
    pub sections: Vec<PlannedEntry>,
}

/// Progress reported while scaffolding.
#[derive(Debug, Clone)]
pub enum ScaffoldEvent {
    /// The generator returned for `path`.
    Generated {
        path: PathBuf,
        stderr: String,
        success: bool,
    },
    /// Front matter of `path` now holds `front_matter`.
    Rewritten {
        number: String,
        title: String,
        path: PathBuf,
        front_matter: toml::Table,
    },
}

/// Counts of files scaffolded by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldSummary {
    pub chapters: usize,
    pub sections: usize,
}

/// Build the numbering prefix written to `pre`: `<b>1.2. </b>`.
pub fn numbering_prefix(number: &str, emphasis_tag: &str) -> String {
    if emphasis_tag.is_empty() {
        format!("{number}. ")
    } else {
        format!("<{emphasis_tag}>{number}. </{emphasis_tag}>")
    }
}

/// Validate the outline and resolve every file the run would produce.
///
/// Pure: nothing on disk is read or written.
pub fn plan(
    outline: &Outline,
    config: &OutlinerConfig,
) -> Result<Vec<PlannedChapter>, ScaffoldError> {
    validate_outline(outline)?;

    let tag = &config.front_matter.emphasis_tag;
    let chapter_weights = check_weights(&outline.chapters, &Group::Chapters)?;
    let chapters = resolve_order(&outline.chapters, &chapter_weights)?;

    let mut planned = Vec::with_capacity(chapters.len());
    for chapter in chapters {
        let number = chapter.order.to_string();
        let entry = PlannedEntry {
            kind: ContentKind::Chapter,
            path: chapter_path(&chapter.entry.name, &config.locale),
            update: FrontMatterUpdate {
                title: chapter.entry.title.clone(),
                pre: numbering_prefix(&number, tag),
                weight: chapter.weight,
            },
            number,
        };

        let group = Group::Sections {
            chapter: chapter.entry.name.clone(),
        };
        let section_weights = check_weights(&chapter.entry.sections, &group)?;
        let sections = resolve_order(&chapter.entry.sections, &section_weights)?
            .into_iter()
            .map(|section| {
                let number = format!("{}.{}", chapter.order, section.order);
                PlannedEntry {
                    kind: ContentKind::Default,
                    path: section_path(
                        &chapter.entry.name,
                        &section.entry.name,
                        &config.locale,
                    ),
                    update: FrontMatterUpdate {
                        title: section.entry.title.clone(),
                        pre: numbering_prefix(&number, tag),
                        weight: section.weight,
                    },
                    number,
                }
            })
            .collect();

        planned.push(PlannedChapter { entry, sections });
    }
    Ok(planned)
}

/// Scaffold `outline` into `site` using `creator` for file creation.
///
/// Progress events go to `progress` when given; a closed receiver is ignored.
pub fn scaffold(
    site: &Site,
    outline: &Outline,
    creator: &dyn ContentCreator,
    progress: Option<Sender<ScaffoldEvent>>,
) -> Result<ScaffoldSummary, ScaffoldError> {
    let planned = plan(outline, &site.config)?;

    let content_root = site.content_root();
    fs::create_dir_all(&content_root)?;

    let emit = |event: ScaffoldEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };

    let mut summary = ScaffoldSummary::default();
    for chapter in &planned {
        create_entry(site, &content_root, &chapter.entry, creator, &emit)?;
        summary.chapters += 1;
        for section in &chapter.sections {
            create_entry(site, &content_root, section, creator, &emit)?;
            summary.sections += 1;
        }
    }
    Ok(summary)
}

fn create_entry(
    site: &Site,
    content_root: &Path,
    entry: &PlannedEntry,
    creator: &dyn ContentCreator,
    emit: &dyn Fn(ScaffoldEvent),
) -> Result<(), ScaffoldError> {
    // Hugo refuses to overwrite content; that refusal is how a re-run looks.
    let existed = content_root.join(&entry.path).is_file();
    let creation = creator.create(entry.kind, &entry.path)?;
    emit(ScaffoldEvent::Generated {
        path: entry.path.clone(),
        stderr: creation.stderr.clone(),
        success: creation.success,
    });
    if !creation.success && !existed && site.config.generator.fail_on_error {
        return Err(ScaffoldError::GeneratorFailed {
            path: entry.path.clone(),
            stderr: creation.stderr,
        });
    }

    let front_matter = rewrite_front_matter(
        content_root,
        &entry.path,
        &entry.update,
        &site.config.front_matter,
    )?;
    emit(ScaffoldEvent::Rewritten {
        number: entry.number.clone(),
        title: entry.update.title.clone(),
        path: entry.path.clone(),
        front_matter,
    });
    Ok(())
}
