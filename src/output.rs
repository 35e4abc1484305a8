//! CLI output formatting.
//!
//! Output is **entry-centric**: each chapter and section leads with its
//! display number and title, and the file it maps to follows the arrow.
//! Details (generator messages, resulting front matter) are indented
//! context lines beneath it. Sections are indented one level under their
//! chapter.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! 1. Introduction → intro/_index.ja.md
//!     title = "Introduction"
//!     pre = "<b>1. </b>"
//!     weight = 1
//! intro/install/_index.ja.md: Error: intro/install/_index.ja.md already exists
//!     1.1. Install → intro/install/_index.ja.md
//!         title = "Install"
//!         pre = "<b>1.1. </b>"
//!         weight = 1
//!
//! Scaffolded 1 chapter, 1 section
//! ```
//!
//! Generator messages come before the entry line and are prefixed with the
//! path they concern.
//!
//! ## Check
//!
//! ```text
//! 1. Introduction → intro/_index.ja.md (weight 10)
//!     1.1. Install → intro/install/_index.ja.md (weight 1)
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::scaffold::{PlannedChapter, PlannedEntry, ScaffoldEvent, ScaffoldSummary};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Depth of an entry from its display number: `"2"` → 0, `"2.1"` → 1.
fn depth_of(number: &str) -> usize {
    number.matches('.').count()
}

/// Relative content path with `/` separators on every platform.
fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Entry header: `1.2. Title → chapter/section/_index.ja.md`.
fn entry_line(number: &str, title: &str, path: &Path) -> String {
    format!(
        "{}{}. {} → {}",
        indent(depth_of(number)),
        number,
        title,
        display_path(path)
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Run output
// ============================================================================

/// Format a single scaffold progress event as display lines.
///
/// A generator call that succeeded silently prints nothing; its entry shows
/// up once the front matter is rewritten.
pub fn format_event(event: &ScaffoldEvent) -> Vec<String> {
    match event {
        ScaffoldEvent::Generated {
            path,
            stderr,
            success,
        } => {
            let mut lines: Vec<String> = stderr
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| format!("{}: {}", display_path(path), l.trim_end()))
                .collect();
            if !success && lines.is_empty() {
                lines.push(format!(
                    "{}: generator exited with an error",
                    display_path(path)
                ));
            }
            lines
        }
        ScaffoldEvent::Rewritten {
            number,
            title,
            path,
            front_matter,
        } => {
            let context = indent(depth_of(number) + 1);
            let mut lines = vec![entry_line(number, title, path)];
            let rendered = toml::to_string(front_matter)
                .unwrap_or_else(|e| format!("<unprintable front matter: {e}>"));
            lines.extend(
                rendered
                    .lines()
                    .filter(|l| !l.is_empty())
                    .map(|l| format!("{context}{l}")),
            );
            lines
        }
    }
}

pub fn print_event(event: &ScaffoldEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

/// Closing line of a run.
pub fn format_summary(summary: &ScaffoldSummary) -> String {
    format!(
        "Scaffolded {}, {}",
        plural(summary.chapters, "chapter"),
        plural(summary.sections, "section")
    )
}

pub fn print_summary(summary: &ScaffoldSummary) {
    println!();
    println!("{}", format_summary(summary));
}

// ============================================================================
// Check output
// ============================================================================

fn planned_line(entry: &PlannedEntry) -> String {
    format!(
        "{} (weight {})",
        entry_line(&entry.number, &entry.update.title, &entry.path),
        entry.update.weight
    )
}

/// Format the resolved plan: every file a run would create, in order.
pub fn format_plan(planned: &[PlannedChapter]) -> Vec<String> {
    let mut lines = Vec::new();
    for chapter in planned {
        lines.push(planned_line(&chapter.entry));
        lines.extend(chapter.sections.iter().map(planned_line));
    }
    lines
}

pub fn print_plan(planned: &[PlannedChapter]) {
    for line in format_plan(planned) {
        println!("{}", line);
    }
}
