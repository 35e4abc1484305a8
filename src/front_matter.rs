//! Front matter rewriting for generated content files.
//!
//! Hugo writes new content from an archetype: a TOML block between two
//! delimiter lines, then the page body.
//!
//! ```text
//! +++
//! title = "Intro"
//! date = 2024-04-01T10:00:00+09:00
//! draft = true
//! +++
//!
//! Body text...
//! ```
//!
//! The outliner owns three keys in that block: `title`, `pre` (the numbering
//! prefix shown before the title in menus) and `weight`. Everything else in
//! the block is kept in place, and the body is preserved byte for byte.
//!
//! ## Delimiter matching
//!
//! A delimiter is a line that is exactly `<delimiter>\n` or `<delimiter>\r\n`.
//! Nothing else is trimmed: `+++ \n` and a final `+++` without newline are
//! body text. The first matching line opens the block, the next one closes
//! it, and any later matching lines belong to the body. Text before the
//! opening delimiter is body too and ends up after the rewritten block.
//!
//! On write the block is `<delimiter>\n<toml><delimiter>`, followed by `\n`
//! when `closing_newline` is set, then the body. A file whose opening
//! delimiter ends in `\r\n` gets `\r\n` throughout the rewritten block.

use crate::config::FrontMatterConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Front matter parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Front matter serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Line ending of a front matter block, taken from its opening delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A file split into its front matter text and everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// Lines strictly between the delimiters.
    pub header: String,
    /// Lines outside the block, verbatim.
    pub body: String,
    pub line_ending: LineEnding,
}

/// Line ending of `line` if it is exactly `delimiter` plus a newline.
fn delimiter_line(line: &str, delimiter: &str) -> Option<LineEnding> {
    let rest = line.strip_prefix(delimiter)?;
    match rest {
        "\n" => Some(LineEnding::Lf),
        "\r\n" => Some(LineEnding::CrLf),
        _ => None,
    }
}

/// Values the outliner writes into a file's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterUpdate {
    pub title: String,
    pub pre: String,
    pub weight: i64,
}

/// Split `text` into front matter and body at lines equal to `delimiter`.
pub fn split_front_matter(text: &str, delimiter: &str) -> Split {
    #[derive(Clone, Copy)]
    enum State {
        Before,
        Inside,
        After,
    }

    let mut state = State::Before;
    let mut split = Split::default();
    for line in text.split_inclusive('\n') {
        match (state, delimiter_line(line, delimiter)) {
            (State::Before, Some(ending)) => {
                split.line_ending = ending;
                state = State::Inside;
            }
            (State::Inside, Some(_)) => state = State::After,
            (State::Inside, None) => split.header.push_str(line),
            (State::Before | State::After, _) => split.body.push_str(line),
        }
    }
    split
}

/// Render a front matter table and body back into file contents.
pub fn render_front_matter(
    table: &toml::Table,
    body: &str,
    line_ending: LineEnding,
    style: &FrontMatterConfig,
) -> Result<String, FrontMatterError> {
    let newline = line_ending.as_str();
    let mut header = toml::to_string(table)?;
    if line_ending == LineEnding::CrLf {
        header = header.replace('\n', newline);
    }
    let capacity = header.len() + body.len() + 2 * (style.delimiter.len() + newline.len());
    let mut out = String::with_capacity(capacity);
    out.push_str(&style.delimiter);
    out.push_str(newline);
    out.push_str(&header);
    out.push_str(&style.delimiter);
    if style.closing_newline {
        out.push_str(newline);
    }
    out.push_str(body);
    Ok(out)
}

/// Set the outliner-owned keys on a parsed front matter table.
pub fn apply_update(table: &mut toml::Table, update: &FrontMatterUpdate) {
    table.insert("title".into(), toml::Value::String(update.title.clone()));
    table.insert("pre".into(), toml::Value::String(update.pre.clone()));
    table.insert("weight".into(), toml::Value::Integer(update.weight));
}

/// Rewrite the front matter of `<content_root>/<path>` in place.
///
/// Returns the updated table. The file must already exist; a missing file
/// means the generator did not produce it, which is fatal.
pub fn rewrite_front_matter(
    content_root: &Path,
    path: &Path,
    update: &FrontMatterUpdate,
    style: &FrontMatterConfig,
) -> Result<toml::Table, FrontMatterError> {
    let full_path = content_root.join(path);
    if !full_path.is_file() {
        return Err(FrontMatterError::FileNotFound(full_path));
    }

    let text = fs::read_to_string(&full_path)?;
    let split = split_front_matter(&text, &style.delimiter);
    let mut table: toml::Table =
        toml::from_str(&split.header).map_err(|source| FrontMatterError::Parse {
            path: full_path.clone(),
            source,
        })?;
    apply_update(&mut table, update);

    let rendered = render_front_matter(&table, &split.body, split.line_ending, style)?;
    fs::write(&full_path, rendered)?;
    Ok(table)
}
