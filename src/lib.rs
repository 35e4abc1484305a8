//! # Hugo Outliner
//!
//! Scaffolds a Hugo documentation tree from a JSON outline. Each chapter and
//! section in the outline becomes an `_index.<locale>.md` page created by
//! `hugo new`, and its front matter is rewritten with the outline's title, a
//! numbering prefix and a sort weight.
//!
//! # Pipeline
//!
//! ```text
//! outline.json ──validate──▶ plan ──hugo new──▶ content/…/_index.ja.md ──rewrite──▶ front matter
//! ```
//!
//! Nothing is created until the whole outline validates. After that, entries
//! are processed one at a time in display order; the first failure stops the
//! run and leaves earlier files in place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | JSON outline model: chapters, sections, raw weights |
//! | [`validate`] | Name and weight checks per sibling group |
//! | [`order`] | Weight/position → display order and effective weight |
//! | [`creator`] | [`ContentCreator`](creator::ContentCreator) seam and the Hugo subprocess implementation |
//! | [`front_matter`] | Delimited TOML block splitting and in-place rewrite |
//! | [`scaffold`] | Plans and runs the whole outline |
//! | [`config`] | `outliner.toml` loading, merging with defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Weight vs. order
//!
//! Weight is what Hugo sorts by and is written to the page untouched when the
//! author gave one. Order is the rank used for the visible numbering
//! (`<b>2.1. </b>`), so sparse weights like `10, 20, 30` still number as
//! `1, 2, 3`. Without weights, both are the 1-based input position.
//!
//! ## Hugo owns file creation
//!
//! Pages are created by `hugo new` so the site's archetypes apply. The
//! outliner only edits the keys it owns (`title`, `pre`, `weight`) and leaves
//! the rest of the archetype's front matter and body as written.
//!
//! ## Generator failures
//!
//! A non-zero exit from the generator aborts the run, except when the target
//! file already existed: that is Hugo refusing to overwrite, which is what a
//! re-run looks like. Set `generator.fail_on_error = false` to only report
//! failures.

pub mod config;
pub mod creator;
pub mod front_matter;
pub mod order;
pub mod outline;
pub mod output;
pub mod scaffold;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
