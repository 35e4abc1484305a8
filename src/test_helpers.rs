//! Shared test utilities for the hugo-outliner test suite.
//!
//! Provides a throwaway site directory, outline builders, and readers for the
//! files a run leaves behind.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = temp_site();
//! let mock = MockCreator::new(&site.content_root());
//! scaffold(&site.site, &load_fixture_outline(), &mock, None).unwrap();
//!
//! let fm = read_front_matter(&site, "basics/_index.ja.md");
//! assert_eq!(fm["pre"].as_str(), Some("<b>1. </b>"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::OutlinerConfig;
use crate::front_matter::split_front_matter;
use crate::outline::Outline;
use crate::scaffold::{PlannedChapter, PlannedEntry, Site};

// =========================================================================
// Site setup
// =========================================================================

/// A site rooted in a temp directory that is removed on drop.
pub struct TestSite {
    pub _tmp: TempDir,
    pub site: Site,
}

impl TestSite {
    pub fn content_root(&self) -> PathBuf {
        self.site.content_root()
    }
}

/// Empty site with default config. The content root does not exist yet.
pub fn temp_site() -> TestSite {
    let tmp = TempDir::new().unwrap();
    let site = Site::new(tmp.path(), OutlinerConfig::default());
    TestSite { _tmp: tmp, site }
}

// =========================================================================
// Outlines
// =========================================================================

pub fn outline_from(json: &str) -> Outline {
    Outline::from_json(json).unwrap_or_else(|e| panic!("bad test outline: {e}\n{json}"))
}

/// The outline in `fixtures/outline.json`.
pub fn load_fixture_outline() -> Outline {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/outline.json");
    Outline::load(&path).unwrap()
}

// =========================================================================
// Content files
// =========================================================================

/// Write a file under the content root, creating parents.
pub fn write_content(site: &TestSite, rel: &str, content: &str) {
    let path = site.content_root().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Read a file under the content root. Panics with the path on failure.
pub fn read_content(site: &TestSite, rel: &str) -> String {
    let path = site.content_root().join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Parse the front matter of a file under the content root.
pub fn read_front_matter(site: &TestSite, rel: &str) -> toml::Table {
    let text = read_content(site, rel);
    let split = split_front_matter(&text, &site.site.config.front_matter.delimiter);
    toml::from_str(&split.header).unwrap()
}

/// Every file under the content root keyed by `/`-separated relative path.
pub fn snapshot_content(site: &TestSite) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    let root = site.content_root();
    collect_files(&root, &root, &mut files);
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            files.insert(rel, fs::read(&path).unwrap());
        }
    }
}

// =========================================================================
// Plan extractors
// =========================================================================

/// Chapter titles in resolved order.
pub fn chapter_titles(planned: &[PlannedChapter]) -> Vec<&str> {
    planned
        .iter()
        .map(|c| c.entry.update.title.as_str())
        .collect()
}

/// Display numbers of a list of entries.
pub fn entry_numbers(entries: &[PlannedEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.number.as_str()).collect()
}
