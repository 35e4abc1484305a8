//! Outline document model.
//!
//! The outline is a small JSON file describing the chapter/section tree to
//! scaffold. Keys are capitalized to match the files authors already keep:
//!
//! ```json
//! {
//!   "Chapters": [
//!     {
//!       "Name": "intro",
//!       "Title": "Introduction",
//!       "Weight": 10,
//!       "Sections": [
//!         { "Name": "install", "Title": "Installation", "Weight": 1 },
//!         { "Name": "usage", "Title": "Usage", "Weight": 2 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `Weight` is optional. It is kept as a raw JSON value here so that a
//! non-integer weight reaches [`validate`](crate::validate) and is reported as
//! an invalid weight rather than a decode error. `Sections` may be omitted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    #[serde(rename = "Chapters")]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<serde_json::Value>,
    #[serde(rename = "Sections", default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<serde_json::Value>,
}

/// Common view over chapters and sections for the per-group checks.
pub trait Entry {
    fn name(&self) -> &str;
    /// Raw weight; `None` when absent or JSON `null`.
    fn raw_weight(&self) -> Option<&serde_json::Value>;
}

impl Entry for Chapter {
    fn name(&self) -> &str {
        &self.name
    }
    fn raw_weight(&self) -> Option<&serde_json::Value> {
        self.weight.as_ref().filter(|w| !w.is_null())
    }
}

impl Entry for Section {
    fn name(&self) -> &str {
        &self.name
    }
    fn raw_weight(&self) -> Option<&serde_json::Value> {
        self.weight.as_ref().filter(|w| !w.is_null())
    }
}

impl Outline {
    pub fn from_json(json: &str) -> Result<Self, OutlineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, OutlineError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
