//! Outline validation.
//!
//! Runs before any side effect. The outline is rejected on the first of:
//!
//! - a sibling name repeated within its group (chapters, or sections of one chapter)
//! - a name with characters outside `[A-Za-z0-9_]` (names become directory names)
//! - a weight that is not an integer
//! - the same weight twice within a group
//! - a group where some entries carry a weight and others don't
//!
//! Groups are checked top-down: chapter names, chapter weights, then for each
//! chapter in input order its section names and section weights.

use crate::outline::{Entry, Outline};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A sibling group, used to locate validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Group {
    Chapters,
    Sections { chapter: String },
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Chapters => write!(f, "chapters"),
            Group::Sections { chapter } => write!(f, "sections of chapter '{chapter}'"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate name '{name}' in {group}")]
    DuplicateName { name: String, group: Group },
    #[error("Invalid name {name:?} in {group}: only letters, digits and '_' are allowed")]
    InvalidName { name: String, group: Group },
    #[error("Invalid weight {weight} in {group}: weights must be integers")]
    InvalidWeight { weight: String, group: Group },
    #[error("Duplicate weight {weight} in {group}")]
    DuplicateWeight { weight: i64, group: Group },
    #[error("Weight is given for some {group} but not others: give all of them a weight, or none")]
    MixedWeight { group: Group },
}

/// Check a single name against `^[A-Za-z0-9_]+$`.
pub fn check_name(name: &str, group: &Group) -> Result<(), ValidationError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidName {
            name: name.to_string(),
            group: group.clone(),
        })
    }
}

/// Walk names in order, failing on the first repeat and on any invalid name.
pub fn check_no_duplicates<'a, I>(names: I, group: &Group) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateName {
                name: name.to_string(),
                group: group.clone(),
            });
        }
        check_name(name, group)?;
    }
    Ok(())
}

/// Collect and check the weights of one sibling group.
///
/// Returns each entry's weight in input order. Booleans and floats are not
/// integers, even when they look like one (`true`, `3.0`).
pub fn check_weights<E: Entry>(
    entries: &[E],
    group: &Group,
) -> Result<Vec<Option<i64>>, ValidationError> {
    let mut weights = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for entry in entries {
        let weight = match entry.raw_weight() {
            None => None,
            Some(raw) => {
                let w = raw.as_i64().ok_or_else(|| ValidationError::InvalidWeight {
                    weight: raw.to_string(),
                    group: group.clone(),
                })?;
                if !seen.insert(w) {
                    return Err(ValidationError::DuplicateWeight {
                        weight: w,
                        group: group.clone(),
                    });
                }
                Some(w)
            }
        };
        weights.push(weight);
    }

    let all_absent = weights.iter().all(Option::is_none);
    let all_present = weights.iter().all(Option::is_some);
    if !all_absent && !all_present {
        return Err(ValidationError::MixedWeight {
            group: group.clone(),
        });
    }
    Ok(weights)
}

/// Validate the whole outline. Nothing is written before this passes.
pub fn validate_outline(outline: &Outline) -> Result<(), ValidationError> {
    let chapters = Group::Chapters;
    check_no_duplicates(outline.chapters.iter().map(|c| c.name.as_str()), &chapters)?;
    check_weights(&outline.chapters, &chapters)?;

    for chapter in &outline.chapters {
        let sections = Group::Sections {
            chapter: chapter.name.clone(),
        };
        check_no_duplicates(chapter.sections.iter().map(|s| s.name.as_str()), &sections)?;
        check_weights(&chapter.sections, &sections)?;
    }
    Ok(())
}
