//! # Version Records
//!
//! A version is a named, timestamped snapshot of a document's content.
//!
//! Whether a version is *current* is owned by the [`VersionStore`], not by the
//! record itself. [`VersionRecord`] is the flag-carrying form used at the
//! edges (seeding, UI lists, JS interop), where each entry carries its own
//! `isCurrent` bit.
//!
//! [`VersionStore`]: crate::VersionStore

use chrono::{DateTime, Utc};
use plume_common::Content;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque version identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VersionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Snapshot of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub id: VersionId,

    /// Display label (not unique)
    pub name: String,

    /// When `content` was captured
    pub date: DateTime<Utc>,

    /// Captured content; never shares storage with the live buffer
    pub content: Content,

    /// Bootstrap entry whose content has never been captured
    pub placeholder: bool,
}

impl Version {
    pub fn new(id: VersionId, name: impl Into<String>, date: DateTime<Utc>, content: Content) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            content,
            placeholder: false,
        }
    }

    pub fn placeholder(id: VersionId, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            placeholder: true,
            ..Self::new(id, name, date, Content::empty())
        }
    }
}

/// Label given to a version saved at `date`
pub fn version_name(date: DateTime<Utc>) -> String {
    format!("Version {}", date.format("%-m/%-d/%Y"))
}

/// Flag-based interchange form of a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: VersionId,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl VersionRecord {
    pub fn from_version(version: &Version, is_current: bool) -> Self {
        Self {
            id: version.id.clone(),
            name: version.name.clone(),
            date: version.date,
            content: version.content.deep_copy(),
            is_current,
            placeholder: version.placeholder,
        }
    }

    pub fn into_version(self) -> Version {
        Version {
            id: self.id,
            name: self.name,
            date: self.date,
            content: self.content,
            placeholder: self.placeholder,
        }
    }
}

/// Lightweight listing entry for version pickers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub id: VersionId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub is_current: bool,
    pub word_count: usize,
}
