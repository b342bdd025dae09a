//! Schema adapters — one declarative table per profile source describing which scalar
//! fields and arrays to pull out of the stream and what to call them in the UI.

pub mod sources;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::extraction::{extract_array, extract_scalar, ArrayMode};
use crate::models::StreamStatus;

/// The kinds of document the LLM streams back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Resume,
    Github,
    Linkedin,
    Project,
    Aggregate,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown profile source '{0}' (expected resume, github, linkedin, project or aggregate)")]
pub struct SourceParseError(pub String);

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Resume,
        SourceKind::Github,
        SourceKind::Linkedin,
        SourceKind::Project,
        SourceKind::Aggregate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Resume => "resume",
            SourceKind::Github => "github",
            SourceKind::Linkedin => "linkedin",
            SourceKind::Project => "project",
            SourceKind::Aggregate => "aggregate",
        }
    }

    /// Files are uploaded; profiles are fetched from a third party or assembled.
    pub fn initial_phase(self) -> StreamStatus {
        match self {
            SourceKind::Resume | SourceKind::Project => StreamStatus::Uploading,
            SourceKind::Github | SourceKind::Linkedin | SourceKind::Aggregate => {
                StreamStatus::Fetching
            }
        }
    }

    /// Lowercase noun phrase used inside status messages.
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Resume => "resume",
            SourceKind::Github => "GitHub profile",
            SourceKind::Linkedin => "LinkedIn profile",
            SourceKind::Project => "project document",
            SourceKind::Aggregate => "profile",
        }
    }

    /// Sentence-initial form of [`display_name`](Self::display_name).
    pub fn title(self) -> &'static str {
        match self {
            SourceKind::Resume => "Resume",
            SourceKind::Github => "GitHub profile",
            SourceKind::Linkedin => "LinkedIn profile",
            SourceKind::Project => "Project document",
            SourceKind::Aggregate => "Profile",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SourceParseError(s.to_string()))
    }
}

/// A top-level string field. `label` is the key exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScalarField {
    pub key: &'static str,
    pub label: &'static str,
}

/// A top-level array field and the kind of element it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayField {
    pub key: &'static str,
    pub label: &'static str,
    pub mode: ArrayMode,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SchemaAdapter {
    pub source: SourceKind,
    pub scalars: &'static [ScalarField],
    pub arrays: &'static [ArrayField],
}

/// What an adapter found in one buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Display label → value, scalars first, then arrays, in table order.
    /// Only fields that have been found appear.
    pub partial_data: Map<String, Value>,
    /// Non-null scalars plus arrays with at least one complete element.
    pub fields_found: usize,
}

impl SchemaAdapter {
    pub fn for_source(source: SourceKind) -> &'static SchemaAdapter {
        match source {
            SourceKind::Resume => &sources::RESUME,
            SourceKind::Github => &sources::GITHUB,
            SourceKind::Linkedin => &sources::LINKEDIN,
            SourceKind::Project => &sources::PROJECT,
            SourceKind::Aggregate => &sources::AGGREGATE,
        }
    }

    /// Runs every extractor in the table against `buffer`. Never fails.
    pub fn extract(&self, buffer: &str) -> Extraction {
        let mut partial_data = Map::new();

        for field in self.scalars {
            if let Some(value) = extract_scalar(buffer, field.key) {
                partial_data.insert(field.label.to_string(), Value::String(value));
            }
        }

        for field in self.arrays {
            let array = extract_array(buffer, field.key, field.mode);
            if !array.is_empty() {
                partial_data.insert(field.label.to_string(), Value::Array(array.elements));
            }
        }

        let fields_found = partial_data.len();
        Extraction {
            partial_data,
            fields_found,
        }
    }
}
