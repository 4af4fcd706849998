//! Requirement sources
//!
//! [`JsonFileRequirements`] reads a JSON array in either of two shapes,
//! which may be mixed:
//!
//! ```json
//! [
//!   {"id": 101, "title": "User Login", "description": "<p>...</p>", "acceptance_criteria": "..."},
//!   {"id": 102, "fields": {"System.Title": "Cart", "System.Description": "...",
//!                          "Microsoft.VSTS.Common.AcceptanceCriteria": "..."}}
//! ]
//! ```
//!
//! The second is a work-item export from the tracker. Missing text fields
//! default to empty.

use crate::error::SourceError;
use qa_model::Requirement;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const TITLE_FIELD: &str = "System.Title";
const DESCRIPTION_FIELD: &str = "System.Description";
const CRITERIA_FIELD: &str = "Microsoft.VSTS.Common.AcceptanceCriteria";

/// Supplies the requirements a run covers
#[async_trait::async_trait]
pub trait RequirementSource: Send + Sync {
    /// Fetch all requirements, in source order
    ///
    /// # Errors
    /// - `SourceError` if the source cannot be read or decoded
    async fn fetch(&self) -> Result<Vec<Requirement>, SourceError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementRecord {
    WorkItem {
        id: u64,
        fields: HashMap<String, serde_json::Value>,
    },
    Flat(Requirement),
}

impl From<RequirementRecord> for Requirement {
    fn from(record: RequirementRecord) -> Self {
        match record {
            RequirementRecord::Flat(requirement) => requirement,
            RequirementRecord::WorkItem { id, fields } => {
                let text = |key: &str| {
                    fields
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                Requirement::new(id, text(TITLE_FIELD))
                    .with_description(text(DESCRIPTION_FIELD))
                    .with_acceptance_criteria(text(CRITERIA_FIELD))
            }
        }
    }
}

/// Decode a JSON requirement list
///
/// # Errors
/// - `serde_json::Error` if `json` is not an array of requirement records
pub fn parse_requirements(json: &str) -> Result<Vec<Requirement>, serde_json::Error> {
    let records: Vec<RequirementRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Requirement::from).collect())
}

/// Requirements read from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRequirements {
    path: PathBuf,
}

impl JsonFileRequirements {
    /// Create source reading `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File read by this source
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl RequirementSource for JsonFileRequirements {
    async fn fetch(&self) -> Result<Vec<Requirement>, SourceError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let requirements = parse_requirements(&json).map_err(|source| SourceError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(count = requirements.len(), path = %self.path.display(), "fetched requirements");
        Ok(requirements)
    }
}
