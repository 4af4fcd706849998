//! Generated artifacts

use qa_model::{ContentHash, ScenarioRef};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Role of an artifact within a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Page object
    Page,
    /// Test suite
    Suite,
}

/// One rendered source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Target that produced the artifact
    pub target_id: String,
    /// Page or suite
    pub kind: ArtifactKind,
    /// Path relative to the output root
    pub path: PathBuf,
    /// Source text
    pub content: String,
    /// Blake3 checksum of `content`
    pub checksum: ContentHash,
    /// Scenario the artifact was rendered from
    pub scenario: ScenarioRef,
    /// Test units in the artifact (0 for pages)
    pub unit_count: usize,
}

impl GeneratedArtifact {
    /// Create artifact, computing its checksum
    #[must_use]
    pub fn new(
        target_id: impl Into<String>,
        kind: ArtifactKind,
        path: PathBuf,
        content: String,
        scenario: ScenarioRef,
        unit_count: usize,
    ) -> Self {
        let checksum = ContentHash::compute(content.as_bytes());
        Self {
            target_id: target_id.into(),
            kind,
            path,
            content,
            checksum,
            scenario,
            unit_count,
        }
    }

    /// Check the stored checksum against the content
    #[inline]
    #[must_use]
    pub fn verify(&self) -> bool {
        ContentHash::compute(self.content.as_bytes()) == self.checksum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_tracks_content() {
        let scenario = ScenarioRef {
            requirement_id: 1,
            requirement_title: "Login".to_string(),
        };
        let mut artifact = GeneratedArtifact::new(
            "pytest",
            ArtifactKind::Suite,
            PathBuf::from("pytest/tests/test_login.py"),
            "def test_x(): pass\n".to_string(),
            scenario,
            1,
        );
        assert!(artifact.verify());
        artifact.content.push('#');
        assert!(!artifact.verify());
    }
}
