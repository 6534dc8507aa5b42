//! Placement reports for the batch marker passes.
//!
//! Per-node tag failures during arrow or line placement are
//! recoverable, but they are never discarded: every skipped node lands
//! in the report with the reason it was skipped.

use cadnote_kernel::TagResolutionError;
use serde::Serialize;

/// Why a node was skipped by a batch marker pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// No face carried the marker tag.
    TagNotFound {
        /// The tag that was looked up.
        tag: String,
    },
    /// The marker tag matched more than one face; the pass never picks
    /// one arbitrarily.
    TagAmbiguous {
        /// The tag that was looked up.
        tag: String,
        /// How many faces matched.
        count: usize,
    },
    /// The node is a grouping node with no part to query.
    NoPart,
}

impl From<TagResolutionError> for SkipReason {
    fn from(err: TagResolutionError) -> Self {
        match err {
            TagResolutionError::NotFound { tag } => SkipReason::TagNotFound { tag },
            TagResolutionError::Ambiguous { tag, count } => {
                SkipReason::TagAmbiguous { tag, count }
            }
        }
    }
}

/// A node a batch pass skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNode {
    /// Name of the skipped node.
    pub name: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a batch marker pass over an assembly's children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    /// Names of the nodes that received markers, in traversal order.
    pub placed: Vec<String>,
    /// Nodes that were skipped, with reasons.
    pub skipped: Vec<SkippedNode>,
}

impl PlacementReport {
    /// Whether every candidate node received a marker.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of markers placed.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Number of nodes skipped.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_from_resolution_error() {
        let not_found = TagResolutionError::NotFound {
            tag: "arrow".to_string(),
        };
        assert_eq!(
            SkipReason::from(not_found),
            SkipReason::TagNotFound {
                tag: "arrow".to_string()
            }
        );

        let ambiguous = TagResolutionError::Ambiguous {
            tag: "arrow".to_string(),
            count: 3,
        };
        assert_eq!(
            SkipReason::from(ambiguous),
            SkipReason::TagAmbiguous {
                tag: "arrow".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_report_counts() {
        let report = PlacementReport {
            placed: vec!["box1".to_string(), "box2".to_string()],
            skipped: vec![SkippedNode {
                name: "lid".to_string(),
                reason: SkipReason::NoPart,
            }],
        };
        assert_eq!(report.placed_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert!(!report.is_clean());
        assert!(PlacementReport::default().is_clean());
    }

    #[test]
    fn test_report_serializes() {
        let report = PlacementReport {
            placed: vec!["box1".to_string()],
            skipped: vec![SkippedNode {
                name: "box2".to_string(),
                reason: SkipReason::TagAmbiguous {
                    tag: "arrow".to_string(),
                    count: 2,
                },
            }],
        };
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("box1"));
        assert!(json.contains("TagAmbiguous"));
    }
}
