use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of structured-data requests the pipeline knows how to
/// make. Each mode implies an expected top-level JSON shape and a set of
/// accepted node attribute fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    ConceptList,
    HierarchyTree,
    ArgumentTree,
    EntityGraph,
    StakeholderGraph,
}

impl ExtractionMode {
    pub const ALL: [ExtractionMode; 5] = [
        ExtractionMode::ConceptList,
        ExtractionMode::HierarchyTree,
        ExtractionMode::ArgumentTree,
        ExtractionMode::EntityGraph,
        ExtractionMode::StakeholderGraph,
    ];

    /// Whether the model is asked for a top-level JSON array (`[`) rather
    /// than an object (`{`). Drives the salvage parser's bracket choice.
    pub fn expects_array(self) -> bool {
        matches!(self, ExtractionMode::ConceptList)
    }

    /// Tree-shaped modes get exactly one root node in the canonical graph;
    /// graph-shaped modes normalize to a rootless mesh.
    pub fn is_tree_shaped(self) -> bool {
        !matches!(
            self,
            ExtractionMode::EntityGraph | ExtractionMode::StakeholderGraph
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionMode::ConceptList => "concept-list",
            ExtractionMode::HierarchyTree => "hierarchy-tree",
            ExtractionMode::ArgumentTree => "argument-tree",
            ExtractionMode::EntityGraph => "entity-graph",
            ExtractionMode::StakeholderGraph => "stakeholder-graph",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown extraction mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for ExtractionMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtractionMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for mode in ExtractionMode::ALL {
            assert_eq!(mode.as_str().parse::<ExtractionMode>().unwrap(), mode);
        }
        assert!("bubble-map".parse::<ExtractionMode>().is_err());
    }

    #[test]
    fn only_concept_list_expects_an_array() {
        for mode in ExtractionMode::ALL {
            assert_eq!(
                mode.expects_array(),
                mode == ExtractionMode::ConceptList,
                "{mode}"
            );
        }
    }
}
