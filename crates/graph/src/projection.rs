use crate::canonical::CanonicalGraph;
use crate::mode::ExtractionMode;
use serde::Serialize;
use std::collections::HashMap;

// Geometry mirrors the force-directed renderer's expectations: roots are
// drawn noticeably larger and pushed further from their neighbours.
const ROOT_RADIUS: f32 = 110.0;
const NODE_RADIUS: f32 = 75.0;
const ROOT_EDGE_DISTANCE: f32 = 270.0;
const EDGE_DISTANCE: f32 = 180.0;

const ROOT_FILL: &str = "#eaf0fe";
const PLAIN_FILL: &str = "#ffffff";
/// Fallback for categories no palette entry recognizes.
const NEUTRAL_FILL: &str = "#d7dfee";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVisual {
    pub radius: f32,
    pub fill: String,
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeVisual {
    pub preferred_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Renderer-ready configuration for one canonical graph. Stateless output;
/// recomputed on every render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    /// node id -> visual attributes
    pub node_visual: HashMap<String, NodeVisual>,
    /// indexed parallel to `CanonicalGraph::edges`
    pub edge_visual: Vec<EdgeVisual>,
    pub legend: Vec<LegendEntry>,
}

/// Fixed category palette per mode. Modes without categories get none and
/// emit no legend.
fn palette(mode: ExtractionMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        ExtractionMode::ArgumentTree => &[
            ("Thesis", "#4f7cda"),
            ("Supporting Argument", "#6fbf73"),
            ("Evidence", "#f2b84b"),
            ("Counterargument", "#e2574c"),
        ],
        ExtractionMode::EntityGraph => &[
            ("PERSON", "#7aa6e8"),
            ("ORGANIZATION", "#8fd19e"),
            ("CONCEPT", "#c9a6e8"),
            ("TECHNOLOGY", "#f2b84b"),
            ("LOCATION", "#6fd3d1"),
            ("EVENT", "#e8938f"),
        ],
        ExtractionMode::StakeholderGraph => &[
            ("Decision Maker", "#4f7cda"),
            ("Primary", "#6fbf73"),
            ("Secondary", "#f2b84b"),
            ("Influencer", "#c9a6e8"),
            ("Affected Party", "#e8938f"),
        ],
        ExtractionMode::ConceptList | ExtractionMode::HierarchyTree => &[],
    }
}

/// Pure derivation from (graph, mode) to renderer configuration.
pub fn project(graph: &CanonicalGraph, mode: ExtractionMode) -> RenderConfig {
    let colors = palette(mode);
    let root_id = graph.root().map(|n| n.id.clone());

    let mut node_visual = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let fill = if node.is_root {
            ROOT_FILL.to_string()
        } else if node.category.is_empty() {
            PLAIN_FILL.to_string()
        } else {
            colors
                .iter()
                .find(|(cat, _)| cat.eq_ignore_ascii_case(&node.category))
                .map(|(_, color)| color.to_string())
                .unwrap_or_else(|| NEUTRAL_FILL.to_string())
        };
        node_visual.insert(
            node.id.clone(),
            NodeVisual {
                radius: if node.is_root { ROOT_RADIUS } else { NODE_RADIUS },
                fill,
                is_root: node.is_root,
            },
        );
    }

    let edge_visual = graph
        .edges()
        .iter()
        .map(|edge| {
            let touches_root = root_id
                .as_deref()
                .is_some_and(|r| edge.source == r || edge.target == r);
            EdgeVisual {
                preferred_distance: if touches_root {
                    ROOT_EDGE_DISTANCE
                } else {
                    EDGE_DISTANCE
                },
            }
        })
        .collect();

    let legend = colors
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.to_string(),
            color: color.to_string(),
        })
        .collect();

    RenderConfig {
        node_visual,
        edge_visual,
        legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::shape::{TermEntry, TreeNode, ValidatedShape};

    fn star() -> CanonicalGraph {
        let terms = vec![
            TermEntry {
                term: "Alpha".to_string(),
                tooltip: String::new(),
            },
            TermEntry {
                term: "Beta".to_string(),
                tooltip: String::new(),
            },
        ];
        normalize(&ValidatedShape::TermList(terms), "Root")
    }

    #[test]
    fn root_gets_larger_radius_and_root_fill() {
        let config = project(&star(), ExtractionMode::ConceptList);
        let root = &config.node_visual["Root"];
        let leaf = &config.node_visual["Alpha"];
        assert!(root.radius > leaf.radius);
        assert_eq!(root.fill, ROOT_FILL);
        assert_eq!(leaf.fill, PLAIN_FILL);
    }

    #[test]
    fn root_edges_get_longer_preferred_distance() {
        let tree = TreeNode {
            name: "R".to_string(),
            tooltip: String::new(),
            node_type: String::new(),
            children: vec![TreeNode {
                name: "A".to_string(),
                tooltip: String::new(),
                node_type: String::new(),
                children: vec![TreeNode {
                    name: "A1".to_string(),
                    tooltip: String::new(),
                    node_type: String::new(),
                    children: Vec::new(),
                }],
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let config = project(&graph, ExtractionMode::HierarchyTree);
        // Edge 0 is R->A (touches root), edge 1 is A->A1.
        assert!(
            config.edge_visual[0].preferred_distance > config.edge_visual[1].preferred_distance
        );
    }

    #[test]
    fn legend_only_for_palette_modes() {
        let graph = star();
        assert!(project(&graph, ExtractionMode::ConceptList).legend.is_empty());
        assert!(project(&graph, ExtractionMode::HierarchyTree).legend.is_empty());
        assert!(!project(&graph, ExtractionMode::ArgumentTree).legend.is_empty());
        assert!(!project(&graph, ExtractionMode::EntityGraph).legend.is_empty());
        assert!(!project(&graph, ExtractionMode::StakeholderGraph).legend.is_empty());
    }

    #[test]
    fn unknown_category_falls_back_to_neutral() {
        let tree = TreeNode {
            name: "R".to_string(),
            tooltip: String::new(),
            node_type: "Thesis".to_string(),
            children: vec![TreeNode {
                name: "odd".to_string(),
                tooltip: String::new(),
                node_type: "Interpretive Dance".to_string(),
                children: Vec::new(),
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let config = project(&graph, ExtractionMode::ArgumentTree);
        assert_eq!(config.node_visual["odd"].fill, NEUTRAL_FILL);
        // Root fill wins over category color.
        assert_eq!(config.node_visual["R"].fill, ROOT_FILL);
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let tree = TreeNode {
            name: "R".to_string(),
            tooltip: String::new(),
            node_type: String::new(),
            children: vec![TreeNode {
                name: "e".to_string(),
                tooltip: String::new(),
                node_type: "evidence".to_string(),
                children: Vec::new(),
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let config = project(&graph, ExtractionMode::ArgumentTree);
        assert_eq!(config.node_visual["e"].fill, "#f2b84b");
    }
}
