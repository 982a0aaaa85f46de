use crate::canonical::{CanonicalGraph, CanonicalNode};
use crate::shape::{TreeNode, TypedGraph, ValidatedShape};

/// Root label used when a term list is normalized without a document title.
const CONCEPT_ROOT_FALLBACK: &str = "Concept Map";
const CONCEPT_ROOT_TOOLTIP: &str = "Key concepts from the document.";

/// Convert any validated shape into the canonical node/link graph.
///
/// `root_label` is only consulted for tree-derived shapes: a term list
/// hangs off a synthetic root carrying it, and a tree's own root name is
/// overridden by it when non-empty. Typed graphs normalize to a rootless
/// mesh and ignore it.
pub fn normalize(shape: &ValidatedShape, root_label: &str) -> CanonicalGraph {
    match shape {
        ValidatedShape::TermList(terms) => {
            let mut graph = CanonicalGraph::new();
            let root = if root_label.is_empty() {
                CONCEPT_ROOT_FALLBACK
            } else {
                root_label
            };
            graph.upsert_node(CanonicalNode {
                id: root.to_string(),
                label: root.to_string(),
                tooltip: CONCEPT_ROOT_TOOLTIP.to_string(),
                category: String::new(),
                is_root: true,
            });
            for entry in terms {
                graph.upsert_node(CanonicalNode {
                    id: entry.term.clone(),
                    label: entry.term.clone(),
                    tooltip: entry.tooltip.clone(),
                    category: String::new(),
                    is_root: false,
                });
                graph.add_edge(root, &entry.term, "");
            }
            graph
        }
        ValidatedShape::Tree(root) => {
            let mut graph = CanonicalGraph::new();
            let override_label = (!root_label.is_empty()).then_some(root_label);
            walk_tree(&mut graph, root, None, override_label);
            graph
        }
        ValidatedShape::TypedGraph(typed) => normalize_typed(typed),
    }
}

/// Pre-order traversal; each tree node keyed by its display name.
fn walk_tree(
    graph: &mut CanonicalGraph,
    node: &TreeNode,
    parent_id: Option<&str>,
    override_label: Option<&str>,
) {
    let label = override_label.unwrap_or(&node.name).to_string();
    let id = label.clone();
    graph.upsert_node(CanonicalNode {
        id: id.clone(),
        label,
        tooltip: node.tooltip.clone(),
        category: node.node_type.clone(),
        is_root: parent_id.is_none(),
    });
    if let Some(parent) = parent_id {
        graph.add_edge(parent, &id, "");
    }
    for child in &node.children {
        walk_tree(graph, child, Some(&id), None);
    }
}

fn normalize_typed(typed: &TypedGraph) -> CanonicalGraph {
    let mut graph = CanonicalGraph::new();
    for node in &typed.nodes {
        let category = if !node.node_type.is_empty() {
            node.node_type.clone()
        } else {
            node.role.clone()
        };
        graph.upsert_node(CanonicalNode {
            id: node.id.clone(),
            label: node.id.clone(),
            tooltip: node.description.clone(),
            category,
            is_root: false,
        });
    }
    // Deferred cross-reference check: add_edge drops any edge whose
    // endpoints did not both survive as nodes.
    for edge in &typed.edges {
        graph.add_edge(&edge.source, &edge.target, &edge.relationship);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{TermEntry, TypedEdge, TypedNode};

    fn leaf(name: &str) -> TreeNode {
        TreeNode {
            name: name.to_string(),
            tooltip: format!("about {name}"),
            node_type: String::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn term_list_becomes_a_star() {
        let terms = vec![
            TermEntry {
                term: "Photosynthesis".to_string(),
                tooltip: "Light to chemical energy.".to_string(),
            },
            TermEntry {
                term: "Chlorophyll".to_string(),
                tooltip: "Green pigment.".to_string(),
            },
        ];
        let graph = normalize(&ValidatedShape::TermList(terms), "Plant Biology");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.root().unwrap().label, "Plant Biology");
        for edge in graph.edges() {
            assert_eq!(edge.source, "Plant Biology");
        }
    }

    #[test]
    fn tree_of_k_nodes_yields_k_minus_one_edges_and_one_root() {
        let tree = TreeNode {
            name: "Doc".to_string(),
            tooltip: String::new(),
            node_type: String::new(),
            children: vec![
                TreeNode {
                    name: "Topic A".to_string(),
                    tooltip: String::new(),
                    node_type: String::new(),
                    children: vec![leaf("A1"), leaf("A2")],
                },
                TreeNode {
                    name: "Topic B".to_string(),
                    tooltip: String::new(),
                    node_type: String::new(),
                    children: vec![leaf("B1")],
                },
            ],
        };
        let k = tree.size();
        let graph = normalize(&ValidatedShape::Tree(tree), "");

        assert_eq!(graph.node_count(), k);
        assert_eq!(graph.edge_count(), k - 1);
        assert_eq!(graph.nodes().iter().filter(|n| n.is_root).count(), 1);
        assert_eq!(graph.root().unwrap().label, "Doc");
    }

    #[test]
    fn tree_root_label_override() {
        let tree = TreeNode {
            name: "Thesis: something".to_string(),
            tooltip: "t".to_string(),
            node_type: "Thesis".to_string(),
            children: vec![leaf("Argument")],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "My Paper");

        let root = graph.root().unwrap();
        assert_eq!(root.label, "My Paper");
        assert_eq!(root.category, "Thesis");
        // Child edge hangs off the overridden id.
        assert_eq!(graph.edges()[0].source, "My Paper");
    }

    #[test]
    fn tree_traversal_is_pre_order() {
        let tree = TreeNode {
            name: "R".to_string(),
            tooltip: String::new(),
            node_type: String::new(),
            children: vec![
                TreeNode {
                    name: "A".to_string(),
                    tooltip: String::new(),
                    node_type: String::new(),
                    children: vec![leaf("A1")],
                },
                leaf("B"),
            ],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let order: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["R", "A", "A1", "B"]);
    }

    #[test]
    fn descendant_repeating_root_name_keeps_exactly_one_root() {
        // Overview -> Topic -> Overview: the leaf merges into the root
        // node but must not strip its root flag.
        let tree = TreeNode {
            name: "Overview".to_string(),
            tooltip: "root".to_string(),
            node_type: String::new(),
            children: vec![TreeNode {
                name: "Topic".to_string(),
                tooltip: String::new(),
                node_type: String::new(),
                children: vec![leaf("Overview")],
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");

        assert_eq!(graph.nodes().iter().filter(|n| n.is_root).count(), 1);
        let root = graph.root().unwrap();
        assert_eq!(root.id, "Overview");
        // Attribute merge still applies: the leaf's tooltip won.
        assert_eq!(root.tooltip, "about Overview");
    }

    #[test]
    fn typed_graph_has_no_root_and_drops_dangling_edges() {
        let typed = TypedGraph {
            nodes: vec![TypedNode {
                id: "A".to_string(),
                node_type: String::new(),
                role: String::new(),
                description: String::new(),
            }],
            edges: vec![TypedEdge {
                source: "A".to_string(),
                target: "B".to_string(),
                relationship: "x".to_string(),
            }],
        };
        let graph = normalize(&ValidatedShape::TypedGraph(typed), "ignored");

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0, "dangling edge must be dropped");
        assert!(graph.root().is_none());
    }

    #[test]
    fn typed_graph_category_prefers_type_then_role() {
        let typed = TypedGraph {
            nodes: vec![
                TypedNode {
                    id: "Alice".to_string(),
                    node_type: "PERSON".to_string(),
                    role: "sponsor".to_string(),
                    description: String::new(),
                },
                TypedNode {
                    id: "Board".to_string(),
                    node_type: String::new(),
                    role: "Decision Maker".to_string(),
                    description: String::new(),
                },
            ],
            edges: Vec::new(),
        };
        let graph = normalize(&ValidatedShape::TypedGraph(typed), "");
        assert_eq!(graph.node("Alice").unwrap().category, "PERSON");
        assert_eq!(graph.node("Board").unwrap().category, "Decision Maker");
    }

    #[test]
    fn duplicate_ids_merge_with_last_writer_wins() {
        let typed = TypedGraph {
            nodes: vec![
                TypedNode {
                    id: "A".to_string(),
                    node_type: "PERSON".to_string(),
                    role: String::new(),
                    description: "first".to_string(),
                },
                TypedNode {
                    id: "B".to_string(),
                    node_type: String::new(),
                    role: String::new(),
                    description: String::new(),
                },
                TypedNode {
                    id: "A".to_string(),
                    node_type: "ORGANIZATION".to_string(),
                    role: String::new(),
                    description: "second".to_string(),
                },
            ],
            edges: vec![TypedEdge {
                source: "A".to_string(),
                target: "B".to_string(),
                relationship: "owns".to_string(),
            }],
        };
        let graph = normalize(&ValidatedShape::TypedGraph(typed), "");

        assert_eq!(graph.node_count(), 2);
        let merged = graph.node("A").unwrap();
        assert_eq!(merged.category, "ORGANIZATION");
        assert_eq!(merged.tooltip, "second");
        // Edges reference ids, so the merge keeps them valid.
        assert_eq!(graph.edge_count(), 1);
    }
}
