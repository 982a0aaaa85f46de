use crate::canonical::CanonicalGraph;
use crate::mode::ExtractionMode;
use std::collections::{HashMap, HashSet};

/// Plain-text export of a canonical graph, for download collaborators.
///
/// Term lists export as `Term:` / `Definition:` line pairs (root omitted),
/// trees as indented `- name: tooltip` lines, argument trees with a
/// `[type]` prefix, and typed graphs as a node listing followed by an
/// edge listing.
pub fn export_text(graph: &CanonicalGraph, mode: ExtractionMode) -> String {
    match mode {
        ExtractionMode::ConceptList => export_term_list(graph),
        ExtractionMode::HierarchyTree => export_tree(graph, false),
        ExtractionMode::ArgumentTree => export_tree(graph, true),
        ExtractionMode::EntityGraph | ExtractionMode::StakeholderGraph => {
            export_typed(graph)
        }
    }
}

fn export_term_list(graph: &CanonicalGraph) -> String {
    let mut out = String::new();
    for node in graph.nodes().iter().filter(|n| !n.is_root) {
        out.push_str(&format!(
            "Term: {}\nDefinition: {}\n\n",
            node.label, node.tooltip
        ));
    }
    out
}

fn export_tree(graph: &CanonicalGraph, with_types: bool) -> String {
    let Some(root) = graph.root() else {
        return String::new();
    };
    // Child adjacency rebuilt from the edge list, preserving edge order.
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in graph.edges() {
        children
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }
    let mut out = String::new();
    let mut visited = HashSet::new();
    write_subtree(graph, &root.id, 0, &children, &mut visited, with_types, &mut out);
    out
}

fn write_subtree(
    graph: &CanonicalGraph,
    id: &str,
    depth: usize,
    children: &HashMap<&str, Vec<&str>>,
    visited: &mut HashSet<String>,
    with_types: bool,
    out: &mut String,
) {
    // Label-merged nodes can alias, so guard against revisiting.
    if !visited.insert(id.to_string()) {
        return;
    }
    let Some(node) = graph.node(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    if with_types && !node.category.is_empty() {
        out.push_str(&format!(
            "{indent}- [{}] {}: {}\n",
            node.category, node.label, node.tooltip
        ));
    } else {
        out.push_str(&format!("{indent}- {}: {}\n", node.label, node.tooltip));
    }
    if let Some(kids) = children.get(id) {
        for kid in kids {
            write_subtree(graph, kid, depth + 1, children, visited, with_types, out);
        }
    }
}

fn export_typed(graph: &CanonicalGraph) -> String {
    let mut out = String::new();
    for node in graph.nodes() {
        if node.category.is_empty() {
            out.push_str(&format!("{}: {}\n", node.label, node.tooltip));
        } else {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                node.category, node.label, node.tooltip
            ));
        }
    }
    if !graph.edges().is_empty() {
        out.push('\n');
        for edge in graph.edges() {
            out.push_str(&format!(
                "{} -{}-> {}\n",
                edge.source, edge.relationship, edge.target
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::shape::{TermEntry, TreeNode, TypedEdge, TypedGraph, TypedNode, ValidatedShape};

    #[test]
    fn term_list_exports_pairs_without_root() {
        let terms = vec![TermEntry {
            term: "Osmosis".to_string(),
            tooltip: "Diffusion across a membrane.".to_string(),
        }];
        let graph = normalize(&ValidatedShape::TermList(terms), "Biology");
        let text = export_text(&graph, ExtractionMode::ConceptList);

        assert_eq!(
            text,
            "Term: Osmosis\nDefinition: Diffusion across a membrane.\n\n"
        );
        assert!(!text.contains("Biology"));
    }

    #[test]
    fn tree_export_indents_by_depth() {
        let tree = TreeNode {
            name: "Doc".to_string(),
            tooltip: "overview".to_string(),
            node_type: String::new(),
            children: vec![TreeNode {
                name: "Topic".to_string(),
                tooltip: "t".to_string(),
                node_type: String::new(),
                children: vec![TreeNode {
                    name: "Detail".to_string(),
                    tooltip: "d".to_string(),
                    node_type: String::new(),
                    children: Vec::new(),
                }],
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let text = export_text(&graph, ExtractionMode::HierarchyTree);

        assert_eq!(text, "- Doc: overview\n  - Topic: t\n    - Detail: d\n");
    }

    #[test]
    fn argument_tree_export_prefixes_types() {
        let tree = TreeNode {
            name: "Main claim".to_string(),
            tooltip: "t".to_string(),
            node_type: "Thesis".to_string(),
            children: vec![TreeNode {
                name: "Because".to_string(),
                tooltip: "b".to_string(),
                node_type: "Supporting Argument".to_string(),
                children: Vec::new(),
            }],
        };
        let graph = normalize(&ValidatedShape::Tree(tree), "");
        let text = export_text(&graph, ExtractionMode::ArgumentTree);

        assert!(text.starts_with("- [Thesis] Main claim: t\n"));
        assert!(text.contains("  - [Supporting Argument] Because: b\n"));
    }

    #[test]
    fn typed_export_lists_nodes_then_edges() {
        let typed = TypedGraph {
            nodes: vec![
                TypedNode {
                    id: "Alice".to_string(),
                    node_type: "PERSON".to_string(),
                    role: String::new(),
                    description: "founder".to_string(),
                },
                TypedNode {
                    id: "Acme".to_string(),
                    node_type: "ORGANIZATION".to_string(),
                    role: String::new(),
                    description: String::new(),
                },
            ],
            edges: vec![TypedEdge {
                source: "Alice".to_string(),
                target: "Acme".to_string(),
                relationship: "founded".to_string(),
            }],
        };
        let graph = normalize(&ValidatedShape::TypedGraph(typed), "");
        let text = export_text(&graph, ExtractionMode::EntityGraph);

        assert!(text.contains("[PERSON] Alice: founder\n"));
        assert!(text.contains("Alice -founded-> Acme\n"));
    }
}
