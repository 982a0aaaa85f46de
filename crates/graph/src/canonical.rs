use serde::Serialize;
use std::collections::HashMap;

/// A node of the canonical graph. The id doubles as the display label's
/// key: it is derived from the model-provided label string, so two source
/// elements with the same label share one canonical node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalNode {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    /// Styling category (tree `type` or typed-graph `type`/`role`).
    /// Empty when the mode has no categories.
    pub category: String,
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalEdge {
    pub source: String,
    pub target: String,
    /// Empty for star/tree edges; the typed-graph relationship otherwise.
    pub relationship: String,
}

/// The single unified node/edge representation every extraction mode
/// normalizes into. Nodes keep insertion order; edges keep the order they
/// were added in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CanonicalGraph {
    nodes: Vec<CanonicalNode>,
    edges: Vec<CanonicalEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl CanonicalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or overwrite the attributes of an existing node with
    /// the same id. Overwriting keeps the node's position; edges already
    /// pointing at the id stay valid because edges reference ids, not
    /// object identity. This is the label-collision merge policy.
    ///
    /// The root flag is structural, not an attribute: once a node is the
    /// root, a later collision with a non-root cannot demote it.
    pub fn upsert_node(&mut self, mut node: CanonicalNode) {
        match self.node_index.get(&node.id) {
            Some(&idx) => {
                node.is_root = node.is_root || self.nodes[idx].is_root;
                self.nodes[idx] = node;
            }
            None => {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add an edge if and only if both endpoints resolve to existing nodes.
    /// Returns false (edge dropped) otherwise.
    pub fn add_edge(&mut self, source: &str, target: &str, relationship: &str) -> bool {
        if !self.node_index.contains_key(source) || !self.node_index.contains_key(target) {
            return false;
        }
        self.edges.push(CanonicalEdge {
            source: source.to_string(),
            target: target.to_string(),
            relationship: relationship.to_string(),
        });
        true
    }

    pub fn node(&self, id: &str) -> Option<&CanonicalNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn nodes(&self) -> &[CanonicalNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CanonicalEdge] {
        &self.edges
    }

    pub fn root(&self) -> Option<&CanonicalNode> {
        self.nodes.iter().find(|n| n.is_root)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
