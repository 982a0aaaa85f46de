use serde::{Deserialize, Serialize};

/// One glossary entry from a concept-list extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub tooltip: String,
}

/// One node of a validated hierarchy or argument tree. Depth is unbounded
/// in principle; the prompts ask for at most three or four levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedNode {
    pub id: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedEdge {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

/// An explicit node/edge graph as the model emits it. Edges may still
/// reference unknown node ids at this point; the cross-reference check is
/// deferred to normalization, where dangling edges are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedGraph {
    pub nodes: Vec<TypedNode>,
    #[serde(default)]
    pub edges: Vec<TypedEdge>,
}

/// Output of shape validation: one of the three recognized shapes,
/// with optional fields already coerced to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatedShape {
    TermList(Vec<TermEntry>),
    Tree(TreeNode),
    TypedGraph(TypedGraph),
}

impl TreeNode {
    /// Total node count, this node included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}
