use graph::mode::ExtractionMode;
use graph::shape::{TermEntry, TreeNode, TypedEdge, TypedGraph, TypedNode, ValidatedShape};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Cap on concept-list length, matching the prompt's "up to N terms".
pub const DEFAULT_MAX_TERMS: usize = 16;

/// Wrong top-level shape for the mode. Recoverable: callers treat it like
/// a failed salvage.
#[derive(Debug, Clone, Error)]
#[error("invalid {mode} shape: {reason}")]
pub struct ShapeError {
    pub mode: ExtractionMode,
    pub reason: String,
}

impl ShapeError {
    fn new(mode: ExtractionMode, reason: impl Into<String>) -> Self {
        Self {
            mode,
            reason: reason.into(),
        }
    }
}

/// Check a parsed value against the mode's expected shape and coerce
/// optional fields.
///
/// Element-level problems (a list entry missing a field, a child that is
/// not an object, a node without an id) drop the element and keep the
/// rest; only a wrong top-level shape fails the whole value.
pub fn validate(
    value: &Value,
    mode: ExtractionMode,
    max_terms: usize,
) -> Result<ValidatedShape, ShapeError> {
    match mode {
        ExtractionMode::ConceptList => validate_term_list(value, mode, max_terms),
        ExtractionMode::HierarchyTree | ExtractionMode::ArgumentTree => {
            validate_tree(value, mode)
        }
        ExtractionMode::EntityGraph | ExtractionMode::StakeholderGraph => {
            validate_typed_graph(value, mode)
        }
    }
}

fn validate_term_list(
    value: &Value,
    mode: ExtractionMode,
    max_terms: usize,
) -> Result<ValidatedShape, ShapeError> {
    let items = value
        .as_array()
        .ok_or_else(|| ShapeError::new(mode, format!("expected a JSON array, got {}", kind(value))))?;

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let (Some(term), Some(tooltip)) = (
            obj.get("term").and_then(Value::as_str),
            obj.get("tooltip").and_then(Value::as_str),
        ) else {
            continue;
        };
        // First occurrence wins; later duplicates dropped.
        if !seen.insert(term.to_string()) {
            continue;
        }
        terms.push(TermEntry {
            term: term.to_string(),
            tooltip: tooltip.to_string(),
        });
        if terms.len() == max_terms {
            break;
        }
    }
    Ok(ValidatedShape::TermList(terms))
}

fn validate_tree(value: &Value, mode: ExtractionMode) -> Result<ValidatedShape, ShapeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ShapeError::new(mode, format!("expected a JSON object, got {}", kind(value))))?;
    let root = tree_node(obj)
        .ok_or_else(|| ShapeError::new(mode, "root node has no non-empty \"name\""))?;
    Ok(ValidatedShape::Tree(root))
}

/// Recursive node rule: non-empty `name` required, `tooltip`/`type`
/// default empty, non-object or nameless children dropped.
fn tree_node(obj: &serde_json::Map<String, Value>) -> Option<TreeNode> {
    let name = obj.get("name").and_then(Value::as_str)?;
    if name.is_empty() {
        return None;
    }
    let tooltip = obj
        .get("tooltip")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let node_type = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    let children = obj
        .get("children")
        .and_then(Value::as_array)
        .map(|kids| {
            kids.iter()
                .filter_map(Value::as_object)
                .filter_map(tree_node)
                .collect()
        })
        .unwrap_or_default();
    Some(TreeNode {
        name: name.to_string(),
        tooltip: tooltip.to_string(),
        node_type: node_type.to_string(),
        children,
    })
}

fn validate_typed_graph(value: &Value, mode: ExtractionMode) -> Result<ValidatedShape, ShapeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ShapeError::new(mode, format!("expected a JSON object, got {}", kind(value))))?;
    let raw_nodes = obj
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| ShapeError::new(mode, "missing \"nodes\" array"))?;

    let nodes = raw_nodes
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|node| {
            let id = node.get("id").and_then(Value::as_str)?;
            Some(TypedNode {
                id: id.to_string(),
                node_type: node
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                role: node
                    .get("role")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                description: node
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect();

    // Edges keep dangling references here; the cross-reference check runs
    // during normalization.
    let edges = obj
        .get("edges")
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(Value::as_object)
                .filter_map(|edge| {
                    Some(TypedEdge {
                        source: edge.get("source").and_then(Value::as_str)?.to_string(),
                        target: edge.get("target").and_then(Value::as_str)?.to_string(),
                        relationship: edge
                            .get("relationship")
                            .and_then(Value::as_str)?
                            .to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ValidatedShape::TypedGraph(TypedGraph { nodes, edges }))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
