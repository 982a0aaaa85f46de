pub mod canonical;
pub mod export;
pub mod mode;
pub mod normalizer;
pub mod projection;
pub mod shape;

pub use canonical::{CanonicalEdge, CanonicalGraph, CanonicalNode};
pub use mode::ExtractionMode;
pub use normalizer::normalize;
pub use shape::{TermEntry, TreeNode, TypedEdge, TypedGraph, TypedNode, ValidatedShape};
