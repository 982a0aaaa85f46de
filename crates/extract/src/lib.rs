pub mod llm;
pub mod prompt;
pub mod salvage;
pub mod validate;

pub use llm::{ModelClient, ModelError, OllamaClient};
pub use validate::{DEFAULT_MAX_TERMS, ShapeError};

use graph::canonical::CanonicalGraph;
use graph::mode::ExtractionMode;
use graph::normalizer;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// How much of the document feeds the title prompt.
const TITLE_CHUNK_WORDS: usize = 1000;
const MAX_TITLE_WORDS: usize = 8;
const FALLBACK_TITLE: &str = "Untitled Document";

/// Per-mode extraction outcome. Always a value, never a panic: one mode
/// failing must not disturb its siblings.
#[derive(Debug, Clone, Error)]
pub enum ExtractionFailure {
    /// Collaborator-boundary failure (transport, timeout, quota). The
    /// orchestrator does not retry; callers may wrap it in a retry policy.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// Salvage, validation, or normalization could not recover a shape.
    /// Raw model output is kept for diagnostics.
    #[error("malformed model output for {mode}: {reason}")]
    MalformedOutput {
        mode: ExtractionMode,
        reason: String,
        raw: String,
    },
}

impl ExtractionFailure {
    /// Only collaborator failures are worth retrying; malformed output
    /// would fail identically on replay.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractionFailure::ModelUnavailable(_))
    }
}

/// One orchestrator for every extraction mode: builds the mode's prompt,
/// calls the model, then runs salvage -> validate -> normalize.
pub struct Extractor {
    client: Arc<dyn ModelClient>,
    max_terms: usize,
}

impl Extractor {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            max_terms: DEFAULT_MAX_TERMS,
        }
    }

    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Extract one mode's canonical graph from document text.
    /// A non-empty `root_label` names the synthetic concept-star root or
    /// overrides a tree's own root name; pass "" to keep the model-given
    /// name. Typed graphs ignore it.
    pub async fn extract(
        &self,
        document_text: &str,
        mode: ExtractionMode,
        root_label: &str,
    ) -> Result<CanonicalGraph, ExtractionFailure> {
        let prompt = prompt::build_prompt(mode, document_text, self.max_terms);
        let raw = self
            .client
            .generate(&prompt)
            .await
            .map_err(|e| ExtractionFailure::ModelUnavailable(e.to_string()))?;

        let Some(value) = salvage::salvage_json(&raw, mode.expects_array()) else {
            warn!(%mode, raw_len = raw.len(), "no parseable JSON in model output");
            return Err(malformed(mode, "no parseable JSON in model output", raw));
        };
        let shape = match validate::validate(&value, mode, self.max_terms) {
            Ok(shape) => shape,
            Err(e) => {
                warn!(%mode, reason = %e.reason, "shape validation failed");
                return Err(malformed(mode, &e.reason, raw));
            }
        };
        let graph = normalizer::normalize(&shape, root_label);
        debug!(
            %mode,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "extraction complete"
        );
        Ok(graph)
    }

    /// Short root-node title from the document's leading chunk. Never
    /// fails: any model problem or useless answer falls back to
    /// "Untitled Document".
    pub async fn document_title(&self, document_text: &str) -> String {
        let chunk = document_text
            .split_whitespace()
            .take(TITLE_CHUNK_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        let prompt = prompt::build_title_prompt(&chunk, MAX_TITLE_WORDS);
        match self.client.generate(&prompt).await {
            Ok(raw) => clean_title(&raw),
            Err(e) => {
                warn!(error = %e, "title request failed, using fallback");
                FALLBACK_TITLE.to_string()
            }
        }
    }
}

fn malformed(mode: ExtractionMode, reason: &str, raw: String) -> ExtractionFailure {
    ExtractionFailure::MalformedOutput {
        mode,
        reason: reason.to_string(),
        raw,
    }
}

fn clean_title(raw: &str) -> String {
    let first_line = raw.trim().lines().next().unwrap_or_default();
    // Models like to wrap short answers in quotes or markdown emphasis.
    let trim = Regex::new(r#"^["'*#\s]+|["'*\s]+$"#).unwrap();
    let stripped = trim.replace_all(first_line, "");
    let title = stripped
        .split_whitespace()
        .take(MAX_TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() || title.to_lowercase().contains("please provide") {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}
