use crate::metrics::Metrics;
use crate::retry::RetryPolicy;
use dashmap::DashMap;
use extract::{ExtractionFailure, Extractor};
use graph::canonical::CanonicalGraph;
use graph::mode::ExtractionMode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Everything derived from one uploaded document. Created whole when a new
/// fingerprint is first seen; the `graphs` map fills in mode-by-mode as
/// extraction completes. Replaced whole, never partially cleared.
pub struct DocumentRecord {
    pub fingerprint: String,
    pub title: String,
    pub text: String,
    /// Per-mode outcome. Each mode writes exactly one slot, so concurrent
    /// mode tasks never share mutable state beyond this map.
    pub graphs: DashMap<ExtractionMode, Result<CanonicalGraph, ExtractionFailure>>,
}

pub struct EnsureOutcome {
    pub record: Arc<DocumentRecord>,
    /// False when the fingerprint matched the cached record (cache hit).
    pub recomputed: bool,
}

/// Single-slot cache of per-document derived artifacts, keyed by content
/// fingerprint. Only one document's artifacts are retained at a time; a
/// new fingerprint discards the old record entirely. Deliberately not an
/// LRU.
pub struct DocumentCache {
    slot: RwLock<Option<Arc<DocumentRecord>>>,
    extractor: Arc<Extractor>,
    retry: Arc<RetryPolicy>,
    metrics: Arc<Metrics>,
}

impl DocumentCache {
    pub fn new(extractor: Arc<Extractor>, retry: RetryPolicy, metrics: Arc<Metrics>) -> Self {
        Self {
            slot: RwLock::new(None),
            extractor,
            retry: Arc::new(retry),
            metrics,
        }
    }

    /// Current record, whatever document it belongs to.
    pub async fn current(&self) -> Option<Arc<DocumentRecord>> {
        self.slot.read().await.clone()
    }

    /// Record for exactly these document bytes, if cached.
    pub async fn get(&self, bytes: &[u8]) -> Option<Arc<DocumentRecord>> {
        self.matching(&ingest::fingerprint(bytes)).await
    }

    /// Fingerprint the bytes; on a hit return the cached record untouched
    /// (filling any requested modes it does not have yet), on a miss
    /// replace the slot wholesale and extract every requested mode.
    ///
    /// The slot swap happens under the write lock, so readers never see a
    /// half-built record for a different document. Two racing uploads of
    /// the same bytes may both compute; that is wasteful but safe, and the
    /// loser's record is simply not installed.
    pub async fn ensure(&self, bytes: &[u8], modes: &[ExtractionMode]) -> EnsureOutcome {
        let fingerprint = ingest::fingerprint(bytes);

        if let Some(record) = self.matching(&fingerprint).await {
            self.populate(&record, modes).await;
            return EnsureOutcome {
                record,
                recomputed: false,
            };
        }

        // Build the new record outside the lock; the model call for the
        // title can take seconds and readers should not wait on it.
        let document = ingest::ingest_bytes(bytes);
        let title = self.extractor.document_title(&document.text).await;
        let record = Arc::new(DocumentRecord {
            fingerprint: document.fingerprint,
            title,
            text: document.text,
            graphs: DashMap::new(),
        });

        {
            let mut slot = self.slot.write().await;
            if let Some(existing) = slot.as_ref() {
                if existing.fingerprint == record.fingerprint {
                    // A racing upload of the same bytes won; use its record.
                    let existing = Arc::clone(existing);
                    drop(slot);
                    self.populate(&existing, modes).await;
                    return EnsureOutcome {
                        record: existing,
                        recomputed: false,
                    };
                }
                info!(
                    old = %existing.fingerprint,
                    new = %record.fingerprint,
                    "document changed, discarding cached record"
                );
            }
            *slot = Some(Arc::clone(&record));
        }

        self.populate(&record, modes).await;
        EnsureOutcome {
            record,
            recomputed: true,
        }
    }

    async fn matching(&self, fingerprint: &str) -> Option<Arc<DocumentRecord>> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|record| record.fingerprint == fingerprint)
            .cloned()
    }

    /// Run extraction for every mode the record is missing, one task per
    /// mode. Each task writes only its own map slot.
    async fn populate(&self, record: &Arc<DocumentRecord>, modes: &[ExtractionMode]) {
        let mut handles = Vec::new();
        for &mode in modes {
            if record.graphs.contains_key(&mode) {
                continue;
            }
            let extractor = Arc::clone(&self.extractor);
            let retry = Arc::clone(&self.retry);
            let metrics = Arc::clone(&self.metrics);
            let record = Arc::clone(record);
            handles.push(tokio::spawn(async move {
                // Only the concept star adopts the document title as its
                // root; trees keep the root name the model gave them.
                let root_label = if mode == ExtractionMode::ConceptList {
                    record.title.clone()
                } else {
                    String::new()
                };
                let result = retry
                    .retry_if(
                        mode.as_str(),
                        || extractor.extract(&record.text, mode, &root_label),
                        ExtractionFailure::is_transient,
                    )
                    .await;
                metrics.record_extraction(&result);
                record.graphs.insert(mode, result);
            }));
        }
        for handle in handles {
            // A panicked mode task loses only its own slot.
            let _ = handle.await;
        }
    }
}
