use extract::ExtractionFailure;
use graph::canonical::CanonicalGraph;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct Metrics {
    documents_processed: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
    extractions_succeeded: AtomicUsize,
    extractions_malformed: AtomicUsize,
    model_unavailable: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            documents_processed: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            extractions_succeeded: AtomicUsize::new(0),
            extractions_malformed: AtomicUsize::new(0),
            model_unavailable: AtomicUsize::new(0),
        })
    }

    pub fn record_document(&self, cache_hit: bool) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
        if cache_hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_extraction(&self, result: &Result<CanonicalGraph, ExtractionFailure>) {
        match result {
            Ok(_) => self.extractions_succeeded.fetch_add(1, Ordering::Relaxed),
            Err(ExtractionFailure::ModelUnavailable(_)) => {
                self.model_unavailable.fetch_add(1, Ordering::Relaxed)
            }
            Err(ExtractionFailure::MalformedOutput { .. }) => {
                self.extractions_malformed.fetch_add(1, Ordering::Relaxed)
            }
        };
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            extractions_succeeded: self.extractions_succeeded.load(Ordering::Relaxed),
            extractions_malformed: self.extractions_malformed.load(Ordering::Relaxed),
            model_unavailable: self.model_unavailable.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub documents_processed: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub extractions_succeeded: usize,
    pub extractions_malformed: usize,
    pub model_unavailable: usize,
}
