pub mod reader;

pub use reader::FileReader;

use sha2::{Digest, Sha256};

/// Content fingerprint of a document's raw bytes.
///
/// This is the cache key for every derived artifact (text, title, graphs).
/// It is computed over the bytes alone, never filename or metadata, so the
/// same document uploaded under two names hits the same cache slot.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// A document as seen at the text-source boundary: raw-byte fingerprint
/// plus decoded plain text.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub fingerprint: String,
    pub text: String,
}

/// Accept an already-uploaded byte payload as a document.
///
/// Decoding is lossy on purpose: the generative model downstream tolerates
/// replacement characters far better than the pipeline tolerates a hard
/// decode failure.
pub fn ingest_bytes(bytes: &[u8]) -> SourceDocument {
    SourceDocument {
        fingerprint: fingerprint(bytes),
        text: String::from_utf8_lossy(bytes).into_owned(),
    }
}
