use std::sync::atomic::{AtomicU64, Ordering};

use crate::processing::TextSummary;

/// Sentinel meaning "no document summarized yet".
const NO_CHUNK_COUNT: u64 = u64::MAX;

/// Thread-safe counters describing summarization activity.
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    chunks_summarized: AtomicU64,
    extraction_failures: AtomicU64,
    last_chunk_count: AtomicU64,
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        Self {
            documents_summarized: AtomicU64::new(0),
            chunks_summarized: AtomicU64::new(0),
            extraction_failures: AtomicU64::new(0),
            last_chunk_count: AtomicU64::new(NO_CHUNK_COUNT),
        }
    }
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a summarized document. Every model call covers one chunk, so an unchunked
    /// document counts as one chunk and an empty one as none.
    pub fn record_summary(&self, summary: &TextSummary) {
        let chunks = summary.model_invocations as u64;
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized.fetch_add(chunks, Ordering::Relaxed);
        self.last_chunk_count.store(chunks, Ordering::Relaxed);
    }

    /// Record a document whose text could not be extracted.
    pub fn record_extraction_failure(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let last = self.last_chunk_count.load(Ordering::Relaxed);
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            last_chunk_count: (last != NO_CHUNK_COUNT).then_some(last),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents summarized since startup (including empty ones).
    pub documents_summarized: u64,
    /// Chunks sent to the model, equal to the number of model calls.
    pub chunks_summarized: u64,
    /// Uploads rejected because their text could not be extracted.
    pub extraction_failures: u64,
    /// Chunk count of the most recent document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_chunk_count: Option<u64>,
}
