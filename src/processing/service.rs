//! Processing service coordinating upload storage, extraction, and summarization.

use crate::{
    extraction::extract_text_from_pdf,
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::{
        sanitize::storage_filename,
        storage::UploadStore,
        summarize::summarize_text,
        types::{ProcessingError, SummaryReport, TextSummary, UploadedDocument},
    },
    summarization::SummarizationModel,
};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Runs one upload through storage, extraction, and the chunking summarizer.
///
/// The model client is constructed by the caller (normally once at startup) and shared through
/// an `Arc`, so tests can substitute a stub. Requests are independent; the only shared state is
/// the model, the upload directory, and the metrics counters.
pub struct ProcessingService {
    model: Arc<dyn SummarizationModel>,
    store: UploadStore,
    metrics: Arc<SummaryMetrics>,
}

/// Abstraction over the processing pipeline used by the HTTP surface.
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// Persist, extract, and summarize an uploaded document.
    async fn summarize_upload(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryReport, ProcessingError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl ProcessingService {
    /// Build a service around `model`, creating the upload directory if it is missing.
    pub fn new(
        model: Arc<dyn SummarizationModel>,
        store: UploadStore,
    ) -> Result<Self, ProcessingError> {
        store.ensure_exists()?;
        tracing::debug!(upload_dir = %store.root().display(), "Upload directory ready");
        Ok(Self {
            model,
            store,
            metrics: Arc::new(SummaryMetrics::new()),
        })
    }

    /// Extract and summarize a PDF that is already on disk.
    pub async fn summarize_file(&self, path: &Path) -> Result<TextSummary, ProcessingError> {
        let owned = path.to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extract_text_from_pdf(&owned)).await?;
        let text = match extracted {
            Ok(text) => text,
            Err(error) => {
                self.metrics.record_extraction_failure();
                tracing::warn!(path = %path.display(), %error, "PDF extraction failed");
                return Err(error.into());
            }
        };

        let summary = summarize_text(self.model.as_ref(), &text).await?;
        self.metrics.record_summary(&summary);
        tracing::info!(
            path = %path.display(),
            strategy = summary.strategy.as_str(),
            input_words = summary.input_words,
            model_invocations = summary.model_invocations,
            "Summarized document"
        );
        Ok(summary)
    }
}

#[async_trait]
impl ProcessingApi for ProcessingService {
    async fn summarize_upload(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryReport, ProcessingError> {
        let filename = storage_filename(&upload.filename);
        let stored_path = self.store.persist(&filename, &upload.bytes).await?;
        let summary = self.summarize_file(&stored_path).await?;
        Ok(SummaryReport {
            filename,
            stored_path,
            summary,
        })
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
