//! Core data types and error definitions for the processing pipeline.

use crate::extraction::ExtractionError;
use crate::summarization::SummarizationClientError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use super::planner::LengthBounds;

/// Errors raised while persisting uploads.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Upload directory could not be created.
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        /// Directory we attempted to create.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Upload bytes could not be written.
    #[error("failed to write upload {path}: {source}")]
    Write {
        /// File we attempted to write.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted by the document processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Upload could not be stored.
    #[error("Failed to store upload: {0}")]
    Storage(#[from] StorageError),
    /// PDF could not be turned into text.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Summarization model failed; the whole document is abandoned.
    #[error("Summarization failed: {0}")]
    Summarization(#[from] SummarizationClientError),
    /// Blocking extraction task was cancelled or panicked.
    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Filename as supplied by the client, before sanitization.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Branch taken by the chunking summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStrategy {
    /// No text; sentinel returned.
    Empty,
    /// Short input summarized once with fixed bounds.
    Short,
    /// Single invocation with planned bounds.
    Single,
    /// Fixed-width chunks summarized independently and joined.
    Chunked,
}

impl SummaryStrategy {
    /// Lowercase label used in logs and on the result page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Short => "short",
            Self::Single => "single",
            Self::Chunked => "chunked",
        }
    }
}

/// Summary of a block of text together with the decisions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSummary {
    /// Final summary text.
    pub summary: String,
    /// Branch taken.
    pub strategy: SummaryStrategy,
    /// Whitespace-delimited token count of the input.
    pub input_words: usize,
    /// Bounds passed to the model, absent when it was not invoked.
    pub bounds: Option<LengthBounds>,
    /// Number of model calls (equal to the chunk count for chunked input).
    pub model_invocations: usize,
}

/// Outcome of processing one uploaded document.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Sanitized filename the upload was stored under.
    pub filename: String,
    /// Location of the stored upload.
    pub stored_path: PathBuf,
    /// Summary and strategy details.
    pub summary: TextSummary,
}
