//! Document processing pipeline: storage, length planning, chunking, and summarization.

pub mod chunking;
pub mod planner;
pub mod sanitize;
mod service;
pub mod storage;
pub mod summarize;
pub mod types;

pub use planner::LengthBounds;
pub use service::{ProcessingApi, ProcessingService};
pub use storage::UploadStore;
pub use summarize::{EMPTY_TEXT_SUMMARY, summarize_text};
pub use types::{
    ProcessingError, StorageError, SummaryReport, SummaryStrategy, TextSummary, UploadedDocument,
};
