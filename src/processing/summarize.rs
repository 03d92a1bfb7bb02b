//! Chunking summarizer: decides how extracted text is fed to the model and combines the
//! partial results.
//!
//! Branches, in priority order:
//!
//! 1. Empty or whitespace-only text returns [`EMPTY_TEXT_SUMMARY`] without calling the model.
//! 2. Short text (at most 50 words) is summarized once with the fixed short-input bounds.
//! 3. Text longer than [`CHUNK_CHARS`] characters is cut into fixed windows; each window is
//!    summarized in source order with the whole-document bounds and the results are joined with
//!    single spaces.
//! 4. Anything else is summarized once with the planned bounds.
//!
//! A model failure aborts the whole document. Nothing is retried and no partial result is kept.

use crate::summarization::{SummarizationModel, SummarizationRequest};

use super::chunking::{CHUNK_CHARS, chunk_by_chars, needs_chunking};
use super::planner::{
    LengthBounds, SHORT_INPUT_BOUNDS, SHORT_INPUT_WORDS, plan_length_bounds, word_count,
};
use super::types::{ProcessingError, SummaryStrategy, TextSummary};

/// Returned when the document contains no extractable text.
pub const EMPTY_TEXT_SUMMARY: &str = "No text found in the PDF.";

/// Summarize `text` with `model`, selecting the strategy from its size.
pub async fn summarize_text(
    model: &dyn SummarizationModel,
    text: &str,
) -> Result<TextSummary, ProcessingError> {
    if text.trim().is_empty() {
        tracing::info!("No text to summarize");
        return Ok(TextSummary {
            summary: EMPTY_TEXT_SUMMARY.to_string(),
            strategy: SummaryStrategy::Empty,
            input_words: 0,
            bounds: None,
            model_invocations: 0,
        });
    }

    let input_words = word_count(text);
    let planned = plan_length_bounds(input_words);
    tracing::debug!(
        input_words,
        max_length = planned.max_length,
        min_length = planned.min_length,
        "Planned summary length"
    );

    if input_words <= SHORT_INPUT_WORDS {
        let summary = invoke(model, text, SHORT_INPUT_BOUNDS).await?;
        return Ok(TextSummary {
            summary,
            strategy: SummaryStrategy::Short,
            input_words,
            bounds: Some(SHORT_INPUT_BOUNDS),
            model_invocations: 1,
        });
    }

    if needs_chunking(text) {
        let chunks = chunk_by_chars(text, CHUNK_CHARS);
        tracing::info!(chunks = chunks.len(), input_words, "Summarizing in chunks");
        let mut partials = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::debug!(index, chars = chunk.chars().count(), "Summarizing chunk");
            partials.push(invoke(model, chunk, planned).await?);
        }
        return Ok(TextSummary {
            summary: partials.join(" "),
            strategy: SummaryStrategy::Chunked,
            input_words,
            bounds: Some(planned),
            model_invocations: chunks.len(),
        });
    }

    let summary = invoke(model, text, planned).await?;
    Ok(TextSummary {
        summary,
        strategy: SummaryStrategy::Single,
        input_words,
        bounds: Some(planned),
        model_invocations: 1,
    })
}

async fn invoke(
    model: &dyn SummarizationModel,
    text: &str,
    bounds: LengthBounds,
) -> Result<String, ProcessingError> {
    let summary = model
        .summarize(SummarizationRequest {
            text: text.to_string(),
            max_length: bounds.max_length,
            min_length: bounds.min_length,
            do_sample: false,
        })
        .await?;
    Ok(summary)
}
