#![deny(missing_docs)]

//! Core library for the Rusty Summary PDF summarization service.

/// HTTP routing and upload handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// PDF text extraction.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization counters.
pub mod metrics;
/// HTML pages for the upload form and results.
pub mod pages;
/// Upload storage, length planning, chunking, and summarization.
pub mod processing;
/// Summarization model clients.
pub mod summarization;
