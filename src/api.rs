//! HTTP surface for Rusty Summary.
//!
//! - `GET /` – Upload form.
//! - `POST /upload` – Multipart upload (field `file`). The PDF is stored, its text extracted and
//!   summarized, and a result page rendered. A missing file field or an empty filename redirects
//!   back to `/` without touching storage or the model.
//! - `GET /metrics` – Summarization counters as JSON.
//!
//! Each upload is processed start to finish inside the request; there is no background queue.

use crate::metrics::MetricsSnapshot;
use crate::pages;
use crate::processing::{
    ProcessingApi, ProcessingError, UploadedDocument, sanitize::storage_filename,
};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tracing::Instrument;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

/// Build the HTTP router. `max_upload_bytes` caps the request body; `None` removes the limit.
pub fn create_router<S>(service: Arc<S>, max_upload_bytes: Option<usize>) -> Router
where
    S: ProcessingApi + 'static,
{
    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload_file::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(body_limit)
        .with_state(service)
}

async fn index() -> impl IntoResponse {
    pages::render_index()
}

/// Accept an upload and render its summary.
async fn upload_file<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError>
where
    S: ProcessingApi,
{
    let Ok(multipart) = multipart else {
        tracing::debug!("Upload without a multipart body; redirecting to form");
        return Ok(Redirect::to("/").into_response());
    };
    let Some(upload) = read_file_field(multipart).await? else {
        tracing::debug!("Upload without a file; redirecting to form");
        return Ok(Redirect::to("/").into_response());
    };

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("upload", %request_id, filename = %upload.filename);
    let display_name = storage_filename(&upload.filename);

    match service.summarize_upload(upload).instrument(span).await {
        Ok(report) => {
            tracing::info!(
                %request_id,
                stored = %report.stored_path.display(),
                strategy = report.summary.strategy.as_str(),
                "Upload summarized"
            );
            Ok(pages::render_result(&report).into_response())
        }
        Err(ProcessingError::Extraction(error)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            pages::render_failure(&display_name, &error.to_string()),
        )
            .into_response()),
        Err(error) => Err(error.into()),
    }
}

/// Pull the `file` field out of the form. Returns `None` when it is absent or has no filename.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadedDocument>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::BadRequest(format!("Failed to read form field: {error}")))?
    {
        if field.name() != Some(FILE_FIELD) || upload.is_some() {
            // Drain unrelated fields.
            field.bytes().await.map_err(|error| {
                AppError::BadRequest(format!("Failed to read form field: {error}"))
            })?;
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|error| AppError::BadRequest(format!("Failed to read file data: {error}")))?;
        upload = Some(UploadedDocument {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Ok(upload.filter(|upload| !upload.filename.is_empty()))
}

/// Return the summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: ProcessingApi,
{
    Json(service.metrics_snapshot())
}

enum AppError {
    BadRequest(String),
    Processing(ProcessingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Processing(error) => {
                tracing::error!(%error, "Upload processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
            }
        }
    }
}

impl From<ProcessingError> for AppError {
    fn from(inner: ProcessingError) -> Self {
        Self::Processing(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::extraction::ExtractionError;
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{
        LengthBounds, ProcessingApi, ProcessingError, SummaryReport, SummaryStrategy, TextSummary,
        UploadedDocument,
    };
    use crate::summarization::SummarizationClientError;
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-TEST-BOUNDARY";

    #[derive(Clone, Copy)]
    enum StubOutcome {
        Summary,
        ExtractionFailure,
        ModelFailure,
    }

    struct StubProcessingService {
        calls: Mutex<Vec<UploadedDocument>>,
        outcome: StubOutcome,
    }

    impl StubProcessingService {
        fn new(outcome: StubOutcome) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome,
            })
        }

        async fn recorded_calls(&self) -> Vec<UploadedDocument> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl ProcessingApi for StubProcessingService {
        async fn summarize_upload(
            &self,
            upload: UploadedDocument,
        ) -> Result<SummaryReport, ProcessingError> {
            let filename = upload.filename.clone();
            self.calls.lock().await.push(upload);
            match self.outcome {
                StubOutcome::Summary => Ok(SummaryReport {
                    stored_path: format!("uploads/{filename}").into(),
                    filename,
                    summary: TextSummary {
                        summary: "A short <b>summary</b>.".into(),
                        strategy: SummaryStrategy::Short,
                        input_words: 2,
                        bounds: Some(LengthBounds {
                            min_length: 10,
                            max_length: 25,
                        }),
                        model_invocations: 1,
                    },
                }),
                StubOutcome::ExtractionFailure => {
                    Err(ExtractionError::Parse("bad xref".into()).into())
                }
                StubOutcome::ModelFailure => {
                    Err(SummarizationClientError::GenerationFailed("model down".into()).into())
                }
            }
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                documents_summarized: 3,
                chunks_summarized: 9,
                extraction_failures: 1,
                last_chunk_count: Some(4),
            }
        }
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_upload(app: Router, body: Vec<u8>) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("router response")
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn assert_redirects_to_index(response: &axum::response::Response) {
        assert!(response.status().is_redirection(), "{}", response.status());
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );
    }

    #[tokio::test]
    async fn index_renders_upload_form() {
        let app = create_router(StubProcessingService::new(StubOutcome::Summary), None);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"name="file""#));
    }

    #[tokio::test]
    async fn upload_renders_escaped_summary() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), None);

        let response = post_upload(
            app,
            multipart_body(&[
                ("note", None, b"ignored"),
                ("file", Some("report.pdf"), b"%PDF-1.4 bytes"),
            ]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("A short &lt;b&gt;summary&lt;/b&gt;."));
        assert!(page.contains("report.pdf"));

        let calls = service.recorded_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].filename, "report.pdf");
        assert_eq!(calls[0].bytes, b"%PDF-1.4 bytes");
    }

    #[tokio::test]
    async fn missing_file_field_redirects_without_processing() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), None);

        let response = post_upload(app, multipart_body(&[("note", None, b"hello")])).await;

        assert_redirects_to_index(&response);
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn empty_filename_redirects_without_processing() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), None);

        let response = post_upload(app, multipart_body(&[("file", Some(""), b"")])).await;

        assert_redirects_to_index(&response);
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn non_multipart_post_redirects() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/upload")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_redirects_to_index(&response);
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn extraction_failure_renders_error_page() {
        let app = create_router(StubProcessingService::new(StubOutcome::ExtractionFailure), None);

        let response =
            post_upload(app, multipart_body(&[("file", Some("broken.pdf"), b"junk")])).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let page = body_text(response).await;
        assert!(page.contains("Error reading PDF: bad xref"));
    }

    #[tokio::test]
    async fn extraction_failure_page_shows_the_sanitized_filename() {
        let app = create_router(StubProcessingService::new(StubOutcome::ExtractionFailure), None);

        let response = post_upload(
            app,
            multipart_body(&[("file", Some("../{{ summary }}.pdf"), b"junk")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let page = body_text(response).await;
        assert!(page.contains("<title>Summary of summary_.pdf</title>"));
        assert!(!page.contains("{{"));
        assert_eq!(page.matches("Error reading PDF: bad xref").count(), 1);
    }

    #[tokio::test]
    async fn truncated_unrelated_field_is_a_bad_request() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), None);
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nunterminated"
        );

        let response = post_upload(app, body.into_bytes()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_a_server_error() {
        let app = create_router(StubProcessingService::new(StubOutcome::ModelFailure), None);

        let response =
            post_upload(app, multipart_body(&[("file", Some("doc.pdf"), b"%PDF")])).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("model down"));
    }

    #[tokio::test]
    async fn body_limit_is_enforced_when_configured() {
        let service = StubProcessingService::new(StubOutcome::Summary);
        let app = create_router(service.clone(), Some(64));

        let response = post_upload(
            app,
            multipart_body(&[("file", Some("big.pdf"), &[b'x'; 4096])]),
        )
        .await;

        assert!(response.status().is_client_error(), "{}", response.status());
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn metrics_endpoint_serializes_snapshot() {
        let app = create_router(StubProcessingService::new(StubOutcome::Summary), None);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json body");
        assert_eq!(json["documents_summarized"], 3);
        assert_eq!(json["chunks_summarized"], 9);
        assert_eq!(json["last_chunk_count"], 4);
    }
}
