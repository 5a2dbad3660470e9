use crate::input::Manuscript;
use crate::server::word_counts_value;
use crate::state::AppState;
use crate::text::align_sentences;
use crate::utils::AnalyzerError;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CountWordsRequest {
    pub text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AlignRequest {
    pub original: String,
    pub translated: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/analyze", post(analyze_handler))
        .route("/upload", post(upload_handler))
        .route("/words", post(count_words_handler))
        .route("/align", post(align_handler))
        .with_state(state)
}

pub async fn serve(state: AppState, bind_addr: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 HTTP Server listening on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  GET  /info    - Server info");
    tracing::info!("  POST /analyze - Analyze Spanish text");
    tracing::info!("  POST /upload  - Analyze an uploaded .txt/.csv/.md file");
    tracing::info!("  POST /words   - Word frequencies");
    tracing::info!("  POST /align   - Sentence alignment");
    tracing::info!("");
    tracing::info!("Example:");
    tracing::info!(
        "  curl -X POST http://{}/analyze -H 'Content-Type: application/json' -d '{{\"text\": \"El gato corre.\"}}'",
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "escrutador",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn info() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "escrutador",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Literary text analyzer - HTTP Mode",
        "endpoints": {
            "GET /health": "Health check",
            "GET /info": "Server info",
            "POST /analyze": "Analyze text: {\"text\": \"...\"}",
            "POST /upload?file_name=NAME": "Analyze raw file bytes (.txt, .csv, .md; UTF-8)",
            "POST /words": "Word frequencies: {\"text\": \"...\", \"top_n\": 10}",
            "POST /align": "Sentence pairs: {\"original\": \"...\", \"translated\": \"...\"}"
        }
    }))
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    respond(&state, Manuscript::typed(payload.text)).await
}

pub async fn upload_handler(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> impl IntoResponse {
    match Manuscript::from_upload(&query.file_name, body.to_vec()) {
        Ok(manuscript) => respond(&state, manuscript).await,
        Err(e) => {
            tracing::warn!(file_name = %query.file_name, error = %e, "Rejected upload");
            error_response(e)
        }
    }
}

pub async fn count_words_handler(
    State(state): State<AppState>,
    Json(payload): Json<CountWordsRequest>,
) -> impl IntoResponse {
    let value = word_counts_value(state.analyzer.counter(), &payload.text, payload.top_n);
    (StatusCode::OK, Json(value))
}

pub async fn align_handler(Json(payload): Json<AlignRequest>) -> impl IntoResponse {
    let pairs = align_sentences(&payload.original, &payload.translated);
    (StatusCode::OK, Json(serde_json::json!({ "pairs": pairs })))
}

async fn respond(state: &AppState, manuscript: Manuscript) -> (StatusCode, Json<serde_json::Value>) {
    match state.analyze(&manuscript).await {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(value) => (StatusCode::OK, Json(value)),
            Err(e) => error_response(AnalyzerError::JsonError(e)),
        },
        Err(e) => error_response(e),
    }
}

fn error_response(e: AnalyzerError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        AnalyzerError::EmptyInput
        | AnalyzerError::UnsupportedFile(_)
        | AnalyzerError::FileDecodeError { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({"error": e.to_string()})))
}
