//! Question answering endpoint
//!
//! - POST /ask - Answer a question from the current document

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// 1..=1000 characters
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub question: String,
    pub answer: String,
    pub document_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ask", post(ask_question))
}

/// POST /ask
async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!("Rejected ask payload: {}", e);
        state.reject(AppError::Validation(e.body_text()))
    })?;

    if !state.answers().has_credential() {
        return Err(state.reject(AppError::Configuration(
            "Groq API key is not configured. Please set the GROQ_API_KEY environment variable."
                .to_string(),
        )));
    }

    // The current document may change after this read; last upload wins
    let document = state
        .store()
        .get_current()
        .await
        .ok_or_else(|| state.reject(AppError::NoDocument))?;

    let answer = state
        .answers()
        .answer(&document.content, &request.question)
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(
        document_id = %document.id,
        question_chars = request.question.chars().count(),
        answer_chars = answer.chars().count(),
        "Question answered"
    );

    Ok(Json(AskResponse {
        success: true,
        question: request.question,
        answer,
        document_id: document.id.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::answer::mock::MockBackend;
    use crate::answer::{MAX_QUESTION_CHARS, SYSTEM_PROMPT};
    use crate::pdf::fixtures::pdf_with_pages;
    use crate::routes::router;
    use crate::routes::test_support::{multipart_body, state_with_key, test_state, BOUNDARY};

    #[tokio::test]
    async fn test_ask_without_document() {
        let backend = MockBackend::replying("unused");
        let server = TestServer::new(router(test_state(backend.clone()))).unwrap();

        let response = server
            .post("/ask")
            .json(&json!({ "question": "What is this about?" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "NO_DOCUMENT");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ask_without_credential() {
        let backend = MockBackend::replying("unused");
        let state = state_with_key(backend.clone(), Some("your_groq_api_key_here"));
        state.store().store("a.pdf", "text", 1).await;
        let server = TestServer::new(router(state)).unwrap();

        let response = server.post("/ask").json(&json!({ "question": "Why?" })).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "CONFIGURATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("GROQ_API_KEY"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ask_validation_errors() {
        let backend = MockBackend::replying("unused");
        let state = test_state(backend.clone());
        state.store().store("a.pdf", "some text", 1).await;
        let server = TestServer::new(router(state)).unwrap();

        let response = server.post("/ask").json(&json!({ "question": "   " })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "VALIDATION_ERROR");

        let long = "q".repeat(MAX_QUESTION_CHARS + 1);
        let response = server.post("/ask").json(&json!({ "question": long })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("too long"));

        let response = server.post("/ask").json(&json!({ "query": "wrong field" })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "VALIDATION_ERROR");

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ask_upstream_failure() {
        let backend = MockBackend::failing("503 Service Unavailable");
        let state = test_state(backend.clone());
        state.store().store("a.pdf", "some text", 1).await;
        let server = TestServer::new(router(state)).unwrap();

        let response = server.post("/ask").json(&json!({ "question": "Why?" })).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "AI_SERVICE_ERROR");
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("inference backend failed:"));
        assert!(message.contains("503 Service Unavailable"));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_then_ask_is_grounded() {
        let answer = "The contract value is $500.";
        let backend = MockBackend::replying(answer);
        let state = test_state(backend.clone());
        let app = router(state.clone());

        let pdf = pdf_with_pages(&["Parties: Acme and Beta", "Contract Value: $500", "Term: 1 year"]);
        let request = Request::builder()
            .method("POST")
            .uri("/documents")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body("file", "contract.pdf", &pdf)))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let uploaded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(uploaded["page_count"], 3);
        assert!(uploaded["character_count"].as_u64().unwrap() > 0);
        let document_id = uploaded["document_id"].as_str().unwrap().to_string();

        let server = TestServer::new(app).unwrap();
        let response = server
            .post("/ask")
            .json(&json!({ "question": "What is the contract value?" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["question"], "What is the contract value?");
        assert_eq!(body["answer"], answer);
        assert_eq!(body["document_id"], document_id);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages[0].content, SYSTEM_PROMPT);
        let stored = state.store().get_current().await.unwrap();
        let user = &calls[0].messages[1].content;
        assert!(user.contains(&stored.content));
        assert!(user.contains("Contract Value: $500"));
        assert!(user.contains("What is the contract value?"));
    }

    #[tokio::test]
    async fn test_ask_uses_latest_upload() {
        let backend = MockBackend::replying("ok");
        let state = test_state(backend.clone());
        state.store().store("old.pdf", "Old document text", 1).await;
        let newest = state.store().store("new.pdf", "New document text", 1).await;
        let server = TestServer::new(router(state)).unwrap();

        let response = server.post("/ask").json(&json!({ "question": "Which?" })).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["document_id"], newest.id.as_str());
        let user = &backend.calls()[0].messages[1].content;
        assert!(user.contains("New document text"));
        assert!(!user.contains("Old document text"));
    }
}
