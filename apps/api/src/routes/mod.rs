pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes + FORM_OVERHEAD_BYTES;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/evaluations", post(handlers::handle_evaluate))
        .route("/api/v1/evaluations/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::evaluation::test_support::{catalog, docx_bytes, StubFeedback, StubStructurer};
    use crate::resume::model::ResumeRecord;

    fn app(record: Option<ResumeRecord>) -> Router {
        app_with_limit(record, 1024 * 1024)
    }

    fn app_with_limit(record: Option<ResumeRecord>, max_upload_bytes: usize) -> Router {
        build_router(AppState {
            catalog: Arc::new(catalog()),
            structurer: Arc::new(StubStructurer(record)),
            feedback: Arc::new(StubFeedback(Some("- Add a summary".to_string()))),
            max_upload_bytes,
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const BOUNDARY: &str = "ats-test-boundary";

    fn multipart_body(filename: &str, file: &[u8], category: &str, role: &str) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in [("category", category), ("role", role)] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_roles() {
        let response = app(None)
            .oneshot(Request::get("/api/v1/roles").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["categories"][0]["category"], "Data & Analytics");
        assert_eq!(body["categories"][0]["roles"][0], "Data Analyst");
    }

    #[tokio::test]
    async fn test_score_endpoint_tolerates_malformed_record() {
        let request = Request::post("/api/v1/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "record": {"skills": ["Python", "SQL"], "projects": "none", "name": 7},
                    "category": "Data & Analytics",
                    "role": "Data Analyst"
                })
                .to_string(),
            ))
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["candidate_type"], "fresher");
        assert_eq!(body["sections"]["Skills"], "✅ Good");
        assert_eq!(body["sections"]["Projects"], "❌ Missing");
        // Skills 30 + Contact Info 1/4 × 10
        assert_eq!(body["score"], 32);
        assert_eq!(body["details"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_score_unknown_role_is_404() {
        let request = Request::post("/api/v1/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"record": {}, "category": "Data & Analytics", "role": "Chef"}).to_string(),
            ))
            .unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_evaluate_upload() {
        let record = ResumeRecord {
            name: Some("Jane".to_string()),
            skills: vec!["SQL".to_string()],
            ..Default::default()
        };
        let file = docx_bytes(&["Jane", "SQL analyst"]);
        let body = multipart_body("jane.docx", &file, "Data & Analytics", "Data Analyst");
        let response = app(Some(record))
            .oneshot(multipart_request("/api/v1/evaluations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["role"], "Data Analyst");
        assert_eq!(body["sections"]["Skills"], "⚠️ Improve");
        // Skills 1/2 × 30 + Contact Info 1/4 × 10 = 17.5 → 18
        assert_eq!(body["score"], 18);
        assert_eq!(body["feedback"], "- Add a summary");
        assert!(body["evaluation_id"].is_string());
    }

    #[tokio::test]
    async fn test_export_is_attachment() {
        let file = docx_bytes(&["Jane"]);
        let body = multipart_body("jane.docx", &file, "Data & Analytics", "Data Analyst");
        let response = app(None)
            .oneshot(multipart_request("/api/v1/evaluations/export", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("ats_report.json"));
        let body = body_json(response).await;
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(body["score"], 0);
        assert_eq!(body["sections"].as_object().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_unsupported_file() {
        let body = multipart_body("resume.txt", b"Jane", "Data & Analytics", "Data Analyst");
        let response = app(None)
            .oneshot(multipart_request("/api/v1/evaluations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_file_over_upload_limit_is_rejected() {
        let file = vec![b'a'; 500];
        let body = multipart_body("big.docx", &file, "Data & Analytics", "Data Analyst");
        let response = app_with_limit(None, 10)
            .oneshot(multipart_request("/api/v1/evaluations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_body_over_form_limit_is_rejected() {
        let file = vec![b'a'; 200 * 1024];
        let body = multipart_body("big.docx", &file, "Data & Analytics", "Data Analyst");
        let response = app_with_limit(None, 10)
            .oneshot(multipart_request("/api/v1/evaluations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_evaluate_requires_role() {
        let body = multipart_body("resume.docx", b"x", "Data & Analytics", "  ");
        let response = app(None)
            .oneshot(multipart_request("/api/v1/evaluations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
