pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::history::handlers as history;
use crate::loader::handlers as loader;
use crate::results::handlers as results;
use crate::state::AppState;
use crate::theme::handlers as theme;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Inbound analysis payload
        .route("/api/v1/results", post(results::handle_ingest_result))
        .route(
            "/api/v1/results/current",
            get(results::handle_current_result),
        )
        // History log
        .route(
            "/api/v1/history",
            get(history::handle_list_history).delete(history::handle_clear_history),
        )
        .route(
            "/api/v1/history/:id",
            get(history::handle_get_history_entry),
        )
        // Theme
        .route(
            "/api/v1/theme",
            get(theme::handle_get_theme).put(theme::handle_set_theme),
        )
        .route("/api/v1/theme/toggle", post(theme::handle_toggle_theme))
        // Loading overlay
        .route(
            "/api/v1/loading",
            post(loader::handle_start_loading)
                .get(loader::handle_loading_status)
                .delete(loader::handle_stop_loading),
        )
        // Downloads
        .route("/api/v1/export/share-card", get(export::handle_share_card))
        .route(
            "/api/v1/export/cover-letter",
            get(export::handle_cover_letter),
        )
        .route("/api/v1/export/report", get(export::handle_report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::storage::MemoryStore;

    fn test_app() -> Router {
        let config = Config {
            data_dir: PathBuf::from("./data"),
            port: 0,
            rust_log: "debug".into(),
            loader_message_interval_ms: 2000,
            loader_frame_interval_ms: 33,
        };
        build_router(AppState::new(&config, Arc::new(MemoryStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn full_result() -> Value {
        json!({
            "candidate_info": {"name": "A", "title": "Backend Engineer", "readiness_score": 70},
            "ats_analysis": {"overall_score": 72, "breakdown": {"skill_match": 80}},
            "recruiter_review": {"decision": "Shortlisted", "critical_fail_points": ["No metrics"]},
            "advanced_insights": {"skill_radar": {"Technical": 85}},
            "resume_tailoring": {"cover_letter": "Dear Hiring Manager,\n\nI am writing..."}
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_result_recorded_and_listed() {
        let app = test_app();
        let (status, view) =
            send_json(&app, Method::POST, "/api/v1/results", Some(full_result())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["view"], "results");
        assert_eq!(view["animation"]["confetti"], false);

        let (_, list) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        let entries = list["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "A");
        assert_eq!(entries[0]["score"], 72.0);
        assert_eq!(entries[0]["decision"], "Shortlisted");
        assert!(entries[0].get("data").is_none());

        let id = entries[0]["id"].as_i64().unwrap();
        let (status, detail) =
            send_json(&app, Method::GET, &format!("/api/v1/history/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["shortlisted"], true);
    }

    #[tokio::test]
    async fn test_partial_payload_with_nulls_is_accepted() {
        let app = test_app();
        let payload = json!({
            "candidate_info": {"name": "B", "title": null},
            "ats_analysis": {"overall_score": "n/a", "breakdown": null},
            "recruiter_review": {"decision": "Maybe", "critical_fail_points": null},
            "advanced_insights": {"skill_radar": null}
        });
        let (status, view) =
            send_json(&app, Method::POST, "/api/v1/results", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["view"], "results");
        assert_eq!(view["score"], 0.0);
        assert!(view["title"].is_null());

        let (_, list) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        let entries = list["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "B");
        assert_eq!(entries[0]["decision"], "Maybe");
    }

    #[tokio::test]
    async fn test_quota_error_shows_prompt_not_history() {
        let app = test_app();
        let (status, view) = send_json(
            &app,
            Method::POST,
            "/api/v1/results?existing_filename=cv.pdf",
            Some(json!({"error": "RESOURCE_EXHAUSTED"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["view"], "quota_prompt");
        assert_eq!(view["existing_filename"], "cv.pdf");

        let (_, list) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert!(list["entries"].as_array().unwrap().is_empty());
        assert!(list["message"].as_str().unwrap().starts_with("No history found"));
    }

    #[tokio::test]
    async fn test_unknown_history_entry_is_404() {
        let app = test_app();
        let (status, body) = send_json(&app, Method::GET, "/api/v1/history/12345", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/results", Some(full_result())).await;

        let (status, body) = send_json(&app, Method::DELETE, "/api/v1/history", None).await;
        assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(body["error"]["code"], "CONFIRMATION_REQUIRED");
        let (_, list) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert_eq!(list["entries"].as_array().unwrap().len(), 1);

        let (status, body) =
            send_json(&app, Method::DELETE, "/api/v1/history?confirm=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "History cleared.");
        let (_, list) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert!(list["entries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_theme_toggle() {
        let app = test_app();
        let (_, body) = send_json(&app, Method::GET, "/api/v1/theme", None).await;
        assert_eq!(body["theme"], "dark");

        let (_, body) = send_json(&app, Method::POST, "/api/v1/theme/toggle", None).await;
        assert_eq!(body["theme"], "light");
        assert_eq!(body["icon"], "fa-moon");

        let (_, body) = send_json(
            &app,
            Method::PUT,
            "/api/v1/theme",
            Some(json!({"theme": "dark"})),
        )
        .await;
        assert_eq!(body["theme"], "dark");
    }

    #[tokio::test]
    async fn test_loading_session_ends_when_result_arrives() {
        let app = test_app();
        let (_, status) = send_json(&app, Method::POST, "/api/v1/loading", None).await;
        assert_eq!(status["active"], true);
        assert!(status["message"].is_string());

        send(&app, Method::POST, "/api/v1/results", Some(full_result())).await;
        let (_, status) = send_json(&app, Method::GET, "/api/v1/loading", None).await;
        assert_eq!(status["active"], false);
    }

    #[tokio::test]
    async fn test_exports_require_a_result() {
        let app = test_app();
        let (status, body) =
            send_json(&app, Method::GET, "/api/v1/export/share-card", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "No results to share!");
    }

    #[tokio::test]
    async fn test_cover_letter_download() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/results", Some(full_result())).await;

        let request = Request::builder()
            .uri("/api/v1/export/cover-letter")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"A_Cover_Letter.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_empty_cover_letter_is_rejected() {
        let app = test_app();
        let mut payload = full_result();
        payload["resume_tailoring"]["cover_letter"] = json!("   ");
        send(&app, Method::POST, "/api/v1/results", Some(payload)).await;

        let (status, body) =
            send_json(&app, Method::GET, "/api/v1/export/cover-letter", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Cover letter content is empty or not yet generated."
        );
    }

    #[tokio::test]
    async fn test_report_and_share_card_downloads() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/results", Some(full_result())).await;

        let (status, report) = send(&app, Method::GET, "/api/v1/export/report", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(report).unwrap().contains("## ATS Analysis"));

        let (status, png) = send(&app, Method::GET, "/api/v1/export/share-card", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_error_payload_clears_current_result() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/results", Some(full_result())).await;
        send(
            &app,
            Method::POST,
            "/api/v1/results",
            Some(json!({"error": "AI Analysis Failed: boom"})),
        )
        .await;
        let (status, _) = send_json(&app, Method::GET, "/api/v1/results/current", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
