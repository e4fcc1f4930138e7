//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use socialsim_shared::{AnalyticsResponse, ChatRequest, ChatResponse};

use super::auth::Auth;
use super::error::ApiError;
use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/analytics", get(analytics))
}

async fn health() -> &'static str {
    "OK"
}

async fn chat(
    State(app): State<Arc<App>>,
    Auth(user_id): Auth,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let result = app
        .use_cases
        .interaction
        .chat
        .execute(user_id, request)
        .await?;
    Ok(Json(result))
}

async fn analytics(
    State(app): State<Arc<App>>,
    Auth(user_id): Auth,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let summary = app
        .use_cases
        .analytics
        .summary
        .execute(&user_id)
        .await?;
    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use socialsim_domain::FLAGGED_FEEDBACK;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::interaction_log::SqliteInteractionLogRepo;
    use crate::infrastructure::ports::LlmPort;
    use crate::prompt_templates::PromptTemplates;
    use crate::test_fixtures::ScriptedLlm;

    async fn router(llm: Option<Arc<dyn LlmPort>>) -> Router {
        let logs = SqliteInteractionLogRepo::in_memory()
            .await
            .expect("in-memory db");
        let now = Utc
            .with_ymd_and_hms(2024, 6, 10, 12, 0, 0)
            .single()
            .expect("valid date");
        let app = App::with_clock(
            llm,
            Arc::new(logs),
            Arc::new(FixedClock(now)),
            &PromptTemplates::default(),
        );
        routes().with_state(Arc::new(app))
    }

    fn post_chat(user: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        builder.body(Body::from(body.to_string())).expect("request")
    }

    fn get_analytics(user: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/analytics")
            .header("x-user-id", user)
            .body(Body::empty())
            .expect("request")
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let router = router(None).await;
        for uri in ["/", "/api/health"] {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_chat_requires_user_header() {
        let router = router(None).await;
        let (status, body) = send(&router, post_chat(None, r#"{"message":"Hi"}"#)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let llm = Arc::new(ScriptedLlm::new());
        let router = router(Some(llm.clone())).await;

        let (status, body) = send(&router, post_chat(Some("kid"), r#"{"scenario":"Park"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Message is required"}));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_history_is_bad_request() {
        let router = router(Some(Arc::new(ScriptedLlm::new()))).await;
        let request = post_chat(
            Some("kid"),
            r#"{"message":"Hi","history":[{"sender":"robot","text":"beep"}]}"#,
        );

        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("robot"));
    }

    #[tokio::test]
    async fn test_blank_history_text_is_bad_request() {
        let llm = Arc::new(ScriptedLlm::new());
        let router = router(Some(llm.clone())).await;
        let request = post_chat(
            Some("kid"),
            r#"{"message":"Hi","history":[{"sender":"assistant","text":""},{"sender":"user","text":"   "}]}"#,
        );

        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("History text"));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let router = router(None).await;
        let (status, body) = send(&router, post_chat(Some("kid"), "{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_answers_with_error_status() {
        let router = router(None).await;
        let (status, body) = send(&router, post_chat(Some("kid"), r#"{"message":"Hi"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["mood"], "NEUTRAL");
        assert_eq!(body["detail"], "not_configured");
    }

    #[tokio::test]
    async fn test_chat_then_analytics() {
        let llm = Arc::new(ScriptedLlm::replying(&[
            "FLAG",
            "PASS",
            "You're welcome! [HAPPY]",
            "Bye!\nSee you!",
        ]));
        let router = router(Some(llm)).await;

        let (status, flagged) = send(
            &router,
            post_chat(Some("kid"), r#"{"message":"You're so stupid","scenario":"Classroom"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(flagged, json!({"status": "flagged", "feedback": FLAGGED_FEEDBACK}));

        let (_, success) = send(
            &router,
            post_chat(
                Some("kid"),
                r#"{"message":"Thank you!","history":[{"sender":"assistant","text":"Here is your bag.","mood":"NEUTRAL"}]}"#,
            ),
        )
        .await;
        assert_eq!(success["status"], "success");
        assert_eq!(success["mood"], "HAPPY");
        assert_eq!(success["reply"], "You're welcome!");
        assert_eq!(
            success["suggestions"],
            json!(["Bye!", "See you!", "Hi!", "Thank you"])
        );

        let (status, summary) = send(&router, get_analytics("kid")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["total_interactions"], 2);
        assert_eq!(summary["flagged_count"], 1);
        assert_eq!(summary["by_scenario"], json!({"Classroom": 1, "Grocery Store": 1}));
        assert_eq!(summary["by_mood"], json!({"HAPPY": 1}));
        assert_eq!(
            summary["last_7_days"],
            json!([{"date": "2024-06-10", "count": 2}])
        );

        let (_, other) = send(&router, get_analytics("someone-else")).await;
        assert_eq!(other["total_interactions"], 0);
    }
}
