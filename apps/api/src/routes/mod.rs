pub mod health;

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::journal::handlers as journal;
use crate::reflection::handlers as reflection;
use crate::state::AppState;

/// Success envelope shared by every API route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// Unwraps a JSON body, reporting malformed input as a validation error.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(inner)| inner)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // User stub
        .route("/api/v1/user", post(reflection::handle_create_user))
        // Journal entries
        .route(
            "/api/v1/entries",
            post(journal::handle_create_entry).get(journal::handle_list_entries),
        )
        .route(
            "/api/v1/entries/:id",
            get(journal::handle_get_entry)
                .put(journal::handle_update_entry)
                .delete(journal::handle_delete_entry),
        )
        // Reflections
        .route("/api/v1/reflect", post(reflection::handle_reflect))
        .route("/api/v1/reflections", get(reflection::handle_list_reflections))
        .route(
            "/api/v1/entries/:id/reflections",
            get(reflection::handle_list_entry_reflections),
        )
        .route("/api/v1/insights", get(reflection::handle_insights))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::ReflectionModel;
    use crate::store::MemoryStore;

    fn app_with(model: impl ReflectionModel + 'static) -> Router {
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            model: Arc::new(model),
            config: Arc::new(Config::from_lookup(|_| None).unwrap()),
        };
        build_router(state)
    }

    fn app() -> Router {
        app_with(ScriptedModel::new(
            "What a great, happy week.",
            &["friends", "music"],
        ))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create_entry(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "Friday", "content": "Jam session with friends.", "tags": ["music"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_backend"], "scripted");
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let app = app();
        let id = create_entry(&app).await;

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["title"], "Friday");
        assert_eq!(body["data"]["user_id"], "user123");
        assert_eq!(body["data"]["tags"], json!(["music"]));

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/entries/{id}"),
            Some(json!({ "title": "Friday night", "content": "Jam session ran late." })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id.as_str());
        assert_eq!(body["data"]["title"], "Friday night");

        let (_, body) = send(&app, Method::GET, "/api/v1/entries", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) =
            send(&app, Method::DELETE, &format!("/api/v1/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Entry deleted successfully");

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_entry_error_statuses() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/entries",
            Some(json!({ "title": "No body" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/entries")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::DELETE, "/api/v1/entries/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_IDENTIFIER");

        let absent = uuid::Uuid::new_v4();
        let (status, _) =
            send(&app, Method::DELETE, &format!("/api/v1/entries/{absent}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reflect_then_read_insights() {
        let app = app();
        let id = create_entry(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/reflect",
            Some(json!({ "entry_id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["type"], "insight");
        assert_eq!(body["data"]["sentiment"], "positive");
        assert_eq!(body["data"]["entry_id"], id.as_str());

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/entries/{id}/reflections"),
            None,
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, Method::GET, "/api/v1/reflections", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/v1/insights", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({
                "total_reflections": 1,
                "recent_themes": ["friends", "music"],
                "sentiment_trends": { "positive": 1, "negative": 0, "neutral": 0 },
                "reflection_types": { "insight": 1 }
            })
        );
    }

    #[tokio::test]
    async fn test_reflect_errors() {
        let app = app_with(ScriptedModel::failing_generation());

        let (status, _) = send(&app, Method::POST, "/api/v1/reflect", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let absent = uuid::Uuid::new_v4();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/reflect",
            Some(json!({ "entry_id": absent, "type": "summary" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let id = create_entry(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/reflect",
            Some(json!({ "entry_id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn test_empty_insights() {
        let (_, body) = send(&app(), Method::GET, "/api/v1/insights", None).await;
        assert_eq!(
            body["data"],
            json!({
                "total_reflections": 0,
                "recent_themes": [],
                "sentiment_trends": { "positive": 0, "negative": 0, "neutral": 0 },
                "reflection_types": {}
            })
        );
    }

    #[tokio::test]
    async fn test_user_stub_echoes_profile() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/user",
            Some(json!({ "name": "Sam", "email": "sam@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], "user123");
        assert_eq!(body["data"]["name"], "Sam");
        assert!(body["message"].as_str().unwrap().contains("hardcoded"));
    }
}
