pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::search::handlers as search;
use crate::state::AppState;
use crate::workspace::handlers as workspace;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate discovery
        .route(
            "/api/v1/search/candidates",
            post(search::handle_search_candidates),
        )
        // Query previews
        .route(
            "/api/v1/workspaces/preview",
            post(workspace::handle_preview_workspace),
        )
        .route(
            "/api/v1/drafts/:draft_id/confirm",
            post(workspace::handle_confirm_draft),
        )
        // Workspaces
        .route("/api/v1/workspaces", get(workspace::handle_list_workspaces))
        .route(
            "/api/v1/workspaces/:id",
            get(workspace::handle_get_workspace).delete(workspace::handle_delete_workspace),
        )
        .route(
            "/api/v1/workspaces/:id/more",
            post(workspace::handle_more_candidates),
        )
        .route(
            "/api/v1/workspaces/:id/duplicate",
            post(workspace::handle_duplicate_workspace),
        )
        .route(
            "/api/v1/workspaces/:id/template",
            put(workspace::handle_update_template),
        )
        .route(
            "/api/v1/workspaces/:id/export.csv",
            get(workspace::handle_export_csv),
        )
        // Profiles
        .route(
            "/api/v1/workspaces/:id/profiles/checked",
            patch(workspace::handle_set_checked),
        )
        .route(
            "/api/v1/workspaces/:id/profiles/open",
            post(workspace::handle_open_profile),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::tests::test_config;
    use crate::llm_client::LlmClient;
    use crate::search::pipeline::tests::{profile_item, ScriptedFetcher};

    /// State whose Postgres and Redis handles never connect unless a handler
    /// actually touches them.
    fn test_state(search: ScriptedFetcher) -> AppState {
        let config = test_config();
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            redis: redis::Client::open(config.redis_url.as_str()).unwrap(),
            llm: LlmClient::new(config.gemini_api_key.clone()).unwrap(),
            search: Arc::new(search),
            config,
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let router = build_router(test_state(ScriptedFetcher::new()));
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "outreach-api");
    }

    #[tokio::test]
    async fn test_search_candidates_returns_report() {
        let fetcher = ScriptedFetcher::new().page(
            "rust engineer",
            1,
            vec![
                profile_item("https://x/in/jane", "Jane Doe", "Senior Engineer"),
                profile_item("https://x/in/known", "Known", "Engineer"),
            ],
        );
        let router = build_router(test_state(fetcher));

        let (status, body) = send(
            router,
            post_json(
                "/api/v1/search/candidates",
                json!({
                    "queries": ["rust engineer"],
                    "min_results": 5,
                    "existing_links": ["https://x/in/known"]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stop_reason"], "queries_exhausted");
        assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
        assert_eq!(body["candidates"][0]["name"], "Jane Doe");
        assert_eq!(body["candidates"][0]["job_title"], "Senior Engineer");
    }

    #[tokio::test]
    async fn test_search_candidates_rejects_blank_queries() {
        let router = build_router(test_state(ScriptedFetcher::new()));

        let (status, body) = send(
            router,
            post_json(
                "/api/v1/search/candidates",
                json!({ "queries": ["  "], "min_results": 3 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_search_candidates_rejects_zero_target() {
        let router = build_router(test_state(ScriptedFetcher::new()));

        let (status, _) = send(
            router,
            post_json(
                "/api/v1/search/candidates",
                json!({ "queries": ["rust"], "min_results": 0 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_requires_job_description() {
        let router = build_router(test_state(ScriptedFetcher::new()));

        let (status, body) = send(
            router,
            post_json(
                "/api/v1/workspaces/preview",
                json!({ "title": "Rust", "job_description": "   " }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
