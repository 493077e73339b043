//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    ready: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ready: state.is_ready(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::test_support::{read_json, Harness};

    async fn get_health(harness: &Harness) -> serde_json::Value {
        let response = harness
            .app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    #[tokio::test]
    async fn reports_readiness() {
        let harness = Harness::local().await;
        assert_eq!(get_health(&harness).await["ready"], false);

        let harness = harness.ready().await;
        let payload = get_health(&harness).await;
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["ready"], true);
    }
}
