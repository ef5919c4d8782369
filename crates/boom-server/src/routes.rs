//! HTTP routes adapting inbound requests onto the report handler

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use boom_core::{ReportHandler, ReportSteps};
use boom_types::HealthResponse;

pub const REPORT_PATH: &str = "/api/deployment-report";
pub const HEALTH_PATH: &str = "/health";

pub fn router<T: ReportSteps + 'static>(handler: Arc<ReportHandler<T>>) -> Router {
    Router::new()
        // Every method is routed here; the handler owns the 405 response
        .route(REPORT_PATH, any(deployment_report::<T>))
        .route(HEALTH_PATH, get(health::<T>))
        .with_state(handler)
}

async fn deployment_report<T: ReportSteps + 'static>(
    State(handler): State<Arc<ReportHandler<T>>>,
    method: Method,
    body: Bytes,
) -> Response {
    let response = handler.handle(method.as_str(), &body).await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

async fn health<T: ReportSteps + 'static>(
    State(handler): State<Arc<ReportHandler<T>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        configured: handler.is_configured(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use boom_core::{BoomConfig, Result};
    use boom_types::DeploymentReportRequest;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct StaticSteps;

    #[async_trait]
    impl ReportSteps for StaticSteps {
        async fn synthesize_report(&self, request: &DeploymentReportRequest) -> Result<String> {
            Ok(format!("Cascade: {}", request.is_cascade))
        }

        async fn persist_record(&self, _request: &DeploymentReportRequest, _report_text: &str) -> Result<String> {
            Ok("recStatic".to_string())
        }
    }

    fn configured() -> BoomConfig {
        let mut config = BoomConfig::default();
        config.gemini.api_key = "g".to_string();
        config.airtable.api_key = "a".to_string();
        config.airtable.base_id = "app".to_string();
        config.airtable.table_id = "tbl".to_string();
        config
    }

    fn app(config: BoomConfig) -> Router {
        router(Arc::new(ReportHandler::new(config, StaticSteps)))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_returns_report() {
        let body = Body::from(json!({ "isCascade": true, "segments": "2" }).to_string());
        let (status, value) = send(app(configured()), "POST", REPORT_PATH, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["reportText"], "Cascade: true");
        assert_eq!(value["recordId"], "recStatic");
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let (status, value) = send(app(configured()), "GET", REPORT_PATH, Body::empty()).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(value["error"].as_str().unwrap().contains("GET"));
    }

    #[tokio::test]
    async fn test_unconfigured_post_is_server_error() {
        let (status, value) = send(app(BoomConfig::default()), "POST", REPORT_PATH, Body::from("{}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(value["error"].as_str().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let (status, _) = send(app(configured()), "POST", REPORT_PATH, Body::from("{")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let (status, value) = send(app(configured()), "GET", HEALTH_PATH, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "status": "ok", "configured": true }));

        let (_, value) = send(app(BoomConfig::default()), "GET", HEALTH_PATH, Body::empty()).await;
        assert_eq!(value["configured"], false);
    }
}
