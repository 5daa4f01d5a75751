//! 子主题生成端点

use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{GenerateSubtopicsRequest, GenerateSubtopicsResponse};
use crate::state::AppState;

/// 子主题生成处理器
async fn generate_subtopics(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateSubtopicsRequest>,
) -> AppResult<Json<GenerateSubtopicsResponse>> {
    // 科目名不能为空
    if req.subject_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "subjectName must not be empty".to_string(),
        ));
    }

    let subtopics = state.subtopics.generate(&req.subject_name).await?;
    Ok(Json(GenerateSubtopicsResponse { subtopics }))
}

/// 创建子主题路由
pub fn subtopic_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/subtopics/generate", post(generate_subtopics))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::create_api_routes;
    use crate::config::AppConfig;
    use crate::state::create_shared_state;

    /// 空密钥配置：任何生成请求都不会发出出站调用
    fn test_app() -> Router {
        let config = AppConfig::default();
        create_api_routes(create_shared_state(&config))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_subject_is_rejected() {
        let response = test_app()
            .oneshot(post_json("/api/subtopics/generate", r#"{"subjectName":"  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_credential_is_internal_error() {
        let response = test_app()
            .oneshot(post_json(
                "/api/subtopics/generate",
                r#"{"subjectName":"History"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
