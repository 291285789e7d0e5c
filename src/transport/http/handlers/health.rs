use crate::transport::http::handlers::common::run_locked;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (storage readable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (storage unreadable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    // The load result is passed through untouched so a storage failure maps to 503, not 500.
    let checked = run_locked(&state, |store| {
        Ok((store.path().display().to_string(), store.load()))
    })
    .await;
    let (storage_path, loaded) = match checked {
        Ok(checked) => checked,
        Err(resp) => return resp,
    };

    match loaded {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "status": "ok",
                "storage_path": storage_path,
                "records": records.len()
            }))),
        )
            .into_response(),
        Err(e) => unhealthy(storage_path, e.to_string()),
    }
}

fn unhealthy(storage_path: String, error: String) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiResponse {
            success: false,
            data: Some(serde_json::json!({
                "status": "unhealthy",
                "storage_path": storage_path
            })),
            error: Some(format!("Storage load failed: {}", error)),
        }),
    )
        .into_response()
}
