use crate::transport::http::handlers::common::{
    not_found, parse_record_id, request_fields, run_locked, success,
};
use crate::transport::http::types::{ApiResponse, AppState, ProverbFields, PROVERB_DELETED};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/proverbs",
    responses(
        (status = 200, description = "All stored proverbs, in stored order", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn list_proverbs_handler(State(state): State<AppState>) -> impl IntoResponse {
    match run_locked(&state, |store| store.list()).await {
        Ok(records) => success(StatusCode::OK, &records),
        Err(resp) => resp,
    }
}

#[utoipa::path(
    get,
    path = "/proverbs/{id}",
    params(
        ("id" = i64, Path, description = "Proverb id")
    ),
    responses(
        (status = 200, description = "The proverb", body = ApiResponse),
        (status = 404, description = "Proverb not found", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn get_proverb_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_record_id(&id) else {
        return not_found();
    };
    match run_locked(&state, move |store| store.get(id)).await {
        Ok(record) => success(StatusCode::OK, &record),
        Err(resp) => resp,
    }
}

#[utoipa::path(
    post,
    path = "/proverbs",
    request_body = ProverbFields,
    responses(
        (status = 201, description = "Proverb created; `data.id` is store-assigned", body = ApiResponse),
        (status = 422, description = "JSON body is not an object", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn create_proverb_handler(
    State(state): State<AppState>,
    request: Result<Json<ProverbFields>, JsonRejection>,
) -> impl IntoResponse {
    let fields = match request_fields(request) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    match run_locked(&state, move |store| store.create(fields)).await {
        Ok(record) => success(StatusCode::CREATED, &record),
        Err(resp) => resp,
    }
}

#[utoipa::path(
    put,
    path = "/proverbs/{id}",
    params(
        ("id" = i64, Path, description = "Proverb id")
    ),
    request_body = ProverbFields,
    responses(
        (status = 200, description = "Proverb updated (shallow merge, id unchanged)", body = ApiResponse),
        (status = 404, description = "Proverb not found", body = ApiResponse),
        (status = 422, description = "JSON body is not an object", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn update_proverb_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<ProverbFields>, JsonRejection>,
) -> impl IntoResponse {
    let Some(id) = parse_record_id(&id) else {
        return not_found();
    };
    let fields = match request_fields(request) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    match run_locked(&state, move |store| store.update(id, fields)).await {
        Ok(record) => success(StatusCode::OK, &record),
        Err(resp) => resp,
    }
}

#[utoipa::path(
    delete,
    path = "/proverbs/{id}",
    params(
        ("id" = i64, Path, description = "Proverb id")
    ),
    responses(
        (status = 200, description = "Proverb deleted", body = ApiResponse),
        (status = 404, description = "Proverb not found", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse)
    )
)]
pub async fn delete_proverb_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_record_id(&id) else {
        return not_found();
    };
    match run_locked(&state, move |store| store.delete(id)).await {
        Ok(()) => success(
            StatusCode::OK,
            &serde_json::json!({ "message": PROVERB_DELETED }),
        ),
        Err(resp) => resp,
    }
}
