use crate::transport::http::handlers::{health, proverbs};
use crate::transport::http::types::{ApiResponse, AppState, ProverbFields};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        proverbs::list_proverbs_handler,
        proverbs::get_proverb_handler,
        proverbs::create_proverb_handler,
        proverbs::update_proverb_handler,
        proverbs::delete_proverb_handler
    ),
    components(schemas(ApiResponse, ProverbFields))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/proverbs",
            get(proverbs::list_proverbs_handler).post(proverbs::create_proverb_handler),
        )
        .route(
            "/proverbs/:id",
            get(proverbs::get_proverb_handler)
                .put(proverbs::update_proverb_handler)
                .delete(proverbs::delete_proverb_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
