use crate::domain::Fields;
use crate::storage::{RecordStore, StoreError};
use crate::transport::http::types::{json_422, ApiResponse, AppState, ProverbFields, PROVERB_NOT_FOUND};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

const FIELDS_EXPECTED: &str = "{\"text\": \"...\"}";

/// Parses the `{id}` path segment. Anything that is not an `i64` cannot name
/// a stored record, so callers answer it with 404.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Request body as a field mapping. A request that carries no JSON at all
/// (no `Content-Type: application/json`) contributes no fields; a JSON body
/// that is not an object is rejected with 422.
pub fn request_fields(request: Result<Json<ProverbFields>, JsonRejection>) -> Result<Fields, Response> {
    match request {
        Ok(Json(ProverbFields(fields))) => Ok(fields),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Fields::new()),
        Err(e) => Err(json_422(e, FIELDS_EXPECTED).into_response()),
    }
}

/// Runs one store operation on the blocking pool while holding the store
/// lock, so file I/O never stalls the async workers and requests still
/// apply their load -> mutate -> save cycles one at a time.
pub async fn run_locked<T, F>(state: &AppState, op: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&RecordStore) -> Result<T, StoreError> + Send + 'static,
{
    let guard = state.store.lock().await;
    let store = guard.clone();
    let joined = tokio::task::spawn_blocking(move || op(&store)).await;
    drop(guard);

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(store_error(e)),
        Err(e) => {
            error!(error = %e, "store task failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("Store task failed: {}", e))),
            )
                .into_response())
        }
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::err(PROVERB_NOT_FOUND))).into_response()
}

/// Wraps `data` in a success envelope with the given status.
pub fn success<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (status, Json(ApiResponse::ok(value))).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("Failed to encode response: {}", e))),
            )
                .into_response()
        }
    }
}

/// `NotFound` becomes 404, every storage failure becomes 500.
pub fn store_error(err: StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => not_found(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(other.to_string())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_record_id, run_locked};
    use crate::storage::{FailurePolicy, RecordStore};
    use crate::transport::http::types::AppState;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    fn state_in(dir: &std::path::Path) -> AppState {
        let store = RecordStore::open(dir.join("proverbs.json"), FailurePolicy::Propagate)
            .expect("store");
        AppState::new(store)
    }

    #[test]
    fn parses_signed_integers_only() {
        assert_eq!(parse_record_id("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_record_id("-4"), Some(-4));
        assert_eq!(parse_record_id("12abc"), None);
        assert_eq!(parse_record_id("1.5"), None);
        assert_eq!(parse_record_id(""), None);
    }

    // Single-threaded runtime: if the slow operation ran inline, the timer
    // below could not fire until it finished.
    #[tokio::test]
    async fn store_work_runs_off_the_async_worker() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());

        let slow = tokio::spawn({
            let state = state.clone();
            async move {
                run_locked(&state, |store| {
                    std::thread::sleep(Duration::from_millis(300));
                    store.list()
                })
                .await
                .is_ok()
            }
        });

        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(started.elapsed() < Duration::from_millis(250));
        assert!(!slow.is_finished());
        assert!(slow.await.expect("join"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn store_operations_never_overlap() {
        let temp = tempdir().expect("tempdir");
        let state = state_in(temp.path());
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            let active = active.clone();
            let peak = peak.clone();
            tasks.push(tokio::spawn(async move {
                run_locked(&state, move |store| {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(10));
                    active.fetch_sub(1, Ordering::SeqCst);
                    store.list()
                })
                .await
                .is_ok()
            }));
        }
        for task in tasks {
            assert!(task.await.expect("join"));
        }
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
