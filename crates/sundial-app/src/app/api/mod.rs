pub mod done;
pub mod healthcheck;
pub mod next_date;
#[cfg(test)]
mod next_date_tests;
pub mod sign_in;
pub mod task;
pub mod tasks;

use salvo::http::StatusCode;
use salvo::{Request, Response, Router, writing::Json};
use serde::Serialize;

use sundial_core::constants::{
    API_ROUTE_COMPONENT, DONE_ROUTE_COMPONENT, NEXT_DATE_ROUTE_COMPONENT, SIGN_IN_ROUTE_COMPONENT,
    TASK_ROUTE_COMPONENT, TASKS_ROUTE_COMPONENT,
};
use sundial_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Empty success payload, rendered as `{}`.
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

/// ## Summary
/// Constructs the `/api` router: recurrence preview and sign-in are open,
/// everything touching tasks sits behind the auth middleware.
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(Router::with_path(NEXT_DATE_ROUTE_COMPONENT).get(next_date::next_date_handler))
        .push(Router::with_path(SIGN_IN_ROUTE_COMPONENT).post(sign_in::sign_in_handler))
        .push(
            Router::with_path(TASK_ROUTE_COMPONENT)
                .hoop(AuthMiddleware)
                .post(task::add_task_handler)
                .get(task::get_task_handler)
                .put(task::update_task_handler)
                .delete(task::delete_task_handler)
                .push(Router::with_path(DONE_ROUTE_COMPONENT).post(done::done_task_handler)),
        )
        .push(
            Router::with_path(TASKS_ROUTE_COMPONENT)
                .hoop(AuthMiddleware)
                .get(tasks::list_tasks_handler),
        )
}

pub(crate) fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: message.into(),
    }));
}

pub(crate) fn render_app_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = ?err, "Request failed");
    }
    render_error(res, status, err.to_string());
}

/// Pulls the mandatory `id` query parameter, rendering a 400 and returning
/// `None` when it is missing or not a number.
pub(crate) fn require_id(req: &Request, res: &mut Response) -> Option<i64> {
    let raw = req.query::<String>("id").unwrap_or_default();
    if raw.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, "id is required");
        return None;
    }

    match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            render_error(res, StatusCode::BAD_REQUEST, format!("invalid id: {raw:?}"));
            None
        }
    }
}

/// Runs a blocking database closure off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|_| AppError::CoreError(CoreError::InvariantViolation("blocking task panicked")))?
}
