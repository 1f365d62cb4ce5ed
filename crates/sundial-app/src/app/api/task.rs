use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use sundial_core::date::today;
use sundial_db::db::query::task as task_query;
use sundial_db::model::task::Task;
use sundial_service::task::TaskDraft;

use super::{EmptyResponse, render_app_error, render_error, require_id, run_blocking};
use crate::db_handler::get_db_from_depot;

/// ## Summary
/// A task as seen by API clients: the id travels as a string.
#[derive(Debug, Serialize)]
pub struct TaskPayload {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskPayload {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

/// ## Summary
/// Id-only response payload
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

/// ## Summary
/// Update request payload: a task draft plus the id of the row to rewrite.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub draft: TaskDraft,
}

/// ## Summary
/// POST /api/task - Adds a task after normalizing its due date.
///
/// ## Errors
/// Returns HTTP 400 for an invalid payload, date or repeat spec.
#[handler]
pub async fn add_task_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let draft: TaskDraft = match req.parse_json().await {
        Ok(draft) => draft,
        Err(e) => {
            error!(error = ?e, "Failed to parse add-task request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    let provider = match get_db_from_depot(depot) {
        Ok(provider) => provider,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    let now = today();
    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(sundial_service::task::add_task(&mut conn, now, draft)?)
    })
    .await;

    match result {
        Ok(id) => {
            tracing::info!(id, "Task created");
            res.render(Json(IdResponse { id: id.to_string() }));
        }
        Err(err) => render_app_error(res, &err),
    }
}

/// ## Summary
/// GET /api/task?id= - Fetches a single task.
///
/// ## Errors
/// Returns HTTP 400 for a missing id and HTTP 404 for an unknown one.
#[handler]
pub async fn get_task_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = require_id(req, res) else {
        return;
    };

    let provider = match get_db_from_depot(depot) {
        Ok(provider) => provider,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(task_query::get_task(&mut conn, id)?)
    })
    .await;

    match result {
        Ok(task) => res.render(Json(TaskPayload::from(task))),
        Err(err) => render_app_error(res, &err),
    }
}

/// ## Summary
/// PUT /api/task - Rewrites an existing task after normalizing the draft.
///
/// ## Errors
/// Returns HTTP 400 for an invalid payload and HTTP 404 for an unknown id.
#[handler]
pub async fn update_task_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: UpdateTaskRequest = match req.parse_json().await {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = ?e, "Failed to parse update-task request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    if payload.id.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, "id is required");
        return;
    }
    let Ok(id) = payload.id.parse::<i64>() else {
        render_error(
            res,
            StatusCode::BAD_REQUEST,
            format!("invalid id: {:?}", payload.id),
        );
        return;
    };

    let provider = match get_db_from_depot(depot) {
        Ok(provider) => provider,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    let now = today();
    let draft = payload.draft;
    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(sundial_service::task::update_task(&mut conn, now, id, draft)?)
    })
    .await;

    match result {
        Ok(()) => res.render(Json(IdResponse { id: id.to_string() })),
        Err(err) => render_app_error(res, &err),
    }
}

/// ## Summary
/// DELETE /api/task?id= - Deletes a task.
///
/// ## Errors
/// Returns HTTP 400 for a missing id and HTTP 404 for an unknown one.
#[handler]
pub async fn delete_task_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = require_id(req, res) else {
        return;
    };

    let provider = match get_db_from_depot(depot) {
        Ok(provider) => provider,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(task_query::delete_task(&mut conn, id)?)
    })
    .await;

    match result {
        Ok(()) => {
            tracing::info!(id, "Task deleted");
            res.render(Json(EmptyResponse {}));
        }
        Err(err) => render_app_error(res, &err),
    }
}
