use salvo::{Depot, Request, Response, handler, writing::Json};
use serde::Serialize;

use sundial_db::db::query::task as task_query;

use super::task::TaskPayload;
use super::{render_app_error, run_blocking};
use crate::db_handler::get_db_from_depot;

/// ## Summary
/// Task list response payload; `tasks` is always present, never null.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskPayload>,
}

/// ## Summary
/// GET /api/tasks?search= - Lists upcoming tasks ordered by due date,
/// capped at 50. A `DD.MM.YYYY` search filters on the exact date, any
/// other search string matches title and comment substrings.
#[handler]
pub async fn list_tasks_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let search = req.query::<String>("search");

    let provider = match get_db_from_depot(depot) {
        Ok(provider) => provider,
        Err(err) => {
            render_app_error(res, &err);
            return;
        }
    };

    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(task_query::list_tasks(&mut conn, search.as_deref())?)
    })
    .await;

    match result {
        Ok(tasks) => res.render(Json(TasksResponse {
            tasks: tasks.into_iter().map(TaskPayload::from).collect(),
        })),
        Err(err) => render_app_error(res, &err),
    }
}
