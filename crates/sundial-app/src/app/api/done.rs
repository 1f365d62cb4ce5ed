use salvo::{Depot, Request, Response, handler, writing::Json};

use sundial_core::date::today;

use super::{EmptyResponse, render_app_error, require_id, run_blocking};
use crate::db_handler::get_db_from_depot;

/// ## Summary
/// POST /api/task/done?id= - Marks a task done: one-shot tasks are
/// deleted, recurring tasks move to their next occurrence.
///
/// ## Errors
/// Returns HTTP 400 for a missing id and HTTP 404 for an unknown one.
#[handler]
pub async fn done_task_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
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

    let now = today();
    let result = run_blocking(move || {
        let mut conn = provider.get_connection()?;
        Ok(sundial_service::task::complete_task(&mut conn, now, id)?)
    })
    .await;

    match result {
        Ok(()) => res.render(Json(EmptyResponse {})),
        Err(err) => render_app_error(res, &err),
    }
}
