//! Task table queries.

use chrono::NaiveDate;
use diesel::prelude::*;

use sundial_core::constants::TASK_LIST_LIMIT;
use sundial_core::date::format_date;

use crate::db::schema::scheduler;
use crate::error::{DbError, DbResult};
use crate::model::task::{NewTask, Task};

/// Date layout accepted by list search; a matching search string becomes an
/// exact due-date filter instead of a substring match.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// ## Summary
/// Inserts a task and returns its generated id.
///
/// ## Errors
/// Returns an error if the insert fails.
pub fn insert_task(conn: &mut SqliteConnection, new_task: &NewTask) -> DbResult<i64> {
    let id = diesel::insert_into(scheduler::table)
        .values(new_task)
        .returning(scheduler::id)
        .get_result::<i64>(conn)?;
    Ok(id)
}

/// ## Summary
/// Fetches a single task by id.
///
/// ## Errors
/// Returns [`DbError::TaskNotFound`] if no such row exists.
pub fn get_task(conn: &mut SqliteConnection, id: i64) -> DbResult<Task> {
    scheduler::table
        .find(id)
        .select(Task::as_select())
        .first(conn)
        .optional()?
        .ok_or(DbError::TaskNotFound(id))
}

/// ## Summary
/// Updates every field of an existing task.
///
/// ## Errors
/// Returns [`DbError::TaskNotFound`] if no row was changed.
pub fn update_task(conn: &mut SqliteConnection, task: &Task) -> DbResult<()> {
    let affected = diesel::update(scheduler::table.find(task.id))
        .set(task)
        .execute(conn)?;
    if affected == 0 {
        return Err(DbError::TaskNotFound(task.id));
    }
    Ok(())
}

/// ## Summary
/// Moves a task to a new due date, leaving the other fields alone.
///
/// ## Errors
/// Returns [`DbError::TaskNotFound`] if no row was changed.
pub fn update_task_date(conn: &mut SqliteConnection, id: i64, date: &str) -> DbResult<()> {
    let affected = diesel::update(scheduler::table.find(id))
        .set(scheduler::date.eq(date))
        .execute(conn)?;
    if affected == 0 {
        return Err(DbError::TaskNotFound(id));
    }
    Ok(())
}

/// ## Summary
/// Deletes a task by id.
///
/// ## Errors
/// Returns [`DbError::TaskNotFound`] if no row was deleted.
pub fn delete_task(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    let affected = diesel::delete(scheduler::table.find(id)).execute(conn)?;
    if affected == 0 {
        return Err(DbError::TaskNotFound(id));
    }
    Ok(())
}

/// ## Summary
/// Lists tasks ordered by `(date, id)`, capped at [`TASK_LIST_LIMIT`].
///
/// A search string in `DD.MM.YYYY` form filters on the exact due date;
/// any other non-empty string is a substring match over title and comment.
///
/// ## Errors
/// Returns an error if the query fails.
pub fn list_tasks(conn: &mut SqliteConnection, search: Option<&str>) -> DbResult<Vec<Task>> {
    let mut query = scheduler::table.select(Task::as_select()).into_boxed();

    if let Some(search) = search.filter(|s| !s.is_empty()) {
        if let Ok(date) = NaiveDate::parse_from_str(search, SEARCH_DATE_FORMAT) {
            query = query.filter(scheduler::date.eq(format_date(date)));
        } else {
            let pattern = format!("%{search}%");
            query = query.filter(
                scheduler::title
                    .like(pattern.clone())
                    .or(scheduler::comment.like(pattern)),
            );
        }
    }

    let tasks = query
        .order((scheduler::date.asc(), scheduler::id.asc()))
        .limit(TASK_LIST_LIMIT)
        .load(conn)?;
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use diesel::{Connection, SqliteConnection};

    use crate::db::connection::run_migrations;
    use crate::error::DbError;
    use crate::model::task::NewTask;

    use super::{delete_task, get_task, insert_task, list_tasks, update_task, update_task_date};

    fn test_connection() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    fn sample(date: &str, title: &str, comment: &str) -> NewTask {
        NewTask {
            date: date.to_string(),
            title: title.to_string(),
            comment: comment.to_string(),
            repeat: String::new(),
        }
    }

    #[test]
    fn insert_and_get() {
        let mut conn = test_connection();
        let id = insert_task(&mut conn, &sample("20240115", "groceries", "")).unwrap();

        let task = get_task(&mut conn, id).unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.date, "20240115");
        assert_eq!(task.title, "groceries");
    }

    #[test]
    fn get_missing_is_not_found() {
        let mut conn = test_connection();
        assert!(matches!(
            get_task(&mut conn, 42),
            Err(DbError::TaskNotFound(42))
        ));
    }

    #[test]
    fn update_rewrites_all_fields() {
        let mut conn = test_connection();
        let id = insert_task(&mut conn, &sample("20240115", "old", "old")).unwrap();

        let mut task = get_task(&mut conn, id).unwrap();
        task.title = "new".to_string();
        task.repeat = "d 7".to_string();
        update_task(&mut conn, &task).unwrap();

        let stored = get_task(&mut conn, id).unwrap();
        assert_eq!(stored.title, "new");
        assert_eq!(stored.repeat, "d 7");
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut conn = test_connection();
        let mut task = {
            let id = insert_task(&mut conn, &sample("20240115", "t", "")).unwrap();
            get_task(&mut conn, id).unwrap()
        };
        task.id = 9999;
        assert!(matches!(
            update_task(&mut conn, &task),
            Err(DbError::TaskNotFound(9999))
        ));
    }

    #[test]
    fn update_date_only() {
        let mut conn = test_connection();
        let id = insert_task(&mut conn, &sample("20240115", "t", "c")).unwrap();

        update_task_date(&mut conn, id, "20240122").unwrap();

        let stored = get_task(&mut conn, id).unwrap();
        assert_eq!(stored.date, "20240122");
        assert_eq!(stored.comment, "c");
    }

    #[test]
    fn delete_removes_row() {
        let mut conn = test_connection();
        let id = insert_task(&mut conn, &sample("20240115", "t", "")).unwrap();

        delete_task(&mut conn, id).unwrap();
        assert!(matches!(
            get_task(&mut conn, id),
            Err(DbError::TaskNotFound(_))
        ));
        assert!(delete_task(&mut conn, id).is_err());
    }

    #[test]
    fn list_orders_by_date_then_id() {
        let mut conn = test_connection();
        let later = insert_task(&mut conn, &sample("20240301", "b", "")).unwrap();
        let earlier = insert_task(&mut conn, &sample("20240102", "a", "")).unwrap();

        let tasks = list_tasks(&mut conn, None).unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![earlier, later]
        );
    }

    #[test]
    fn list_search_matches_title_and_comment() {
        let mut conn = test_connection();
        insert_task(&mut conn, &sample("20240102", "water plants", "")).unwrap();
        insert_task(&mut conn, &sample("20240103", "taxes", "file plants form")).unwrap();
        insert_task(&mut conn, &sample("20240104", "other", "")).unwrap();

        let tasks = list_tasks(&mut conn, Some("plants")).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn list_search_by_date() {
        let mut conn = test_connection();
        insert_task(&mut conn, &sample("20240102", "a", "")).unwrap();
        insert_task(&mut conn, &sample("20240103", "b", "")).unwrap();

        let tasks = list_tasks(&mut conn, Some("02.01.2024")).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "a");
    }

    #[test]
    fn list_empty_search_lists_everything() {
        let mut conn = test_connection();
        insert_task(&mut conn, &sample("20240102", "a", "")).unwrap();

        let tasks = list_tasks(&mut conn, Some("")).unwrap();
        assert_eq!(tasks.len(), 1);
    }
}
