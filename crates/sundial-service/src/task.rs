//! Scheduling facade over the recurrence engine and the task store.
//!
//! Incoming task payloads are normalized before they hit storage: titles
//! are required, the due date defaults to today, and an overdue date is
//! either coalesced to today (one-shot tasks) or replaced by the next
//! occurrence of the repeat rule.

use chrono::NaiveDate;
use diesel::SqliteConnection;
use serde::Deserialize;

use sundial_core::date::{format_date, parse_date};
use sundial_db::db::query::task as task_query;
use sundial_db::model::task::{NewTask, Task};
use sundial_repeat::next_date;

use crate::error::{ServiceError, ServiceResult};

/// An incoming task payload, before validation. All fields are optional on
/// the wire; missing ones arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

/// ## Summary
/// Validates a draft and applies the due-date policy:
/// - empty `date` defaults to today;
/// - a past date with no repeat rule is coalesced to today;
/// - a past date with a repeat rule becomes the rule's next occurrence
///   relative to today.
///
/// The repeat rule is validated even when the date needs no adjustment, so
/// a task can never be stored with a spec the engine would later reject.
///
/// ## Errors
/// Returns a validation error for an empty title, an unparseable date, or
/// an invalid repeat spec.
pub fn normalize(today: NaiveDate, draft: TaskDraft) -> ServiceResult<NewTask> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(ServiceError::ValidationError("title is required".into()));
    }

    let date_field = draft.date.trim();
    let repeat = draft.repeat.trim().to_string();

    let date = if date_field.is_empty() {
        today
    } else {
        parse_date(date_field)?
    };

    let next = if repeat.is_empty() {
        None
    } else {
        Some(next_date(today, &format_date(date), &repeat)?)
    };

    let date = if date < today {
        match next {
            None => format_date(today),
            Some(next) => next,
        }
    } else {
        format_date(date)
    };

    Ok(NewTask {
        date,
        title,
        comment: draft.comment,
        repeat,
    })
}

/// ## Summary
/// Normalizes and stores a new task, returning its id.
///
/// ## Errors
/// Returns an error if validation or the insert fails.
pub fn add_task(conn: &mut SqliteConnection, today: NaiveDate, draft: TaskDraft) -> ServiceResult<i64> {
    let new_task = normalize(today, draft)?;
    let id = task_query::insert_task(conn, &new_task)?;

    tracing::debug!(id, "Task added");
    Ok(id)
}

/// ## Summary
/// Normalizes a draft and rewrites an existing task with it.
///
/// ## Errors
/// Returns an error if validation fails or the task does not exist.
pub fn update_task(
    conn: &mut SqliteConnection,
    today: NaiveDate,
    id: i64,
    draft: TaskDraft,
) -> ServiceResult<()> {
    let normalized = normalize(today, draft)?;
    let task = Task {
        id,
        date: normalized.date,
        title: normalized.title,
        comment: normalized.comment,
        repeat: normalized.repeat,
    };
    task_query::update_task(conn, &task)?;

    tracing::debug!(id, "Task updated");
    Ok(())
}

/// ## Summary
/// Applies the completion policy: a one-shot task is deleted, a recurring
/// task is moved to its next occurrence after `now`.
///
/// ## Errors
/// Returns an error if the task does not exist or its stored date/spec no
/// longer passes the engine.
pub fn complete_task(conn: &mut SqliteConnection, now: NaiveDate, id: i64) -> ServiceResult<()> {
    let task = task_query::get_task(conn, id)?;

    if task.repeat.is_empty() {
        task_query::delete_task(conn, id)?;
        tracing::debug!(id, "One-shot task completed and deleted");
        return Ok(());
    }

    let next = next_date(now, &task.date, &task.repeat)?;
    task_query::update_task_date(conn, id, &next)?;

    tracing::debug!(id, next, "Recurring task advanced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel::{Connection, SqliteConnection};

    use sundial_db::db::connection::run_migrations;
    use sundial_db::db::query::task as task_query;
    use sundial_db::error::DbError;

    use crate::error::ServiceError;

    use super::{TaskDraft, add_task, complete_task, normalize, update_task};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn draft(date: &str, title: &str, repeat: &str) -> TaskDraft {
        TaskDraft {
            date: date.to_string(),
            title: title.to_string(),
            comment: String::new(),
            repeat: repeat.to_string(),
        }
    }

    fn test_connection() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn empty_date_defaults_to_today() {
        let task = normalize(today(), draft("", "t", "")).unwrap();
        assert_eq!(task.date, "20240115");
    }

    #[test]
    fn future_date_is_kept() {
        let task = normalize(today(), draft("20240301", "t", "")).unwrap();
        assert_eq!(task.date, "20240301");
    }

    #[test]
    fn past_date_without_repeat_coalesces_to_today() {
        let task = normalize(today(), draft("20230901", "t", "")).unwrap();
        assert_eq!(task.date, "20240115");
    }

    #[test]
    fn past_date_with_repeat_advances() {
        let task = normalize(today(), draft("20240113", "t", "d 7")).unwrap();
        assert_eq!(task.date, "20240120");
    }

    #[test]
    fn title_is_required() {
        assert!(matches!(
            normalize(today(), draft("20240301", "  ", "")),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn bad_repeat_is_rejected_even_for_future_dates() {
        assert!(normalize(today(), draft("20240301", "t", "d 401")).is_err());
        assert!(normalize(today(), draft("20240301", "t", "k 1")).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(normalize(today(), draft("15.01.2024", "t", "")).is_err());
    }

    #[test]
    fn complete_deletes_one_shot_task() {
        let mut conn = test_connection();
        let id = add_task(&mut conn, today(), draft("20240116", "t", "")).unwrap();

        complete_task(&mut conn, today(), id).unwrap();

        assert!(matches!(
            task_query::get_task(&mut conn, id),
            Err(DbError::TaskNotFound(_))
        ));
    }

    #[test]
    fn complete_advances_recurring_task() {
        let mut conn = test_connection();
        let id = add_task(&mut conn, today(), draft("20240113", "t", "d 7")).unwrap();

        // add_task already advanced the overdue anchor to the 20th
        assert_eq!(task_query::get_task(&mut conn, id).unwrap().date, "20240120");

        complete_task(&mut conn, today(), id).unwrap();
        assert_eq!(task_query::get_task(&mut conn, id).unwrap().date, "20240127");
    }

    #[test]
    fn update_rewrites_task() {
        let mut conn = test_connection();
        let id = add_task(&mut conn, today(), draft("20240116", "old", "")).unwrap();

        update_task(&mut conn, today(), id, draft("20240201", "new", "w 1")).unwrap();

        let task = task_query::get_task(&mut conn, id).unwrap();
        assert_eq!(task.title, "new");
        assert_eq!(task.date, "20240201");
        assert_eq!(task.repeat, "w 1");
    }

    #[test]
    fn update_missing_task_fails() {
        let mut conn = test_connection();
        assert!(update_task(&mut conn, today(), 77, draft("20240201", "t", "")).is_err());
    }
}
