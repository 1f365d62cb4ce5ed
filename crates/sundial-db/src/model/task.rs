use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::schema;

/// A stored task. `date` is the fixed-width `YYYYMMDD` due date and
/// `repeat` the raw recurrence spec, empty for one-shot tasks.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = schema::scheduler)]
#[diesel(check_for_backend(Sqlite))]
pub struct Task {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::scheduler)]
pub struct NewTask {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}
