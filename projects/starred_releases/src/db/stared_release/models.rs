use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use crate::db::schema::stared_releases;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = stared_releases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StaredRelease {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub changes: String,
    pub release_url: String,
    pub avatar_url: String,
    /// Publish time, UTC.
    pub date: NaiveDateTime,
}

/// Output of a refresh: the latest release of one starred repository.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, Serialize)]
#[diesel(table_name = stared_releases)]
pub struct NewStaredRelease {
    pub name: String,
    pub version: String,
    pub changes: String,
    pub release_url: String,
    pub avatar_url: String,
    pub date: NaiveDateTime,
}
