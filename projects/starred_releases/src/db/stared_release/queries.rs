use diesel::prelude::*;
use thiserror::Error;
use crate::db::{schema::stared_releases, stared_release::models::*};

/// Rows per INSERT statement, well under SQLite's bound-parameter limit.
const INSERT_CHUNK_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum ReplaceStaredReleasesError {
    #[error("ReplaceStaredReleases: {source}")]
    ReplaceStaredReleases {
        #[from]
        source: diesel::result::Error,
    },
}

/// Deletes every row and inserts `records` in one transaction.
/// Returns the number of inserted rows; on error the previous contents are kept.
pub fn replace_all_stared_releases(
    conn: &mut SqliteConnection,
    records: &[NewStaredRelease],
) -> Result<usize, ReplaceStaredReleasesError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(stared_releases::table).execute(conn)?;

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            inserted += diesel::insert_into(stared_releases::table)
                .values(chunk)
                .execute(conn)?;
        }
        Ok(inserted)
    })
    .map_err(|source| ReplaceStaredReleasesError::ReplaceStaredReleases { source })
}

#[derive(Debug, Error)]
pub enum ListStaredReleasesError {
    #[error("ListStaredReleases: {source}")]
    ListStaredReleases {
        #[from]
        source: diesel::result::Error,
    },
}

/// Newest first.
pub fn list_stared_releases(
    conn: &mut SqliteConnection,
    limit: i64,
    offset: i64,
) -> Result<Vec<StaredRelease>, ListStaredReleasesError> {
    stared_releases::table
        .select(StaredRelease::as_select())
        .order((stared_releases::date.desc(), stared_releases::id.asc()))
        .limit(limit)
        .offset(offset)
        .load(conn)
        .map_err(|source| ListStaredReleasesError::ListStaredReleases { source })
}

#[derive(Debug, Error)]
pub enum CountStaredReleasesError {
    #[error("CountStaredReleases: {source}")]
    CountStaredReleases {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn count_stared_releases(
    conn: &mut SqliteConnection,
) -> Result<i64, CountStaredReleasesError> {
    stared_releases::table
        .count()
        .get_result(conn)
        .map_err(|source| CountStaredReleasesError::CountStaredReleases { source })
}
