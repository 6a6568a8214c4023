//! Reviewer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `find_all`/`find_by_id`/`save`/`delete_by_id` over `reviewers`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Reviewer::validate()` before SQL mutations.
//! - Email conflicts are detected from the storage constraint, never by a
//!   pre-check query.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::reviewer::{Reviewer, ReviewerId, ReviewerValidationError};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REVIEWER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    affiliation,
    expertise
FROM reviewers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for reviewer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewerValidationError),
    Db(DbError),
    NotFound(ReviewerId),
    /// Another row already holds this email.
    DuplicateEmail(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "reviewer not found: {id}"),
            Self::DuplicateEmail(email) => write!(f, "email already exists: {email}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reviewer data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateEmail(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewerValidationError> for RepoError {
    fn from(value: ReviewerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for reviewer CRUD operations.
pub trait ReviewerRepository {
    /// Returns every reviewer ordered by ascending id.
    fn find_all(&self) -> RepoResult<Vec<Reviewer>>;
    fn find_by_id(&self, id: ReviewerId) -> RepoResult<Option<Reviewer>>;
    /// Inserts when `id` is `None`, otherwise overwrites every non-id column.
    ///
    /// Returns the stored row.
    fn save(&self, reviewer: &Reviewer) -> RepoResult<Reviewer>;
    fn delete_by_id(&self, id: ReviewerId) -> RepoResult<()>;
}

/// SQLite-backed reviewer repository.
pub struct SqliteReviewerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, reviewer: &Reviewer) -> RepoResult<ReviewerId> {
        self.conn
            .execute(
                "INSERT INTO reviewers (
                    name,
                    email,
                    affiliation,
                    expertise
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    reviewer.name.as_str(),
                    reviewer.email.as_str(),
                    reviewer.affiliation.as_deref(),
                    reviewer.expertise.as_deref(),
                ],
            )
            .map_err(|err| map_write_error(err, &reviewer.email))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: ReviewerId, reviewer: &Reviewer) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE reviewers
                 SET
                    name = ?1,
                    email = ?2,
                    affiliation = ?3,
                    expertise = ?4
                 WHERE id = ?5;",
                params![
                    reviewer.name.as_str(),
                    reviewer.email.as_str(),
                    reviewer.affiliation.as_deref(),
                    reviewer.expertise.as_deref(),
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, &reviewer.email))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl ReviewerRepository for SqliteReviewerRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Reviewer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEWER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut reviewers = Vec::new();

        while let Some(row) = rows.next()? {
            reviewers.push(parse_reviewer_row(row)?);
        }

        Ok(reviewers)
    }

    fn find_by_id(&self, id: ReviewerId) -> RepoResult<Option<Reviewer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEWER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reviewer_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, reviewer: &Reviewer) -> RepoResult<Reviewer> {
        reviewer.validate()?;

        let id = match reviewer.id {
            Some(id) => {
                self.update(id, reviewer)?;
                id
            }
            None => self.insert(reviewer)?,
        };
        debug!("event=reviewer_save module=repo status=ok id={id}");

        self.find_by_id(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_by_id(&self, id: ReviewerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reviewers WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Returns the number of stored reviewers.
pub fn count_reviewers(conn: &Connection) -> RepoResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM reviewers;", [], |row| row.get(0))?;
    Ok(count)
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    let err = DbError::Sqlite(err);
    if err.is_unique_violation() {
        return RepoError::DuplicateEmail(email.to_string());
    }
    RepoError::Db(err)
}

fn parse_reviewer_row(row: &Row<'_>) -> RepoResult<Reviewer> {
    let id: ReviewerId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in reviewers.id"
        )));
    }

    let reviewer = Reviewer {
        id: Some(id),
        name: row.get("name")?,
        email: row.get("email")?,
        affiliation: row.get("affiliation")?,
        expertise: row.get("expertise")?,
    };
    reviewer
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("reviewer {id}: {err}")))?;
    Ok(reviewer)
}
