//! Zoo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD plus substring lookups over the `zoos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` assigns a fresh id on first persist and upserts afterwards.
//! - Identifiers are allocated by AUTOINCREMENT and never reused.
//! - Lookup operations never fail on absent ids.

use crate::db::{migrations::latest_version, DbError};
use crate::model::zoo::{Zoo, ZooId, ZooValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ZOO_SELECT_SQL: &str = "SELECT id, name, location, description FROM zoos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for zoo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ZooValidationError),
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ZooValidationError> for RepoError {
    fn from(value: ZooValidationError) -> Self {
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

/// Storage capability contract for zoo records.
///
/// Any backend satisfying this trait can sit behind `ZooService`; the SQLite
/// implementation below is the default one.
pub trait ZooRepository {
    /// Inserts a record without an id (assigning one) or overwrites the
    /// record with the given id. Returns the stored record including its id.
    fn save(&self, zoo: &Zoo) -> RepoResult<Zoo>;
    /// Gets one record by id; absent ids yield `None`.
    fn find_by_id(&self, id: ZooId) -> RepoResult<Option<Zoo>>;
    /// Lists all records in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Zoo>>;
    /// Returns whether a record with this id is currently stored.
    fn exists_by_id(&self, id: ZooId) -> RepoResult<bool>;
    /// Removes the record if present; absent ids are a no-op.
    fn delete_by_id(&self, id: ZooId) -> RepoResult<()>;
    /// Case-insensitive substring match against `name`.
    fn find_by_name_containing(&self, needle: &str) -> RepoResult<Vec<Zoo>>;
    /// Case-insensitive substring match against `location`.
    fn find_by_location_containing(&self, needle: &str) -> RepoResult<Vec<Zoo>>;
}

/// SQLite-backed zoo repository.
pub struct SqliteZooRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteZooRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections that did not go through `db::open_db` /
    /// `db::open_db_in_memory` bootstrap, so callers cannot accidentally
    /// operate on an unmigrated database.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ZooRepository for SqliteZooRepository<'_> {
    fn save(&self, zoo: &Zoo) -> RepoResult<Zoo> {
        zoo.validate()?;

        let id = match zoo.id {
            None => {
                self.conn.execute(
                    "INSERT INTO zoos (name, location, description)
                     VALUES (?1, ?2, ?3);",
                    params![zoo.name, zoo.location, zoo.description.as_deref()],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO zoos (id, name, location, description)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        location = excluded.location,
                        description = excluded.description;",
                    params![id, zoo.name, zoo.location, zoo.description.as_deref()],
                )?;
                id
            }
        };

        Ok(Zoo {
            id: Some(id),
            ..zoo.clone()
        })
    }

    fn find_by_id(&self, id: ZooId) -> RepoResult<Option<Zoo>> {
        let row = self
            .conn
            .query_row(
                &format!("{ZOO_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_zoo_row,
            )
            .optional()?;
        Ok(row)
    }

    fn find_all(&self) -> RepoResult<Vec<Zoo>> {
        // AUTOINCREMENT ids are monotonic, so id order is insertion order.
        self.query_zoos(&format!("{ZOO_SELECT_SQL} ORDER BY id ASC;"), params![])
    }

    fn exists_by_id(&self, id: ZooId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM zoos WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: ZooId) -> RepoResult<()> {
        // Deleting an absent id is a no-op by contract; the affected-row
        // count is intentionally ignored.
        self.conn.execute("DELETE FROM zoos WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn find_by_name_containing(&self, needle: &str) -> RepoResult<Vec<Zoo>> {
        self.query_zoos(
            &format!("{ZOO_SELECT_SQL} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id ASC;"),
            [like_contains_pattern(needle)],
        )
    }

    fn find_by_location_containing(&self, needle: &str) -> RepoResult<Vec<Zoo>> {
        self.query_zoos(
            &format!("{ZOO_SELECT_SQL} WHERE location LIKE ?1 ESCAPE '\\' ORDER BY id ASC;"),
            [like_contains_pattern(needle)],
        )
    }
}

impl SqliteZooRepository<'_> {
    fn query_zoos<P: rusqlite::Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Zoo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut zoos = Vec::new();
        while let Some(row) = rows.next()? {
            zoos.push(parse_zoo_row(row)?);
        }
        Ok(zoos)
    }
}

fn parse_zoo_row(row: &Row<'_>) -> rusqlite::Result<Zoo> {
    Ok(Zoo {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        location: row.get("location")?,
        description: row.get("description")?,
    })
}

/// Builds a `%needle%` LIKE pattern with wildcard characters escaped, so the
/// needle is matched as a literal substring.
///
/// SQLite's LIKE is case-insensitive for ASCII by default, which covers the
/// case-insensitivity contract of the containing-lookups.
fn like_contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "zoos")? {
        return Err(RepoError::MissingRequiredTable("zoos"));
    }

    for column in ["id", "name", "location", "description"] {
        if !table_has_column(conn, "zoos", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "zoos",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::like_contains_pattern;

    #[test]
    fn like_pattern_wraps_needle_in_wildcards() {
        assert_eq!(like_contains_pattern("manila"), "%manila%");
    }

    #[test]
    fn like_pattern_escapes_wildcard_characters() {
        assert_eq!(like_contains_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }

    #[test]
    fn like_pattern_for_empty_needle_matches_everything() {
        assert_eq!(like_contains_pattern(""), "%%");
    }
}
