//! SQLite storage backend
//!
//! Opens the media database read-only through rusqlite. A connection lives
//! for exactly one [`ReviewStore`] call and is dropped before the call
//! returns; nothing is pooled or reused.

use crate::error::{EvalError, Result};
use crate::storage::{validate_identifier, ReviewStore};
use crate::types::{Category, ItemKey, Rating, RatingRecord, SourceTable, UserId};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Columns every review table must carry
const REVIEW_COLUMNS: [&str; 3] = ["user_id", "media_id", "rating"];

/// Read-only SQLite store addressed by file path
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Create a store for the database at `path`
    ///
    /// Nothing is opened until the first query.
    ///
    /// # Example
    /// ```ignore
    /// let store = SqliteStore::new("database.db");
    /// let reviews = store.fetch_reviews(&SourceTable::defaults())?;
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection
    fn connect(&self) -> Result<Connection> {
        debug!("Opening SQLite database: {}", self.path.display());

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.connection_error(e))?;

        // SQLite opens lazily; reading the header rejects non-database files here
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| self.connection_error(e))?;

        Ok(conn)
    }

    fn connection_error(&self, e: rusqlite::Error) -> EvalError {
        EvalError::Connection(format!(
            "Failed to open database {}: {}",
            self.path.display(),
            e
        ))
    }

    /// Title of the item from its media table, if the row exists
    pub fn fetch_media_title(&self, item: &ItemKey) -> Result<Option<String>> {
        let table = item.category.media_table();
        let conn = self.connect()?;
        require_columns(&conn, table, &["id", "title"])?;

        let title = conn
            .query_row(
                &format!("SELECT title FROM \"{}\" WHERE id = ?1", table),
                rusqlite::params![item.media_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        if title.is_none() {
            debug!("Media item not found: {}", item);
        }
        Ok(title)
    }
}

impl ReviewStore for SqliteStore {
    fn fetch_reviews(&self, sources: &[SourceTable]) -> Result<Vec<RatingRecord>> {
        let conn = self.connect()?;
        let mut records = Vec::new();

        for source in sources {
            require_columns(&conn, &source.table, &REVIEW_COLUMNS)?;

            let mut stmt = conn.prepare(&format!(
                "SELECT user_id, media_id, rating FROM \"{}\"",
                source.table
            ))?;
            let category = source.category;
            let rows = stmt.query_map([], |row| {
                Ok(RatingRecord {
                    user_id: row.get(0)?,
                    item: ItemKey::new(category, row.get(1)?),
                    rating: row.get(2)?,
                })
            })?;

            let before = records.len();
            for row in rows {
                records.push(row?);
            }
            debug!(
                "Read {} reviews from {} ({})",
                records.len() - before,
                source.table,
                category
            );
        }

        info!(
            "Fetched {} reviews from {} sources",
            records.len(),
            sources.len()
        );
        Ok(records)
    }

    fn fetch_category_averages(
        &self,
        categories: &[Category],
    ) -> Result<Vec<(Category, Option<Rating>)>> {
        let conn = self.connect()?;
        let mut averages = Vec::with_capacity(categories.len());

        for category in categories {
            let table = category.media_table();
            require_columns(&conn, table, &["rating"])?;

            let avg: Option<f64> = conn.query_row(
                &format!("SELECT AVG(rating) FROM \"{}\"", table),
                [],
                |row| row.get(0),
            )?;
            debug!("Average rating for {}: {:?}", table, avg);
            averages.push((*category, avg));
        }

        Ok(averages)
    }

    fn fetch_labelled_items(&self, table: &str) -> Result<Vec<(UserId, String)>> {
        let conn = self.connect()?;
        require_columns(&conn, table, &["user_id", "item_key"])?;

        let mut stmt = conn.prepare(&format!("SELECT user_id, item_key FROM \"{}\"", table))?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row?);
        }

        info!("Fetched {} ground-truth rows from {}", pairs.len(), table);
        Ok(pairs)
    }
}

/// Fail with a schema error unless `table` exists and has every column
fn require_columns(conn: &Connection, table: &str, columns: &[&str]) -> Result<()> {
    validate_identifier(table)?;

    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if present.is_empty() {
        return Err(EvalError::missing_table(table));
    }

    for column in columns {
        if !present.iter().any(|p| p.eq_ignore_ascii_case(column)) {
            return Err(EvalError::missing_column(table, column));
        }
    }

    Ok(())
}
