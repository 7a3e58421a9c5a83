//! Read-only inspection of a local SQLite store.
//!
//! Prints the working directory, the tables in the store and every row of a
//! single target table. A missing store and a failing dump are both reported
//! on the output and are not errors; anything else propagates.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row, TypeInfo, ValueRef};

use crate::domain::TodoError;

pub const DEFAULT_DB_FILE: &str = "todo.db";
pub const TARGET_TABLE: &str = "tasks";

/// What a single inspection found.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    Missing,
    Inspected {
        tables: Vec<String>,
        rows: usize,
        query_error: Option<String>,
    },
}

/// One column value, rendered by its SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Cell {
    fn from_column(row: &SqliteRow, idx: usize) -> Result<Self, sqlx::Error> {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }

        let cell = match raw.type_info().name() {
            "INTEGER" | "BOOLEAN" => Cell::Integer(row.try_get_unchecked(idx)?),
            "REAL" => Cell::Real(row.try_get_unchecked(idx)?),
            "BLOB" => Cell::Blob(row.try_get_unchecked(idx)?),
            _ => Cell::Text(row.try_get_unchecked(idx)?),
        };
        Ok(cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Real(v) => write!(f, "{:?}", v),
            Cell::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Cell::Blob(bytes) => {
                f.write_str("x'")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                f.write_str("'")
            }
        }
    }
}

/// A full row as a parenthesised, comma separated tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDisplay(pub Vec<Cell>);

impl RowDisplay {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        (0..row.len())
            .map(|idx| Cell::from_column(row, idx))
            .collect::<Result<Vec<_>, _>>()
            .map(RowDisplay)
    }
}

impl fmt::Display for RowDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", cell)?;
        }
        f.write_str(")")
    }
}

/// Catalog table names, quoted the same way as text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableList<'a>(pub &'a [String]);

impl fmt::Display for TableList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Cell::Text(name.clone()))?;
        }
        f.write_str("]")
    }
}

#[derive(Debug, Clone)]
pub struct StoreInspector {
    db_path: PathBuf,
    target_table: String,
}

impl Default for StoreInspector {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE, TARGET_TABLE)
    }
}

impl StoreInspector {
    pub fn new(db_path: impl Into<PathBuf>, target_table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            target_table: target_table.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Inspection, TodoError> {
        let cwd = std::env::current_dir()?;
        writeln!(out, "cwd {}", cwd.display())?;

        if !self.db_path.exists() {
            tracing::debug!("No store at {}", self.db_path.display());
            writeln!(out, "no db file found")?;
            return Ok(Inspection::Missing);
        }

        let mut conn = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await?;

        let result = self.inspect(&mut conn, out).await;

        // Closed on every path, including a failed catalog query.
        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close connection to {}: {}", self.db_path.display(), e);
        }

        result
    }

    async fn inspect<W: Write>(
        &self,
        conn: &mut SqliteConnection,
        out: &mut W,
    ) -> Result<Inspection, TodoError> {
        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table'")
                .fetch_all(&mut *conn)
                .await?;
        writeln!(out, "tables {}", TableList(&tables))?;

        let (rows, query_error) = self.dump_target(conn, out).await?;
        if let Some(err) = &query_error {
            writeln!(out, "query error {}", err)?;
        }

        tracing::debug!(
            tables = tables.len(),
            rows,
            failed = query_error.is_some(),
            "Inspected {}",
            self.db_path.display()
        );

        Ok(Inspection::Inspected {
            tables,
            rows,
            query_error,
        })
    }

    /// Streams the target table to `out`. Database failures are returned as
    /// the second element, output failures as `Err`.
    async fn dump_target<W: Write>(
        &self,
        conn: &mut SqliteConnection,
        out: &mut W,
    ) -> Result<(usize, Option<String>), TodoError> {
        let sql = format!(
            "SELECT * FROM \"{}\"",
            self.target_table.replace('"', "\"\"")
        );
        let mut stream = sqlx::query(&sql).fetch(&mut *conn);
        let mut printed = 0;

        loop {
            let row = match stream.try_next().await {
                Ok(Some(row)) => row,
                Ok(None) => return Ok((printed, None)),
                Err(e) => return Ok((printed, Some(e.to_string()))),
            };

            match RowDisplay::from_row(&row) {
                Ok(display) => {
                    writeln!(out, "row {}", display)?;
                    printed += 1;
                }
                Err(e) => return Ok((printed, Some(e.to_string()))),
            }
        }
    }
}
