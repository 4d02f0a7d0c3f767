//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SheetStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SheetStore, StorageError, StorageResult};
use crate::storage::SheetRecord;
use crate::HarvestError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(HarvestError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, HarvestError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, HarvestError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn get_sheet(&self, sheet_id: i64) -> StorageResult<SheetRecord> {
        self.conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM sheets WHERE id = ?1",
                params![sheet_id],
                sheet_from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::SheetNotFound(format!("Sheet ID {}", sheet_id)))
    }

    fn touch(&self, sheet_id: i64) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE sheets SET updated_at = ?1 WHERE id = ?2",
            params![now, sheet_id],
        )?;
        Ok(())
    }

    fn next_row_index(conn: &Connection, sheet_id: i64) -> StorageResult<i64> {
        let next: i64 = conn.query_row(
            "SELECT COALESCE(MAX(row_index), -1) + 1 FROM sheet_rows WHERE sheet_id = ?1",
            params![sheet_id],
            |row| row.get(0),
        )?;
        Ok(next)
    }
}

fn sheet_from_row(row: &Row<'_>) -> rusqlite::Result<SheetRecord> {
    Ok(SheetRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

fn encode_cells(cells: &[String]) -> StorageResult<String> {
    serde_json::to_string(cells).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn decode_cells(cells: &str) -> StorageResult<Vec<String>> {
    serde_json::from_str(cells).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl SheetStore for SqliteStorage {
    fn open_or_create(&mut self, name: &str) -> StorageResult<SheetRecord> {
        if let Some(existing) = self.find_sheet(name)? {
            return Ok(existing);
        }

        tracing::info!("Creating new sheet named '{}'", name);
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO sheets (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![name, now],
        )?;

        self.get_sheet(self.conn.last_insert_rowid())
    }

    fn find_sheet(&self, name: &str) -> StorageResult<Option<SheetRecord>> {
        let sheet = self
            .conn
            .query_row(
                "SELECT id, name, created_at, updated_at FROM sheets WHERE name = ?1",
                params![name],
                sheet_from_row,
            )
            .optional()?;
        Ok(sheet)
    }

    fn list_sheets(&self) -> StorageResult<Vec<SheetRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at, updated_at FROM sheets ORDER BY id")?;

        let sheets = stmt
            .query_map([], sheet_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sheets)
    }

    fn clear(&mut self, sheet_id: i64) -> StorageResult<()> {
        self.get_sheet(sheet_id)?;
        self.conn.execute(
            "DELETE FROM sheet_rows WHERE sheet_id = ?1",
            params![sheet_id],
        )?;
        self.touch(sheet_id)
    }

    fn append_row(&mut self, sheet_id: i64, cells: &[String]) -> StorageResult<()> {
        self.append_rows(sheet_id, &[cells.to_vec()])?;
        Ok(())
    }

    fn append_rows(&mut self, sheet_id: i64, rows: &[Vec<String>]) -> StorageResult<usize> {
        self.get_sheet(sheet_id)?;

        let tx = self.conn.transaction()?;
        let mut index = Self::next_row_index(&tx, sheet_id)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sheet_rows (sheet_id, row_index, cells) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(params![sheet_id, index, encode_cells(row)?])?;
                index += 1;
            }
        }
        tx.commit()?;

        self.touch(sheet_id)?;
        Ok(rows.len())
    }

    fn rows(&self, sheet_id: i64) -> StorageResult<Vec<Vec<String>>> {
        self.get_sheet(sheet_id)?;

        let mut stmt = self
            .conn
            .prepare("SELECT cells FROM sheet_rows WHERE sheet_id = ?1 ORDER BY row_index")?;

        let encoded = stmt
            .query_map(params![sheet_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        encoded.iter().map(|cells| decode_cells(cells)).collect()
    }

    fn row_count(&self, sheet_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sheet_rows WHERE sheet_id = ?1",
            params![sheet_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
