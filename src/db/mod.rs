//! SQLite database layer for boutique
//!
//! Stores plugin data per host document. Each document gets its own
//! key/value namespace, which is what the catalog store persists into.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::BoutiquePaths;
use crate::store::PluginData;

/// Database wrapper
pub struct Database {
    conn: Connection,
}

/// One row of the plugin_data table
#[derive(Debug, Clone)]
pub struct PluginDataRow {
    pub document: String,
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

impl Database {
    /// Open an existing database
    pub fn open(paths: &BoutiquePaths) -> Result<Self> {
        let conn = Connection::open(&paths.db_file).context("Failed to open boutique database")?;
        Ok(Self { conn })
    }

    /// Initialize a new database with schema
    pub fn init(paths: &BoutiquePaths) -> Result<Self> {
        Self::init_at(&paths.db_file)
    }

    /// Initialize a database at an explicit location
    pub fn init_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to create boutique database")?;
        Self::create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, schema included
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::create_schema(&conn)?;
        Ok(Self { conn })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS plugin_data (
                document    TEXT NOT NULL,
                key         TEXT NOT NULL,
                value       TEXT NOT NULL,
                updated_at  INTEGER NOT NULL,
                PRIMARY KEY (document, key)
            )
            "#,
            [],
        )
        .context("Failed to create plugin_data table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_plugin_data_document ON plugin_data(document)",
            [],
        )?;

        Ok(())
    }

    /// Read a value, `None` when the key was never written
    pub fn get_value(&self, document: &str, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM plugin_data WHERE document = ?1 AND key = ?2",
                params![document, key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to read plugin data")
    }

    /// Insert or overwrite a value
    pub fn set_value(&self, document: &str, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        self.conn
            .execute(
                r#"
                INSERT INTO plugin_data (document, key, value, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(document, key) DO UPDATE SET value = ?3, updated_at = ?4
                "#,
                params![document, key, value, now],
            )
            .context("Failed to write plugin data")?;
        Ok(())
    }

    /// Every stored value, most recently updated first
    pub fn list_values(&self) -> Result<Vec<PluginDataRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT document, key, value, updated_at FROM plugin_data ORDER BY updated_at DESC, document",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PluginDataRow {
                document: row.get(0)?,
                key: row.get(1)?,
                value: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }

    /// Names of documents that have plugin data
    pub fn list_documents(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT document FROM plugin_data ORDER BY document")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?);
        }
        Ok(documents)
    }

    /// Scope plugin data to one document
    pub fn document(&self, name: &str) -> DocumentData<'_> {
        DocumentData {
            db: self,
            document: name.to_string(),
        }
    }
}

/// Plugin data of a single document
pub struct DocumentData<'a> {
    db: &'a Database,
    document: String,
}

impl PluginData for DocumentData<'_> {
    fn get_plugin_data(&self, key: &str) -> Result<String> {
        Ok(self.db.get_value(&self.document, key)?.unwrap_or_default())
    }

    fn set_plugin_data(&mut self, key: &str, value: &str) -> Result<()> {
        self.db.set_value(&self.document, key, value)
    }
}
