// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::EngineError;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendclip", "spendclip"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendclip.sqlite"))
}

/// Durable record store: one SQLite table of named JSON blobs.
pub struct SqliteStore {
    conn: Connection,
}

pub fn open_or_init() -> Result<SqliteStore> {
    let path = db_path()?;
    SqliteStore::open(&path)
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS records(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

fn storage_err(e: rusqlite::Error) -> EngineError {
    EngineError::StorageUnavailable(e.to_string())
}

impl RecordStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, EngineError> {
        self.conn
            .query_row(
                "SELECT value FROM records WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()
            .map_err(storage_err)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EngineError> {
        self.conn
            .execute(
                "INSERT INTO records(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
                params![key, value],
            )
            .map_err(storage_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        self.conn
            .execute("DELETE FROM records WHERE key=?1", params![key])
            .map_err(storage_err)?;
        Ok(())
    }
}
