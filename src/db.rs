// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::backend::TransactionBackend;
use crate::error::PersistenceError;
use crate::models::{RawAmount, Transaction, TransactionRecord};

pub const DB_FILE: &str = "fintrack.sqlite";

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

/// SQLite persistence: one row per transaction, keyed by id, scoped by owner.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, PersistenceError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_schema(conn: &Connection) -> Result<(), PersistenceError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        owner TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_owner_date ON transactions(owner, date);

    INSERT OR IGNORE INTO settings(key, value) VALUES('schema_version', '1');
    "#,
    )?;
    Ok(())
}

fn raw_amount(v: Value) -> RawAmount {
    match v {
        Value::Integer(i) => RawAmount::Integer(i),
        Value::Real(f) => RawAmount::Real(f),
        Value::Text(s) => RawAmount::Text(s),
        Value::Null | Value::Blob(_) => RawAmount::Missing,
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl TransactionBackend for SqliteBackend {
    fn list(&mut self, owner: &str) -> Result<Vec<TransactionRecord>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, type, category, date, note
             FROM transactions WHERE owner=?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![owner], |r| {
            Ok(TransactionRecord {
                id: r.get(0)?,
                amount: raw_amount(r.get::<_, Value>(1)?),
                kind: r.get(2)?,
                category: r.get(3)?,
                date: r.get(4)?,
                note: r.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        debug!(owner, count = out.len(), "listed transactions");
        Ok(out)
    }

    fn insert(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        self.conn
            .execute(
                "INSERT INTO transactions(id, owner, amount, type, category, date, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    tx.id,
                    owner,
                    tx.amount.to_string(),
                    tx.kind.as_str(),
                    tx.category.as_str(),
                    tx.date.to_string(),
                    tx.note
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::Duplicate(tx.id.clone())
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }

    fn update(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        let n = self.conn.execute(
            "UPDATE transactions SET amount=?3, type=?4, category=?5, date=?6, note=?7
             WHERE id=?1 AND owner=?2",
            params![
                tx.id,
                owner,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category.as_str(),
                tx.date.to_string(),
                tx.note
            ],
        )?;
        if n == 0 {
            return Err(PersistenceError::NotFound(tx.id.clone()));
        }
        Ok(())
    }

    fn delete(&mut self, owner: &str, id: &str) -> Result<(), PersistenceError> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND owner=?2",
            params![id, owner],
        )?;
        if n == 0 {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
