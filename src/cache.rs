// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local fallback cache: a JSON file holding each owner's records.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::TransactionBackend;
use crate::error::PersistenceError;
use crate::models::{Transaction, TransactionRecord};
use crate::seed;

pub const CACHE_FILE: &str = "transactions.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    owners: BTreeMap<String, Vec<TransactionRecord>>,
}

pub struct JsonCache {
    path: PathBuf,
    seed_on_first_load: bool,
}

impl JsonCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_on_first_load: false,
        }
    }

    /// Owners seen for the first time get the sample transactions.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed_on_first_load = seed;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<CacheFile, PersistenceError> {
        if !self.path.exists() {
            return Ok(CacheFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(CacheFile::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write(&self, file: &CacheFile) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn owner_rows<'a>(
        file: &'a mut CacheFile,
        owner: &str,
    ) -> &'a mut Vec<TransactionRecord> {
        file.owners.entry(owner.to_string()).or_default()
    }
}

impl TransactionBackend for JsonCache {
    fn list(&mut self, owner: &str) -> Result<Vec<TransactionRecord>, PersistenceError> {
        let mut file = self.read()?;
        if let Some(rows) = file.owners.get(owner) {
            debug!(owner, count = rows.len(), "read cached transactions");
            return Ok(rows.clone());
        }
        if !self.seed_on_first_load {
            return Ok(Vec::new());
        }
        let rows: Vec<TransactionRecord> = seed::sample_transactions()
            .into_iter()
            .map(|t| TransactionRecord::from(&t.with_id(Uuid::new_v4().to_string())))
            .collect();
        file.owners.insert(owner.to_string(), rows.clone());
        self.write(&file)?;
        info!(owner, count = rows.len(), "seeded cache with sample transactions");
        Ok(rows)
    }

    fn insert(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        let mut file = self.read()?;
        if file.owners.values().flatten().any(|r| r.id == tx.id) {
            return Err(PersistenceError::Duplicate(tx.id.clone()));
        }
        Self::owner_rows(&mut file, owner).push(tx.into());
        self.write(&file)
    }

    fn update(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        let mut file = self.read()?;
        let slot = file
            .owners
            .get_mut(owner)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == tx.id))
            .ok_or_else(|| PersistenceError::NotFound(tx.id.clone()))?;
        *slot = tx.into();
        self.write(&file)
    }

    fn delete(&mut self, owner: &str, id: &str) -> Result<(), PersistenceError> {
        let mut file = self.read()?;
        let rows = file
            .owners
            .get_mut(owner)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        let idx = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        rows.remove(idx);
        self.write(&file)
    }
}
