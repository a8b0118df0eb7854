// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PersistenceError;
use crate::models::{Transaction, TransactionRecord};

/// Row-per-transaction persistence keyed by id and scoped by owner.
///
/// `update` and `delete` of an id the owner does not hold fail with
/// [`PersistenceError::NotFound`]; `insert` of an existing id fails with
/// [`PersistenceError::Duplicate`].
pub trait TransactionBackend {
    fn list(&mut self, owner: &str) -> Result<Vec<TransactionRecord>, PersistenceError>;
    fn insert(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError>;
    fn update(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError>;
    fn delete(&mut self, owner: &str, id: &str) -> Result<(), PersistenceError>;
}

impl<B: TransactionBackend + ?Sized> TransactionBackend for Box<B> {
    fn list(&mut self, owner: &str) -> Result<Vec<TransactionRecord>, PersistenceError> {
        (**self).list(owner)
    }

    fn insert(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        (**self).insert(owner, tx)
    }

    fn update(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        (**self).update(owner, tx)
    }

    fn delete(&mut self, owner: &str, id: &str) -> Result<(), PersistenceError> {
        (**self).delete(owner, id)
    }
}

/// In-process backend. Holds raw records so tests can plant bad rows.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: Vec<(String, TransactionRecord)>,
    reject_writes: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record as-is, bypassing every check.
    pub fn put_raw(&mut self, owner: &str, record: TransactionRecord) {
        self.rows.push((owner.to_string(), record));
    }

    /// Make every following write fail with [`PersistenceError::Rejected`].
    pub fn reject_writes(&mut self, reason: impl Into<String>) {
        self.reject_writes = Some(reason.into());
    }

    pub fn accept_writes(&mut self) {
        self.reject_writes = None;
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        match &self.reject_writes {
            Some(reason) => Err(PersistenceError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }

    fn position(&self, owner: &str, id: &str) -> Option<usize> {
        self.rows.iter().position(|(o, r)| o == owner && r.id == id)
    }
}

impl TransactionBackend for MemoryBackend {
    fn list(&mut self, owner: &str) -> Result<Vec<TransactionRecord>, PersistenceError> {
        Ok(self
            .rows
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn insert(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        self.check_writable()?;
        if self.rows.iter().any(|(_, r)| r.id == tx.id) {
            return Err(PersistenceError::Duplicate(tx.id.clone()));
        }
        self.rows.push((owner.to_string(), tx.into()));
        Ok(())
    }

    fn update(&mut self, owner: &str, tx: &Transaction) -> Result<(), PersistenceError> {
        self.check_writable()?;
        let idx = self
            .position(owner, &tx.id)
            .ok_or_else(|| PersistenceError::NotFound(tx.id.clone()))?;
        self.rows[idx].1 = tx.into();
        Ok(())
    }

    fn delete(&mut self, owner: &str, id: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        let idx = self
            .position(owner, id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        self.rows.remove(idx);
        Ok(())
    }
}
