// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction collection and its single mutation boundary.
//!
//! Every mutation goes to the backend first and is followed by a full
//! reload, so the in-memory collection only ever mirrors what the backend
//! accepted. Mutations take `&mut self`, which serializes them.

use chrono::NaiveDate;
use once_cell::unsync::OnceCell;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aggregate::{self, ChartData, Summary};
use crate::backend::TransactionBackend;
use crate::error::{Error, PersistenceError, Result};
use crate::filter::{self, TransactionFilter};
use crate::models::{NewTransaction, Transaction, TransactionPatch};

/// Views that depend only on the collection; rebuilt lazily per version.
#[derive(Debug)]
struct DerivedViews {
    summary: Summary,
    expenses_by_category: ChartData,
}

pub struct TransactionStore<B> {
    backend: B,
    owner: Option<String>,
    transactions: Vec<Transaction>,
    version: u64,
    derived: OnceCell<DerivedViews>,
}

impl<B: TransactionBackend> TransactionStore<B> {
    /// A store with no signed-in user and an empty collection.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            owner: None,
            transactions: Vec::new(),
            version: 0,
            derived: OnceCell::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn sign_in(&mut self, owner: impl Into<String>) -> Result<()> {
        let owner = owner.into();
        info!(owner = %owner, "signed in");
        self.owner = Some(owner);
        self.reload()
    }

    pub fn sign_out(&mut self) {
        if let Some(owner) = self.owner.take() {
            info!(owner = %owner, "signed out");
        }
        self.replace(Vec::new());
    }

    /// Replaces the collection with the backend's view of it.
    ///
    /// If any stored row is corrupt the previous collection is kept and the
    /// integrity error is returned.
    pub fn reload(&mut self) -> Result<()> {
        let Some(owner) = self.owner.clone() else {
            self.replace(Vec::new());
            return Ok(());
        };
        let records = self.backend.list(&owner)?;
        let transactions = aggregate::coerce_records(records)?;
        debug!(owner = %owner, count = transactions.len(), "reloaded transactions");
        self.replace(transactions);
        Ok(())
    }

    fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.version += 1;
        self.derived = OnceCell::new();
    }

    fn require_owner(&self) -> Result<String> {
        self.owner
            .clone()
            .ok_or_else(|| PersistenceError::NotSignedIn.into())
    }

    pub fn create(&mut self, new: NewTransaction) -> Result<Transaction> {
        new.validate()?;
        let owner = self.require_owner()?;
        let tx = new.with_id(Uuid::new_v4().to_string());
        let outcome = self.backend.insert(&owner, &tx);
        self.settle("create", &tx.id, outcome)?;
        info!(id = %tx.id, amount = %tx.amount, kind = %tx.kind, "created transaction");
        Ok(tx)
    }

    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> Result<Transaction> {
        let owner = self.require_owner()?;
        let current = self
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        let merged = patch.apply(current)?;
        let outcome = self.backend.update(&owner, &merged);
        self.settle("update", id, outcome)?;
        info!(id = %id, "updated transaction");
        Ok(merged)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let owner = self.require_owner()?;
        let outcome = self.backend.delete(&owner, id);
        self.settle("delete", id, outcome)?;
        info!(id = %id, "deleted transaction");
        Ok(())
    }

    /// Reloads after a mutation attempt. A rejected write still triggers a
    /// refetch so the collection matches the backend, then the write error
    /// is returned.
    fn settle(
        &mut self,
        op: &str,
        id: &str,
        outcome: Result<(), PersistenceError>,
    ) -> Result<()> {
        match outcome {
            Ok(()) => self.reload(),
            Err(err) => {
                warn!(op, id, error = %err, "backend rejected mutation");
                if let Err(reload_err) = self.reload() {
                    warn!(error = %reload_err, "refetch after failed {} also failed", op);
                }
                Err(Error::Persistence(err))
            }
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Bumped on every reload or sign-out.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn derived(&self) -> &DerivedViews {
        self.derived.get_or_init(|| DerivedViews {
            summary: aggregate::summarize(&self.transactions),
            expenses_by_category: aggregate::expenses_by_category(&self.transactions),
        })
    }

    pub fn summary(&self) -> &Summary {
        &self.derived().summary
    }

    pub fn expenses_by_category(&self) -> &ChartData {
        &self.derived().expenses_by_category
    }

    pub fn monthly_balance(&self, today: NaiveDate) -> ChartData {
        aggregate::monthly_balance(&self.transactions, today)
    }

    pub fn filter(&self, spec: &TransactionFilter) -> Vec<Transaction> {
        filter::filter(&self.transactions, spec)
    }
}
