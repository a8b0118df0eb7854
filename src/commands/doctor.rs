// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::backend::TransactionBackend;
use crate::error::PersistenceError;
use crate::models::{Transaction, TransactionRecord};
use crate::store::TransactionStore;
use crate::utils::pretty_table;

/// One row per problem: `[issue, id, detail]`.
pub fn scan(records: Vec<TransactionRecord>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for rec in records {
        if !seen.insert(rec.id.clone()) {
            rows.push(vec!["duplicate_id".into(), rec.id.clone(), String::new()]);
        }
        if let Err(e) = Transaction::try_from(rec) {
            rows.push(vec![format!("invalid_{}", e.field), e.id, e.value]);
        }
    }
    rows
}

pub fn handle<B: TransactionBackend>(store: &mut TransactionStore<B>) -> Result<()> {
    let owner = store
        .owner()
        .map(str::to_string)
        .ok_or(PersistenceError::NotSignedIn)?;
    let records = store
        .backend_mut()
        .list(&owner)
        .context("Could not read stored transactions")?;
    let checked = records.len();
    let rows = scan(records);

    if rows.is_empty() {
        println!("✅ doctor: {} transactions checked, no issues found", checked);
    } else {
        println!("{}", pretty_table(&["Issue", "Id", "Detail"], rows));
    }
    Ok(())
}
