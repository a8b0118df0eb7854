// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::backend::TransactionBackend;
use crate::error::PersistenceError;
use crate::seed;
use crate::store::TransactionStore;

/// Loads the sample transactions unless the signed-in user already has data.
/// Returns how many were added.
pub fn seed_store<B: TransactionBackend>(store: &mut TransactionStore<B>) -> Result<usize> {
    if store.owner().is_none() {
        return Err(PersistenceError::NotSignedIn).context("Sign in before seeding");
    }
    if !store.transactions().is_empty() {
        return Ok(0);
    }
    let samples = seed::sample_transactions();
    let n = samples.len();
    for tx in samples {
        store.create(tx).context("Could not store sample transaction")?;
    }
    Ok(n)
}

pub fn handle<B: TransactionBackend>(
    store: &mut TransactionStore<B>,
    location: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    println!("Storage ready at {}", location);
    if sub.get_flag("seed") {
        match seed_store(store)? {
            0 => println!(
                "Skipped sample data: {} transactions already recorded",
                store.transactions().len()
            ),
            n => println!("Loaded {} sample transactions", n),
        }
    }
    Ok(())
}
