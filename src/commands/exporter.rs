// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};

use crate::backend::TransactionBackend;
use crate::commands::transactions::filter_from_matches;
use crate::filter::{sort_transactions, SortDirection, SortField};
use crate::models::Transaction;
use crate::store::TransactionStore;

pub fn handle<B: TransactionBackend>(
    store: &TransactionStore<B>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions<B: TransactionBackend>(
    store: &TransactionStore<B>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("--out missing")?.trim();

    let mut rows = store.filter(&filter_from_matches(sub)?);
    sort_transactions(&mut rows, SortField::Date, SortDirection::Asc);

    match fmt.as_str() {
        "csv" => write_csv(out, &rows)?,
        "json" => std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?,
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn write_csv(out: &str, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Open {}", out))?;
    wtr.write_record(["id", "date", "type", "category", "amount", "note"])?;
    for t in rows {
        wtr.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.kind.to_string(),
            t.category.to_string(),
            t.amount.to_string(),
            t.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
