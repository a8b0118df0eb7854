// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::backend::TransactionBackend;
use crate::filter::{sort_transactions, SortDirection, SortField, TransactionFilter};
use crate::models::{Transaction, TransactionInput, TransactionPatch};
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle<B: TransactionBackend>(
    store: &mut TransactionStore<B>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).map(|s| s.trim().to_string())
}

/// Builds the form input from `tx add` arguments; the date defaults to today.
pub fn input_from_matches(sub: &clap::ArgMatches) -> TransactionInput {
    TransactionInput {
        amount: arg(sub, "amount").unwrap_or_default(),
        kind: arg(sub, "type").unwrap_or_default(),
        category: arg(sub, "category").unwrap_or_default(),
        date: arg(sub, "date")
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
        note: arg(sub, "note").unwrap_or_default(),
    }
}

fn add<B: TransactionBackend>(store: &mut TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let new = input_from_matches(sub).parse()?;
    let tx = store.create(new).context("Could not record transaction")?;
    println!(
        "Recorded {} {} ({}) on {} [{}]",
        tx.kind,
        fmt_money(&tx.amount),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

pub fn patch_from_matches(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        amount: arg(sub, "amount").map(|s| parse_amount(&s)).transpose()?,
        kind: arg(sub, "type").map(|s| s.parse()).transpose()?,
        category: arg(sub, "category").map(|s| s.parse()).transpose()?,
        date: arg(sub, "date").map(|s| parse_date(&s)).transpose()?,
        note: arg(sub, "note").map(|s| Some(s).filter(|n| !n.is_empty())),
    })
}

fn edit<B: TransactionBackend>(store: &mut TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let patch = patch_from_matches(sub)?;
    if patch.is_empty() {
        println!("Nothing to change for {}", id);
        return Ok(());
    }
    let tx = store
        .update(id, &patch)
        .with_context(|| format!("Could not update transaction {}", id))?;
    println!(
        "Updated {}: {} {} ({}) on {}",
        tx.id,
        tx.kind,
        fmt_money(&tx.amount),
        tx.category,
        tx.date
    );
    Ok(())
}

fn remove<B: TransactionBackend>(store: &mut TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    store
        .delete(id)
        .with_context(|| format!("Could not delete transaction {}", id))?;
    println!("Deleted {}", id);
    Ok(())
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        kind: arg(sub, "type").map(|s| s.parse()).transpose()?,
        category: arg(sub, "category").map(|s| s.parse()).transpose()?,
        start_date: arg(sub, "from").map(|s| parse_date(&s)).transpose()?,
        end_date: arg(sub, "to").map(|s| parse_date(&s)).transpose()?,
        search: sub
            .get_one::<String>("search")
            .filter(|s| !s.trim().is_empty())
            .cloned(),
    })
}

/// Filtered, sorted and limited rows for `tx list`.
pub fn query_rows<B: TransactionBackend>(
    store: &TransactionStore<B>,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let spec = filter_from_matches(sub)?;
    let mut rows = store.filter(&spec);

    let field = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortField>().map_err(anyhow::Error::msg)?,
        None => SortField::default(),
    };
    let dir = if sub.get_flag("asc") {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    sort_transactions(&mut rows, field, dir);

    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.label().to_string(),
            amount: fmt_money(&t.amount),
            note: t.note.clone().unwrap_or_default(),
        }
    }
}

pub fn table_rows(data: &[Transaction]) -> Vec<Vec<String>> {
    data.iter()
        .map(TransactionRow::from)
        .map(|r| vec![r.date, r.note, r.category, r.kind, r.amount, r.id])
        .collect()
}

pub const TABLE_HEADERS: [&str; 6] = ["Date", "Note", "Category", "Type", "Amount", "Id"];

fn list<B: TransactionBackend>(store: &TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found");
        } else {
            println!("{}", pretty_table(&TABLE_HEADERS, table_rows(&data)));
        }
    }
    Ok(())
}
