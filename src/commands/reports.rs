// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::ChartData;
use crate::backend::TransactionBackend;
use crate::commands::transactions::{table_rows, TABLE_HEADERS};
use crate::models::Category;
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle<B: TransactionBackend>(
    store: &TransactionStore<B>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("monthly", sub)) => monthly(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary<B: TransactionBackend>(store: &TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let s = store.summary();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
        return Ok(());
    }
    let totals = vec![
        vec!["Income".to_string(), fmt_money(&s.total_income)],
        vec!["Expense".to_string(), fmt_money(&s.total_expense)],
        vec!["Balance".to_string(), fmt_money(&s.balance)],
    ];
    println!("{}", pretty_table(&["", "Total"], totals));
    if s.recent_transactions.is_empty() {
        println!("No transactions yet");
    } else {
        println!("Recent transactions");
        println!(
            "{}",
            pretty_table(&TABLE_HEADERS, table_rows(&s.recent_transactions))
        );
    }
    Ok(())
}

fn category_label(tag: &str) -> String {
    tag.parse::<Category>()
        .map(|c| c.label().to_string())
        .unwrap_or_else(|_| tag.to_string())
}

/// Whole percent of `total`, rounded half up. `None` when nothing was spent.
pub fn share_percent(value: &Decimal, total: &Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return None;
    }
    let ratio = value.checked_div(*total)?;
    ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

fn share_text(value: &Decimal, total: &Decimal) -> String {
    share_percent(value, total)
        .map(|p| format!("{}%", p))
        .unwrap_or_default()
}

/// Category, amount spent and share of all spending, then a total row.
pub fn category_rows(data: &ChartData) -> Vec<Vec<String>> {
    let total = data.total();
    let mut rows: Vec<Vec<String>> = data
        .iter()
        .map(|(tag, v)| vec![category_label(tag), fmt_money(v), share_text(v, &total)])
        .collect();
    rows.push(vec![
        "Total".to_string(),
        fmt_money(&total),
        share_text(&total, &total),
    ]);
    rows
}

fn by_category<B: TransactionBackend>(
    store: &TransactionStore<B>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = store.expenses_by_category();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share"], category_rows(data))
    );
    Ok(())
}

/// `--as-of` or the local date.
pub fn report_date(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn monthly<B: TransactionBackend>(store: &TransactionStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.monthly_balance(report_date(sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|(month, v)| vec![month.to_string(), fmt_money(v)])
        .collect();
    println!("{}", pretty_table(&["Month", "Balance"], rows));
    Ok(())
}
