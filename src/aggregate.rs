// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views derived from the full transaction collection.
//!
//! Every function here is pure: it borrows a snapshot and recomputes from
//! scratch. Nothing is updated incrementally.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::DataIntegrityError;
use crate::models::{Category, Transaction, TransactionRecord, TransactionType};

pub const RECENT_LIMIT: usize = 5;
pub const TRAILING_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub recent_transactions: Vec<Transaction>,
}

/// Two parallel series, ready to be charted or tabulated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Decimal)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter())
    }

    pub fn total(&self) -> Decimal {
        self.values.iter().copied().sum()
    }

    fn push(&mut self, label: impl Into<String>, value: Decimal) {
        self.labels.push(label.into());
        self.values.push(value);
    }
}

fn signed_amount(t: &Transaction) -> Decimal {
    match t.kind {
        TransactionType::Income => t.amount,
        TransactionType::Expense => -t.amount,
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TransactionType::Income => total_income += t.amount,
            TransactionType::Expense => total_expense += t.amount,
        }
    }

    // sort_by is stable, so equal dates keep collection order
    let mut by_date: Vec<&Transaction> = transactions.iter().collect();
    by_date.sort_by(|a, b| b.date.cmp(&a.date));
    let recent_transactions = by_date.into_iter().take(RECENT_LIMIT).cloned().collect();

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        recent_transactions,
    }
}

/// Expense totals per category, in the order categories are first seen.
pub fn expenses_by_category(transactions: &[Transaction]) -> ChartData {
    let mut groups: Vec<(Category, Decimal)> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
    {
        match groups.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.amount,
            None => groups.push((t.category, t.amount)),
        }
    }

    let mut out = ChartData::default();
    for (category, sum) in groups {
        out.push(category.as_str(), sum);
    }
    out
}

/// Balance of each of the six calendar months ending with `today`'s month,
/// oldest first. Months without transactions are zero.
pub fn monthly_balance(transactions: &[Transaction], today: NaiveDate) -> ChartData {
    let first_of_month = today
        .checked_sub_days(Days::new(u64::from(today.day0())))
        .unwrap_or(today);

    let mut out = ChartData::default();
    for back in (0..TRAILING_MONTHS).rev() {
        let Some(month) = first_of_month.checked_sub_months(Months::new(back)) else {
            continue;
        };
        let balance = transactions
            .iter()
            .filter(|t| t.date.year() == month.year() && t.date.month() == month.month())
            .map(signed_amount)
            .sum();
        out.push(month.format("%b").to_string(), balance);
    }
    out
}

/// Coerces storage rows into transactions. The first bad record stops the
/// build and is reported; nothing is skipped silently.
pub fn coerce_records(
    records: impl IntoIterator<Item = TransactionRecord>,
) -> Result<Vec<Transaction>, DataIntegrityError> {
    records.into_iter().map(Transaction::try_from).collect()
}
