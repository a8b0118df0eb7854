// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Transaction, TransactionType};
use crate::utils::amount_text;

/// Optional predicates, combined with AND. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != t.kind) {
            return false;
        }
        if self.category.is_some_and(|c| c != t.category) {
            return false;
        }
        if self.start_date.is_some_and(|d| t.date < d) {
            return false;
        }
        if self.end_date.is_some_and(|d| t.date > d) {
            return false;
        }
        // whitespace-only terms are blank; others match untrimmed
        match self.search.as_deref() {
            Some(term) if !term.trim().is_empty() => search_matches(t, &term.to_lowercase()),
            _ => true,
        }
    }
}

fn search_matches(t: &Transaction, term: &str) -> bool {
    let in_note = t
        .note
        .as_deref()
        .is_some_and(|n| n.to_lowercase().contains(term));
    in_note || t.category.as_str().contains(term) || amount_text(&t.amount).contains(term)
}

/// Returns the matching subsequence, keeping collection order.
pub fn filter(transactions: &[Transaction], spec: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| spec.matches(t))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Note,
    Category,
    Amount,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "note" => Ok(Self::Note),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            other => Err(format!(
                "Unknown sort field '{}', expected date|note|category|amount",
                other
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "date",
            Self::Note => "note",
            Self::Category => "category",
            Self::Amount => "amount",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

fn compare(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Note => a
            .note
            .as_deref()
            .unwrap_or("")
            .cmp(b.note.as_deref().unwrap_or("")),
        SortField::Category => a.category.as_str().cmp(b.category.as_str()),
        SortField::Amount => a.amount.cmp(&b.amount),
    }
}

/// Stable in-place sort for table display. Independent of filtering.
pub fn sort_transactions(transactions: &mut [Transaction], field: SortField, dir: SortDirection) {
    transactions.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match dir {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
