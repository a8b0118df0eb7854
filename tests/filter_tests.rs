// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::filter::{filter, sort_transactions, SortDirection, SortField, TransactionFilter};
use fintrack::models::{Category, Transaction, TransactionType};
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(
    id: &str,
    amount: &str,
    kind: TransactionType,
    category: Category,
    date: &str,
    note: Option<&str>,
) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        kind,
        category,
        date: d(date),
        note: note.map(str::to_string),
    }
}

fn mixed() -> Vec<Transaction> {
    use Category::*;
    use TransactionType::*;
    vec![
        tx("1", "2500", Income, Salary, "2023-10-01", Some("Monthly salary")),
        tx("2", "65", Expense, Food, "2023-10-08", Some("Grocery shopping")),
        tx("3", "800", Expense, Housing, "2023-10-03", Some("Rent payment")),
        tx("4", "12.50", Expense, Food, "2023-10-10", None),
        tx("5", "200", Expense, Entertainment, "2023-10-15", Some("Concert tickets")),
        tx("6", "350", Income, Gift, "2023-10-20", Some("Birthday gift")),
        tx("7", "45", Expense, Transportation, "2023-10-22", Some("Uber rides")),
        tx("8", "31.2", Expense, Food, "2023-11-02", Some("Farmers MARKET")),
        tx("9", "110", Expense, Utilities, "2023-11-05", Some("Electricity bill")),
        tx("10", "500", Income, Investment, "2023-11-25", Some("Stock dividends")),
    ]
}

fn ids(txs: &[Transaction]) -> Vec<&str> {
    txs.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let data = mixed();
    let out = filter(&data, &TransactionFilter::default());
    assert_eq!(out, data);
}

#[test]
fn category_filter_keeps_relative_order() {
    let data = mixed();
    let spec = TransactionFilter {
        category: Some(Category::Food),
        ..Default::default()
    };
    let out = filter(&data, &spec);
    assert_eq!(ids(&out), ["2", "4", "8"]);
}

#[test]
fn type_filter_is_closed_and_idempotent() {
    let data = mixed();
    let spec = TransactionFilter {
        kind: Some(TransactionType::Income),
        ..Default::default()
    };
    let once = filter(&data, &spec);
    assert!(once.iter().all(|t| t.kind == TransactionType::Income));
    assert_eq!(ids(&once), ["1", "6", "10"]);
    assert_eq!(filter(&once, &spec), once);
}

#[test]
fn date_range_is_inclusive() {
    let data = mixed();
    let spec = TransactionFilter {
        start_date: Some(d("2023-10-08")),
        end_date: Some(d("2023-10-20")),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&data, &spec)), ["2", "4", "5", "6"]);
}

#[test]
fn search_matches_note_case_insensitively() {
    let data = mixed();
    let spec = TransactionFilter {
        search: Some("market".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&data, &spec)), ["8"]);
}

#[test]
fn search_matches_category_and_amount() {
    let data = mixed();
    let by_category = TransactionFilter {
        search: Some("TRANSPORT".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&data, &by_category)), ["7"]);

    // 12.50 is searched as "12.5"
    let by_amount = TransactionFilter {
        search: Some("12.5".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&data, &by_amount)), ["4"]);

    let by_digits = TransactionFilter {
        search: Some("50".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&data, &by_digits)), ["1", "6", "10"]);
}

#[test]
fn blank_search_is_ignored() {
    let data = mixed();
    let spec = TransactionFilter {
        search: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(filter(&data, &spec).len(), data.len());
}

#[test]
fn predicates_combine_with_and() {
    let data = mixed();
    let spec = TransactionFilter {
        kind: Some(TransactionType::Expense),
        category: Some(Category::Food),
        start_date: Some(d("2023-10-09")),
        end_date: None,
        search: Some("farmers".into()),
    };
    assert_eq!(ids(&filter(&data, &spec)), ["8"]);

    let none = TransactionFilter {
        kind: Some(TransactionType::Income),
        category: Some(Category::Food),
        ..Default::default()
    };
    assert!(filter(&data, &none).is_empty());
}

#[test]
fn sort_by_date_descending_by_default() {
    let mut data = mixed();
    sort_transactions(&mut data, SortField::default(), SortDirection::default());
    assert_eq!(ids(&data)[..3], ["10", "9", "8"]);
}

#[test]
fn sort_by_amount_is_numeric() {
    let mut data = mixed();
    sort_transactions(&mut data, SortField::Amount, SortDirection::Asc);
    assert_eq!(ids(&data)[..4], ["4", "8", "7", "2"]);
}

#[test]
fn sort_by_note_puts_missing_first_ascending() {
    let mut data = mixed();
    sort_transactions(&mut data, SortField::Note, SortDirection::Asc);
    assert_eq!(ids(&data)[..2], ["4", "6"]);
}

#[test]
fn sort_by_category_is_stable() {
    let mut data = mixed();
    sort_transactions(&mut data, SortField::Category, SortDirection::Asc);
    let cats: Vec<&str> = data.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(
        cats,
        [
            "entertainment",
            "food",
            "food",
            "food",
            "gift",
            "housing",
            "investment",
            "salary",
            "transportation",
            "utilities"
        ]
    );
    assert_eq!(ids(&data)[1..4], ["2", "4", "8"]);
}

#[test]
fn sort_field_parses() {
    assert_eq!("Amount".parse::<SortField>().unwrap(), SortField::Amount);
    assert!("payee".parse::<SortField>().is_err());
}

#[test]
fn search_term_is_not_trimmed() {
    let data = mixed();
    let search = |term: &str| {
        let spec = TransactionFilter {
            search: Some(term.into()),
            ..Default::default()
        };
        ids(&filter(&data, &spec))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(search("rent"), ["3"]);
    assert_eq!(search("RENT "), ["3"]);
    assert_eq!(search(" payment"), ["3"]);
    assert!(search(" rent").is_empty());
}
