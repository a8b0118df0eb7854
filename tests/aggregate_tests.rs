// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::aggregate::{
    coerce_records, expenses_by_category, monthly_balance, summarize, ChartData,
};
use fintrack::models::{
    Category, RawAmount, Transaction, TransactionRecord, TransactionType,
};
use fintrack::seed;
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, amount: &str, kind: TransactionType, category: Category, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        kind,
        category,
        date: d(date),
        note: None,
    }
}

fn samples() -> Vec<Transaction> {
    seed::sample_transactions()
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.with_id((i + 1).to_string()))
        .collect()
}

#[test]
fn summary_of_income_and_expense() {
    let data = vec![
        tx("1", "2500", TransactionType::Income, Category::Salary, "2023-10-01"),
        tx("2", "800", TransactionType::Expense, Category::Housing, "2023-10-03"),
    ];
    let s = summarize(&data);
    assert_eq!(s.total_income, Decimal::from(2500));
    assert_eq!(s.total_expense, Decimal::from(800));
    assert_eq!(s.balance, Decimal::from(1700));
    let ids: Vec<&str> = s.recent_transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[test]
fn empty_collection_yields_zeros() {
    let s = summarize(&[]);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert!(s.recent_transactions.is_empty());

    let by_cat = expenses_by_category(&[]);
    assert!(by_cat.labels.is_empty());
    assert!(by_cat.values.is_empty());

    let monthly = monthly_balance(&[], d("2024-03-15"));
    assert_eq!(monthly.len(), 6);
    assert!(monthly.values.iter().all(|v| v.is_zero()));
}

#[test]
fn balance_and_category_totals_agree_on_sample_data() {
    let data = samples();
    let s = summarize(&data);
    assert_eq!(s.balance, s.total_income - s.total_expense);
    assert_eq!(s.total_income, Decimal::from(8350));
    assert_eq!(s.total_expense, Decimal::from(3165));
    assert_eq!(expenses_by_category(&data).total(), s.total_expense);
}

#[test]
fn recent_transactions_are_five_newest_with_stable_ties() {
    let data = vec![
        tx("a", "1", TransactionType::Expense, Category::Food, "2024-01-01"),
        tx("b", "1", TransactionType::Expense, Category::Food, "2024-01-05"),
        tx("c", "1", TransactionType::Expense, Category::Food, "2024-01-05"),
        tx("d", "1", TransactionType::Expense, Category::Food, "2024-01-03"),
        tx("e", "1", TransactionType::Expense, Category::Food, "2024-01-02"),
        tx("f", "1", TransactionType::Expense, Category::Food, "2024-01-09"),
        tx("g", "1", TransactionType::Expense, Category::Food, "2023-12-31"),
    ];
    let s = summarize(&data);
    let ids: Vec<&str> = s.recent_transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["f", "b", "c", "d", "e"]);
}

#[test]
fn expenses_grouped_in_first_seen_order() {
    let data = vec![
        tx("1", "10", TransactionType::Expense, Category::Food, "2024-01-01"),
        tx("2", "500", TransactionType::Income, Category::Salary, "2024-01-01"),
        tx("3", "99.5", TransactionType::Expense, Category::Housing, "2024-01-02"),
        tx("4", "5.25", TransactionType::Expense, Category::Food, "2024-01-03"),
        tx("5", "7", TransactionType::Income, Category::Other, "2024-01-03"),
        tx("6", "1", TransactionType::Expense, Category::Other, "2024-01-04"),
    ];
    let chart = expenses_by_category(&data);
    assert_eq!(chart.labels, ["food", "housing", "other"]);
    assert_eq!(
        chart.values,
        [
            Decimal::from_str("15.25").unwrap(),
            Decimal::from_str("99.5").unwrap(),
            Decimal::from(1)
        ]
    );
}

#[test]
fn monthly_balance_covers_six_months_oldest_first() {
    let data = samples();
    let chart = monthly_balance(&data, d("2023-12-20"));
    assert_eq!(chart.labels, ["Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]);
    assert_eq!(
        chart.values,
        [
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(1620),
            Decimal::from(1865),
            Decimal::from(1700),
        ]
    );
}

#[test]
fn monthly_balance_crosses_year_boundary() {
    let data = vec![
        tx("1", "100", TransactionType::Income, Category::Gift, "2023-11-30"),
        tx("2", "40", TransactionType::Expense, Category::Food, "2024-02-29"),
        // same month number, previous year: outside the window
        tx("3", "999", TransactionType::Income, Category::Salary, "2023-02-10"),
    ];
    let chart = monthly_balance(&data, d("2024-03-31"));
    assert_eq!(chart.labels, ["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
    assert_eq!(chart.values[1], Decimal::from(100));
    assert_eq!(chart.values[4], Decimal::from(-40));
    assert_eq!(chart.total(), Decimal::from(60));
}

#[test]
fn chart_data_iterates_pairs() {
    let chart = ChartData {
        labels: vec!["food".into()],
        values: vec![Decimal::from(3)],
    };
    let pairs: Vec<(&str, &Decimal)> = chart.iter().collect();
    assert_eq!(pairs, [("food", &Decimal::from(3))]);
}

fn record(id: &str, amount: RawAmount) -> TransactionRecord {
    TransactionRecord {
        id: id.into(),
        amount,
        kind: "expense".into(),
        category: "food".into(),
        date: "2024-01-01".into(),
        note: None,
    }
}

#[test]
fn numeric_like_strings_are_coerced() {
    let txs = coerce_records(vec![
        record("1", RawAmount::Text(" 12.50 ".into())),
        record("2", RawAmount::Integer(3)),
        record("3", RawAmount::Real(0.25)),
    ])
    .unwrap();
    let s = summarize(&txs);
    assert_eq!(s.total_expense, Decimal::from_str("15.75").unwrap());
}

#[test]
fn non_numeric_amount_is_an_integrity_error() {
    let err = coerce_records(vec![
        record("1", RawAmount::Text("10".into())),
        record("2", RawAmount::Text("ten".into())),
    ])
    .unwrap_err();
    assert_eq!(err.id, "2");
    assert_eq!(err.field, "amount");
    assert_eq!(err.value, "ten");

    let err = coerce_records(vec![record("3", RawAmount::Real(f64::NAN))]).unwrap_err();
    assert_eq!(err.id, "3");
}
