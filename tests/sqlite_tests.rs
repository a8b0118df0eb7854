// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::backend::TransactionBackend;
use fintrack::db::{self, SqliteBackend};
use fintrack::error::{Error, PersistenceError};
use fintrack::models::{
    Category, NewTransaction, RawAmount, Transaction, TransactionPatch, TransactionType,
};
use fintrack::store::TransactionStore;
use rusqlite::params;
use rust_decimal::Decimal;
use std::str::FromStr;

fn tx(id: &str, amount: &str, kind: TransactionType, category: Category, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        kind,
        category,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: Some("n".into()),
    }
}

#[test]
fn insert_list_update_delete_round_trip() {
    let mut be = SqliteBackend::open_in_memory().unwrap();
    let a = tx("a", "2500", TransactionType::Income, Category::Salary, "2023-10-01");
    let b = tx("b", "65.40", TransactionType::Expense, Category::Food, "2023-10-08");
    be.insert("alice", &a).unwrap();
    be.insert("alice", &b).unwrap();
    be.insert("bob", &tx("c", "1", TransactionType::Expense, Category::Other, "2023-10-09"))
        .unwrap();

    let rows = be.list("alice").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "a");
    assert_eq!(rows[1].amount, RawAmount::Text("65.40".into()));
    assert_eq!(Transaction::try_from(rows[1].clone()).unwrap(), b);

    let mut changed = b.clone();
    changed.amount = Decimal::from(70);
    changed.note = None;
    be.update("alice", &changed).unwrap();
    let rows = be.list("alice").unwrap();
    assert_eq!(Transaction::try_from(rows[1].clone()).unwrap(), changed);

    be.delete("alice", "a").unwrap();
    assert_eq!(be.list("alice").unwrap().len(), 1);
}

#[test]
fn unknown_ids_and_foreign_owners_are_not_found() {
    let mut be = SqliteBackend::open_in_memory().unwrap();
    let a = tx("a", "10", TransactionType::Expense, Category::Food, "2024-01-01");
    be.insert("alice", &a).unwrap();

    assert!(matches!(be.delete("alice", "zzz"), Err(PersistenceError::NotFound(_))));
    assert!(matches!(be.delete("bob", "a"), Err(PersistenceError::NotFound(_))));
    assert!(matches!(be.update("bob", &a), Err(PersistenceError::NotFound(_))));
    assert!(matches!(be.insert("alice", &a), Err(PersistenceError::Duplicate(id)) if id == "a"));
}

#[test]
fn legacy_amount_cells_are_coerced_or_flagged() {
    let mut be = SqliteBackend::open_in_memory().unwrap();
    be.connection()
        .execute(
            "INSERT INTO transactions(id, owner, amount, type, category, date) VALUES (?1, 'alice', ?2, 'expense', 'food', '2024-01-01')",
            params!["num", " 42.5"],
        )
        .unwrap();
    let mut store = TransactionStore::new(be);
    store.sign_in("alice").unwrap();
    assert_eq!(store.summary().total_expense, Decimal::from_str("42.5").unwrap());

    store
        .backend()
        .connection()
        .execute(
            "INSERT INTO transactions(id, owner, amount, type, category, date) VALUES ('junk', 'alice', 'n/a', 'expense', 'food', '2024-01-02')",
            [],
        )
        .unwrap();
    match store.reload().unwrap_err() {
        Error::DataIntegrity(e) => {
            assert_eq!(e.id, "junk");
            assert_eq!(e.value, "n/a");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(store.transactions().len(), 1);
}

#[test]
fn store_over_sqlite_follows_the_mutation_contract() {
    let mut store = TransactionStore::new(SqliteBackend::open_in_memory().unwrap());
    store.sign_in("alice").unwrap();
    let t = store
        .create(NewTransaction {
            amount: Decimal::from(800),
            kind: TransactionType::Expense,
            category: Category::Housing,
            date: NaiveDate::from_ymd_opt(2023, 10, 3).unwrap(),
            note: Some("Rent payment".into()),
        })
        .unwrap();
    let patched = store
        .update(
            &t.id,
            &TransactionPatch {
                category: Some(Category::Utilities),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.get(&t.id), Some(&patched));

    store.delete(&t.id).unwrap();
    assert!(store.backend_mut().list("alice").unwrap().is_empty());
    assert!(matches!(
        store.delete(&t.id).unwrap_err(),
        Error::Persistence(PersistenceError::NotFound(_))
    ));
}

#[test]
fn database_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = db::db_path(&dir.path().join("nested"));
    {
        let mut be = SqliteBackend::open(&path).unwrap();
        be.insert("alice", &tx("a", "5", TransactionType::Income, Category::Gift, "2024-05-01"))
            .unwrap();
    }
    let mut be = SqliteBackend::open(&path).unwrap();
    assert_eq!(be.list("alice").unwrap().len(), 1);
    let version: String = be
        .connection()
        .query_row(
            "SELECT value FROM settings WHERE key='schema_version'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(version, "1");
}
