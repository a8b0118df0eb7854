// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, NewTransaction, TransactionType};

const SAMPLES: &[(i64, TransactionType, Category, (i32, u32, u32), &str)] = &[
    (2500, TransactionType::Income, Category::Salary, (2023, 10, 1), "Monthly salary"),
    (800, TransactionType::Expense, Category::Housing, (2023, 10, 3), "Rent payment"),
    (120, TransactionType::Expense, Category::Utilities, (2023, 10, 5), "Electricity bill"),
    (65, TransactionType::Expense, Category::Food, (2023, 10, 8), "Grocery shopping"),
    (200, TransactionType::Expense, Category::Entertainment, (2023, 10, 15), "Concert tickets"),
    (350, TransactionType::Income, Category::Gift, (2023, 10, 20), "Birthday gift from parents"),
    (45, TransactionType::Expense, Category::Transportation, (2023, 10, 22), "Uber rides"),
    (2500, TransactionType::Income, Category::Salary, (2023, 11, 1), "Monthly salary"),
    (800, TransactionType::Expense, Category::Housing, (2023, 11, 3), "Rent payment"),
    (110, TransactionType::Expense, Category::Utilities, (2023, 11, 5), "Electricity bill"),
    (75, TransactionType::Expense, Category::Healthcare, (2023, 11, 10), "Pharmacy"),
    (150, TransactionType::Expense, Category::Personal, (2023, 11, 18), "New clothes"),
    (500, TransactionType::Income, Category::Investment, (2023, 11, 25), "Stock dividends"),
    (2500, TransactionType::Income, Category::Salary, (2023, 12, 1), "Monthly salary"),
    (800, TransactionType::Expense, Category::Housing, (2023, 12, 3), "Rent payment"),
];

/// Sample data for a fresh ledger: three months of salary and spending.
pub fn sample_transactions() -> Vec<NewTransaction> {
    SAMPLES
        .iter()
        .filter_map(|&(amount, kind, category, (y, m, d), note)| {
            Some(NewTransaction {
                amount: Decimal::from(amount),
                kind,
                category,
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                note: Some(note.to_string()),
            })
        })
        .collect()
}
