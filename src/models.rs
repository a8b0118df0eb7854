// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DataIntegrityError, ValidationError};
use crate::utils::{parse_amount, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ValidationError::UnknownType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    Healthcare,
    Savings,
    Personal,
    Entertainment,
    Other,
    Salary,
    Investment,
    Gift,
}

const INCOME_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Investment,
    Category::Gift,
    Category::Other,
];

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Housing,
    Category::Transportation,
    Category::Food,
    Category::Utilities,
    Category::Insurance,
    Category::Healthcare,
    Category::Savings,
    Category::Personal,
    Category::Entertainment,
    Category::Other,
];

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Savings,
        Category::Personal,
        Category::Entertainment,
        Category::Other,
        Category::Salary,
        Category::Investment,
        Category::Gift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Transportation => "transportation",
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Insurance => "insurance",
            Self::Healthcare => "healthcare",
            Self::Savings => "savings",
            Self::Personal => "personal",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
            Self::Salary => "salary",
            Self::Investment => "investment",
            Self::Gift => "gift",
        }
    }

    /// Human readable name used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food & Groceries",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::Healthcare => "Healthcare",
            Self::Savings => "Savings & Investments",
            Self::Personal => "Personal",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
            Self::Salary => "Salary",
            Self::Investment => "Investment",
            Self::Gift => "Gift",
        }
    }

    /// Categories a transaction of `kind` may carry, in display order.
    pub fn allowed_for(kind: TransactionType) -> &'static [Category] {
        match kind {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }

    pub fn is_allowed_for(&self, kind: TransactionType) -> bool {
        Self::allowed_for(kind).contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(self.amount, self.kind, self.category)
    }

    pub fn with_id(self, id: impl Into<String>) -> Transaction {
        Transaction {
            id: id.into(),
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            note: self.note,
        }
    }
}

/// Largest accepted amount (one trillion). Keeps every collection sum far
/// inside `Decimal` range, so aggregation never overflows.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Range check shared by form input, patches and stored rows.
pub fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount, MAX_AMOUNT));
    }
    Ok(())
}

fn check_fields(
    amount: Decimal,
    kind: TransactionType,
    category: Category,
) -> Result<(), ValidationError> {
    check_amount(amount)?;
    if !category.is_allowed_for(kind) {
        return Err(ValidationError::CategoryNotAllowed { category, kind });
    }
    Ok(())
}

/// Partial edit merged onto an existing transaction.
///
/// `note: Some(None)` clears the note, `note: None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub note: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `base` and validate the result. The id never changes.
    pub fn apply(&self, base: &Transaction) -> Result<Transaction, ValidationError> {
        let merged = Transaction {
            id: base.id.clone(),
            amount: self.amount.unwrap_or(base.amount),
            kind: self.kind.unwrap_or(base.kind),
            category: self.category.unwrap_or(base.category),
            date: self.date.unwrap_or(base.date),
            note: match &self.note {
                Some(n) => n.clone(),
                None => base.note.clone(),
            },
        };
        check_fields(merged.amount, merged.kind, merged.category)?;
        Ok(merged)
    }
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub date: String,
    pub note: String,
}

impl TransactionInput {
    /// Checks run in form order; the first failure is reported.
    pub fn parse(&self) -> Result<NewTransaction, ValidationError> {
        let amount = parse_amount(&self.amount)?;
        let kind = if self.kind.trim().is_empty() {
            TransactionType::Expense
        } else {
            self.kind.parse()?
        };
        let category: Category = self.category.parse()?;
        let date = parse_date(&self.date)?;
        let note = Some(self.note.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        let tx = NewTransaction {
            amount,
            kind,
            category,
            date,
            note,
        };
        tx.validate()?;
        Ok(tx)
    }
}

/// Amount cell as it comes out of storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Integer(i64),
    Real(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawAmount {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(i) => Some(Decimal::from(*i)),
            Self::Real(f) => Decimal::try_from(*f).ok(),
            Self::Text(s) => s.trim().parse::<Decimal>().ok(),
            Self::Missing => None,
        }
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::Text(s) => f.write_str(s),
            Self::Missing => f.write_str("<missing>"),
        }
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        Self::Text(d.to_string())
    }
}

/// Untrusted storage row. Converted into a [`Transaction`] with `TryFrom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    #[serde(default)]
    pub amount: RawAmount,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&Transaction> for TransactionRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            amount: t.amount.into(),
            kind: t.kind.as_str().to_string(),
            category: t.category.as_str().to_string(),
            date: t.date.format("%Y-%m-%d").to_string(),
            note: t.note.clone(),
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = DataIntegrityError;

    fn try_from(r: TransactionRecord) -> Result<Self, Self::Error> {
        let bad = |field: &'static str, value: String| DataIntegrityError {
            id: r.id.clone(),
            field,
            value,
        };
        let amount = r
            .amount
            .to_decimal()
            .filter(|d| check_amount(*d).is_ok())
            .ok_or_else(|| bad("amount", r.amount.to_string()))?;
        let kind: TransactionType = r.kind.parse().map_err(|_| bad("type", r.kind.clone()))?;
        let category: Category = r
            .category
            .parse()
            .ok()
            .filter(|c: &Category| c.is_allowed_for(kind))
            .ok_or_else(|| bad("category", r.category.clone()))?;
        let date = NaiveDate::parse_from_str(r.date.trim(), "%Y-%m-%d")
            .map_err(|_| bad("date", r.date.clone()))?;
        Ok(Transaction {
            amount,
            kind,
            category,
            date,
            note: r.note.clone().filter(|n| !n.is_empty()),
            id: r.id,
        })
    }
}
