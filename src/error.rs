// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Category, TransactionType};

/// Malformed user input. Raised before anything reaches a backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount is required")]
    MissingAmount,
    #[error("Invalid amount '{0}', expected a number")]
    InvalidAmount(String),
    #[error("Amount must be a positive number, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Amount {0} is above the limit of {1}")]
    AmountTooLarge(Decimal, Decimal),
    #[error("Unknown transaction type '{0}', expected income|expense")]
    UnknownType(String),
    #[error("Category is required")]
    MissingCategory,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Category '{category}' is not allowed for {kind} transactions")]
    CategoryNotAllowed {
        category: Category,
        kind: TransactionType,
    },
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("User name must not be blank")]
    BlankUser,
}

/// The backing store was unreachable or refused the operation.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Transaction '{0}' not found")]
    NotFound(String),
    #[error("Transaction '{0}' already exists")]
    Duplicate(String),
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Backend rejected the write: {0}")]
    Rejected(String),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored record that cannot be turned into a valid transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transaction '{id}' has invalid {field} '{value}'")]
pub struct DataIntegrityError {
    pub id: String,
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
