// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{Category, TransactionType};
use crate::utils::pretty_table;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let kinds = match m.get_one::<String>("type") {
        Some(t) => vec![t.parse::<TransactionType>()?],
        None => vec![TransactionType::Income, TransactionType::Expense],
    };
    let mut data = Vec::new();
    for kind in kinds {
        for c in Category::allowed_for(kind) {
            data.push(vec![kind.to_string(), c.to_string(), c.label().to_string()]);
        }
    }
    println!("{}", pretty_table(&["Type", "Category", "Label"], data));
    Ok(())
}
