// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::session::Session;

pub fn login(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").context("user missing")?;
    session.sign_in(user)?;
    println!("Signed in as {}", user.trim());
    Ok(())
}

pub fn logout(session: &mut Session) -> Result<()> {
    match session.current().map(str::to_string) {
        Some(user) => {
            session.sign_out()?;
            println!("Signed out {}", user);
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn whoami(session: &Session) -> Result<()> {
    match session.current() {
        Some(user) => println!("{}", user),
        None => println!("Not signed in (use `fintrack login <user>`)"),
    }
    Ok(())
}
