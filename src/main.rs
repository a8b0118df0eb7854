// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use fintrack::backend::TransactionBackend;
use fintrack::cache::{self, JsonCache};
use fintrack::config::{BackendKind, Config, Overrides};
use fintrack::db::{self, SqliteBackend};
use fintrack::session::Session;
use fintrack::store::TransactionStore;
use fintrack::{cli, commands, logging};

fn open_backend(config: &Config) -> Result<(Box<dyn TransactionBackend>, PathBuf)> {
    match config.backend {
        BackendKind::Sqlite => {
            let path = db::db_path(&config.data_dir);
            let backend: Box<dyn TransactionBackend> = Box::new(
                SqliteBackend::open(&path)
                    .with_context(|| format!("Open DB at {}", path.display()))?,
            );
            Ok((backend, path))
        }
        BackendKind::Cache => {
            let path = config.data_dir.join(cache::CACHE_FILE);
            let backend: Box<dyn TransactionBackend> =
                Box::new(JsonCache::new(path.clone()).with_seed(true));
            Ok((backend, path))
        }
    }
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let overrides = Overrides {
        data_dir: matches.get_one::<String>("data-dir").map(PathBuf::from),
        backend: matches.get_one::<String>("backend").cloned(),
        verbose: matches.get_flag("verbose"),
    };
    let config = Config::resolve(&overrides)?;
    logging::init(&config.log_filter);

    let mut session = Session::load(&config.data_dir).context("Load session")?;

    // Commands that never touch transactions.
    match matches.subcommand() {
        Some(("login", sub)) => return commands::session::login(&mut session, sub),
        Some(("logout", _)) => return commands::session::logout(&mut session),
        Some(("whoami", _)) => return commands::session::whoami(&session),
        Some(("categories", sub)) => return commands::categories::handle(sub),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let (backend, location) = open_backend(&config)?;
    let mut store = TransactionStore::new(backend);
    if let Some(user) = session.current() {
        if let Err(e) = store.sign_in(user) {
            // doctor is how corrupt rows get found, so it must still run
            if matches.subcommand_name() != Some("doctor") {
                return Err(e).context("Could not load transactions (try `fintrack doctor`)");
            }
            tracing::warn!(error = %e, "loading transactions failed");
        }
    }

    match matches.subcommand() {
        Some(("init", sub)) => {
            commands::init::handle(&mut store, &location.display().to_string(), sub)?
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&mut store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
