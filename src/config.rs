// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const ENV_DATA_DIR: &str = "FINTRACK_DATA_DIR";
pub const ENV_BACKEND: &str = "FINTRACK_BACKEND";
pub const ENV_LOG: &str = "FINTRACK_LOG";

pub const DEFAULT_LOG_FILTER: &str = "fintrack=warn";
pub const VERBOSE_LOG_FILTER: &str = "fintrack=debug";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Sqlite,
    /// JSON fallback cache, seeded with sample data on first use.
    Cache,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "cache" | "json" => Ok(Self::Cache),
            other => Err(anyhow!("Unknown backend '{}', expected sqlite|cache", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub log_filter: String,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub backend: Option<String>,
    pub verbose: bool,
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

impl Config {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Flag, then environment, then default.
    pub fn resolve_with(
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match overrides.data_dir.clone() {
            Some(dir) => dir,
            None => match env(ENV_DATA_DIR) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir()?,
            },
        };

        let backend = match overrides.backend.clone().or_else(|| env(ENV_BACKEND)) {
            Some(name) => name.parse()?,
            None => BackendKind::default(),
        };

        let log_filter = if overrides.verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            env(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        Ok(Self {
            data_dir,
            backend,
            log_filter,
        })
    }
}
