// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Who is signed in. Identity comes from outside; only the name is kept.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, PersistenceError, ValidationError};

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionState {
    user: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    state: SessionState,
}

impl Session {
    /// Loads the session from `data_dir`; a missing file means signed out.
    pub fn load(data_dir: &Path) -> Result<Self, PersistenceError> {
        let path = data_dir.join(SESSION_FILE);
        let state = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            SessionState::default()
        };
        Ok(Self { path, state })
    }

    pub fn current(&self) -> Option<&str> {
        self.state.user.as_deref()
    }

    pub fn sign_in(&mut self, user: &str) -> Result<(), Error> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ValidationError::BlankUser.into());
        }
        self.state.user = Some(user.to_string());
        self.save()?;
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<(), PersistenceError> {
        self.state.user = None;
        self.save()
    }

    fn save(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.state)?)?;
        Ok(())
    }
}
