// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use flashdeck_core::SessionOptions;
use flashdeck_core::StudyMode;
use serde::Deserialize;

use crate::error::Context;
use crate::error::Fallible;

pub const CONFIG_FILENAME: &str = "flashdeck.toml";

const DEFAULT_DATABASE: &str = "flashdeck.db";

/// Collection configuration, read from `flashdeck.toml` in the collection
/// directory. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the database file, relative to the collection directory.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default)]
    pub mode: StudyMode,
    #[serde(default = "default_session_limit")]
    pub session_limit: usize,
    #[serde(default = "default_new_per_session")]
    pub new_per_session: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Length of the session time box.
    #[serde(default = "default_minutes")]
    pub minutes: i64,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_session_limit() -> usize {
    SessionOptions::default().session_limit
}

fn default_new_per_session() -> usize {
    SessionOptions::default().new_per_session
}

fn default_shuffle() -> bool {
    SessionOptions::default().shuffle
}

fn default_minutes() -> i64 {
    15
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: StudyMode::default(),
            session_limit: default_session_limit(),
            new_per_session: default_new_per_session(),
            shuffle: default_shuffle(),
            minutes: default_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            session: SessionConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            session_limit: self.session_limit,
            new_per_session: self.new_per_session,
            shuffle: self.shuffle,
        }
    }
}

impl Config {
    /// Load the config from the given directory, or return defaults if there
    /// is no config file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        toml::from_str(text).context("invalid configuration file")
    }
}
