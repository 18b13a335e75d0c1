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

//! SQLite-backed persistence. The database is a single key-value table
//! whose values are JSON documents.

use std::path::Path;

use flashdeck_core::Deck;
use flashdeck_core::ReviewStats;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Context;
use crate::error::Fallible;

const DECKS_KEY: &str = "decks";
const STATS_KEY: &str = "stats";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).context("failed to open database")?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().context("failed to open database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch("create table if not exists kv (key text primary key, value text not null);")
            .context("failed to create schema")?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row("select value from kv where key = ?1;", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .context("failed to read from database")
    }

    pub fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "insert into kv (key, value) values (?1, ?2) on conflict (key) do update set value = excluded.value;",
                params![key, value],
            )
            .context("failed to write to database")?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Fallible<Option<T>> {
        match self.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Fallible<()> {
        let text = serde_json::to_string(value)?;
        self.set(key, &text)
    }

    /// All stored decks. An empty database has no decks.
    pub fn decks(&self) -> Fallible<Vec<Deck>> {
        Ok(self.get_json(DECKS_KEY)?.unwrap_or_default())
    }

    pub fn save_decks(&self, decks: &[Deck]) -> Fallible<()> {
        self.set_json(DECKS_KEY, &decks)
    }

    pub fn stats(&self) -> Fallible<ReviewStats> {
        Ok(self.get_json(STATS_KEY)?.unwrap_or_default())
    }

    pub fn save_stats(&self, stats: &ReviewStats) -> Fallible<()> {
        self.set_json(STATS_KEY, stats)
    }
}
