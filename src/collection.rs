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

use std::env::current_dir;
use std::path::PathBuf;

use flashdeck_core::Deck;
use flashdeck_core::ReviewStats;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// A collection directory: its configuration, its database, and the decks
/// and counters loaded from it.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
    pub decks: Vec<Deck>,
    pub stats: ReviewStats,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let config = Config::load(&directory)?;
        let db_path = directory.join(&config.database);
        let db = Database::new(&db_path)?;
        let decks = db.decks()?;
        let stats = db.stats()?;
        log::debug!(
            "Loaded {} decks from {}",
            decks.len(),
            db_path.display()
        );
        Ok(Self {
            directory,
            config,
            db,
            decks,
            stats,
        })
    }

    /// Find a deck by id or name. Without a query, the first deck is used.
    pub fn find_deck(&self, query: Option<&str>) -> Fallible<&Deck> {
        if self.decks.is_empty() {
            return fail("the collection has no decks. Import one first.");
        }
        match query {
            None => Ok(&self.decks[0]),
            Some(query) => match self
                .decks
                .iter()
                .find(|deck| deck.id == query || deck.name == query)
            {
                Some(deck) => Ok(deck),
                None => fail(format!("no deck named '{query}'.")),
            },
        }
    }

    /// Replace the deck with the same id, or append it.
    pub fn put_deck(&mut self, deck: Deck) {
        match self.decks.iter_mut().find(|d| d.id == deck.id) {
            Some(slot) => *slot = deck,
            None => self.decks.push(deck),
        }
    }

    pub fn save(&self) -> Fallible<()> {
        self.db.save_decks(&self.decks)?;
        self.db.save_stats(&self.stats)
    }
}
