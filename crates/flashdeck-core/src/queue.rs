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

//! Choosing which cards a study session shows, and in what order.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::rng::RandomSource;
use crate::rng::shuffle;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Due cards in deck order. New cards count as due.
    #[default]
    Normal,
    /// Every card, hardest (lowest ease) first.
    Cramming,
    /// Every card, in random order.
    Test,
}

impl StudyMode {
    pub fn as_str(&self) -> &str {
        match self {
            StudyMode::Normal => "normal",
            StudyMode::Cramming => "cramming",
            StudyMode::Test => "test",
        }
    }
}

impl Display for StudyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for StudyMode {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "normal" => Ok(StudyMode::Normal),
            "cramming" => Ok(StudyMode::Cramming),
            "test" => Ok(StudyMode::Test),
            _ => fail(format!("invalid study mode: {value}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Maximum number of cards in the queue.
    pub session_limit: usize,
    /// Maximum number of new cards admitted in Normal mode.
    pub new_per_session: usize,
    /// Whether to shuffle the queue in Normal mode.
    pub shuffle: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            session_limit: 30,
            new_per_session: 20,
            shuffle: true,
        }
    }
}

pub fn is_due(card: &Card, now: Timestamp) -> bool {
    card.is_due(now)
}

/// Build the queue of card ids for a study session.
pub fn build_queue(
    deck: &Deck,
    mode: StudyMode,
    options: &SessionOptions,
    now: Timestamp,
    rng: &mut impl RandomSource,
) -> Vec<CardId> {
    let mut ids: Vec<CardId> = match mode {
        StudyMode::Normal => {
            let mut ids: Vec<CardId> = deck
                .cards
                .iter()
                .filter(|card| is_due(card, now))
                .map(|card| card.id)
                .collect();
            let new = deck
                .cards
                .iter()
                .filter(|card| card.is_new())
                .take(options.new_per_session);
            // Union: new cards are due too, so only absent ids are appended.
            for card in new {
                if !ids.contains(&card.id) {
                    ids.push(card.id);
                }
            }
            if options.shuffle { shuffle(ids, rng) } else { ids }
        }
        StudyMode::Cramming => {
            let mut cards: Vec<&Card> = deck.cards.iter().collect();
            // Stable, so equal eases keep deck order.
            cards.sort_by(|a, b| a.ease.total_cmp(&b.ease));
            cards.into_iter().map(|card| card.id).collect()
        }
        StudyMode::Test => {
            let ids: Vec<CardId> = deck.cards.iter().map(|card| card.id).collect();
            shuffle(ids, rng)
        }
    };
    ids.truncate(options.session_limit);
    log::debug!(
        "Built {mode} queue of {} cards from deck '{}' ({} cards).",
        ids.len(),
        deck.name,
        deck.cards.len()
    );
    ids
}
