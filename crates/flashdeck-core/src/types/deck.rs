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

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::DEFAULT_EASE;
use crate::types::card::Due;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// An ordered collection of cards. Order is insertion order, not priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

/// The deck document accepted by import.
///
/// Only `front` and `back` are required for each card. Scheduling fields
/// are optional, so an exported deck imports back without losing progress.
#[derive(Debug, Deserialize)]
pub struct RawDeck {
    pub name: Option<String>,
    pub cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ease: Option<f64>,
    pub reps: Option<u32>,
    pub interval_days: Option<f64>,
    pub due_at: Option<Timestamp>,
    pub lapses: Option<u32>,
    pub last_reviewed_at: Option<Timestamp>,
}

/// Counts shown on the deck overview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckSummary {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    /// Cards with at least three successful reviews in a row.
    pub learned: usize,
    /// Cards that have lapsed more than twice.
    pub struggling: usize,
}

/// Turn a deck name into an identifier: lowercase alphanumerics separated
/// by single dashes.
pub fn deck_id(name: &str) -> String {
    let mut id = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() {
            id.extend(c.to_lowercase());
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    id
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        let name = name.into();
        Self {
            id: deck_id(&name),
            name,
            cards,
        }
    }

    /// Build a deck from an import document. Fails if a card breaks the
    /// scheduling invariants or if two cards have the same text.
    pub fn from_raw(raw: RawDeck, fallback_name: &str) -> Fallible<Self> {
        let name = match raw.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback_name.to_string(),
        };
        let mut seen: HashSet<CardId> = HashSet::new();
        let mut cards = Vec::with_capacity(raw.cards.len());
        for raw_card in raw.cards {
            let mut card = Card::new(raw_card.front, raw_card.back, raw_card.tags);
            card.ease = raw_card.ease.unwrap_or(DEFAULT_EASE);
            card.reps = raw_card.reps.unwrap_or(0);
            card.interval_days = raw_card.interval_days.unwrap_or(0.0);
            card.due_at = Due::from(raw_card.due_at);
            card.lapses = raw_card.lapses.unwrap_or(0);
            card.last_reviewed_at = raw_card.last_reviewed_at;
            card.validate()?;
            if !seen.insert(card.id) {
                return fail(format!(
                    "deck '{name}' contains a duplicate card: '{}'",
                    card.front
                ));
            }
            cards.push(card);
        }
        Ok(Self::new(name, cards))
    }

    /// Parse an import document from JSON.
    pub fn from_json(text: &str, fallback_name: &str) -> Fallible<Self> {
        let raw: RawDeck = serde_json::from_str(text)?;
        Self::from_raw(raw, fallback_name)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// A copy of this deck with the card of the same id replaced.
    pub fn with_card(&self, card: Card) -> Self {
        debug_assert!(self.card(card.id).is_some(), "card is not in deck");
        let cards = self
            .cards
            .iter()
            .map(|c| if c.id == card.id { card.clone() } else { c.clone() })
            .collect();
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            cards,
        }
    }

    /// A copy of this deck with every card's progress erased.
    pub fn reset_progress(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            cards: self.cards.iter().map(Card::reset).collect(),
        }
    }

    pub fn summary(&self, now: Timestamp) -> DeckSummary {
        let mut summary = DeckSummary {
            total: self.cards.len(),
            ..Default::default()
        };
        for card in &self.cards {
            if card.is_due(now) {
                summary.due += 1;
            }
            if card.is_new() {
                summary.new += 1;
            }
            if card.reps >= 3 {
                summary.learned += 1;
            }
            if card.lapses > 2 {
                summary.struggling += 1;
            }
        }
        summary
    }
}
