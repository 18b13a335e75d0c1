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

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// The ease a card starts with.
pub const DEFAULT_EASE: f64 = 2.5;

/// The lowest ease a card can have.
pub const MIN_EASE: f64 = 1.3;

/// The highest ease a card can have.
pub const MAX_EASE: f64 = 2.8;

/// The longest interval a card can have: one hundred years.
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;

/// When a card is next due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Timestamp>", into = "Option<Timestamp>")]
pub enum Due {
    /// The card has never been scheduled.
    New,
    /// The card is due at the given time.
    At(Timestamp),
}

impl From<Option<Timestamp>> for Due {
    fn from(value: Option<Timestamp>) -> Self {
        match value {
            Some(ts) => Due::At(ts),
            None => Due::New,
        }
    }
}

impl From<Due> for Option<Timestamp> {
    fn from(value: Due) -> Self {
        match value {
            Due::New => None,
            Due::At(ts) => Some(ts),
        }
    }
}

/// Where a card is in its learning lifecycle. Derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Never studied.
    New,
    /// Fewer than three successful reviews in a row, including cards
    /// relearning after a lapse.
    Learning,
    /// Three or more successful reviews in a row.
    Review,
}

/// A flashcard and its scheduling state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub tags: BTreeSet<String>,
    /// Multiplier applied to the interval on each successful review.
    pub ease: f64,
    /// Successful reviews since the card was new or last lapsed.
    pub reps: u32,
    /// Days until the next review, as of the last successful review.
    pub interval_days: f64,
    pub due_at: Due,
    /// Number of failing ratings.
    pub lapses: u32,
    pub last_reviewed_at: Option<Timestamp>,
}

impl Card {
    /// A new, never-studied card.
    pub fn new(front: impl Into<String>, back: impl Into<String>, tags: impl IntoIterator<Item = String>) -> Self {
        let front = front.into();
        let back = back.into();
        Self {
            id: CardId::from_content(&front, &back),
            front,
            back,
            tags: tags.into_iter().collect(),
            ease: DEFAULT_EASE,
            reps: 0,
            interval_days: 0.0,
            due_at: Due::New,
            lapses: 0,
            last_reviewed_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.reps == 0 && self.due_at == Due::New
    }

    pub fn is_lapsed(&self) -> bool {
        self.lapses > 0
    }

    pub fn stage(&self) -> Stage {
        if self.is_new() {
            Stage::New
        } else if self.reps >= 3 {
            Stage::Review
        } else {
            Stage::Learning
        }
    }

    /// A card is due if it has never been scheduled, or its due time has
    /// passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.due_at {
            Due::New => true,
            Due::At(due) => due <= now,
        }
    }

    /// The same card with its scheduling history erased.
    pub fn reset(&self) -> Self {
        Self {
            ease: DEFAULT_EASE,
            reps: 0,
            interval_days: 0.0,
            due_at: Due::New,
            lapses: 0,
            last_reviewed_at: None,
            ..self.clone()
        }
    }

    /// Check the card's scheduling invariants.
    pub fn validate(&self) -> Fallible<()> {
        if !(MIN_EASE..=MAX_EASE).contains(&self.ease) {
            return fail(format!(
                "card {} has ease {} outside [{MIN_EASE}, {MAX_EASE}]",
                self.id.short(),
                self.ease
            ));
        }
        if !(0.0..=MAX_INTERVAL_DAYS).contains(&self.interval_days) {
            return fail(format!(
                "card {} has invalid interval {}",
                self.id.short(),
                self.interval_days
            ));
        }
        if self.reps > 0 && self.due_at == Due::New {
            return fail(format!(
                "card {} has been reviewed but has no due date",
                self.id.short()
            ));
        }
        Ok(())
    }
}
