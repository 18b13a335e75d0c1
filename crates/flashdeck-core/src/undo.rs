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

use crate::ledger::ReviewStats;
use crate::rating::Rating;
use crate::session::Session;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// What is kept to take back the most recent rating.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoSnapshot {
    /// The card exactly as it was before it was rated.
    pub prior: Card,
    pub rating: Rating,
    /// When the rating was applied, so the ledger is reversed on the right day.
    pub rated_at: Timestamp,
}

/// The state after an undo.
#[derive(Clone, Debug, PartialEq)]
pub struct Restored {
    pub card: Card,
    pub stats: ReviewStats,
    pub session: Session,
}

/// Holds at most one snapshot. Remembering a new rating replaces it.
#[derive(Clone, Debug, Default)]
pub struct UndoBuffer {
    slot: Option<UndoSnapshot>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, prior: Card, rating: Rating, rated_at: Timestamp) {
        self.slot = Some(UndoSnapshot {
            prior,
            rating,
            rated_at,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn peek(&self) -> Option<&UndoSnapshot> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Take back the remembered rating. Returns `None`, and changes nothing,
    /// if there is nothing to undo.
    pub fn undo(&mut self, stats: &ReviewStats, session: &Session) -> Option<Restored> {
        let UndoSnapshot {
            prior,
            rating,
            rated_at,
        } = self.slot.take()?;
        let stats = match rating.grade() {
            Some(grade) => stats.reverse(grade, rated_at.date()),
            None => stats.clone(),
        };
        let mut queue = session.queue.clone();
        if !queue.contains(&prior.id) {
            queue.push(prior.id);
        }
        let session = Session {
            queue,
            current: Some(prior.id),
            // The learner had already seen the answer.
            front_phase: false,
        };
        Some(Restored {
            card: prior,
            stats,
            session,
        })
    }
}
