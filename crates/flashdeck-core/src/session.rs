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

use crate::types::card_id::CardId;

/// The state of a study session: the queue, the card being shown, and which
/// side of it is up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub queue: Vec<CardId>,
    pub current: Option<CardId>,
    /// Whether the question side is showing.
    pub front_phase: bool,
}

impl Session {
    /// Start a session at the head of the queue, question side up.
    pub fn new(queue: Vec<CardId>) -> Self {
        let current = queue.first().copied();
        Self {
            queue,
            current,
            front_phase: true,
        }
    }

    /// An absent current card means the session is complete.
    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// Show the answer side.
    pub fn reveal(&mut self) {
        self.front_phase = false;
    }

    fn index_of_current(&self) -> Option<usize> {
        let current = self.current?;
        self.queue.iter().position(|id| *id == current)
    }

    /// Move to the card after the current one. At the end of the queue the
    /// session completes.
    pub fn advance(&mut self) {
        self.current = self
            .index_of_current()
            .and_then(|idx| self.queue.get(idx + 1))
            .copied();
        self.front_phase = true;
    }

    /// Send the current card to the back of the queue and show the card that
    /// followed it, question side up.
    pub fn requeue_current(&mut self) {
        if let Some(idx) = self.index_of_current() {
            let id = self.queue.remove(idx);
            self.queue.push(id);
            self.current = self.queue.get(idx).copied();
        }
        self.front_phase = true;
    }

    /// One-based position of the current card, or zero when complete.
    pub fn position(&self) -> usize {
        self.index_of_current().map(|idx| idx + 1).unwrap_or(0)
    }

    /// Percentage of the queue already behind the current card.
    pub fn progress(&self) -> u32 {
        if self.queue.is_empty() {
            return 100;
        }
        let completed = self.index_of_current().unwrap_or(self.queue.len());
        ((completed as f64 / self.queue.len() as f64) * 100.0).round() as u32
    }
}
