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

//! The study session controller.
//!
//! A [`Drill`] owns a deck snapshot, the review counters, the session queue
//! and the undo slot, and runs them in order for each rating: remember the
//! card, schedule it, count the review, move on.

use crate::ledger::ReviewStats;
use crate::queue::SessionOptions;
use crate::queue::StudyMode;
use crate::queue::build_queue;
use crate::rating::Rating;
use crate::rng::RandomSource;
use crate::scheduler;
use crate::session::Session;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;
use crate::undo::Restored;
use crate::undo::UndoBuffer;

pub struct Drill {
    deck: Deck,
    stats: ReviewStats,
    mode: StudyMode,
    options: SessionOptions,
    session: Session,
    undo: UndoBuffer,
}

impl Drill {
    pub fn start(
        deck: Deck,
        stats: ReviewStats,
        mode: StudyMode,
        options: SessionOptions,
        now: Timestamp,
        rng: &mut impl RandomSource,
    ) -> Self {
        let queue = build_queue(&deck, mode, &options, now, rng);
        Self {
            deck,
            stats,
            mode,
            options,
            session: Session::new(queue),
            undo: UndoBuffer::new(),
        }
    }

    /// Discard the session and build a new queue for a different mode or
    /// options. Progress on the deck and the counters is kept.
    pub fn rebuild(
        &mut self,
        mode: StudyMode,
        options: SessionOptions,
        now: Timestamp,
        rng: &mut impl RandomSource,
    ) {
        self.mode = mode;
        self.options = options;
        self.session = Session::new(build_queue(&self.deck, mode, &options, now, rng));
        self.undo.clear();
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn stats(&self) -> &ReviewStats {
        &self.stats
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.session.current.and_then(|id| self.deck.card(id))
    }

    pub fn is_complete(&self) -> bool {
        self.current_card().is_none()
    }

    pub fn reveal(&mut self) {
        self.session.reveal();
    }

    /// Rate the current card. Returns the rescheduled card, or `None` if the
    /// session is complete.
    pub fn rate(&mut self, rating: Rating, now: Timestamp) -> Option<Card> {
        let card = self.current_card()?.clone();
        self.undo.remember(card.clone(), rating, now);
        let updated = scheduler::apply(&card, rating, now);
        self.deck = self.deck.with_card(updated.clone());
        match rating.grade() {
            Some(grade) => {
                self.stats = self.stats.record(grade, now.date());
                self.session.advance();
            }
            None => self.session.requeue_current(),
        }
        log::debug!(
            "Rated card {} {rating}: reps={} interval={}d ease={:.2} due={:?}",
            card.id.short(),
            updated.reps,
            updated.interval_days,
            updated.ease,
            updated.due_at
        );
        Some(updated)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Take back the last rating. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        match self.undo.undo(&self.stats, &self.session) {
            Some(Restored {
                card,
                stats,
                session,
            }) => {
                log::debug!("Undid rating of card {}", card.id.short());
                self.deck = self.deck.with_card(card);
                self.stats = stats;
                self.session = session;
                true
            }
            None => false,
        }
    }

    /// Move past the current card without rating it.
    pub fn skip(&mut self) {
        self.session.advance();
    }

    pub fn into_parts(self) -> (Deck, ReviewStats) {
        (self.deck, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Grade;
    use crate::rng::SequenceRng;
    use crate::types::card::Due;
    use crate::types::timestamp::ts;

    fn now() -> Timestamp {
        ts("2024-06-01T10:00:00.000")
    }

    fn deck() -> Deck {
        Deck::new(
            "Capitals",
            vec![
                Card::new("France", "Paris", vec![]),
                Card::new("Peru", "Lima", vec![]),
                Card::new("Chad", "N'Djamena", vec![]),
            ],
        )
    }

    fn in_order() -> SessionOptions {
        SessionOptions {
            session_limit: 30,
            new_per_session: 20,
            shuffle: false,
        }
    }

    fn drill() -> Drill {
        let mut rng = SequenceRng::new(vec![]);
        Drill::start(deck(), ReviewStats::default(), StudyMode::Normal, in_order(), now(), &mut rng)
    }

    #[test]
    fn test_session_runs_to_completion() {
        let mut drill = drill();
        let mut fronts = vec![];
        while let Some(card) = drill.current_card() {
            fronts.push(card.front.clone());
            drill.reveal();
            drill.rate(Grade::Good.into(), now());
        }
        assert_eq!(fronts, vec!["France", "Peru", "Chad"]);
        assert!(drill.is_complete());
        assert_eq!(drill.rate(Grade::Good.into(), now()), None);
        let (deck, stats) = drill.into_parts();
        assert!(deck.cards.iter().all(|c| c.reps == 1));
        assert_eq!(stats.reviewed, 3);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.reviews_on(now().date()), 3);
    }

    #[test]
    fn test_rate_updates_deck_and_stats() {
        let mut drill = drill();
        drill.reveal();
        let updated = drill.rate(Grade::Again.into(), now()).unwrap();
        assert_eq!(updated.lapses, 1);
        assert_eq!(updated.due_at, Due::At(now().plus_minutes(10)));
        assert_eq!(drill.deck().card(updated.id), Some(&updated));
        assert_eq!(drill.stats().reviewed, 1);
        assert_eq!(drill.stats().correct, 0);
        assert_eq!(drill.current_card().unwrap().front, "Peru");
        assert!(drill.session().front_phase);
    }

    #[test]
    fn test_repeat_now_requeues_without_counting() {
        let mut drill = drill();
        drill.reveal();
        let updated = drill.rate(Rating::RepeatNow, now()).unwrap();
        assert_eq!(updated.reps, 0);
        assert_eq!(updated.due_at, Due::At(now()));
        assert_eq!(drill.stats(), &ReviewStats::default());
        assert_eq!(drill.current_card().unwrap().front, "Peru");
        let order: Vec<String> = drill
            .session()
            .queue
            .iter()
            .map(|id| drill.deck().card(*id).unwrap().front.clone())
            .collect();
        assert_eq!(order, vec!["Peru", "Chad", "France"]);
    }

    #[test]
    fn test_undo_after_advance() {
        let mut drill = drill();
        let before = drill.deck().clone();
        drill.reveal();
        drill.rate(Grade::Easy.into(), now());
        assert!(drill.can_undo());
        assert!(drill.undo());
        assert_eq!(drill.deck(), &before);
        assert_eq!(drill.stats(), &ReviewStats::default());
        assert_eq!(drill.current_card().unwrap().front, "France");
        assert!(!drill.session().front_phase);
        assert!(!drill.can_undo());
        assert!(!drill.undo());
    }

    /// Undoing the last card of a finished session brings the session back.
    #[test]
    fn test_undo_reopens_completed_session() {
        let mut drill = drill();
        for _ in 0..3 {
            drill.rate(Grade::Hard.into(), now());
        }
        assert!(drill.is_complete());
        assert!(drill.undo());
        assert!(!drill.is_complete());
        assert_eq!(drill.current_card().unwrap().front, "Chad");
        assert_eq!(drill.stats().reviewed, 2);
        assert_eq!(drill.session().queue.len(), 3);
    }

    #[test]
    fn test_skip_does_not_rate() {
        let mut drill = drill();
        drill.skip();
        assert_eq!(drill.current_card().unwrap().front, "Peru");
        assert_eq!(drill.deck(), &deck());
        assert!(!drill.can_undo());
    }

    #[test]
    fn test_rebuild_resets_session() {
        let mut drill = drill();
        drill.rate(Grade::Good.into(), now());
        drill.rate(Grade::Good.into(), now());
        let mut rng = SequenceRng::new(vec![]);
        drill.rebuild(StudyMode::Normal, in_order(), now(), &mut rng);
        // Only the unrated card is still new; the rated ones are due tomorrow.
        assert_eq!(drill.session().queue.len(), 1);
        assert_eq!(drill.current_card().unwrap().front, "Chad");
        assert!(drill.session().front_phase);
        assert!(!drill.can_undo());

        drill.rebuild(StudyMode::Cramming, in_order(), now(), &mut rng);
        assert_eq!(drill.mode(), StudyMode::Cramming);
        assert_eq!(drill.session().queue.len(), 3);
        assert_eq!(drill.stats().reviewed, 2);
    }

    #[test]
    fn test_empty_deck_is_complete() {
        let mut rng = SequenceRng::new(vec![]);
        let mut drill = Drill::start(
            Deck::new("Empty", vec![]),
            ReviewStats::default(),
            StudyMode::Test,
            SessionOptions::default(),
            now(),
            &mut rng,
        );
        assert!(drill.is_complete());
        assert_eq!(drill.rate(Rating::RepeatNow, now()), None);
        assert!(!drill.undo());
    }
}
