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

//! A simplified four-grade SM-2 scheduler.
//!
//! Failing grades (Again, Hard) send a card back to relearning: its streak
//! and interval are reset and it comes back in ten minutes. Passing grades
//! (Good, Easy) grow the interval from 1 day to 3 days and then multiply it
//! by the card's ease, up to [`MAX_INTERVAL_DAYS`]. Only passing grades adjust
//! the ease.

use crate::rating::Grade;
use crate::rating::Rating;
use crate::types::card::Card;
use crate::types::card::Due;
use crate::types::card::MAX_EASE;
use crate::types::card::MAX_INTERVAL_DAYS;
use crate::types::card::MIN_EASE;
use crate::types::timestamp::Timestamp;

/// How long a failed card waits before it is due again.
pub const RELEARN_MINUTES: i64 = 10;

/// Interval after the first successful review, in days.
const FIRST_INTERVAL: f64 = 1.0;

/// Interval after the second successful review, in days.
const SECOND_INTERVAL: f64 = 3.0;

/// The ease adjustment for a passing grade: +0.1 for Easy, 0 for Good.
fn ease_delta(grade: Grade) -> f64 {
    let d = f64::from(4 - grade.quality());
    0.1 - d * (0.08 + d * 0.02)
}

/// Apply a rating to a card, returning the updated card.
pub fn apply(card: &Card, rating: Rating, now: Timestamp) -> Card {
    debug_assert!(card.validate().is_ok(), "malformed card: {card:?}");
    let grade = match rating {
        Rating::RepeatNow => {
            return Card {
                due_at: Due::At(now),
                ..card.clone()
            };
        }
        Rating::Graded(grade) => grade,
    };
    if !grade.is_correct() {
        return Card {
            reps: 0,
            interval_days: 0.0,
            lapses: card.lapses + 1,
            due_at: Due::At(now.plus_minutes(RELEARN_MINUTES)),
            last_reviewed_at: Some(now),
            ..card.clone()
        };
    }
    let interval_days: f64 = match card.reps {
        0 => FIRST_INTERVAL,
        1 => SECOND_INTERVAL,
        _ => (card.interval_days * card.ease)
            .round()
            .min(MAX_INTERVAL_DAYS),
    };
    let ease = (card.ease + ease_delta(grade)).clamp(MIN_EASE, MAX_EASE);
    Card {
        reps: card.reps + 1,
        interval_days,
        ease,
        due_at: Due::At(now.plus_days(interval_days as i64)),
        last_reviewed_at: Some(now),
        ..card.clone()
    }
}

/// Describe when the card would be due if it were given this rating now.
pub fn preview(card: &Card, rating: Rating, now: Timestamp) -> String {
    match apply(card, rating, now).due_at {
        Due::New => "now".to_string(),
        Due::At(due) => {
            let days = due.since(now).num_milliseconds() as f64 / 86_400_000.0;
            if days <= 0.0 {
                "now".to_string()
            } else if days < 1.0 {
                "in < 1 day".to_string()
            } else if days == 1.0 {
                "tomorrow".to_string()
            } else {
                format!("in {} days", days.round())
            }
        }
    }
}
