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

use std::io::Write;

use flashdeck_core::Countdown;
use flashdeck_core::Drill;
use flashdeck_core::Grade;
use flashdeck_core::Rating;
use flashdeck_core::Timestamp;
use flashdeck_core::countdown::format_remaining;
use flashdeck_core::scheduler::preview;

use crate::error::Fallible;

const RATINGS: [(&str, Rating); 5] = [
    ("1", Rating::Graded(Grade::Again)),
    ("2", Rating::Graded(Grade::Hard)),
    ("3", Rating::Graded(Grade::Good)),
    ("4", Rating::Graded(Grade::Easy)),
    ("r", Rating::RepeatNow),
];

pub const HELP: &str = "\
Commands:
  <enter>  show the answer
  1-4      rate the card: again, hard, good, easy
  r        repeat the card later in this session
  u        undo the last rating
  s        skip the card
  p        pause or resume the timer
  m <mode> start over in normal, cramming or test mode
  q        end the session";

/// Print the current card: the question, and the answer with a preview of
/// each rating once revealed.
pub fn render_card(
    out: &mut impl Write,
    drill: &Drill,
    countdown: &Countdown,
    now: Timestamp,
) -> Fallible<()> {
    let Some(card) = drill.current_card() else {
        return Ok(());
    };
    let session = drill.session();
    let timer = if countdown.is_paused() {
        "paused".to_string()
    } else {
        format!("{} left", format_remaining(countdown.remaining(now)))
    };
    writeln!(
        out,
        "[{}/{}] {}% {}",
        session.position(),
        session.queue.len(),
        session.progress(),
        timer
    )?;
    writeln!(out, "Q: {}", card.front)?;
    if session.front_phase {
        return Ok(());
    }
    writeln!(out, "A: {}", card.back)?;
    let previews: Vec<String> = RATINGS
        .iter()
        .map(|(key, rating)| format!("[{key}] {rating}: {}", preview(card, *rating, now)))
        .collect();
    writeln!(out, "{}", previews.join("  "))?;
    Ok(())
}

pub fn render_summary(
    out: &mut impl Write,
    reviewed: u64,
    correct: u64,
    elapsed: chrono::Duration,
) -> Fallible<()> {
    let accuracy = if reviewed == 0 {
        0
    } else {
        ((correct as f64 / reviewed as f64) * 100.0).round() as u64
    };
    writeln!(
        out,
        "Reviewed {reviewed} cards in {}. Accuracy: {accuracy}%.",
        format_remaining(elapsed)
    )?;
    Ok(())
}
