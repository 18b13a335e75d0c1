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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use flashdeck_core::Countdown;
use flashdeck_core::Drill;
use flashdeck_core::RandomSource;
use flashdeck_core::SessionOptions;
use flashdeck_core::StudyMode;
use flashdeck_core::Timestamp;
use flashdeck_core::TinyRng;

use crate::cmd::drill::action::Action;
use crate::cmd::drill::render::HELP;
use crate::cmd::drill::render::render_card;
use crate::cmd::drill::render::render_summary;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

/// Command-line settings for a drill. Unset fields fall back to the
/// collection's configuration file.
pub struct DrillConfig {
    pub directory: Option<String>,
    pub deck: Option<String>,
    pub mode: Option<StudyMode>,
    pub card_limit: Option<usize>,
    pub new_card_limit: Option<usize>,
    pub shuffle: Option<bool>,
    pub minutes: Option<i64>,
}

/// What happened during a drill.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrillOutcome {
    pub reviewed: u64,
    pub correct: u64,
}

pub fn start_drill(config: DrillConfig) -> Fallible<()> {
    let mut collection = Collection::new(config.directory.clone())?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut rng = TinyRng::from_seed(seed);
    let stdin = stdin();
    let stdout = stdout();
    run_drill(
        &mut collection,
        &config,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut Timestamp::now,
        &mut rng,
    )?;
    Ok(())
}

const MAX_SESSION_MINUTES: i64 = 24 * 60;

/// Merge the command-line settings over the configuration file.
fn resolve(
    collection: &Collection,
    config: &DrillConfig,
) -> Fallible<(StudyMode, SessionOptions, i64)> {
    let session = &collection.config.session;
    let defaults = session.options();
    let options = SessionOptions {
        session_limit: config.card_limit.unwrap_or(defaults.session_limit),
        new_per_session: config.new_card_limit.unwrap_or(defaults.new_per_session),
        shuffle: config.shuffle.unwrap_or(defaults.shuffle),
    };
    let minutes = config.minutes.unwrap_or(session.minutes);
    if !(1..=MAX_SESSION_MINUTES).contains(&minutes) {
        return fail(format!(
            "session length must be between 1 and {MAX_SESSION_MINUTES} minutes, got {minutes}."
        ));
    }
    Ok((config.mode.unwrap_or(session.mode), options, minutes))
}

/// Save the drill's deck and counters. A failed write is logged and the
/// session carries on.
fn persist(collection: &mut Collection, drill: &Drill) {
    collection.put_deck(drill.deck().clone());
    collection.stats = drill.stats().clone();
    if let Err(e) = collection.save() {
        log::warn!("Failed to save progress: {e}");
    }
}

/// Run an interactive drill, reading commands line by line until the queue
/// is exhausted, the timer runs out, the learner ends the session, or input
/// ends.
pub fn run_drill(
    collection: &mut Collection,
    config: &DrillConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
    clock: &mut impl FnMut() -> Timestamp,
    rng: &mut impl RandomSource,
) -> Fallible<DrillOutcome> {
    let (mode, options, minutes) = resolve(collection, config)?;
    let deck = collection.find_deck(config.deck.as_deref())?.clone();
    let started_at = clock();
    let mut drill = Drill::start(
        deck,
        collection.stats.clone(),
        mode,
        options,
        started_at,
        rng,
    );
    log::info!(
        "Drilling {} cards from '{}' in {mode} mode",
        drill.session().queue.len(),
        drill.deck().name
    );
    if drill.is_complete() {
        writeln!(out, "No cards due.")?;
        return Ok(DrillOutcome::default());
    }
    let baseline = drill.stats().clone();
    let mut countdown = Countdown::start(started_at, minutes);
    loop {
        let now = clock();
        if !countdown.is_paused() && countdown.is_expired(now) {
            writeln!(out, "Time is up.")?;
            break;
        }
        if drill.is_complete() {
            writeln!(out, "Session complete.")?;
            break;
        }
        render_card(out, &drill, &countdown, now)?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let Some(action) = Action::parse(&line) else {
            writeln!(out, "Unknown command. Type ? for help.")?;
            continue;
        };
        match action {
            Action::Reveal => drill.reveal(),
            Action::Rate(_) if drill.session().front_phase => {
                writeln!(out, "Show the answer first.")?;
            }
            Action::Rate(rating) => {
                drill.rate(rating, clock());
                persist(collection, &drill);
            }
            Action::Undo => {
                if drill.undo() {
                    persist(collection, &drill);
                } else {
                    writeln!(out, "Nothing to undo.")?;
                }
            }
            Action::Skip => drill.skip(),
            Action::Mode(mode) => {
                let options = *drill.options();
                drill.rebuild(mode, options, clock(), rng);
                writeln!(
                    out,
                    "Switched to {mode} mode: {} cards.",
                    drill.session().queue.len()
                )?;
            }
            Action::Pause => {
                if countdown.is_paused() {
                    countdown.resume();
                } else {
                    countdown.pause();
                }
            }
            Action::Help => writeln!(out, "{HELP}")?,
            Action::End => break,
        }
    }
    let outcome = DrillOutcome {
        reviewed: drill.stats().reviewed - baseline.reviewed,
        correct: drill.stats().correct - baseline.correct,
    };
    render_summary(
        out,
        outcome.reviewed,
        outcome.correct,
        countdown.elapsed(clock()),
    )?;
    Ok(outcome)
}
