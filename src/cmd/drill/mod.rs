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

mod action;
mod render;
pub mod runner;

#[cfg(test)]
mod tests {
    use flashdeck_core::Card;
    use flashdeck_core::Deck;
    use flashdeck_core::Due;
    use flashdeck_core::SequenceRng;
    use flashdeck_core::Timestamp;
    use tempfile::TempDir;

    use crate::cmd::drill::runner::DrillConfig;
    use crate::cmd::drill::runner::DrillOutcome;
    use crate::cmd::drill::runner::run_drill;
    use crate::cmd::drill::runner::start_drill;
    use crate::collection::Collection;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    fn now() -> Timestamp {
        Timestamp::new(
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    fn config(dir: &TempDir) -> DrillConfig {
        DrillConfig {
            directory: Some(dir.path().display().to_string()),
            deck: None,
            mode: None,
            card_limit: None,
            new_card_limit: None,
            shuffle: Some(false),
            minutes: None,
        }
    }

    fn collection_with(dir: &TempDir, cards: Vec<Card>) -> Fallible<Collection> {
        let mut collection = Collection::new(Some(dir.path().display().to_string()))?;
        collection.put_deck(Deck::new("Capitals", cards));
        collection.save()?;
        Ok(collection)
    }

    fn capitals() -> Vec<Card> {
        vec![
            Card::new("France", "Paris", vec![]),
            Card::new("Peru", "Lima", vec![]),
            Card::new("Chad", "N'Djamena", vec![]),
        ]
    }

    /// Run a drill over scripted input at a fixed time.
    fn drill(dir: &TempDir, script: &str) -> Fallible<(DrillOutcome, String)> {
        let mut collection = Collection::new(Some(dir.path().display().to_string()))?;
        let mut out: Vec<u8> = Vec::new();
        let outcome = run_drill(
            &mut collection,
            &config(dir),
            &mut script.as_bytes(),
            &mut out,
            &mut now,
            &mut SequenceRng::new(vec![]),
        )?;
        Ok((outcome, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_start_drill_on_non_existent_directory() {
        let config = DrillConfig {
            directory: Some("./derpherp".to_string()),
            deck: None,
            mode: None,
            card_limit: None,
            new_card_limit: None,
            shuffle: None,
            minutes: None,
        };
        let result = start_drill(config);
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_drill_with_no_cards_due() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, vec![])?;
        let (outcome, output) = drill(&dir, "")?;
        assert_eq!(outcome, DrillOutcome::default());
        assert_eq!(output, "No cards due.\n");
        Ok(())
    }

    #[test]
    fn test_full_session_is_saved() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, capitals())?;
        let (outcome, output) = drill(&dir, "\n3\n\n3\n\n1\n")?;
        assert_eq!(
            outcome,
            DrillOutcome {
                reviewed: 3,
                correct: 2
            }
        );
        assert!(output.contains("Q: France"));
        assert!(output.contains("A: Paris"));
        assert!(output.contains("[3] good: tomorrow"));
        assert!(output.contains("Session complete."));
        assert!(output.contains("Reviewed 3 cards in 0:00. Accuracy: 67%."));

        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let deck = collection.find_deck(None)?;
        let reps: Vec<u32> = deck.cards.iter().map(|c| c.reps).collect();
        assert_eq!(reps, vec![1, 1, 0]);
        assert_eq!(deck.cards[2].lapses, 1);
        assert_eq!(collection.stats.reviewed, 3);
        assert_eq!(collection.stats.correct, 2);
        assert_eq!(collection.stats.reviews_on(now().date()), 3);
        Ok(())
    }

    #[test]
    fn test_rating_requires_reveal() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, capitals())?;
        let (outcome, output) = drill(&dir, "3\n")?;
        assert_eq!(outcome, DrillOutcome::default());
        assert!(output.contains("Show the answer first."));
        Ok(())
    }

    #[test]
    fn test_undo_restores_saved_state() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, capitals())?;
        let (outcome, output) = drill(&dir, "\n1\nu\nu\n")?;
        assert_eq!(outcome, DrillOutcome::default());
        assert!(output.contains("Nothing to undo."));

        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let deck = collection.find_deck(None)?;
        assert!(deck.cards.iter().all(|c| c.is_new()));
        assert_eq!(collection.stats.reviewed, 0);
        assert_eq!(collection.stats.reviews_on(now().date()), 0);
        Ok(())
    }

    #[test]
    fn test_repeat_moves_card_to_the_back() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, capitals())?;
        let (outcome, output) = drill(&dir, "\nr\n")?;
        assert_eq!(outcome, DrillOutcome::default());
        let after_repeat = output.rsplit("[r] repeat").next().unwrap();
        assert!(after_repeat.contains("[1/3] 0% 15:00 left\nQ: Peru"));
        Ok(())
    }

    #[test]
    fn test_unknown_command_and_help() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        collection_with(&dir, capitals())?;
        let (_, output) = drill(&dir, "flip\n?\nq\n")?;
        assert!(output.contains("Unknown command. Type ? for help."));
        assert!(output.contains("u        undo the last rating"));
        Ok(())
    }

    #[test]
    fn test_time_runs_out() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut collection = collection_with(&dir, capitals())?;
        let mut config = config(&dir);
        config.minutes = Some(1);
        let mut calls = 0;
        let mut clock = || {
            calls += 1;
            if calls <= 2 {
                now()
            } else {
                now().plus_minutes(2)
            }
        };
        let mut out: Vec<u8> = Vec::new();
        run_drill(
            &mut collection,
            &config,
            &mut "\n\n\n".as_bytes(),
            &mut out,
            &mut clock,
            &mut SequenceRng::new(vec![]),
        )?;
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Time is up."));
        assert_eq!(output.matches("Q: France").count(), 1);
        Ok(())
    }

    #[test]
    fn test_paused_timer_does_not_expire() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut collection = collection_with(&dir, capitals())?;
        let mut config = config(&dir);
        config.minutes = Some(1);
        let mut calls = 0;
        let mut clock = || {
            calls += 1;
            if calls <= 2 {
                now()
            } else {
                now().plus_minutes(2)
            }
        };
        let mut out: Vec<u8> = Vec::new();
        run_drill(
            &mut collection,
            &config,
            &mut "p\n\n3\np\n".as_bytes(),
            &mut out,
            &mut clock,
            &mut SequenceRng::new(vec![]),
        )?;
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[1/3] 0% paused\nQ: France"));
        assert!(output.contains("Time is up."));
        assert_eq!(collection.stats.reviewed, 1);
        Ok(())
    }

    #[test]
    fn test_session_length_out_of_range() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut collection = collection_with(&dir, capitals())?;
        for minutes in [0, -5, 99_999_999_999_999] {
            let mut config = config(&dir);
            config.minutes = Some(minutes);
            let mut out: Vec<u8> = Vec::new();
            let result = run_drill(
                &mut collection,
                &config,
                &mut "\n".as_bytes(),
                &mut out,
                &mut now,
                &mut SequenceRng::new(vec![]),
            );
            assert!(result.is_err());
            assert!(out.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_switch_mode_rebuilds_queue() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut cards = capitals();
        cards.push(Card {
            reps: 1,
            interval_days: 1.0,
            due_at: Due::At(now().plus_days(1)),
            ..Card::new("Laos", "Vientiane", vec![])
        });
        collection_with(&dir, cards)?;
        let (outcome, output) = drill(&dir, "\nm cramming\n3\n")?;
        assert_eq!(outcome, DrillOutcome::default());
        assert!(output.contains("[1/3] 0% 15:00 left\nQ: France"));
        assert!(output.contains("Switched to cramming mode: 4 cards."));
        assert!(output.contains("[1/4] 0% 15:00 left\nQ: France"));
        // The rebuilt session starts question side up.
        assert!(output.contains("Show the answer first."));
        Ok(())
    }
}
