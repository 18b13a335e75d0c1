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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::Parser;
use clap::ValueEnum;
use flashdeck_core::StudyMode;

use crate::cmd::decks::list_decks;
use crate::cmd::drill::runner::DrillConfig;
use crate::cmd::drill::runner::start_drill;
use crate::cmd::export::export_deck;
use crate::cmd::import::import_decks;
use crate::cmd::reset::reset_deck;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
enum Mode {
    /// Cards that are due, new cards included, in deck order.
    Normal,
    /// Every card, hardest first.
    Cramming,
    /// Every card, shuffled.
    Test,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", StudyMode::from(*self))
    }
}

impl From<Mode> for StudyMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => StudyMode::Normal,
            Mode::Cramming => StudyMode::Cramming,
            Mode::Test => StudyMode::Test,
        }
    }
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill cards in the terminal.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The deck to drill, by id or name. By default, the first deck is used.
        #[arg(long)]
        deck: Option<String>,
        /// Which cards to study and in what order. Overrides the configuration file.
        #[arg(long)]
        mode: Option<Mode>,
        /// Maximum number of cards to drill in a session.
        #[arg(long)]
        card_limit: Option<usize>,
        /// Maximum number of new cards to drill in a session.
        #[arg(long)]
        new_card_limit: Option<usize>,
        /// Whether to shuffle the queue in normal mode.
        #[arg(long)]
        shuffle: Option<bool>,
        /// Length of the session in minutes.
        #[arg(long)]
        minutes: Option<i64>,
    },
    /// Import a deck from a JSON file, or every JSON file in a directory.
    Import {
        /// Path to the deck file or directory.
        path: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Name for the deck, if the file does not have one.
        #[arg(long)]
        name: Option<String>,
    },
    /// Export a deck, with its progress, as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The deck to export, by id or name. By default, the first deck is used.
        #[arg(long)]
        deck: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// List the decks in a collection.
    Decks {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print review statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Erase the study progress of a deck.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The deck to reset, by id or name. By default, the first deck is used.
        #[arg(long)]
        deck: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            deck,
            mode,
            card_limit,
            new_card_limit,
            shuffle,
            minutes,
        } => {
            let config = DrillConfig {
                directory,
                deck,
                mode: mode.map(StudyMode::from),
                card_limit,
                new_card_limit,
                shuffle,
                minutes,
            };
            start_drill(config)
        }
        Command::Import {
            path,
            directory,
            name,
        } => import_decks(directory, path, name),
        Command::Export {
            directory,
            deck,
            output,
        } => export_deck(directory, deck, output),
        Command::Decks { directory } => list_decks(directory),
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Reset { directory, deck } => reset_deck(directory, deck),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_drill_flags() {
        let cli = Command::try_parse_from([
            "flashdeck",
            "drill",
            "decks",
            "--mode",
            "cramming",
            "--card-limit",
            "5",
            "--shuffle",
            "false",
        ])
        .unwrap();
        match cli {
            Command::Drill {
                directory,
                mode,
                card_limit,
                shuffle,
                ..
            } => {
                assert_eq!(directory.as_deref(), Some("decks"));
                assert_eq!(mode.map(StudyMode::from), Some(StudyMode::Cramming));
                assert_eq!(card_limit, Some(5));
                assert_eq!(shuffle, Some(false));
            }
            _ => panic!("expected drill"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Command::try_parse_from(["flashdeck", "drill", "--mode", "speedrun"]).is_err());
    }
}
