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

use flashdeck_core::Grade;
use flashdeck_core::Rating;
use flashdeck_core::StudyMode;

/// A command typed at the drill prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Rate(Rating),
    Undo,
    Skip,
    /// Pause the timer, or resume it if paused.
    Pause,
    /// Rebuild the queue in another study mode.
    Mode(StudyMode),
    Help,
    End,
}

impl Action {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        if let Some((command, argument)) = line.split_once(char::is_whitespace) {
            return match command {
                "m" | "mode" => StudyMode::try_from(argument.trim().to_string())
                    .ok()
                    .map(Action::Mode),
                _ => None,
            };
        }
        let action = match line.as_str() {
            "" | "show" => Action::Reveal,
            "1" | "again" => Action::Rate(Rating::Graded(Grade::Again)),
            "2" | "hard" => Action::Rate(Rating::Graded(Grade::Hard)),
            "3" | "good" => Action::Rate(Rating::Graded(Grade::Good)),
            "4" | "easy" => Action::Rate(Rating::Graded(Grade::Easy)),
            "r" | "repeat" => Action::Rate(Rating::RepeatNow),
            "u" | "undo" => Action::Undo,
            "s" | "skip" => Action::Skip,
            "p" | "pause" => Action::Pause,
            "?" | "help" => Action::Help,
            "q" | "quit" | "end" => Action::End,
            _ => return None,
        };
        Some(action)
    }
}
