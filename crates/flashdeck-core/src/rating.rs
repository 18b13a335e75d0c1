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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// How well the learner recalled a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// The quality score, from 1 (Again) to 4 (Easy).
    pub fn quality(self) -> u8 {
        match self {
            Grade::Again => 1,
            Grade::Hard => 2,
            Grade::Good => 3,
            Grade::Easy => 4,
        }
    }

    /// Whether the grade counts as a correct answer.
    pub fn is_correct(self) -> bool {
        self.quality() >= 3
    }

    pub fn as_str(&self) -> &str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }
}

impl TryFrom<String> for Grade {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => fail(format!("invalid grade string: {value}")),
        }
    }
}

/// What the learner did with a revealed card.
///
/// `RepeatNow` re-queues the card for this session without grading it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Rating {
    Graded(Grade),
    RepeatNow,
}

impl Rating {
    pub fn grade(self) -> Option<Grade> {
        match self {
            Rating::Graded(grade) => Some(grade),
            Rating::RepeatNow => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rating::Graded(grade) => grade.as_str(),
            Rating::RepeatNow => "repeat",
        }
    }
}

impl From<Grade> for Rating {
    fn from(grade: Grade) -> Self {
        Rating::Graded(grade)
    }
}

impl TryFrom<String> for Rating {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "repeat" {
            Ok(Rating::RepeatNow)
        } else {
            Grade::try_from(value).map(Rating::Graded)
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
