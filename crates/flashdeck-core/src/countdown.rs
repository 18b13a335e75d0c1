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

use chrono::Duration;

use crate::types::timestamp::Timestamp;

/// A study session's time box.
///
/// Remaining and elapsed time are derived from the stored start and end
/// timestamps and the time passed in. Pausing only tells the host to stop
/// checking the clock: the deadline does not move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    started_at: Timestamp,
    ends_at: Timestamp,
    paused: bool,
}

impl Countdown {
    pub fn start(now: Timestamp, minutes: i64) -> Self {
        Self {
            started_at: now,
            ends_at: now.plus_minutes(minutes),
            paused: false,
        }
    }

    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Time left before the deadline, never negative.
    pub fn remaining(&self, now: Timestamp) -> Duration {
        self.ends_at.since(now).max(Duration::zero())
    }

    /// Time since the session started, never negative.
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        now.since(self.started_at).max(Duration::zero())
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.ends_at
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

/// Format a duration as `m:ss`.
pub fn format_remaining(duration: Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
