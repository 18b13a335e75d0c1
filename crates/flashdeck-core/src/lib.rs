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

//! flashdeck-core: the scheduling core of the flashdeck study tool.
//!
//! This library provides:
//! - A simplified four-grade SM-2 scheduler
//! - Session queue building for normal, cramming and test modes
//! - A review ledger of counters and per-day histories
//! - Single-slot undo across the scheduler, ledger and queue
//!
//! Every operation takes the current time as an argument. Nothing here
//! reads the clock unless the `clock` feature is enabled for the host.

pub mod countdown;
pub mod drill;
pub mod error;
pub mod ledger;
pub mod queue;
pub mod rating;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod types;
pub mod undo;

// Re-exports for convenience
pub use countdown::Countdown;
pub use drill::Drill;
pub use error::{ErrorReport, Fallible, fail};
pub use ledger::ReviewStats;
pub use queue::{SessionOptions, StudyMode, build_queue, is_due};
pub use rating::{Grade, Rating};
pub use rng::{RandomSource, SequenceRng, TinyRng};
pub use session::Session;
pub use types::card::{Card, Due, Stage};
pub use types::card_id::CardId;
pub use types::date::Date;
pub use types::deck::{Deck, DeckSummary};
pub use types::timestamp::Timestamp;
pub use undo::{Restored, UndoBuffer, UndoSnapshot};
