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

use chrono::Days;
use clap::ValueEnum;
use flashdeck_core::Date;
use flashdeck_core::Timestamp;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub reviewed: u64,
    pub correct: u64,
    pub accuracy: u32,
    pub today: u64,
    /// Reviews over the last seven days, today included.
    pub last_week: u64,
    pub decks: Vec<DeckStats>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DeckStats {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub learned: usize,
    pub struggling: usize,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let stats = collection_stats(&collection, Timestamp::now());
    match format {
        StatsFormat::Text => print!("{}", render_text(&stats)),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

pub fn collection_stats(collection: &Collection, now: Timestamp) -> CollectionStats {
    let today: Date = now.date();
    let week_start = today
        .into_inner()
        .checked_sub_days(Days::new(6))
        .map(Date::new)
        .unwrap_or(today);
    let stats = &collection.stats;
    CollectionStats {
        reviewed: stats.reviewed,
        correct: stats.correct,
        accuracy: stats.accuracy(),
        today: stats.reviews_on(today),
        last_week: stats.total_in_range(week_start, today),
        decks: collection
            .decks
            .iter()
            .map(|deck| {
                let summary = deck.summary(now);
                DeckStats {
                    id: deck.id.clone(),
                    name: deck.name.clone(),
                    total: summary.total,
                    due: summary.due,
                    new: summary.new,
                    learned: summary.learned,
                    struggling: summary.struggling,
                }
            })
            .collect(),
    }
}

fn render_text(stats: &CollectionStats) -> String {
    let mut text = format!(
        "Reviews: {}\nCorrect: {}\nAccuracy: {}%\nToday: {}\nLast 7 days: {}\n",
        stats.reviewed, stats.correct, stats.accuracy, stats.today, stats.last_week
    );
    for deck in &stats.decks {
        text.push_str(&format!(
            "{}: {} cards, {} due, {} new\n",
            deck.name, deck.total, deck.due, deck.new
        ));
    }
    text
}
