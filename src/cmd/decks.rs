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

use flashdeck_core::Timestamp;

use crate::collection::Collection;
use crate::error::Fallible;

pub fn list_decks(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    print!("{}", deck_table(&collection, Timestamp::now()));
    Ok(())
}

/// One line per deck with its card counts.
pub fn deck_table(collection: &Collection, now: Timestamp) -> String {
    if collection.decks.is_empty() {
        return "No decks.\n".to_string();
    }
    let mut table = String::new();
    for deck in &collection.decks {
        let summary = deck.summary(now);
        table.push_str(&format!(
            "{} ({}): {} cards, {} due, {} new, {} learned, {} struggling\n",
            deck.name,
            deck.id,
            summary.total,
            summary.due,
            summary.new,
            summary.learned,
            summary.struggling
        ));
    }
    table
}
