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

use crate::collection::Collection;
use crate::error::Fallible;

/// Erase the progress of one deck. The review counters are kept.
pub fn reset_deck(directory: Option<String>, deck: Option<String>) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let name = reset_in(&mut collection, deck.as_deref())?;
    collection.save()?;
    println!("Reset progress for '{name}'.");
    Ok(())
}

fn reset_in(collection: &mut Collection, deck: Option<&str>) -> Fallible<String> {
    let reset = collection.find_deck(deck)?.reset_progress();
    let name = reset.name.clone();
    log::info!("Resetting {} cards in '{name}'", reset.cards.len());
    collection.put_deck(reset);
    Ok(name)
}
