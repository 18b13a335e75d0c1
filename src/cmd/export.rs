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

use std::fs::write;

use crate::collection::Collection;
use crate::error::Fallible;

/// Write a deck, progress included, as JSON. The output can be imported
/// back into another collection.
pub fn export_deck(
    directory: Option<String>,
    deck: Option<String>,
    output: Option<String>,
) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let deck = collection.find_deck(deck.as_deref())?;
    let json = serde_json::to_string_pretty(deck)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
