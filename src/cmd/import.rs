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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use flashdeck_core::Deck;
use walkdir::WalkDir;

use crate::collection::Collection;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

pub fn import_decks(directory: Option<String>, path: String, name: Option<String>) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let imported = import_path(&mut collection, Path::new(&path), name.as_deref())?;
    collection.save()?;
    for deck in imported {
        println!("Imported '{}' ({} cards).", deck.name, deck.cards.len());
    }
    Ok(())
}

/// Import a deck file, or every `.json` file under a directory. Nothing is
/// added to the collection unless every file imports cleanly.
pub fn import_path(
    collection: &mut Collection,
    path: &Path,
    name: Option<&str>,
) -> Fallible<Vec<Deck>> {
    if !path.exists() {
        return fail(format!("'{}' does not exist.", path.display()));
    }
    let files: Vec<PathBuf> = if path.is_dir() {
        if name.is_some() {
            return fail("a deck name can only be given when importing a single file.");
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let file = entry.path();
            if file.is_file() && file.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(file.to_path_buf());
            }
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut decks: Vec<Deck> = Vec::new();
    for file in files {
        let fallback = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let text = read_to_string(&file)?;
        let deck = Deck::from_json(&text, name.unwrap_or(&fallback)).map_err(|e| {
            ErrorReport::new(format!("{}: {}", file.display(), e.message()))
        })?;
        if deck.id.is_empty() {
            return fail(format!("{}: the deck has no usable name.", file.display()));
        }
        let exists = collection.decks.iter().chain(decks.iter()).any(|d| d.id == deck.id);
        if exists {
            return fail(format!("a deck named '{}' already exists.", deck.name));
        }
        log::debug!("Parsed {} cards from {}", deck.cards.len(), file.display());
        decks.push(deck);
    }
    for deck in &decks {
        collection.put_deck(deck.clone());
    }
    Ok(decks)
}
