//! Favorites store.
//!
//! An in-memory set of favorite characters mirrored to a single
//! [`KeyValueStore`] slot. The slot holds a JSON array whose elements are
//! either full character snapshots or bare ids (the older identifier-only
//! format). Every mutation is persisted before it is considered applied.

pub mod storage;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Character, CharacterId};
use crate::error::Result;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage slot holding the favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// One persisted favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredFavorite {
    Full(Box<Character>),
    Id(CharacterId),
}

/// A favorite id with the last known snapshot of its character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub id: CharacterId,
    pub character: Option<Character>,
}

impl From<&FavoriteEntry> for StoredFavorite {
    fn from(entry: &FavoriteEntry) -> Self {
        match &entry.character {
            Some(character) => StoredFavorite::Full(Box::new(character.clone())),
            None => StoredFavorite::Id(entry.id),
        }
    }
}

#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    /// Insertion order
    entries: Vec<FavoriteEntry>,
    ids: HashSet<CharacterId>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Read the favorites slot; missing or malformed data yields an empty set
    pub fn load_initial(storage: S) -> Self {
        let entries = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("could not read favorites, starting empty: {e}");
                Vec::new()
            }
        };

        let mut store = Self {
            storage,
            entries: Vec::with_capacity(entries.len()),
            ids: HashSet::with_capacity(entries.len()),
        };
        for entry in entries {
            if store.ids.insert(entry.id) {
                store.entries.push(entry);
            }
        }
        tracing::debug!(count = store.entries.len(), "favorites loaded");
        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn ids(&self) -> HashSet<CharacterId> {
        self.ids.clone()
    }

    /// Favorites with a known snapshot, in the order they were added
    pub fn items(&self) -> Vec<&Character> {
        self.entries
            .iter()
            .filter_map(|e| e.character.as_ref())
            .collect()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.character.as_ref())
    }

    /// Favorites persisted without a snapshot
    pub fn missing_snapshots(&self) -> Vec<CharacterId> {
        self.entries
            .iter()
            .filter(|e| e.character.is_none())
            .map(|e| e.id)
            .collect()
    }

    /// Add the character if absent, remove it if present
    ///
    /// Returns whether the character is a favorite afterwards. If the new
    /// set cannot be persisted the in-memory set is left unchanged.
    pub fn toggle(&mut self, character: &Character) -> Result<bool> {
        self.toggle_entry(FavoriteEntry {
            id: character.id,
            character: Some(character.clone()),
        })
    }

    /// Toggle by id alone, for characters not loaded in the current view
    pub fn toggle_id(&mut self, id: CharacterId) -> Result<bool> {
        self.toggle_entry(FavoriteEntry {
            id,
            character: None,
        })
    }

    fn toggle_entry(&mut self, entry: FavoriteEntry) -> Result<bool> {
        let id = entry.id;
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            let removed = self.entries.remove(pos);
            self.ids.remove(&id);
            if let Err(e) = self.persist() {
                self.entries.insert(pos, removed);
                self.ids.insert(id);
                return Err(e);
            }
            tracing::debug!(%id, "favorite removed");
            Ok(false)
        } else {
            self.entries.push(entry);
            self.ids.insert(id);
            if let Err(e) = self.persist() {
                self.entries.pop();
                self.ids.remove(&id);
                return Err(e);
            }
            tracing::debug!(%id, "favorite added");
            Ok(true)
        }
    }

    /// Replace stored snapshots with freshly fetched copies
    ///
    /// Returns how many entries changed. Only persists when something did,
    /// and keeps the previous snapshots if that write fails.
    pub fn refresh_snapshots(&mut self, fresh: &[Character]) -> Result<usize> {
        let previous = self.entries.clone();
        let mut changed = 0;
        for character in fresh.iter().filter(|c| self.ids.contains(&c.id)) {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id == character.id)
                && entry.character.as_ref() != Some(character)
            {
                entry.character = Some(character.clone());
                changed += 1;
            }
        }
        if changed > 0
            && let Err(e) = self.persist()
        {
            self.entries = previous;
            return Err(e);
        }
        Ok(changed)
    }

    fn persist(&self) -> Result<()> {
        let stored: Vec<StoredFavorite> = self.entries.iter().map(StoredFavorite::from).collect();
        let json = serde_json::to_string(&stored)?;
        self.storage.set(FAVORITES_KEY, &json)
    }
}

fn parse_entries(raw: &str) -> Vec<FavoriteEntry> {
    match serde_json::from_str::<Vec<StoredFavorite>>(raw) {
        Ok(stored) => stored
            .into_iter()
            .map(|s| match s {
                StoredFavorite::Full(character) => FavoriteEntry {
                    id: character.id,
                    character: Some(*character),
                },
                StoredFavorite::Id(id) => FavoriteEntry {
                    id,
                    character: None,
                },
            })
            .collect(),
        Err(e) => {
            tracing::warn!("ignoring malformed favorites data: {e}");
            Vec::new()
        }
    }
}
