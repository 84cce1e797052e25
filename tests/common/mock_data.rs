//! Mock data builders and an in-memory catalog.
//!
//! [`FakeCatalog`] mimics the over-fetching client: it walks raw records
//! from the requested offset, keeps the display-worthy ones and reports
//! where it stopped.

use std::sync::atomic::{AtomicBool, Ordering};

use herodex::catalog::{
    CatalogPage, CatalogProvider, Character, CharacterId, DisplayPolicy, Thumbnail,
};
use herodex::{HerodexError, Result};
use parking_lot::Mutex;

pub const ART: &str = "http://i.annihil.us/u/prod/marvel/i/mg/5/a0/538615ca33ab0";
pub const NOT_AVAILABLE: &str = "http://i.annihil.us/u/prod/marvel/i/mg/b/40/image_not_available";

/// Builder for test characters
pub struct CharacterBuilder {
    character: Character,
}

impl CharacterBuilder {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            character: Character::new(id, name),
        }
    }

    pub fn art(mut self) -> Self {
        self.character.thumbnail = Some(Thumbnail::new(ART, "jpg"));
        self
    }

    pub fn not_available(mut self) -> Self {
        self.character.thumbnail = Some(Thumbnail::new(NOT_AVAILABLE, "jpg"));
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.character.description = text.to_string();
        self
    }

    pub fn build(self) -> Character {
        self.character
    }
}

/// A display-worthy character
pub fn hero(id: u64) -> Character {
    CharacterBuilder::new(id, &format!("Hero {id}")).art().build()
}

/// A character with a name but no usable art
pub fn faceless(id: u64) -> Character {
    CharacterBuilder::new(id, &format!("Faceless {id}"))
        .not_available()
        .build()
}

/// `n` display-worthy characters with ids `1..=n`
pub fn heroes(n: u64) -> Vec<Character> {
    (1..=n).map(hero).collect()
}

/// In-memory catalog with call recording and switchable failures
#[derive(Default)]
pub struct FakeCatalog {
    records: Vec<Character>,
    reported_total: Option<u64>,
    search_results: Vec<Character>,
    failing: AtomicBool,
    page_calls: Mutex<Vec<(u32, u64)>>,
    search_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(records: Vec<Character>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Report this total instead of the record count
    pub fn with_reported_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    pub fn with_search_results(mut self, results: Vec<Character>) -> Self {
        self.search_results = results;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn page_calls(&self) -> Vec<(u32, u64)> {
        self.page_calls.lock().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    fn check_failing(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HerodexError::Api(
                "catalog API error: HTTP 500: Internal Server Error".to_string(),
            ));
        }
        Ok(())
    }
}

impl CatalogProvider for FakeCatalog {
    async fn fetch_page(&self, limit: u32, offset: u64) -> Result<CatalogPage> {
        self.page_calls.lock().push((limit, offset));
        self.check_failing()?;

        let mut items = Vec::new();
        let mut pos = usize::try_from(offset).unwrap_or(usize::MAX);
        while items.len() < limit as usize && pos < self.records.len() {
            if DisplayPolicy::Strict.admits(&self.records[pos]) {
                items.push(self.records[pos].clone());
            }
            pos += 1;
        }
        Ok(CatalogPage {
            items,
            total: self
                .reported_total
                .unwrap_or(self.records.len() as u64),
            next_offset: pos as u64,
            exhausted: pos >= self.records.len(),
        })
    }

    async fn search_by_name_prefix(&self, text: &str) -> Result<Vec<Character>> {
        self.search_calls.lock().push(text.to_string());
        self.check_failing()?;
        Ok(self.search_results.clone())
    }

    async fn fetch_character(&self, id: CharacterId) -> Result<Character> {
        self.check_failing()?;
        self.records
            .iter()
            .chain(self.search_results.iter())
            .find(|c| c.id == id)
            .cloned()
            .ok_or(HerodexError::CharacterNotFound(id.0))
    }
}
