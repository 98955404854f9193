//! Incremental catalog search tolerant of Korean input quirks.
//!
//! A query matches a record when any of its searchable fields (title,
//! developer, publisher) contains:
//!
//! - the trimmed, lower-cased query itself,
//! - the Hangul the query spells when read as 2-set keystrokes typed with
//!   the input method left on Latin (`dortjs` → `액션`), or
//! - the query's initial consonants within the field's initials
//!   (`ㅇㅅ` → `액션`, and a half-typed `액ㅅ` as well).
//!
//! Filtering is stable: matches keep their original relative order.

use crate::game::Game;
use crate::hangul;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Searchable records
// ---------------------------------------------------------------------------

/// A record exposing the fields eligible for matching.
pub trait Searchable {
    fn title(&self) -> Option<&str>;
    fn developer(&self) -> Option<&str>;
    fn publisher(&self) -> Option<&str>;

    /// Searchable fields, with absent and empty values removed.
    fn search_fields(&self) -> Vec<&str> {
        [self.title(), self.developer(), self.publisher()]
            .into_iter()
            .flatten()
            .filter(|f| !f.trim().is_empty())
            .collect()
    }
}

impl Searchable for Game {
    fn title(&self) -> Option<&str> {
        Some(&self.content.title)
    }

    fn developer(&self) -> Option<&str> {
        Some(&self.content.developer)
    }

    fn publisher(&self) -> Option<&str> {
        Some(&self.content.publisher)
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A parsed query with every representation it can match through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
    composed: Option<String>,
    chosung: Option<String>,
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = trimmed.to_lowercase();

        // Composition reads the original case: shifted keys type tense
        // consonants.
        let composed = Some(hangul::compose_qwerty(trimmed).to_lowercase())
            .filter(|c| !c.is_empty() && *c != normalized);

        let chosung_source = if hangul::contains_hangul(&normalized) {
            Some(normalized.as_str())
        } else {
            composed.as_deref()
        };
        let chosung = chosung_source
            .map(|source| strip_whitespace(&hangul::extract_chosung(source)))
            .filter(|c| !c.is_empty());

        Self {
            normalized,
            composed,
            chosung,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Hangul spelled by the query's keystrokes, when it differs from the
    /// query.
    pub fn composed(&self) -> Option<&str> {
        self.composed.as_deref()
    }

    /// Initials to match against field initials.
    pub fn chosung(&self) -> Option<&str> {
        self.chosung.as_deref()
    }

    /// Match against a field already reduced to lower case and compact
    /// initials.
    fn matches_prepared(&self, lower: &str, field_chosung: &str) -> bool {
        if lower.is_empty() {
            return false;
        }
        if lower.contains(&self.normalized) {
            return true;
        }
        if let Some(composed) = &self.composed {
            if lower.contains(composed.as_str()) {
                return true;
            }
        }
        if let Some(chosung) = &self.chosung {
            if field_chosung.contains(chosung.as_str()) {
                return true;
            }
        }
        false
    }

    pub fn matches_field(&self, field: &str) -> bool {
        let prepared = PreparedField::new(field);
        self.matches_prepared(&prepared.lower, &prepared.chosung)
    }

    /// An empty query matches everything.
    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        self.is_empty()
            || record
                .search_fields()
                .into_iter()
                .any(|field| self.matches_field(field))
    }
}

/// Filter `records` by `query`, preserving their order.
pub fn filter<'a, T: Searchable>(query: &str, records: &'a [T]) -> Vec<&'a T> {
    let query = SearchQuery::parse(query);
    records.iter().filter(|r| query.matches(*r)).collect()
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct PreparedField {
    lower: String,
    chosung: String,
}

impl PreparedField {
    fn new(value: &str) -> Self {
        Self {
            lower: value.to_lowercase(),
            chosung: strip_whitespace(&hangul::extract_chosung(value)),
        }
    }
}

/// The matchable view of one game.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub game_id: DbId,
    pub title: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    prepared: Vec<PreparedField>,
}

impl SearchEntry {
    pub fn from_game(game: &Game) -> Self {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.trim().is_empty());
        let mut entry = Self {
            game_id: game.id,
            title: non_empty(&game.content.title),
            developer: non_empty(&game.content.developer),
            publisher: non_empty(&game.content.publisher),
            prepared: Vec::new(),
        };
        let prepared = entry
            .search_fields()
            .into_iter()
            .map(PreparedField::new)
            .collect();
        entry.prepared = prepared;
        entry
    }
}

impl Searchable for SearchEntry {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn developer(&self) -> Option<&str> {
        self.developer.as_deref()
    }

    fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }
}

/// Flattened, pre-normalized view of a game list.
///
/// Rebuilt wholesale from each fetched list; it is never patched
/// incrementally.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn build(games: &[Game]) -> Self {
        Self {
            entries: games.iter().map(SearchEntry::from_game).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let query = SearchQuery::parse(query);
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.prepared
                    .iter()
                    .any(|f| query.matches_prepared(&f.lower, &f.chosung))
            })
            .collect()
    }

    /// Ids of matching games in list order.
    pub fn search_ids(&self, query: &str) -> Vec<DbId> {
        self.search(query).into_iter().map(|e| e.game_id).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
