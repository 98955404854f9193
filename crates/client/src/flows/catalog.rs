use std::collections::HashSet;
use std::sync::Arc;

use bitmap_core::game::Game;
use bitmap_core::search::SearchIndex;
use bitmap_core::types::DbId;

use super::FlowError;
use crate::backend::StorefrontBackend;

/// The storefront game list with its search index.
///
/// The index is rebuilt from scratch on every refresh.
pub struct GameCatalog {
    backend: Arc<dyn StorefrontBackend>,
    games: Vec<Game>,
    index: SearchIndex,
}

impl GameCatalog {
    pub fn new(backend: Arc<dyn StorefrontBackend>) -> Self {
        Self {
            backend,
            games: Vec::new(),
            index: SearchIndex::build(&[]),
        }
    }

    /// Fetch the game list and rebuild the index. Returns the game count.
    pub async fn refresh(&mut self) -> Result<usize, FlowError> {
        let games = self.backend.list_games().await?;
        self.index = SearchIndex::build(&games);
        self.games = games;
        tracing::info!(count = self.games.len(), "Game catalog refreshed");
        Ok(self.games.len())
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn get(&self, game_id: DbId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == game_id)
    }

    /// Games matching `query`, in list order. An empty query returns all.
    pub fn search(&self, query: &str) -> Vec<&Game> {
        let ids: HashSet<DbId> = self.index.search_ids(query).into_iter().collect();
        self.games.iter().filter(|g| ids.contains(&g.id)).collect()
    }
}
