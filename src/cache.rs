use cached::proc_macro::cached;

use crate::store::{PlayerStore, StoreError};
use crate::types::{PlayerPage, PlayerSeason};

pub use cached::Cached;

#[cfg(test)]
pub async fn clear_all_caches() {
    PAGE_CACHE.lock().await.cache_clear();
    HISTORY_CACHE.lock().await.cache_clear();
}

#[cfg(test)]
#[derive(Debug)]
pub struct CacheStats {
    pub page_entries: usize,
    pub history_entries: usize,
}

#[cfg(test)]
pub async fn cache_stats() -> CacheStats {
    CacheStats {
        page_entries: PAGE_CACHE.lock().await.cache_size(),
        history_entries: HISTORY_CACHE.lock().await.cache_size(),
    }
}

#[cached(
    name = "PAGE_CACHE",
    type = "cached::TimedSizedCache<String, PlayerPage>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(8, 60) }",
    convert = r#"{ format!("{}:{}:{}", offset, limit, season_id) }"#,
    result = true
)]
pub async fn fetch_page_cached(
    store: &dyn PlayerStore,
    offset: i64,
    limit: i64,
    season_id: i64,
) -> Result<PlayerPage, StoreError> {
    store.fetch_page(offset, limit, season_id).await
}

#[cached(
    name = "HISTORY_CACHE",
    type = "cached::TimedSizedCache<i64, Vec<PlayerSeason>>",
    create = "{ cached::TimedSizedCache::with_size_and_lifespan(100, 3600) }",
    convert = r#"{ player_id }"#,
    result = true
)]
pub async fn fetch_season_history_cached(
    store: &dyn PlayerStore,
    player_id: i64,
) -> Result<Vec<PlayerSeason>, StoreError> {
    store.fetch_season_history(player_id).await
}

/// Drop any cached copy of the window and fetch it fresh. Used by the
/// engine's refresh path so a refresh always observes current store state.
pub async fn refresh_page(
    store: &dyn PlayerStore,
    offset: i64,
    limit: i64,
    season_id: i64,
) -> Result<PlayerPage, StoreError> {
    let key = format!("{}:{}:{}", offset, limit, season_id);
    PAGE_CACHE.lock().await.cache_remove(&key);
    fetch_page_cached(store, offset, limit, season_id).await
}

pub async fn refresh_season_history(
    store: &dyn PlayerStore,
    player_id: i64,
) -> Result<Vec<PlayerSeason>, StoreError> {
    HISTORY_CACHE.lock().await.cache_remove(&player_id);
    fetch_season_history_cached(store, player_id).await
}
