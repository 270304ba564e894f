//! In-memory store of the accumulated movie list.

use std::collections::HashSet;

use super::types::{Movie, MovieId};

/// Holds the accumulated list of movies and pagination state.
///
/// Invariant: no two movies in `items` share an id. Insertion order is
/// arrival order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    items: Vec<Movie>,
    ids: HashSet<MovieId>,
    current_page: u32,
    has_more: bool,
    is_loading: bool,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty store positioned on page 1.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
            current_page: 1,
            has_more: true,
            is_loading: false,
        }
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    /// Last page number successfully merged.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Check if a movie with this id is already in the list.
    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clear the list and return to page 1 with more pages expected.
    ///
    /// The loading flag is left alone; it belongs to whoever issued the fetch.
    pub fn reset(&mut self) {
        self.clear_items();
        self.current_page = 1;
        self.has_more = true;
    }

    /// Replace the whole list. Duplicate ids within `movies` keep the first
    /// occurrence.
    pub fn replace_all(&mut self, movies: Vec<Movie>) -> usize {
        self.clear_items();
        self.append_unique(movies)
    }

    /// Append movies whose id is not already present.
    ///
    /// Existing items keep their order; surviving new items follow in the
    /// order given. Returns the number of movies actually appended.
    pub fn append_unique(&mut self, movies: Vec<Movie>) -> usize {
        let before = self.items.len();
        self.items.reserve(movies.len());
        for movie in movies {
            if self.ids.insert(movie.id) {
                self.items.push(movie);
            }
        }
        self.items.len() - before
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page;
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            release_date: None,
            vote_average: None,
        }
    }

    fn ids(store: &CatalogStore) -> Vec<MovieId> {
        store.items().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_new_store_defaults() {
        let store = CatalogStore::new();
        assert!(store.is_empty());
        assert_eq!(store.current_page(), 1);
        assert!(store.has_more());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_append_unique_skips_existing_ids() {
        let mut store = CatalogStore::new();
        store.append_unique(vec![movie(1), movie(2), movie(3)]);

        let added = store.append_unique(vec![movie(3), movie(4), movie(1), movie(5)]);

        assert_eq!(added, 2);
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_unique_dedups_within_batch() {
        let mut store = CatalogStore::new();
        let added = store.append_unique(vec![movie(7), movie(8), movie(7)]);

        assert_eq!(added, 2);
        assert_eq!(ids(&store), vec![7, 8]);
    }

    #[test]
    fn test_append_unique_keeps_existing_entry() {
        let mut store = CatalogStore::new();
        store.append_unique(vec![movie(1)]);

        let mut renamed = movie(1);
        renamed.title = "Other title".to_string();
        store.append_unique(vec![renamed]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].title, "Movie 1");
    }

    #[test]
    fn test_append_sequence_never_duplicates() {
        let mut store = CatalogStore::new();
        let batches: Vec<Vec<MovieId>> = vec![
            vec![1, 2, 3],
            vec![3, 4],
            vec![],
            vec![4, 4, 5, 1],
            vec![6, 2, 7],
        ];

        for batch in batches {
            store.append_unique(batch.into_iter().map(movie).collect());
        }

        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6, 7]);
        let unique: HashSet<_> = ids(&store).into_iter().collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn test_replace_all_discards_previous_items() {
        let mut store = CatalogStore::new();
        store.append_unique(vec![movie(1), movie(2)]);

        store.replace_all(vec![movie(2), movie(9)]);

        assert_eq!(ids(&store), vec![2, 9]);
        assert!(!store.contains(1));
        assert!(store.contains(9));
    }

    #[test]
    fn test_reset_keeps_loading_flag() {
        let mut store = CatalogStore::new();
        store.append_unique(vec![movie(1)]);
        store.set_page(4);
        store.set_has_more(false);
        store.set_loading(true);

        store.reset();

        assert!(store.is_empty());
        assert!(!store.contains(1));
        assert_eq!(store.current_page(), 1);
        assert!(store.has_more());
        assert!(store.is_loading());
    }
}
