use crate::models::movie::Movie;
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory catalog of movie records, keyed by the upstream external id.
///
/// Catalog ingestion is out of scope for this service; records are inserted
/// programmatically by whatever embeds the store.
pub struct MovieStore {
    movies: DashMap<String, Movie>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self {
            movies: DashMap::new(),
        }
    }

    /// Resolve an external catalog identifier to a movie record
    pub fn find_by_external_id(&self, external_id: &str) -> Option<Movie> {
        self.movies
            .get(external_id)
            .map(|entry| entry.value().clone())
    }

    /// Look up a movie by internal id
    /// Note: This is a linear search and should be used sparingly
    pub fn find_by_id(&self, id: Uuid) -> Option<Movie> {
        self.movies
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone())
    }

    /// Resolve a list of internal ids to full movie records, preserving
    /// order. Dangling references are skipped: deleting a movie does not
    /// cascade into favourites lists.
    pub fn resolve_all(&self, ids: &[Uuid]) -> Vec<Movie> {
        ids.iter().filter_map(|id| self.find_by_id(*id)).collect()
    }

    /// Add a movie to the catalog
    /// If a movie with the same external id already exists, it is replaced
    pub fn insert(&self, movie: Movie) {
        self.movies.insert(movie.external_id.clone(), movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}
