use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie known to the catalog. Users reference it by internal id only;
/// deleting a movie does not touch favourites lists that point at it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    /// Identifier from the upstream movie catalog, e.g. "tt0111161"
    pub external_id: String,
    pub title: String,
}

impl Movie {
    pub fn new(external_id: String, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            external_id,
            title,
        }
    }
}
