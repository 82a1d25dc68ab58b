use serde::{Deserialize, Serialize};

/// A record album as served over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

/// Create payload. Any client-supplied `id` is dropped during deserialization;
/// the store assigns identifiers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl NewAlbum {
    pub fn into_album(self, id: impl ToString) -> Album {
        Album {
            id: id.to_string(),
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}
