pub mod album_body;
pub mod album_id;

pub use album_body::AlbumBody;
pub use album_id::AlbumId;
