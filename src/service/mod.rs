pub mod bootstrap;
pub mod memory_actor;
pub mod store;

pub use memory_actor::MemoryAlbumStore;
pub use store::{AlbumStore, with_deadline};
