use crate::error::AlbumError;
use crate::service::store::AlbumStore;
use crate::types::{Album, NewAlbum};

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info};

/// Messages handled by the in-memory albums actor.
#[derive(Debug)]
pub enum MemoryAlbumsMessage {
    GetAll(RpcReplyPort<Vec<Album>>),
    GetById(i64, RpcReplyPort<Option<Album>>),
    /// Append a new album; the actor assigns the id.
    Insert(NewAlbum, RpcReplyPort<Album>),
}

/// Handle for the actor-owned album list. Cloning shares the same actor.
#[derive(Clone)]
pub struct MemoryAlbumStore {
    actor: ActorRef<MemoryAlbumsMessage>,
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn get_all(&self) -> Result<Vec<Album>, AlbumError> {
        ractor::call!(self.actor, MemoryAlbumsMessage::GetAll)
            .map_err(|e| AlbumError::Actor(format!("GetAll RPC failed: {e}")))
    }

    async fn get_by_id(&self, id: i64) -> Result<Album, AlbumError> {
        ractor::call!(self.actor, MemoryAlbumsMessage::GetById, id)
            .map_err(|e| AlbumError::Actor(format!("GetById RPC failed: {e}")))?
            .ok_or(AlbumError::NotFound { id })
    }

    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumError> {
        ractor::call!(self.actor, MemoryAlbumsMessage::Insert, album)
            .map_err(|e| AlbumError::Actor(format!("Insert RPC failed: {e}")))
    }
}

struct MemoryAlbumsState {
    albums: Vec<Album>,
    next_id: i64,
}

struct MemoryAlbumsActor;

#[ractor::async_trait]
impl Actor for MemoryAlbumsActor {
    type Msg = MemoryAlbumsMessage;
    type State = MemoryAlbumsState;
    type Arguments = Vec<Album>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        seed: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let next_id = seed
            .iter()
            .filter_map(|a| a.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        info!(count = seed.len(), next_id, "in-memory album store started");
        Ok(MemoryAlbumsState {
            albums: seed,
            next_id,
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            MemoryAlbumsMessage::GetAll(rp) => {
                let _ = rp.send(state.albums.clone());
            }
            MemoryAlbumsMessage::GetById(id, rp) => {
                let key = id.to_string();
                let found = state.albums.iter().find(|a| a.id == key).cloned();
                let _ = rp.send(found);
            }
            MemoryAlbumsMessage::Insert(new, rp) => {
                let album = new.into_album(state.next_id);
                state.next_id += 1;
                state.albums.push(album.clone());
                debug!(id = %album.id, "album appended");
                let _ = rp.send(album);
            }
        }
        Ok(())
    }
}

/// Sample catalogue the in-memory store starts with.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album {
            id: "1".into(),
            title: "Blue Train".into(),
            artist: "John Coltrane".into(),
            price: 56.99,
        },
        Album {
            id: "2".into(),
            title: "Jeru".into(),
            artist: "Gerry Mulligan".into(),
            price: 17.99,
        },
        Album {
            id: "3".into(),
            title: "Sarah Vaughan and Clifford Brown".into(),
            artist: "Sarah Vaughan".into(),
            price: 39.99,
        },
    ]
}

/// Spawn the albums actor over `seed` and return a handle to it.
pub async fn spawn(seed: Vec<Album>) -> Result<MemoryAlbumStore, AlbumError> {
    let (actor, _jh) = Actor::spawn(None, MemoryAlbumsActor, seed)
        .await
        .map_err(|e| AlbumError::Bootstrap(format!("failed to spawn albums actor: {e}")))?;
    Ok(MemoryAlbumStore { actor })
}
