use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::handlers::albums::{get_album_by_id, get_albums, post_albums};
use crate::handlers::ping::ping_handler;
use crate::service::AlbumStore;

/// Shared handler environment: the injected store and the per-request deadline.
#[derive(Clone)]
pub struct AlbumsState {
    pub albums: Arc<dyn AlbumStore>,
    pub timeout: Duration,
}

impl AlbumsState {
    pub fn new(albums: Arc<dyn AlbumStore>, timeout: Duration) -> Self {
        Self { albums, timeout }
    }
}

pub fn albums_router(state: AlbumsState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/albums", get(get_albums).post(post_albums))
        .route("/albums/{id}", get(get_album_by_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
