//! The REST client for the pulse backend.
//!
//! All of the endpoints live under `<backend>/api`, and exchange JSON.
//! Any response outside of the 2xx range is treated as an error.

use std::time::Duration;

use futures_util::future;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

pub mod types;
pub use types::{Favorite, Playlist, Song};

use types::{NewPlaylist, SongRef};

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),

    #[error("backend url can't be used as a base")]
    Base,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A handle to the backend, which is cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying [`reqwest`] client.
    http: reqwest::Client,

    /// The root of the API, like `http://localhost:8000/api`.
    root: Url,
}

impl Client {
    /// Creates a new client for the backend at `backend`.
    pub fn new(backend: &str, timeout: Duration) -> Result<Self> {
        let mut root = Url::parse(backend)?;
        root.path_segments_mut()
            .map_err(|()| Error::Base)?
            .pop_if_empty()
            .push("api");

        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, root })
    }

    /// The API root this client talks to.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Builds the URL of an endpoint. Each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Base)?
            .extend(segments);

        Ok(url)
    }

    /// Starts a request to an endpoint.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// Sends a request, and parses the JSON body of the response.
    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Sends a request, only caring about whether it succeeded.
    async fn send(request: RequestBuilder) -> Result<()> {
        request.send().await?.error_for_status()?;
        Ok(())
    }

    /// Lists songs, optionally filtered by a search query.
    pub async fn songs(&self, search: &str) -> Result<Vec<Song>> {
        let mut request = self.request(Method::GET, &["songs"])?;
        if !search.is_empty() {
            request = request.query(&[("search", search)]);
        }

        Self::fetch(request).await
    }

    pub async fn song(&self, id: &str) -> Result<Song> {
        Self::fetch(self.request(Method::GET, &["songs", id])?).await
    }

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        Self::fetch(self.request(Method::GET, &["playlists"])?).await
    }

    pub async fn playlist(&self, id: &str) -> Result<Playlist> {
        Self::fetch(self.request(Method::GET, &["playlists", id])?).await
    }

    /// Creates a playlist, returning it as the backend stored it.
    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        cover_url: &str,
    ) -> Result<Playlist> {
        let body = NewPlaylist {
            name,
            description,
            cover_url,
        };

        Self::fetch(self.request(Method::POST, &["playlists"])?.json(&body)).await
    }

    pub async fn delete_playlist(&self, id: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, &["playlists", id])?).await
    }

    pub async fn add_song_to_playlist(&self, playlist: &str, song: &str) -> Result<()> {
        let request = self.request(Method::POST, &["playlists", playlist, "songs"])?;
        Self::send(request.json(&SongRef { song_id: song })).await
    }

    pub async fn remove_song_from_playlist(&self, playlist: &str, song: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, &["playlists", playlist, "songs", song])?).await
    }

    /// Fetches a playlist along with all of its songs.
    ///
    /// The songs are requested concurrently, but keep the playlist's order.
    /// If any of them fails, so does the whole call.
    pub async fn playlist_songs(&self, id: &str) -> Result<Vec<Song>> {
        let playlist = self.playlist(id).await?;
        future::try_join_all(playlist.song_ids.iter().map(|song| self.song(song))).await
    }

    pub async fn favorites(&self) -> Result<Vec<Favorite>> {
        Self::fetch(self.request(Method::GET, &["favorites"])?).await
    }

    pub async fn add_favorite(&self, song: &str) -> Result<()> {
        let request = self.request(Method::POST, &["favorites"])?;
        Self::send(request.json(&SongRef { song_id: song })).await
    }

    pub async fn remove_favorite(&self, song: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, &["favorites", song])?).await
    }

    /// Asks the backend to seed itself with sample data.
    pub async fn init_data(&self) -> Result<()> {
        Self::send(self.request(Method::POST, &["init-data"])?).await
    }
}
