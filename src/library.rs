//! The collections store, which caches what the backend knows
//! about songs, playlists & favorites.
//!
//! Loading is forgiving: a failed refresh is logged and keeps whatever was
//! there before. Mutations which the user explicitly asked for (liking a
//! song, creating a playlist) instead report their errors back.

use tracing::{debug, error};

use crate::api::{self, Favorite, Playlist, Song};

/// The cover used for playlists created from pulse.
pub const DEFAULT_COVER: &str = "https://images.unsplash.com/photo-1764936510087-e113d6da4af9?crop=entropy&cs=srgb&fm=jpg&q=85";

/// How many songs are considered "popular" on the home view.
pub const POPULAR: usize = 10;

/// Errors produced by library mutations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a playlist needs a name")]
    EmptyName,

    #[error("the favorite didn't change")]
    Unchanged,

    #[error(transparent)]
    Api(#[from] api::Error),
}

/// Result alias for library mutations.
pub type Result<T> = std::result::Result<T, Error>;

/// A snapshot of everything fetched from the backend.
///
/// This is what gets sent off to the UI whenever it changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub songs: Vec<Song>,
    pub playlists: Vec<Playlist>,
    pub favorites: Vec<Favorite>,
}

impl Collections {
    /// Whether a song has been liked.
    pub fn is_favorite(&self, song: &str) -> bool {
        self.favorites.iter().any(|x| x.song_id == song)
    }

    /// The liked songs, in the order they were liked.
    ///
    /// Favorites which refer to songs that aren't known are left out.
    pub fn favorite_songs(&self) -> Vec<Song> {
        self.favorites
            .iter()
            .filter_map(|fav| self.songs.iter().find(|song| song.id == fav.song_id))
            .cloned()
            .collect()
    }

    /// The songs shown on the home view.
    pub fn popular(&self) -> &[Song] {
        &self.songs[..self.songs.len().min(POPULAR)]
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|x| x.id == id)
    }
}

/// The library itself, a [`Collections`] bound to an [`api::Client`].
pub struct Library {
    /// The client used for all requests.
    client: api::Client,

    /// The most recently fetched data.
    pub(crate) collections: Collections,
}

impl Library {
    pub fn new(client: api::Client) -> Self {
        Self {
            client,
            collections: Collections::default(),
        }
    }

    pub const fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Refreshes the song list, returning the new songs.
    ///
    /// On failure this returns nothing and leaves the old list alone.
    pub async fn load_songs(&mut self, search: &str) -> Vec<Song> {
        match self.client.songs(search).await {
            Ok(songs) => {
                debug!(count = songs.len(), "loaded songs");
                self.collections.songs.clone_from(&songs);
                songs
            }
            Err(error) => {
                error!(%error, "unable to load songs");
                Vec::new()
            }
        }
    }

    /// Searches for songs without touching the cached list.
    pub async fn search(&self, query: &str) -> Vec<Song> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.client.songs(query).await.unwrap_or_else(|error| {
            error!(%error, query, "search failed");
            Vec::new()
        })
    }

    pub async fn load_playlists(&mut self) {
        match self.client.playlists().await {
            Ok(playlists) => self.collections.playlists = playlists,
            Err(error) => error!(%error, "unable to load playlists"),
        }
    }

    pub async fn load_favorites(&mut self) {
        match self.client.favorites().await {
            Ok(favorites) => self.collections.favorites = favorites,
            Err(error) => error!(%error, "unable to load favorites"),
        }
    }

    /// Loads everything there is to load.
    pub async fn load_all(&mut self) {
        self.load_songs("").await;
        self.load_playlists().await;
        self.load_favorites().await;
    }

    pub fn is_favorite(&self, song: &str) -> bool {
        self.collections.is_favorite(song)
    }

    pub async fn add_favorite(&mut self, song: &str) -> Result<()> {
        self.client.add_favorite(song).await?;
        self.load_favorites().await;

        Ok(())
    }

    pub async fn remove_favorite(&mut self, song: &str) {
        if let Err(error) = self.client.remove_favorite(song).await {
            error!(%error, song, "unable to remove favorite");
        }

        self.load_favorites().await;
    }

    /// Likes or unlikes a song, returning whether it is now liked.
    ///
    /// Fails with [`Error::Unchanged`] if the reloaded favorites still
    /// say what they said before.
    pub async fn toggle_favorite(&mut self, song: &str) -> Result<bool> {
        let before = self.is_favorite(song);
        if before {
            self.remove_favorite(song).await;
        } else {
            self.add_favorite(song).await?;
        }

        let after = self.is_favorite(song);
        if after == before {
            return Err(Error::Unchanged);
        }

        Ok(after)
    }

    /// Creates a new playlist with the default cover.
    pub async fn create_playlist(&mut self, name: &str, description: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let playlist = self
            .client
            .create_playlist(name, description.trim(), DEFAULT_COVER)
            .await?;
        self.load_playlists().await;

        Ok(playlist)
    }

    pub async fn add_song_to_playlist(&mut self, playlist: &str, song: &str) -> Result<()> {
        self.client.add_song_to_playlist(playlist, song).await?;
        self.load_playlists().await;

        Ok(())
    }

    pub async fn remove_song_from_playlist(&mut self, playlist: &str, song: &str) {
        if let Err(error) = self.client.remove_song_from_playlist(playlist, song).await {
            error!(%error, playlist, song, "unable to remove song from playlist");
        }

        self.load_playlists().await;
    }

    pub async fn delete_playlist(&mut self, playlist: &str) {
        if let Err(error) = self.client.delete_playlist(playlist).await {
            error!(%error, playlist, "unable to delete playlist");
        }

        self.load_playlists().await;
    }

    /// All of the songs in a playlist, which is empty if anything went wrong.
    pub async fn playlist_songs(&self, playlist: &str) -> Vec<Song> {
        self.client
            .playlist_songs(playlist)
            .await
            .unwrap_or_else(|error| {
                error!(%error, playlist, "unable to load playlist songs");
                Vec::new()
            })
    }

    /// Seeds the backend with sample data, then reloads what it affects.
    pub async fn init_data(&mut self) {
        if let Err(error) = self.client.init_data().await {
            error!(%error, "unable to initialize sample data");
            return;
        }

        self.load_songs("").await;
        self.load_playlists().await;
    }
}
