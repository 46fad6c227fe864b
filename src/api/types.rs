//! The data types exchanged with the backend.
//!
//! Everything here mirrors the JSON the backend produces, which uses
//! `snake_case` keys. Fields that the backend may leave out are defaulted
//! so that a sparse record still deserializes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single song, as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier of the song.
    pub id: String,

    /// The title of the song.
    pub title: String,

    /// The performing artist.
    pub artist: String,

    /// The album, which may be empty.
    #[serde(default)]
    pub album: String,

    /// Advertised length of the song in seconds.
    ///
    /// This is only what the backend claims, the decoder has the final say.
    #[serde(default)]
    pub duration: f64,

    /// A link to the cover art.
    #[serde(default)]
    pub cover_url: String,

    /// A link to the audio itself.
    pub audio_url: String,
}

impl Song {
    /// The advertised duration, or [`None`] if the backend didn't give a usable one.
    pub fn length(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.duration)
            .ok()
            .filter(|x| !x.is_zero())
    }

    /// The name used to represent the song in a single line.
    pub fn display(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

/// A user playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique identifier of the playlist.
    pub id: String,

    /// The name of the playlist.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub cover_url: String,

    /// The songs in the playlist, in order.
    #[serde(default)]
    pub song_ids: Vec<String>,
}

impl Playlist {
    /// A short count of the songs, like `1 song` or `12 songs`.
    pub fn count(&self) -> String {
        let len = self.song_ids.len();
        format!("{len} song{}", if len == 1 { "" } else { "s" })
    }
}

/// A favorited ("liked") song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// The song this favorite refers to.
    pub song_id: String,

    #[serde(default)]
    pub id: Option<String>,
}

/// Body for creating a playlist.
#[derive(Debug, Serialize)]
pub(crate) struct NewPlaylist<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub cover_url: &'a str,
}

/// Body for any request which refers to a song.
#[derive(Debug, Serialize)]
pub(crate) struct SongRef<'a> {
    pub song_id: &'a str,
}
