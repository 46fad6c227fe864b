//! The audio of songs, from the downloaded bytes to something the sink can play.
//!
//! The downloader produces a [`Fetched`], which the player decodes into
//! a [`Decoded`] right before appending it to the sink. The player keeps
//! the [`Fetched`] bytes around, so that restarting a song doesn't mean
//! downloading it again.

use std::{fmt, io::Cursor, time::Duration};

use bytes::Bytes;
use rodio::{Decoder, Source as _};
use unicode_segmentation::UnicodeSegmentation as _;

pub mod error;
pub use error::{Error, Result};

use crate::{api::Song, tracks::error::WithTrackContext as _};

/// A rodio decoder reading straight from downloaded bytes.
pub type DecodedData = Decoder<Cursor<Bytes>>;

/// The downloaded, still encoded audio of a song.
#[derive(Clone, PartialEq)]
pub struct Fetched {
    pub song: Song,

    /// Cheap to clone, and much smaller than decoded samples.
    pub data: Bytes,
}

impl fmt::Debug for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetched")
            .field("song", &self.song.id)
            .field("data", &self.data.len())
            .finish()
    }
}

impl Fetched {
    pub fn decode(&self) -> Result<Decoded> {
        let name = self.song.display();
        let data = Decoder::builder()
            .with_byte_len(self.data.len().try_into().track(&name)?)
            .with_seekable(true)
            .with_data(Cursor::new(self.data.clone()))
            .build()
            .track(&name)?;

        Ok(Decoded {
            info: Info::new(self.song.clone(), data.total_duration()),
            data,
        })
    }
}

/// What the interface shows about the song that's playing.
#[derive(Debug, PartialEq, Clone)]
pub struct Info {
    pub song: Song,

    /// `title - artist`, or just the title.
    pub display: String,

    /// Width of `display` in graphemes, which is what the terminal shows.
    pub width: usize,

    /// How long the song is, if either the decoder or the backend knows.
    pub duration: Option<Duration>,
}

impl Info {
    /// The decoder's `duration` wins over the one the backend advertises.
    pub fn new(song: Song, duration: Option<Duration>) -> Self {
        let display = song.display();

        Self {
            duration: duration.or_else(|| song.length()),
            width: display.graphemes(true).count(),
            display,
            song,
        }
    }
}

/// A song that's ready to be appended to the sink.
pub struct Decoded {
    pub info: Info,
    pub data: DecodedData,
}
