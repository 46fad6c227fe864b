//! Errors from fetching or decoding the audio of one song.

pub type Result<T> = std::result::Result<T, Error>;

/// What exactly went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Kind {
    #[error("couldn't decode the audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("couldn't download the audio: {0}")]
    Request(#[from] reqwest::Error),

    #[error("the audio is too long: {0}")]
    Length(#[from] std::num::TryFromIntError),
}

/// A [`Kind`], along with the name of the song it happened to.
#[derive(Debug, thiserror::Error)]
#[error("{kind} ({track})")]
pub struct Error {
    pub track: String,
    pub kind: Kind,
}

impl Error {
    /// Whether the download took longer than the timeout allows.
    pub fn timeout(&self) -> bool {
        matches!(&self.kind, Kind::Request(error) if error.is_timeout())
    }
}

/// Names the song that an error happened to.
///
/// Download errors lose their URL here, since the song's name is more
/// useful and the URL can be very long.
pub trait WithTrackContext<T> {
    fn track(self, name: &str) -> Result<T>;
}

impl<T, E: Into<Kind>> WithTrackContext<T> for std::result::Result<T, E> {
    fn track(self, name: &str) -> Result<T> {
        self.map_err(|error| Error {
            track: name.to_owned(),
            kind: match error.into() {
                Kind::Request(error) => Kind::Request(error.without_url()),
                kind => kind,
            },
        })
    }
}
