//! The crate-wide error, which everything the player and its tasks can
//! fail with eventually turns into.

use tokio::sync::mpsc::error::SendError;

use crate::{api, ui, volume, Message};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Startup & shutdown.
    #[error("couldn't find the data directory")]
    Directory,

    #[error("couldn't read or write the saved volume: {0}")]
    Volume(#[from] volume::Error),

    #[error("couldn't open the log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("logging was set up twice: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Audio output.
    #[error("couldn't open the audio output: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("couldn't silence alsa: {0}")]
    Silence(#[from] std::ffi::NulError),

    // Talking to the backend.
    #[error("the backend failed: {0}")]
    Api(#[from] api::Error),

    #[error("couldn't build the download client: {0}")]
    Client(#[from] reqwest::Error),

    // Talking between tasks.
    #[error("the player stopped listening: {0}")]
    Message(#[from] SendError<Message>),

    #[error("the downloader stopped listening: {0}")]
    Download(#[from] SendError<api::Song>),

    #[error("interface failure: {0}")]
    UI(#[from] ui::Error),

    #[error("a task couldn't be joined: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}
