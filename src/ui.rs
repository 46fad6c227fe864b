//! The terminal interface, which renders a copy of the player's state
//! and turns keyboard input into [`crate::Message`]s.

use std::sync::Arc;

use crate::{browser::Browser, library::Collections, player::Current};
use tokio::{
    sync::broadcast::{self, error::TryRecvError},
    time::Instant,
};

pub mod components;
mod environment;
pub use environment::Environment;
pub mod input;
pub mod interface;
mod task;
pub mod view;

#[cfg(feature = "mpris")]
pub mod mpris;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Anything which can go wrong while drawing, or while serving MPRIS.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the window is too tall to draw: {0}")]
    Conversion(#[from] std::num::TryFromIntError),

    #[error("couldn't write to the terminal: {0}")]
    Write(#[from] std::io::Error),

    #[error("couldn't broadcast an update: {0}")]
    UiSend(#[from] tokio::sync::broadcast::error::SendError<Update>),

    #[error("PULSE_DISABLE_UI needs the mpris feature")]
    RejectedDisable,

    #[cfg(feature = "mpris")]
    #[error("mpris bus error")]
    ZBus(#[from] mpris_server::zbus::Error),

    #[cfg(feature = "mpris")]
    #[error("mpris fdo (zbus interface) error")]
    Fdo(#[from] mpris_server::zbus::fdo::Error),
}

/// The UI's own copy of everything it has to draw.
#[derive(Clone)]
pub struct State {
    /// The sink, which is read directly for the position, volume & pause state.
    pub sink: Arc<rodio::Sink>,

    /// The current track.
    pub current: Current,

    /// The latest data from the backend.
    pub collections: Collections,

    /// The view state.
    pub browser: Browser,

    /// A short message for the user, along with when it appeared.
    pub(crate) notice: Option<(String, Instant)>,

    /// When the volume was last changed, to show the volume bar for a moment.
    pub(crate) volume_timer: Option<Instant>,
}

impl State {
    pub fn initial(sink: Arc<rodio::Sink>, collections: Collections, browser: Browser) -> Self {
        Self {
            sink,
            current: Current::default(),
            collections,
            browser,
            notice: None,
            volume_timer: None,
        }
    }

    /// Whether the current song is a liked one.
    pub fn favorite(&self) -> bool {
        self.current
            .song()
            .is_some_and(|x| self.collections.is_favorite(&x.id))
    }

    /// Applies an [`Update`], returning false if the UI should stop.
    pub fn apply(&mut self, update: Update) -> bool {
        match update {
            Update::Track(current) => self.current = current,
            Update::Library(collections) => self.collections = collections,
            Update::Browser(browser) => self.browser = *browser,
            Update::Volume => self.volume_timer = Some(Instant::now()),
            Update::Notice(notice) => self.notice = Some((notice, Instant::now())),
            Update::Playback => (),
            Update::Quit => return false,
        }

        true
    }
}

/// A change in the player's state, which is broadcast to every
/// frontend (the terminal and MPRIS).
#[derive(Debug, Clone)]
pub enum Update {
    Track(Current),
    Library(Collections),
    Browser(Box<Browser>),
    Volume,

    /// The sink was paused, resumed or seeked.
    Playback,

    Notice(String),
    Quit,
}

/// Draws the interface until told to quit.
pub async fn run(
    mut rx: broadcast::Receiver<Update>,
    mut state: State,
    params: interface::Params,
) -> Result<()> {
    let mut interface = interface::Interface::new(params);

    loop {
        loop {
            match rx.try_recv() {
                Ok(update) => {
                    if !state.apply(update) {
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(_)) => (),
                Err(TryRecvError::Closed) => return Ok(()),
            }
        }

        interface.draw(&mut state).await?;
    }
}

/// The handle to the frontends, used by the player to report changes.
pub struct Handle {
    /// Broadcasts [`Update`]s to the renderer, and MPRIS.
    updater: broadcast::Sender<Update>,

    /// The prepared terminal, if the visual UI is enabled.
    pub environment: Option<Environment>,

    #[cfg(feature = "mpris")]
    pub mpris: mpris::Server,
}

impl Handle {
    /// Reports a change to every frontend.
    #[cfg_attr(not(feature = "mpris"), allow(clippy::unused_async))]
    pub async fn update(&mut self, update: Update) -> Result<()> {
        #[cfg(feature = "mpris")]
        self.mpris.apply(&update).await?;

        if self.updater.receiver_count() > 0 {
            self.updater.send(update)?;
        }

        Ok(())
    }
}
