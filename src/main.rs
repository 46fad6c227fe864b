//! A terminal client for the pulse streaming-music service.

use std::{io::stdout, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use crate::player::Player;

pub mod api;
pub mod audio;
pub mod browser;
mod cli;
pub mod download;
pub mod error;
pub mod library;
mod logging;
pub mod message;
pub mod player;
mod tasks;
#[cfg(test)]
mod tests;
pub mod tracks;
pub mod ui;
pub mod volume;

pub use error::{Error, Result};
pub use message::Message;
pub use tasks::Tasks;

/// A terminal client for the pulse streaming-music service.
#[derive(Parser, Clone)]
#[command(about, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Draw on the alternate screen, leaving the scrollback alone.
    #[clap(long, short)]
    alternate: bool,

    /// Leave out the key hints under the player.
    #[clap(long, short)]
    minimalist: bool,

    /// Draw without the box around the player.
    #[clap(long, short)]
    borderless: bool,

    /// How many times a second the interface is redrawn.
    #[clap(long, short, default_value_t = 12)]
    fps: u8,

    /// Where the pulse backend lives.
    #[clap(long, env = "PULSE_BACKEND_URL", default_value = "http://localhost:8000")]
    backend: String,

    /// Timeout in seconds for requests & music downloads.
    #[clap(long, default_value_t = 8)]
    timeout: u64,

    /// Don't ask the backend to create its sample data at startup.
    #[clap(long)]
    no_seed: bool,

    /// Include ALSA logs, and log more.
    #[clap(long, short)]
    debug: bool,

    /// How much wider than the narrowest layout the player is, up to 32.
    #[clap(long, short, default_value_t = 12)]
    width: usize,

    /// How many rows of songs & playlists are shown at once.
    #[clap(long, short, default_value_t = 10)]
    rows: usize,

    /// Runs a one-off command instead of the player.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// One-off commands which print to stdout and exit.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Lists songs, optionally matching a search.
    Songs {
        /// Only songs matching this, by title, artist or album.
        search: Option<String>,
    },

    /// Lists all playlists.
    Playlists,

    /// Lists the songs of a playlist.
    Playlist {
        /// The id of the playlist.
        id: String,
    },

    /// Lists the liked songs.
    Favorites,

    /// Asks the backend to create its sample data.
    Seed,
}

/// Where the logs go, `<data dir>/pulse`.
pub fn data_dir() -> crate::Result<PathBuf> {
    Ok(dirs::data_dir().ok_or(Error::Directory)?.join("pulse"))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();
    logging::init(&data_dir()?, args.debug)?;

    if let Some(command) = &args.command {
        let client = api::Client::new(&args.backend, Duration::from_secs(args.timeout))?;
        cli::run(command, &client, stdout().lock()).await?;

        return Ok(());
    }

    let (tx, rx) = mpsc::channel(64);
    let mut tasks = Tasks::new(tx);

    let player = Player::init(args, &mut tasks, rx).await?;
    let environment = player.environment();
    let result = tasks.wait(player.run()).await;

    if let Some(environment) = environment {
        environment.cleanup(result.is_ok())?;
    }

    Ok(result?)
}
