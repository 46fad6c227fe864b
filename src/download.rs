//! The downloader, which fetches the audio of songs in the background.

use std::{
    sync::atomic::{self, AtomicU8},
    time::Duration,
};

use bytes::BytesMut;
use futures_util::StreamExt as _;
use reqwest::Client;
use tokio::{
    select,
    sync::mpsc::{self, Receiver, Sender},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{
    api::Song,
    tracks::{self, error::WithTrackContext as _, Fetched},
};

/// How far along the current download is, from 0 to 100.
///
/// Only one download runs at a time, so one counter is enough.
pub(crate) static PROGRESS: AtomicU8 = AtomicU8::new(0);

/// What [`crate::player::Current::Loading`] holds, so the interface can read [`PROGRESS`].
pub type Progress = &'static AtomicU8;

/// Downloads the audio of a single song, reporting to [`PROGRESS`] along the way.
async fn fetch(client: &Client, song: &Song) -> tracks::Result<Fetched> {
    let name = song.display();
    PROGRESS.store(0, atomic::Ordering::Relaxed);

    let response = client
        .get(&song.audio_url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .track(&name)?;

    let total = response.content_length();
    let capacity = total.unwrap_or(0).try_into().track(&name)?;
    let mut data = BytesMut::with_capacity(capacity);
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk.track(&name)?);

        if let Some(total) = total.filter(|x| *x > 0) {
            let progress = (data.len() as u64 * 100 / total).min(100);
            PROGRESS.store(progress as u8, atomic::Ordering::Relaxed);
        }
    }

    PROGRESS.store(100, atomic::Ordering::Relaxed);
    Ok(Fetched {
        song: song.clone(),
        data: data.freeze(),
    })
}

/// The background task which fetches audio for the player.
pub struct Downloader {
    /// Songs which the player would like to hear.
    requests: Receiver<Song>,

    /// The [`Sender`] which is used to inform the player
    /// with [`crate::Message::Loaded`] or [`crate::Message::Failed`].
    tx: Sender<crate::Message>,

    client: Client,
}

impl Downloader {
    /// Initializes the downloader.
    ///
    /// `timeout` is how long, in seconds, a single download may take.
    pub fn init(timeout: u64, tx: Sender<crate::Message>) -> crate::Result<Handle> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(timeout))
            .build()?;

        let (rtx, rrx) = mpsc::channel(8);
        let downloader = Self {
            requests: rrx,
            tx,
            client,
        };

        Ok(Handle {
            requests: rtx,
            task: tokio::spawn(downloader.run()),
        })
    }

    /// Runs the downloader until the [`Handle`] goes away.
    ///
    /// Only the newest request is ever worth finishing, so a download
    /// in progress is abandoned as soon as another request shows up.
    async fn run(mut self) -> crate::Result<()> {
        let mut pending = None;

        loop {
            let song = match pending.take() {
                Some(song) => song,
                None => match self.requests.recv().await {
                    Some(song) => song,
                    None => break Ok(()),
                },
            };

            debug!(song = %song.id, "downloading");
            let result = select! {
                result = fetch(&self.client, &song) => result,
                Some(newer) = self.requests.recv() => {
                    debug!(song = %song.id, "download superseded");
                    pending = Some(newer);
                    continue;
                }
            };

            let message = match result {
                Ok(track) => crate::Message::Loaded(track),
                Err(error) => {
                    warn!(%error, timeout = error.timeout(), "download failed");
                    crate::Message::Failed(song.id)
                }
            };

            self.tx.send(message).await?;
        }
    }
}

/// The player's end of the downloader, which stops it once dropped.
pub struct Handle {
    /// Where requests for new songs go.
    requests: Sender<Song>,

    task: JoinHandle<crate::Result<()>>,
}

impl Handle {
    /// Asks for the audio of `song`, superseding any earlier request.
    pub async fn request(&self, song: Song) -> crate::Result<()> {
        PROGRESS.store(0, atomic::Ordering::Relaxed);
        self.requests.send(song).await?;
        Ok(())
    }

    /// The progress of the current download.
    pub fn progress() -> Progress {
        &PROGRESS
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
