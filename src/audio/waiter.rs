//! Watches the sink, and tells the player when a track has played out.

use std::{sync::Arc, time::Duration};

use rodio::Sink;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time,
};

use crate::Message;

/// How often the sink is checked while a track plays.
const POLL: Duration = Duration::from_millis(10);

/// Handle to the watcher, which stops it once dropped.
pub struct Handle {
    /// Counts the tracks appended so far.
    appended: watch::Sender<u64>,
    task: JoinHandle<()>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Handle {
    pub fn new(sink: Arc<Sink>, tx: mpsc::Sender<Message>) -> Self {
        let (appended, rx) = watch::channel(0);

        Self {
            task: tokio::spawn(watch(sink, tx, rx)),
            appended,
        }
    }

    /// Starts watching the track which was just appended to the sink.
    pub fn notify(&self) {
        self.appended.send_modify(|count| *count = count.wrapping_add(1));
    }
}

/// Sends [`Message::Ended`] once the sink runs dry after each append.
///
/// If another track is appended before the sink ran dry, only the newer
/// one gets reported.
async fn watch(sink: Arc<Sink>, tx: mpsc::Sender<Message>, mut appended: watch::Receiver<u64>) {
    while appended.changed().await.is_ok() {
        let mut poll = time::interval(POLL);
        while !sink.empty() {
            poll.tick().await;
        }

        if appended.has_changed().unwrap_or(false) {
            continue;
        }

        if tx.send(Message::Ended).await.is_err() {
            break;
        }
    }
}
