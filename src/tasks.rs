//! The background tasks, and running them alongside the player.

use std::future::Future;

use tokio::{select, sync::mpsc, task::JoinSet};
use tracing::{debug, error};

use crate::Message;

/// Every background task, each with a name for the logs.
pub struct Tasks {
    set: JoinSet<(&'static str, crate::Result<()>)>,

    /// Kept so new tasks can talk to the player.
    tx: mpsc::Sender<Message>,
}

impl Tasks {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self {
            set: JoinSet::new(),
            tx,
        }
    }

    /// Starts a background task called `name`.
    pub fn spawn<E>(
        &mut self,
        name: &'static str,
        task: impl Future<Output = Result<(), E>> + Send + 'static,
    ) where
        E: Into<crate::Error> + Send + 'static,
    {
        debug!(task = name, "starting");
        self.set
            .spawn(async move { (name, task.await.map_err(Into::into)) });
    }

    pub fn tx(&self) -> mpsc::Sender<Message> {
        self.tx.clone()
    }

    /// Runs `player` until it's done, or until any background task stops.
    ///
    /// The player isn't spawned like the rest, since the audio stream it
    /// owns can't be sent between threads.
    pub async fn wait(&mut self, player: impl Future<Output = crate::Result<()>>) -> crate::Result<()> {
        select! {
            result = player => result,
            Some(joined) = self.set.join_next() => match joined {
                Ok((name, Ok(()))) => {
                    debug!(task = name, "finished early");
                    Ok(())
                }
                Ok((name, Err(error))) => {
                    error!(task = name, %error, "failed");
                    Err(error)
                }
                Err(error) if error.is_cancelled() => Ok(()),
                Err(error) => Err(crate::Error::JoinError(error)),
            }
        }
    }
}
