//! Remote control over MPRIS, for media keys and desktop widgets.

use std::{
    env,
    hash::{DefaultHasher, Hash, Hasher},
    process,
    sync::Arc,
    time::Duration,
};

use arc_swap::ArcSwap;
use mpris_server::{
    zbus::{self, fdo, zvariant::ObjectPath, Result},
    LoopStatus, Metadata, PlaybackRate, PlaybackStatus, PlayerInterface, Property, RootInterface,
    Time, TrackId, Volume,
};
use rodio::Sink;
use tokio::sync::mpsc;

use crate::{
    player::Current,
    ui::{self, Update},
    Message,
};

/// What's returned for the few things which can't be done over MPRIS.
const UNSUPPORTED: fdo::Error = fdo::Error::NotSupported(String::new());

fn seconds(time: Time) -> f32 {
    time.as_micros() as f32 / 1_000_000.0
}

fn time(duration: Duration) -> Time {
    Time::from_micros(i64::try_from(duration.as_micros()).unwrap_or(i64::MAX))
}

/// The object which is exposed on the bus.
///
/// Controls are forwarded to the player as [`Message`]s, while reads come
/// straight from the sink and the last [`Current`] the player reported.
pub struct Player {
    sink: Arc<Sink>,
    current: ArcSwap<Current>,
    tx: mpsc::Sender<Message>,
}

impl Player {
    async fn send(&self, message: Message) -> fdo::Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|error| fdo::Error::Failed(error.to_string()))
    }

    fn status(&self) -> PlaybackStatus {
        match self.current.load().as_ref() {
            Current::Idle | Current::Loading(..) => PlaybackStatus::Stopped,
            Current::Track(_) if self.sink.is_paused() => PlaybackStatus::Paused,
            Current::Track(_) => PlaybackStatus::Playing,
        }
    }

    /// The track id MPRIS wants, which has to be a valid object path.
    fn track_id(id: &str) -> fdo::Result<ObjectPath<'static>> {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);

        ObjectPath::try_from(format!("/org/pulse/track/{}", hasher.finish()))
            .map_err(|error| fdo::Error::Failed(error.to_string()))
    }
}

impl RootInterface for Player {
    async fn raise(&self) -> fdo::Result<()> {
        Err(UNSUPPORTED)
    }

    async fn quit(&self) -> fdo::Result<()> {
        self.send(Message::Quit).await
    }

    async fn can_quit(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn fullscreen(&self) -> fdo::Result<bool> {
        Ok(false)
    }

    async fn set_fullscreen(&self, _: bool) -> Result<()> {
        Ok(())
    }

    async fn can_set_fullscreen(&self) -> fdo::Result<bool> {
        Ok(false)
    }

    async fn can_raise(&self) -> fdo::Result<bool> {
        Ok(false)
    }

    async fn has_track_list(&self) -> fdo::Result<bool> {
        Ok(false)
    }

    async fn identity(&self) -> fdo::Result<String> {
        Ok("pulse".to_owned())
    }

    async fn desktop_entry(&self) -> fdo::Result<String> {
        Ok("pulse".to_owned())
    }

    async fn supported_uri_schemes(&self) -> fdo::Result<Vec<String>> {
        Ok(vec!["http".to_owned(), "https".to_owned()])
    }

    async fn supported_mime_types(&self) -> fdo::Result<Vec<String>> {
        Ok(vec!["audio/mpeg".to_owned()])
    }
}

impl PlayerInterface for Player {
    async fn next(&self) -> fdo::Result<()> {
        self.send(Message::Next).await
    }

    async fn previous(&self) -> fdo::Result<()> {
        self.send(Message::Previous).await
    }

    async fn pause(&self) -> fdo::Result<()> {
        self.send(Message::Pause).await
    }

    async fn play_pause(&self) -> fdo::Result<()> {
        self.send(Message::PlayPause).await
    }

    async fn stop(&self) -> fdo::Result<()> {
        self.pause().await
    }

    async fn play(&self) -> fdo::Result<()> {
        self.send(Message::Play).await
    }

    async fn seek(&self, offset: Time) -> fdo::Result<()> {
        self.send(Message::SeekBy(seconds(offset))).await
    }

    async fn set_position(&self, _track_id: TrackId, position: Time) -> fdo::Result<()> {
        self.send(Message::SeekTo(seconds(position))).await
    }

    async fn open_uri(&self, _uri: String) -> fdo::Result<()> {
        Err(UNSUPPORTED)
    }

    async fn playback_status(&self) -> fdo::Result<PlaybackStatus> {
        Ok(self.status())
    }

    async fn loop_status(&self) -> fdo::Result<LoopStatus> {
        Ok(LoopStatus::None)
    }

    async fn set_loop_status(&self, _loop_status: LoopStatus) -> Result<()> {
        Ok(())
    }

    async fn rate(&self) -> fdo::Result<PlaybackRate> {
        Ok(self.sink.speed().into())
    }

    async fn set_rate(&self, rate: PlaybackRate) -> Result<()> {
        self.sink.set_speed(rate as f32);
        Ok(())
    }

    async fn shuffle(&self) -> fdo::Result<bool> {
        Ok(false)
    }

    async fn set_shuffle(&self, _shuffle: bool) -> Result<()> {
        Ok(())
    }

    async fn metadata(&self) -> fdo::Result<Metadata> {
        let current = self.current.load();
        let Current::Track(track) = current.as_ref() else {
            return Ok(Metadata::new());
        };

        let song = &track.song;
        let mut metadata = Metadata::builder()
            .trackid(Self::track_id(&song.id)?)
            .title(song.title.clone())
            .artist([song.artist.clone()])
            .album(song.album.clone())
            .build();

        metadata.set_length(track.duration.map(time));
        if !song.cover_url.is_empty() {
            metadata.set_art_url(Some(song.cover_url.clone()));
        }

        Ok(metadata)
    }

    async fn volume(&self) -> fdo::Result<Volume> {
        Ok(self.sink.volume().into())
    }

    async fn set_volume(&self, volume: Volume) -> Result<()> {
        self.tx
            .send(Message::SetVolume(volume as f32))
            .await
            .map_err(|error| zbus::Error::Failure(error.to_string()))
    }

    async fn position(&self) -> fdo::Result<Time> {
        Ok(time(self.sink.get_pos()))
    }

    async fn minimum_rate(&self) -> fdo::Result<PlaybackRate> {
        Ok(0.2f64)
    }

    async fn maximum_rate(&self) -> fdo::Result<PlaybackRate> {
        Ok(3.0f64)
    }

    async fn can_go_next(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn can_go_previous(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn can_play(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn can_pause(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn can_seek(&self) -> fdo::Result<bool> {
        Ok(true)
    }

    async fn can_control(&self) -> fdo::Result<bool> {
        Ok(true)
    }
}

/// The MPRIS server, kept up to date by the player's [`Update`]s.
pub struct Server {
    inner: mpris_server::Server<Player>,
}

impl Server {
    /// Registers on the session bus.
    ///
    /// Every instance gets its own name, unless `PULSE_FIXED_MPRIS_NAME=1`.
    pub async fn new(state: &ui::State, tx: mpsc::Sender<Message>) -> ui::Result<Self> {
        let name = if env::var("PULSE_FIXED_MPRIS_NAME").is_ok_and(|x| x == "1") {
            String::from("pulse")
        } else {
            format!("pulse.instance{}", process::id())
        };

        let player = Player {
            sink: Arc::clone(&state.sink),
            current: ArcSwap::from_pointee(state.current.clone()),
            tx,
        };

        Ok(Self {
            inner: mpris_server::Server::new(&name, player).await?,
        })
    }

    fn player(&self) -> &Player {
        self.inner.imp()
    }

    /// Signals whichever properties `update` changed.
    ///
    /// A new track also changes whether anything is playing at all, so
    /// it's signalled along with the metadata.
    pub async fn apply(&self, update: &Update) -> ui::Result<()> {
        let properties = match update {
            Update::Track(current) => {
                self.player().current.store(Arc::new(current.clone()));
                vec![
                    Property::Metadata(self.player().metadata().await?),
                    Property::PlaybackStatus(self.player().status()),
                ]
            }
            Update::Playback => vec![Property::PlaybackStatus(self.player().status())],
            Update::Volume => vec![Property::Volume(self.player().sink.volume().into())],
            _ => return Ok(()),
        };

        self.inner.properties_changed(properties).await?;
        Ok(())
    }
}
