//! The player, which owns every piece of mutable state and reacts to
//! each [`Message`] in turn.
//!
//! Nothing else ever touches the sink's queue, the library or the
//! browser. Other tasks only send messages, and the frontends only
//! receive copies of the state through [`Update`]s.

use std::{sync::Arc, time::Duration};

use rodio::{OutputStream, Sink};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

use crate::{
    api::{self, Song},
    audio::{self, waiter},
    browser::{Action, Browser, View},
    download::{self, Downloader, Progress},
    library::{Collections, Library},
    tracks::{self, Fetched},
    ui::{self, input, Update},
    volume::PersistentVolume,
    Args, Message,
};

pub mod queue;
pub use queue::Queue;

/// The volume to go back to when unmuting.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Going back a song within this much of the start goes to the previous song,
/// rather than restarting the current one.
pub const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// What the player is doing with the current song.
#[derive(Debug, Clone, Default)]
pub enum Current {
    /// Nothing has been played yet, or the last song couldn't be.
    #[default]
    Idle,

    /// The audio of the song is being downloaded.
    Loading(Song, Progress),

    /// The song is in the sink, whether it's playing, paused or over.
    Track(tracks::Info),
}

impl Current {
    /// The song being loaded or played, if any.
    pub const fn song(&self) -> Option<&Song> {
        match self {
            Self::Idle => None,
            Self::Loading(song, _) => Some(song),
            Self::Track(info) => Some(&info.song),
        }
    }

    /// Whether the song with `id` is the one being downloaded.
    pub fn loading(&self, id: &str) -> bool {
        matches!(self, Self::Loading(song, _) if song.id == id)
    }

    /// Whether an [`Message::Ended`] should move on to the next song.
    ///
    /// The waiter can report an end that's already been handled, or one
    /// from before a new track was appended, so the sink has to agree.
    pub const fn finished(&self, sink_empty: bool, ended: bool) -> bool {
        matches!(self, Self::Track(_)) && sink_empty && !ended
    }
}

/// What going back a song should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewind {
    /// Play the current track again from the top.
    Restart,

    /// Go to the previous song in the queue.
    Previous,
}

/// Decides what going back does, given how far into the track the sink is.
///
/// A track which has played out counts as being at its very end.
pub fn rewind(current: &Current, ended: bool, position: Duration) -> Rewind {
    let Current::Track(info) = current else {
        return Rewind::Previous;
    };

    let position = if ended {
        info.duration.unwrap_or(position)
    } else {
        position
    };

    if position > RESTART_THRESHOLD {
        Rewind::Restart
    } else {
        Rewind::Previous
    }
}

/// Clamps a seek target in seconds to the track.
pub fn clamp_position(position: f32, duration: Option<Duration>) -> Duration {
    let mut position = if position.is_finite() { position.max(0.0) } else { 0.0 };
    if let Some(duration) = duration {
        position = position.min(duration.as_secs_f32());
    }

    Duration::from_secs_f32(position)
}

/// Clamps a volume to the range the sink accepts, or [`None`] if it isn't a number.
pub fn clamp_volume(volume: f32) -> Option<f32> {
    volume.is_finite().then(|| volume.clamp(0.0, 1.0))
}

/// The volume after toggling mute.
pub fn mute_toggle(volume: f32) -> f32 {
    if volume > 0.0 {
        0.0
    } else {
        DEFAULT_VOLUME
    }
}

/// The player, and all of its state.
pub struct Player {
    /// [rodio]'s [`Sink`] which can control playback.
    sink: Arc<Sink>,

    current: Current,

    /// Whether the current track has played to the end.
    ended: bool,

    /// The audio of the current track, kept so it can be restarted.
    loaded: Option<Fetched>,

    queue: Queue,

    library: Library,

    browser: Browser,

    /// The handle to the background downloader.
    downloader: download::Handle,

    /// Watches the sink for the end of a track.
    waiter: waiter::Handle,

    /// The handle to the frontends.
    ui: ui::Handle,

    /// Where every [`Message`] arrives.
    rx: Receiver<Message>,

    /// The [`OutputStream`], which is just here to keep the playback
    /// alive and functioning. It has to be dropped after the sink.
    _stream: OutputStream,
}

impl Player {
    /// Initializes the entire player, including audio devices, the
    /// library & the frontends.
    pub async fn init(
        args: Args,
        tasks: &mut crate::Tasks,
        rx: Receiver<Message>,
    ) -> crate::Result<Self> {
        let stream = audio::stream(args.debug)?;
        let sink = Arc::new(Sink::connect_new(stream.mixer()));
        sink.set_volume(PersistentVolume::load().await?.float());

        let client = api::Client::new(&args.backend, Duration::from_secs(args.timeout))?;
        let mut library = Library::new(client);
        if !args.no_seed {
            library.init_data().await;
        }
        library.load_all().await;
        info!(
            songs = library.collections().songs.len(),
            playlists = library.collections().playlists.len(),
            "library loaded"
        );

        let browser = Browser::default();
        let state = ui::State::initial(
            Arc::clone(&sink),
            library.collections().clone(),
            browser.clone(),
        );

        let downloader = Downloader::init(args.timeout, tasks.tx())?;
        let params = ui::interface::Params::try_from(&args)?;
        let ui = tasks.ui(state, params, args.alternate).await?;

        Ok(Self {
            downloader,
            waiter: waiter::Handle::new(Arc::clone(&sink), tasks.tx()),
            current: Current::default(),
            ended: false,
            loaded: None,
            queue: Queue::default(),
            library,
            browser,
            ui,
            rx,
            sink,
            _stream: stream,
        })
    }

    /// The terminal environment, which has to be restored once the player is done.
    pub const fn environment(&self) -> Option<ui::Environment> {
        self.ui.environment
    }

    /// Handles messages until told to quit, then saves the volume.
    pub async fn run(mut self) -> crate::Result<()> {
        while let Some(message) = self.rx.recv().await {
            if message == Message::Quit {
                break;
            }

            let collections = self.library.collections().clone();
            let browser = self.browser.clone();

            self.handle(message).await?;
            self.sync(&collections, &browser).await?;
        }

        info!("quitting");
        PersistentVolume::save(self.sink.volume()).await?;
        self.sink.stop();
        self.ui.update(Update::Quit).await?;

        Ok(())
    }

    /// Sends whatever changed since `collections` and `browser` were
    /// taken to the frontends.
    async fn sync(&mut self, collections: &Collections, browser: &Browser) -> crate::Result<()> {
        let changed = self.library.collections() != collections;
        if changed {
            self.ui
                .update(Update::Library(self.library.collections().clone()))
                .await?;
        }

        self.browser.clamp(self.library.collections());
        if changed || self.browser != *browser {
            self.ui
                .update(Update::Browser(Box::new(self.browser.clone())))
                .await?;
        }

        input::mode(self.browser.mode());
        Ok(())
    }

    /// Shows a short message to the user.
    async fn notice(&mut self, notice: impl Into<String>) -> crate::Result<()> {
        self.ui.update(Update::Notice(notice.into())).await?;
        Ok(())
    }

    /// Sets `current`, and lets everyone know about it.
    async fn set_current(&mut self, current: Current) -> crate::Result<()> {
        self.current = current;
        self.ui.update(Update::Track(self.current.clone())).await?;

        Ok(())
    }

    async fn handle(&mut self, message: Message) -> crate::Result<()> {
        match message {
            Message::Loaded(fetched) => {
                if self.current.loading(&fetched.song.id) {
                    self.start(fetched).await?;
                } else {
                    debug!(song = %fetched.song.id, "dropping stale download");
                }
            }
            Message::Failed(id) => {
                if let Some(song) = self.current.song().filter(|_| self.current.loading(&id)) {
                    let notice = format!("couldn't load {}", song.title);
                    self.set_current(Current::Idle).await?;
                    self.notice(notice).await?;
                }
            }
            Message::Ended => {
                if self.current.finished(self.sink.empty(), self.ended) {
                    debug!("track ended");
                    self.ended = true;
                    self.ui.update(Update::Playback).await?;
                    self.next().await?;
                }
            }
            Message::Next => self.next().await?,
            Message::Previous => self.previous().await?,
            Message::Play => {
                if self.ended {
                    self.restart().await?;
                } else if self.sink.is_paused() {
                    self.sink.play();
                    self.ui.update(Update::Playback).await?;
                }
            }
            Message::Pause => {
                self.sink.pause();
                self.ui.update(Update::Playback).await?;
            }
            Message::PlayPause => self.toggle_play_pause().await?,
            Message::SeekBy(delta) => {
                let position = self.sink.get_pos().as_secs_f32() + delta;
                self.seek_to(position).await?;
            }
            Message::SeekTo(position) => self.seek_to(position).await?,
            Message::ChangeVolume(delta) => self.set_volume(self.sink.volume() + delta).await?,
            Message::SetVolume(volume) => self.set_volume(volume).await?,
            Message::ToggleMute => self.set_volume(mute_toggle(self.sink.volume())).await?,
            Message::Favorite => self.favorite().await?,
            Message::Up => self.browser.up(),
            Message::Down => self.browser.down(self.library.collections()),
            Message::Select => {
                let action = self.browser.select(self.library.collections());
                self.act(action).await?;
            }
            Message::Back => self.browser.back(),
            Message::Goto(kind) => {
                self.browser.goto(View::from(kind));
                self.refresh().await;
            }
            Message::Cycle => {
                self.browser.cycle();
                self.refresh().await;
            }
            Message::Search => self.browser.focus_search(),
            Message::Type(character) => self.browser.type_char(character),
            Message::Erase => self.browser.erase(),
            Message::Confirm => {
                let action = self.browser.confirm();
                self.act(action).await?;
            }
            Message::AddToPlaylist => {
                let action = self.browser.add_to_playlist(self.library.collections());
                self.act(action).await?;
            }
            Message::CreatePlaylist => self.browser.create_playlist(),
            Message::Delete => {
                let action = self.browser.delete(self.library.collections());
                self.act(action).await?;
            }
            Message::PlayAll => {
                let action = self.browser.play_all();
                self.act(action).await?;
            }
            Message::Refresh => self.refresh().await,
            Message::Quit => (),
        }

        Ok(())
    }

    /// Carries out whatever the browser asked for.
    async fn act(&mut self, action: Action) -> crate::Result<()> {
        match action {
            Action::None => (),
            Action::Play { song, queue } => self.play_song(song, queue).await?,
            Action::Open(id) => {
                // Show the loading text while the songs come in.
                self.ui
                    .update(Update::Browser(Box::new(self.browser.clone())))
                    .await?;
                self.open(&id).await;
            }
            Action::Search(query) => {
                let results = self.library.search(&query).await;
                debug!(%query, count = results.len(), "searched");
                self.browser.set_results(query, results);
            }
            Action::Create { name, description } => {
                match self.library.create_playlist(&name, &description).await {
                    Ok(playlist) => self.notice(format!("created {}", playlist.name)).await?,
                    Err(error) => {
                        warn!(%error, "unable to create playlist");
                        self.notice(format!("couldn't create playlist: {error}"))
                            .await?;
                    }
                }
            }
            Action::Add { playlist, song } => {
                match self.library.add_song_to_playlist(&playlist, &song).await {
                    Ok(()) => {
                        let name = self
                            .library
                            .collections()
                            .playlist(&playlist)
                            .map_or_else(|| String::from("playlist"), |x| x.name.clone());
                        self.notice(format!("added to {name}")).await?;
                    }
                    Err(error) => {
                        warn!(%error, "unable to add song to playlist");
                        self.notice("couldn't add song to playlist").await?;
                    }
                }
            }
            Action::DeletePlaylist(id) => {
                self.library.delete_playlist(&id).await;
                self.notice("playlist deleted").await?;
            }
            Action::RemoveSong { playlist, song } => {
                self.library.remove_song_from_playlist(&playlist, &song).await;
                self.open(&playlist).await;
            }
            Action::Notice(notice) => self.notice(notice).await?,
        }

        Ok(())
    }

    /// Loads the songs of a playlist into the browser.
    async fn open(&mut self, playlist: &str) {
        self.library.load_playlists().await;
        let songs = self.library.playlist_songs(playlist).await;
        self.browser.set_opened(songs);
    }

    /// Reloads whatever the current view shows.
    async fn refresh(&mut self) {
        match self.browser.view().clone() {
            View::Home => {
                self.library.load_songs("").await;
                self.library.load_playlists().await;
            }
            View::Search => {
                if let Some(query) = self.browser.search.searched.clone() {
                    let results = self.library.search(&query).await;
                    self.browser.set_results(query, results);
                }
            }
            View::Library => self.library.load_all().await,
            View::Playlist(id) => self.open(&id).await,
        }
    }

    /// Plays `song`, with `queue` as what comes before and after it.
    pub async fn play_song(&mut self, song: Song, queue: Vec<Song>) -> crate::Result<()> {
        self.queue.replace(queue, &song.id);
        self.load(song).await
    }

    /// Stops whatever is playing, and starts downloading `song`.
    async fn load(&mut self, song: Song) -> crate::Result<()> {
        info!(song = %song.id, title = %song.title, "loading");
        self.sink.stop();
        self.loaded = None;
        self.ended = false;

        self.set_current(Current::Loading(song.clone(), download::Handle::progress()))
            .await?;
        self.downloader.request(song).await
    }

    /// Decodes and plays downloaded audio.
    async fn start(&mut self, fetched: Fetched) -> crate::Result<()> {
        let decoded = match fetched.decode() {
            Ok(decoded) => decoded,
            Err(error) => {
                warn!(%error, "unable to decode track");
                self.set_current(Current::Idle).await?;
                return self
                    .notice(format!("couldn't play {}", fetched.song.title))
                    .await;
            }
        };

        self.sink.stop();
        self.sink.append(decoded.data);
        self.sink.play();
        self.waiter.notify();

        self.ended = false;
        self.loaded = Some(fetched);
        self.set_current(Current::Track(decoded.info)).await
    }

    /// Plays the current track again from the top, without downloading it.
    async fn restart(&mut self) -> crate::Result<()> {
        if let Some(fetched) = self.loaded.clone() {
            self.start(fetched).await?;
        }

        Ok(())
    }

    async fn toggle_play_pause(&mut self) -> crate::Result<()> {
        if !matches!(self.current, Current::Track(_)) {
            return Ok(());
        }

        if self.ended || self.sink.empty() {
            return self.restart().await;
        }

        if self.sink.is_paused() {
            self.sink.play();
        } else {
            self.sink.pause();
        }

        self.ui.update(Update::Playback).await?;
        Ok(())
    }

    /// Plays the next song in the queue, if there is one.
    async fn next(&mut self) -> crate::Result<()> {
        match self.queue.next().cloned() {
            Some(song) => self.load(song).await,
            None => Ok(()),
        }
    }

    /// Restarts the current track if it's been playing for a while,
    /// otherwise goes back a song.
    ///
    /// A track which has played out is restarted paused, the same as
    /// seeking back to the start of it would leave it.
    async fn previous(&mut self) -> crate::Result<()> {
        match rewind(&self.current, self.ended, self.sink.get_pos()) {
            Rewind::Restart if self.ended => {
                self.restart().await?;
                self.sink.pause();
                self.ui.update(Update::Playback).await?;
                Ok(())
            }
            Rewind::Restart => self.seek_to(0.0).await,
            Rewind::Previous => match self.queue.previous().cloned() {
                Some(song) => self.load(song).await,
                None => Ok(()),
            },
        }
    }

    /// Seeks to `position` seconds, clamped to the length of the track.
    async fn seek_to(&mut self, position: f32) -> crate::Result<()> {
        let Current::Track(info) = &self.current else {
            return Ok(());
        };

        if self.ended {
            return Ok(());
        }

        if let Err(error) = self.sink.try_seek(clamp_position(position, info.duration)) {
            warn!(%error, "unable to seek");
        }

        self.ui.update(Update::Playback).await?;
        Ok(())
    }

    /// Sets the volume, ignoring anything that isn't a number.
    async fn set_volume(&mut self, volume: f32) -> crate::Result<()> {
        let Some(volume) = clamp_volume(volume) else {
            debug!(volume, "ignoring volume");
            return Ok(());
        };

        self.sink.set_volume(volume);
        self.ui.update(Update::Volume).await?;

        Ok(())
    }

    /// Likes or unlikes the song under the cursor, or else the current song.
    async fn favorite(&mut self) -> crate::Result<()> {
        let song = if self.browser.overlay().is_none() {
            self.browser.selected_song(self.library.collections())
        } else {
            None
        };

        let Some(song) = song.or_else(|| self.current.song().cloned()) else {
            return Ok(());
        };

        match self.library.toggle_favorite(&song.id).await {
            Ok(true) => self.notice(format!("liked {}", song.title)).await,
            Ok(false) => self.notice(format!("unliked {}", song.title)).await,
            Err(error) => {
                warn!(%error, song = %song.id, "unable to change favorite");
                self.notice("couldn't update favorites").await
            }
        }
    }
}
