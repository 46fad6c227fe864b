//! The state of the views, which decides what's on screen and what the
//! cursor is pointing at.
//!
//! The browser never talks to the backend itself. Instead, anything which
//! needs a request is handed back to the player as an [`Action`].

use crate::{
    api::{Playlist, Song},
    library::Collections,
};

/// The top level views, which can be jumped to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Search,
    Library,
}

impl ViewKind {
    /// The view which follows this one when cycling.
    pub const fn next(self) -> Self {
        match self {
            Self::Home => Self::Search,
            Self::Search => Self::Library,
            Self::Library => Self::Home,
        }
    }
}

/// The view that is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Search,
    Library,

    /// The detail view of the playlist with this id.
    Playlist(String),
}

impl View {
    /// The top level view this belongs to.
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Home => ViewKind::Home,
            Self::Search => ViewKind::Search,
            Self::Library | Self::Playlist(_) => ViewKind::Library,
        }
    }
}

impl From<ViewKind> for View {
    fn from(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Home => Self::Home,
            ViewKind::Search => Self::Search,
            ViewKind::Library => Self::Library,
        }
    }
}

/// Which list a song row came from, which decides the queue it plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// The home view, where every song is queued.
    Popular,
    Results,
    Liked,
    Playlist,
}

/// A single row of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A section title, which can't be selected.
    Heading(String),

    /// Some informational text, which can't be selected.
    Text(String),

    /// A song, along with its position in its section.
    Song {
        song: Song,
        index: usize,
        group: Group,
    },

    /// A playlist.
    Playlist(Playlist),
}

impl Entry {
    /// Whether the cursor can land on this entry.
    pub const fn selectable(&self) -> bool {
        matches!(self, Self::Song { .. } | Self::Playlist(_))
    }
}

/// Which field of the [`Prompt`] is being typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

/// The form for creating a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    pub field: Field,
}

/// Something drawn on top of the current view, which takes over input.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Creating a new playlist.
    Prompt(Prompt),

    /// Choosing a playlist to add `song` to.
    Picker { song: Song, cursor: usize },

    /// Waiting for confirmation to delete a playlist.
    Confirm(Playlist),
}

/// The search view's own state, which is kept when switching away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    /// The query being typed.
    pub query: String,

    /// The query which produced `results`, if a search was made.
    pub searched: Option<String>,

    pub results: Vec<Song>,

    /// Whether keys are currently going into the query.
    pub editing: bool,
}

/// The contents of the playlist detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opened {
    pub songs: Vec<Song>,
    pub loading: bool,
}

/// How keyboard input should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,

    /// Characters are text, rather than commands.
    Typing,

    /// Waiting on a yes or no.
    Confirming,
}

/// What the player has to do after the browser handled some input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,

    /// Play `song`, queueing up `queue`.
    Play { song: Song, queue: Vec<Song> },

    /// The playlist view was opened, and needs its songs.
    Open(String),

    /// The user submitted a search.
    Search(String),

    /// Create a new playlist.
    Create { name: String, description: String },

    /// Add a song to a playlist.
    Add { playlist: String, song: String },

    DeletePlaylist(String),

    /// Remove a song from a playlist.
    RemoveSong { playlist: String, song: String },

    /// Something to tell the user, without doing anything.
    Notice(String),
}

/// All of the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct Browser {
    /// The current view.
    view: View,

    /// The overlay, if there is one.
    overlay: Option<Overlay>,

    /// Index of the selected row, counting only selectable rows.
    cursor: usize,

    pub search: Search,

    /// The songs of the playlist being viewed.
    pub opened: Opened,
}

impl Default for Browser {
    fn default() -> Self {
        Self {
            view: View::Home,
            overlay: None,
            cursor: 0,
            search: Search::default(),
            opened: Opened::default(),
        }
    }
}

impl Browser {
    pub const fn view(&self) -> &View {
        &self.view
    }

    pub const fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// How input should currently be read.
    pub const fn mode(&self) -> Mode {
        match &self.overlay {
            Some(Overlay::Prompt(_)) => Mode::Typing,
            Some(Overlay::Confirm(_)) => Mode::Confirming,
            Some(Overlay::Picker { .. }) => Mode::Normal,
            None if self.search.editing && matches!(self.view, View::Search) => Mode::Typing,
            None => Mode::Normal,
        }
    }

    /// A short title for the current view.
    pub fn title(&self, collections: &Collections) -> String {
        match &self.view {
            View::Home => String::from("home"),
            View::Search => String::from("search"),
            View::Library => String::from("library"),
            View::Playlist(id) => collections
                .playlist(id)
                .map_or_else(|| String::from("playlist"), |x| x.name.clone()),
        }
    }

    /// Builds all of the rows of the current view.
    pub fn entries(&self, collections: &Collections) -> Vec<Entry> {
        /// Shorthand for turning a list of songs into entries.
        fn songs(list: &[Song], group: Group) -> impl Iterator<Item = Entry> + '_ {
            list.iter().enumerate().map(move |(index, song)| Entry::Song {
                song: song.clone(),
                index,
                group,
            })
        }

        let mut entries = Vec::new();
        match &self.view {
            View::Home => {
                entries.push(Entry::Heading(String::from("popular tracks")));
                if collections.songs.is_empty() {
                    entries.push(Entry::Text(String::from("no songs yet")));
                }
                entries.extend(songs(collections.popular(), Group::Popular));

                if !collections.playlists.is_empty() {
                    entries.push(Entry::Heading(String::from("your playlists")));
                    entries.extend(collections.playlists.iter().cloned().map(Entry::Playlist));
                }
            }
            View::Search => {
                let results = &self.search.results;
                if !results.is_empty() {
                    let plural = if results.len() == 1 { "" } else { "s" };
                    entries.push(Entry::Heading(format!(
                        "found {} result{plural}",
                        results.len()
                    )));
                    entries.extend(songs(results, Group::Results));
                } else if let Some(query) = self.search.searched.as_ref().filter(|x| !x.is_empty()) {
                    entries.push(Entry::Text(format!("no results found for \"{query}\"")));
                } else {
                    entries.push(Entry::Text(String::from(
                        "search for songs, artists, or albums",
                    )));
                }
            }
            View::Library => {
                let liked = collections.favorite_songs();
                entries.push(Entry::Heading(format!("liked songs ({})", liked.len())));
                if liked.is_empty() {
                    entries.push(Entry::Text(String::from("no liked songs yet")));
                }
                entries.extend(songs(&liked, Group::Liked));

                let playlists = &collections.playlists;
                entries.push(Entry::Heading(format!("playlists ({})", playlists.len())));
                if playlists.is_empty() {
                    entries.push(Entry::Text(String::from("no playlists yet")));
                }
                entries.extend(playlists.iter().cloned().map(Entry::Playlist));
            }
            View::Playlist(id) => {
                if self.opened.loading {
                    entries.push(Entry::Text(String::from("loading...")));
                } else if let Some(playlist) = collections.playlist(id) {
                    entries.push(Entry::Heading(format!(
                        "{} ({})",
                        playlist.name,
                        playlist.count()
                    )));
                    if !playlist.description.is_empty() {
                        entries.push(Entry::Text(playlist.description.clone()));
                    }
                    entries.extend(songs(&self.opened.songs, Group::Playlist));
                } else {
                    entries.push(Entry::Text(String::from("playlist not found")));
                }
            }
        }

        entries
    }

    /// The position within `entries` of the row under the cursor.
    pub fn focused(&self, entries: &[Entry]) -> Option<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, x)| x.selectable())
            .nth(self.cursor)
            .map(|(i, _)| i)
    }

    /// The entry under the cursor.
    pub fn selected(&self, collections: &Collections) -> Option<Entry> {
        let mut entries = self.entries(collections);
        let index = self.focused(&entries)?;

        Some(entries.swap_remove(index))
    }

    /// The song under the cursor, if it is on a song.
    pub fn selected_song(&self, collections: &Collections) -> Option<Song> {
        match self.selected(collections)? {
            Entry::Song { song, .. } => Some(song),
            _ => None,
        }
    }

    /// The songs which get queued when a song of `group` is played.
    fn queue(&self, group: Group, collections: &Collections) -> Vec<Song> {
        match group {
            Group::Popular => collections.songs.clone(),
            Group::Results => self.search.results.clone(),
            Group::Liked => collections.favorite_songs(),
            Group::Playlist => self.opened.songs.clone(),
        }
    }

    /// The amount of rows the cursor can be on.
    fn selectable(&self, collections: &Collections) -> usize {
        match &self.overlay {
            Some(Overlay::Picker { .. }) => collections.playlists.len(),
            _ => self
                .entries(collections)
                .iter()
                .filter(|x| x.selectable())
                .count(),
        }
    }

    pub fn up(&mut self) {
        match &mut self.overlay {
            Some(Overlay::Picker { cursor, .. }) => *cursor = cursor.saturating_sub(1),
            Some(_) => (),
            None => self.cursor = self.cursor.saturating_sub(1),
        }
    }

    pub fn down(&mut self, collections: &Collections) {
        let max = self.selectable(collections).saturating_sub(1);
        match &mut self.overlay {
            Some(Overlay::Picker { cursor, .. }) => *cursor = (*cursor + 1).min(max),
            Some(_) => (),
            None => self.cursor = (self.cursor + 1).min(max),
        }
    }

    /// Keeps the cursor in bounds after the data behind the view changed.
    pub fn clamp(&mut self, collections: &Collections) {
        let max = self.selectable(collections).saturating_sub(1);
        match &mut self.overlay {
            Some(Overlay::Picker { cursor, .. }) => *cursor = (*cursor).min(max),
            _ => self.cursor = self.cursor.min(max),
        }
    }

    /// Switches to another view, closing any overlay.
    pub fn goto(&mut self, view: View) {
        self.overlay = None;
        self.cursor = 0;
        self.search.editing = matches!(view, View::Search);
        if let View::Playlist(_) = view {
            self.opened = Opened {
                songs: Vec::new(),
                loading: true,
            };
        }

        self.view = view;
    }

    pub fn cycle(&mut self) {
        self.goto(self.view.kind().next().into());
    }

    /// Jumps to the search view, ready for typing.
    pub fn focus_search(&mut self) {
        if self.view != View::Search {
            self.goto(View::Search);
        }

        self.overlay = None;
        self.search.editing = true;
    }

    /// Activates whatever is under the cursor.
    pub fn select(&mut self, collections: &Collections) -> Action {
        match self.overlay.take() {
            Some(Overlay::Prompt(mut prompt)) => match prompt.field {
                Field::Name if prompt.name.trim().is_empty() => {
                    self.overlay = Some(Overlay::Prompt(prompt));
                    Action::None
                }
                Field::Name => {
                    prompt.field = Field::Description;
                    self.overlay = Some(Overlay::Prompt(prompt));
                    Action::None
                }
                Field::Description => Action::Create {
                    name: prompt.name,
                    description: prompt.description,
                },
            },
            Some(Overlay::Picker { song, cursor }) => collections
                .playlists
                .get(cursor)
                .map_or(Action::None, |playlist| Action::Add {
                    playlist: playlist.id.clone(),
                    song: song.id,
                }),
            Some(Overlay::Confirm(playlist)) => Action::DeletePlaylist(playlist.id),
            None if self.mode() == Mode::Typing => {
                self.search.editing = false;
                Action::Search(self.search.query.clone())
            }
            None => match self.selected(collections) {
                Some(Entry::Song { song, group, .. }) => Action::Play {
                    queue: self.queue(group, collections),
                    song,
                },
                Some(Entry::Playlist(playlist)) => {
                    self.goto(View::Playlist(playlist.id.clone()));
                    Action::Open(playlist.id)
                }
                _ => Action::None,
            },
        }
    }

    /// Backs out of whatever is going on.
    pub fn back(&mut self) {
        if self.overlay.take().is_some() {
            return;
        }

        if self.search.editing && self.view == View::Search {
            self.search.editing = false;
        } else if let View::Playlist(_) = self.view {
            self.goto(View::Library);
        }
    }

    /// Types a character into whichever text is being edited.
    pub fn type_char(&mut self, character: char) {
        let typing = self.mode() == Mode::Typing;
        match &mut self.overlay {
            Some(Overlay::Prompt(prompt)) => match prompt.field {
                Field::Name => prompt.name.push(character),
                Field::Description => prompt.description.push(character),
            },
            Some(_) => (),
            None if typing => self.search.query.push(character),
            None => (),
        }
    }

    pub fn erase(&mut self) {
        let typing = self.mode() == Mode::Typing;
        match &mut self.overlay {
            Some(Overlay::Prompt(prompt)) => match prompt.field {
                Field::Name => {
                    prompt.name.pop();
                }
                Field::Description => {
                    if prompt.description.pop().is_none() {
                        prompt.field = Field::Name;
                    }
                }
            },
            Some(_) => (),
            None if typing => {
                self.search.query.pop();
            }
            None => (),
        }
    }

    /// Answers a confirmation with yes.
    pub fn confirm(&mut self) -> Action {
        match self.overlay.take() {
            Some(Overlay::Confirm(playlist)) => Action::DeletePlaylist(playlist.id),
            other => {
                self.overlay = other;
                Action::None
            }
        }
    }

    /// Opens the playlist picker for the song under the cursor.
    pub fn add_to_playlist(&mut self, collections: &Collections) -> Action {
        if self.overlay.is_some() {
            return Action::None;
        }

        let Some(song) = self.selected_song(collections) else {
            return Action::None;
        };

        if collections.playlists.is_empty() {
            return Action::Notice(String::from("create a playlist first"));
        }

        self.overlay = Some(Overlay::Picker { song, cursor: 0 });
        Action::None
    }

    /// Opens the playlist creation prompt, which is only available from the library.
    pub fn create_playlist(&mut self) {
        if self.overlay.is_none() && self.view == View::Library {
            self.overlay = Some(Overlay::Prompt(Prompt {
                name: String::new(),
                description: String::new(),
                field: Field::Name,
            }));
        }
    }

    /// Deletes what's under the cursor, where that makes sense.
    ///
    /// Playlists have to be confirmed first, while songs are simply
    /// taken out of the playlist being viewed.
    pub fn delete(&mut self, collections: &Collections) -> Action {
        if self.overlay.is_some() {
            return Action::None;
        }

        match (&self.view, self.selected(collections)) {
            (View::Library, Some(Entry::Playlist(playlist))) => {
                self.overlay = Some(Overlay::Confirm(playlist));
                Action::None
            }
            (View::Playlist(id), Some(Entry::Song { song, .. })) => Action::RemoveSong {
                playlist: id.clone(),
                song: song.id,
            },
            _ => Action::None,
        }
    }

    /// Plays the playlist being viewed from the start.
    pub fn play_all(&self) -> Action {
        match (&self.view, self.opened.songs.first()) {
            (View::Playlist(_), Some(first)) => Action::Play {
                song: first.clone(),
                queue: self.opened.songs.clone(),
            },
            _ => Action::None,
        }
    }

    /// Stores the results of a search.
    pub fn set_results(&mut self, query: String, results: Vec<Song>) {
        self.search.results = results;
        self.search.searched = Some(query);
        self.cursor = 0;
    }

    /// Stores the songs of the opened playlist.
    pub fn set_opened(&mut self, songs: Vec<Song>) {
        self.opened = Opened {
            songs,
            loading: false,
        };
    }
}
