//! The play queue, which is just a list of songs and a cursor into it.

use crate::api::Song;

/// The songs which follow (and precede) the current one.
///
/// The queue is replaced wholesale whenever a song is played from a
/// different list, and `index` always points into `songs` when it isn't empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Queue {
    /// The songs, in play order.
    songs: Vec<Song>,

    /// The position of the current song.
    index: usize,
}

impl Queue {
    /// Replaces the queue with `songs`, pointing at the song with the `current` id.
    ///
    /// If `current` isn't present the queue starts at the beginning.
    /// An empty `songs` keeps the queue exactly as it was.
    pub fn replace(&mut self, songs: Vec<Song>, current: &str) {
        if songs.is_empty() {
            return;
        }

        self.index = songs.iter().position(|x| x.id == current).unwrap_or(0);
        self.songs = songs;
    }

    /// Moves on to the following song, if there is one.
    pub fn next(&mut self) -> Option<&Song> {
        if self.index + 1 >= self.songs.len() {
            return None;
        }

        self.index += 1;
        self.songs.get(self.index)
    }

    /// Moves back to the preceding song, if there is one.
    pub fn previous(&mut self) -> Option<&Song> {
        if self.index == 0 || self.songs.is_empty() {
            return None;
        }

        self.index -= 1;
        self.songs.get(self.index)
    }

    pub fn current(&self) -> Option<&Song> {
        self.songs.get(self.index)
    }

    pub const fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Whether [`Queue::next`] would go anywhere.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.songs.len()
    }

    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }
}
