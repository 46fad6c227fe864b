use crate::{browser::ViewKind, tracks};

/// Handles communication between different parts of the program.
///
/// Everything which changes state goes through the player as one of these,
/// whether it came from the keyboard, MPRIS, or a background task.
#[derive(PartialEq, Debug, Clone)]
pub enum Message {
    /// The audio of a song has been downloaded.
    Loaded(tracks::Fetched),

    /// The audio of the song with this id couldn't be downloaded.
    Failed(String),

    /// The sink ran dry, meaning the current track is over.
    Ended,

    /// Skips to the next song in the queue.
    Next,

    /// Restarts the current song, or goes back a song in the queue.
    Previous,

    /// Unpause the [Sink].
    #[allow(dead_code, reason = "this code may not be dead depending on features")]
    Play,

    /// Pauses the [Sink].
    Pause,

    /// Pauses the [Sink]. This will also unpause it if it is paused.
    PlayPause,

    /// Seeks relative to the current position, in seconds.
    SeekBy(f32),

    /// Seeks to an exact position, in seconds.
    #[allow(dead_code, reason = "this code may not be dead depending on features")]
    SeekTo(f32),

    /// Change the volume of playback.
    ChangeVolume(f32),

    /// Set the volume of playback, rather than changing it.
    #[allow(dead_code, reason = "this code may not be dead depending on features")]
    SetVolume(f32),

    /// Mutes, or restores the default volume.
    ToggleMute,

    /// Likes or unlikes the selected song, or the current song.
    Favorite,

    /// Moves the cursor up a row.
    Up,

    /// Moves the cursor down a row.
    Down,

    /// Activates whatever is under the cursor.
    Select,

    /// Closes the current overlay, or leaves the current view.
    Back,

    /// Switches to a top level view.
    Goto(ViewKind),

    /// Cycles through the top level views.
    Cycle,

    /// Starts editing the search query.
    Search,

    /// A character typed while editing text.
    Type(char),

    /// Erases the last typed character.
    Erase,

    /// Answers yes to a confirmation.
    Confirm,

    /// Opens the playlist picker for the selected song.
    AddToPlaylist,

    /// Starts creating a new playlist.
    CreatePlaylist,

    /// Deletes the selected playlist, or removes the selected song from a playlist.
    Delete,

    /// Plays the whole playlist being viewed.
    PlayAll,

    /// Reloads the data behind the current view.
    Refresh,

    /// Quits gracefully.
    Quit,
}
