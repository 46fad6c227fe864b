//! Responsible for specifically recieving terminal input
//! using [`crossterm`].

use std::sync::atomic::{AtomicU8, Ordering};

use crossterm::event::{self, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt as _;
use tokio::sync::mpsc::Sender;

use crate::{browser::Mode, browser::ViewKind, Message};

/// The current [`Mode`], as set by the player.
static MODE: AtomicU8 = AtomicU8::new(0);

/// Tells the listener how keys should be interpreted from now on.
pub fn mode(mode: Mode) {
    MODE.store(mode as u8, Ordering::Relaxed);
}

/// Reads back the [`Mode`] that was last set.
fn current() -> Mode {
    match MODE.load(Ordering::Relaxed) {
        1 => Mode::Typing,
        2 => Mode::Confirming,
        _ => Mode::Normal,
    }
}

/// Keys which work the same regardless of mode.
fn common(event: KeyEvent) -> Option<Message> {
    let message = match event.code {
        KeyCode::Char('c') if event.modifiers == KeyModifiers::CONTROL => Message::Quit,
        KeyCode::Up => Message::Up,
        KeyCode::Down => Message::Down,
        KeyCode::Enter => Message::Select,
        KeyCode::Esc => Message::Back,

        // Media keys
        KeyCode::Media(media) => match media {
            event::MediaKeyCode::Pause
            | event::MediaKeyCode::Play
            | event::MediaKeyCode::PlayPause => Message::PlayPause,
            event::MediaKeyCode::Stop => Message::Pause,
            event::MediaKeyCode::TrackNext => Message::Next,
            event::MediaKeyCode::TrackPrevious => Message::Previous,
            event::MediaKeyCode::LowerVolume => Message::ChangeVolume(-0.1),
            event::MediaKeyCode::RaiseVolume => Message::ChangeVolume(0.1),
            event::MediaKeyCode::MuteVolume => Message::ToggleMute,
            _ => return None,
        },
        _ => return None,
    };

    Some(message)
}

/// Keys while text is being typed.
fn typing(event: KeyEvent) -> Option<Message> {
    match event.code {
        KeyCode::Backspace => Some(Message::Erase),
        KeyCode::Char(character) => Some(Message::Type(character)),
        _ => None,
    }
}

/// Keys while waiting for a yes or no.
fn confirming(event: KeyEvent) -> Option<Message> {
    match event.code {
        KeyCode::Char('y' | 'Y') => Some(Message::Confirm),
        KeyCode::Char('n' | 'N' | 'q') => Some(Message::Back),
        _ => None,
    }
}

/// Keys the rest of the time.
fn normal(event: KeyEvent) -> Option<Message> {
    let message = match event.code {
        KeyCode::Backspace => Message::Back,
        KeyCode::Tab => Message::Cycle,

        // Seeking
        KeyCode::Left => Message::SeekBy(-5.0),
        KeyCode::Right => Message::SeekBy(5.0),

        KeyCode::Char(character) => match character {
            // Quit
            'q' => Message::Quit,

            // Cursor
            'k' => Message::Up,
            'j' => Message::Down,

            // Skip/Next & Previous
            's' | 'n' | 'l' => Message::Next,
            'b' | 'h' => Message::Previous,

            // Pause
            'p' | ' ' => Message::PlayPause,

            // Volume up & down
            '+' | '=' => Message::ChangeVolume(0.1),
            '-' | '_' => Message::ChangeVolume(-0.1),
            'm' => Message::ToggleMute,

            // Views
            '1' => Message::Goto(ViewKind::Home),
            '2' => Message::Goto(ViewKind::Search),
            '3' => Message::Goto(ViewKind::Library),
            '/' => Message::Search,

            // Collections
            'f' => Message::Favorite,
            'a' => Message::AddToPlaylist,
            'A' => Message::PlayAll,
            'c' => Message::CreatePlaylist,
            'd' | 'x' => Message::Delete,
            'r' => Message::Refresh,

            _ => return None,
        },
        _ => return None,
    };

    Some(message)
}

/// Maps a single key press to a message, according to `mode`.
pub fn map(event: KeyEvent, mode: Mode) -> Option<Message> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    common(event).or_else(|| match mode {
        Mode::Normal => normal(event),
        Mode::Typing => typing(event),
        Mode::Confirming => confirming(event),
    })
}

/// Starts the listener to recieve input from the terminal for various events.
pub async fn listen(sender: Sender<Message>) -> crate::Result<()> {
    let mut reader = EventStream::new();

    loop {
        let event = match reader.next().await {
            Some(Ok(event::Event::Key(event))) => event,
            Some(_) => continue,
            None => break Ok(()),
        };

        let Some(message) = map(event, current()) else {
            continue;
        };

        sender.send(message).await?;
    }
}
