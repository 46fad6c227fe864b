//! The pieces the interface is drawn from.
//!
//! Everything here returns plain lines of an exact width, so that the
//! window can put borders around them.

use std::{sync::atomic::Ordering, time::Duration};

use crossterm::style::Stylize as _;
use unicode_segmentation::UnicodeSegmentation as _;

use crate::{
    api::{Playlist, Song},
    browser::{Mode, Overlay, View},
    player::Current,
    ui,
};

/// Formats a duration as `m:ss`.
pub fn format_time(duration: Duration) -> String {
    let seconds = duration.as_secs() % 60;
    let minutes = duration.as_secs() / 60;

    format!("{minutes}:{seconds:02}")
}

/// Formats a duration which may not be known, as `0:00` if it isn't.
pub fn format_length(duration: Option<Duration>) -> String {
    format_time(duration.unwrap_or_default())
}

/// The amount of graphemes in `text`.
pub fn width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Truncates `text` to at most `width` graphemes, with an ellipsis when cut.
pub fn fit(text: &str, width: usize) -> String {
    if self::width(text) <= width {
        return text.to_owned();
    }

    if width < 3 {
        return text.graphemes(true).take(width).collect();
    }

    let chopped: String = text.graphemes(true).take(width - 3).collect();
    format!("{chopped}...")
}

/// Truncates and then pads `text` so that it's exactly `width` wide.
pub fn pad(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let len = self::width(&fitted);

    format!("{fitted}{}", " ".repeat(width.saturating_sub(len)))
}

/// The seek bar, like ` [///   ] 1:02/3:05 `, exactly `width` wide.
pub fn progress_bar(state: &ui::State, width: usize) -> String {
    let (elapsed, duration) = match &state.current {
        Current::Track(info) => (state.sink.get_pos(), info.duration),
        _ => (Duration::ZERO, None),
    };

    let times = format!("{}/{}", format_time(elapsed), format_length(duration));
    let bar = width.saturating_sub(5 + times.len());
    let ratio = match duration {
        Some(duration) if !duration.is_zero() => {
            (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        }
        _ => 0.0,
    };

    format!(" [{}] {times} ", meter(ratio, bar))
}

/// `/`s filling `ratio` of `width`, padded with spaces.
fn meter(ratio: f32, width: usize) -> String {
    let filled = ((ratio * width as f32).round() as usize).min(width);
    format!("{}{}", "/".repeat(filled), " ".repeat(width - filled))
}

/// The volume bar which briefly replaces the seek bar, like ` volume: [///  ]  60% `.
pub fn audio_bar(width: usize, volume: f32, percentage: &str) -> String {
    format!(" volume: [{}] {percentage:>4} ", meter(volume, width))
}

/// The verb of the action line, and what it applies to.
fn status(state: &ui::State) -> (&'static str, Option<String>) {
    match &state.current {
        Current::Idle => ("nothing playing", None),
        Current::Loading(song, progress) => {
            let progress = progress.load(Ordering::Relaxed).min(99);
            ("loading", Some(format!("{progress:>2}% {}", song.display())))
        }
        Current::Track(_) if state.sink.volume() < 0.01 => {
            ("muted,", Some(String::from("+ to increase volume")))
        }
        Current::Track(info) if state.sink.is_paused() => ("paused", Some(info.display.clone())),
        Current::Track(info) => ("playing", Some(info.display.clone())),
    }
}

/// The top line, saying what's happening to which song.
///
/// Liked songs get a `*` before their name, which is bold. If it all
/// doesn't fit, the plain name is shown instead.
pub fn action(state: &ui::State, width: usize) -> String {
    let (verb, subject) = status(state);
    let Some(subject) = subject else {
        return pad(verb, width);
    };

    let star = if state.favorite() { "*" } else { "" };
    let len = self::width(verb) + 1 + star.len() + self::width(&subject);
    if len > width {
        let plain = match &state.current {
            Current::Track(info) => info.display.clone(),
            _ => format!("{verb} {subject}"),
        };

        return fit(&plain, width);
    }

    format!("{verb} {star}{}{}", subject.bold(), " ".repeat(width - len))
}

/// The key hints under the player, spread across `width`.
pub fn controls(width: usize) -> String {
    let all = [["[b]", "ack"], ["[p]", "ause"], ["[s]", "kip"], ["[q]", "uit"]];
    let controls: &[[&str; 2]] = if width >= 33 { &all } else { &all[1..] };

    let len: usize = controls.concat().iter().map(|x| x.len()).sum();
    let gaps = controls.len() - 1;
    let space = width.saturating_sub(len) / gaps;
    let trailing = width.saturating_sub(len + space * gaps);

    let formatted: Vec<String> = controls
        .iter()
        .map(|x| format!("{}{}", x[0].bold(), x[1]))
        .collect();

    let mut line = formatted.join(&" ".repeat(space));
    line.push_str(&" ".repeat(trailing));
    line
}

/// A single song row, like `> 3 title - artist ♥ 3:05`.
///
/// The row is exactly `width` wide, and the song's name is bold if it's
/// the one currently playing.
pub fn song_row(
    song: &Song,
    index: usize,
    focused: bool,
    current: bool,
    favorite: bool,
    width: usize,
) -> String {
    let marker = if focused { "> " } else { "  " };
    let heart = if favorite { " ♥" } else { "  " };
    let time = format_length(song.length());
    let number = (index + 1).to_string();
    let digits = number.len().max(2);

    let room = width.saturating_sub(2 + digits + 1 + 2 + 1 + time.len().max(4));
    let name = pad(&song.display(), room);
    let name = if current {
        name.bold().to_string()
    } else {
        name
    };

    format!("{marker}{number:>digits$} {name}{heart} {time:>4}")
}

/// A single playlist row, with the amount of songs on the right.
pub fn playlist_row(playlist: &Playlist, focused: bool, width: usize) -> String {
    let marker = if focused { "> " } else { "  " };
    let count = playlist.count();
    let room = width.saturating_sub(2 + 1 + count.len());

    format!("{marker}{} {count}", pad(&playlist.name, room))
}

/// A short reminder of the keys that do something right now.
pub fn hints(browser: &crate::browser::Browser, width: usize) -> String {
    let text = match (browser.mode(), browser.overlay(), browser.view()) {
        (Mode::Confirming, ..) => "[y]es [n]o",
        (Mode::Typing, Some(_), _) => "[enter] next [esc] cancel",
        (Mode::Typing, None, _) => "[enter] search [esc] done",
        (Mode::Normal, Some(Overlay::Picker { .. }), _) => "[enter] add [esc] cancel",
        (Mode::Normal, _, View::Home) => "[/] search [tab] views",
        (Mode::Normal, _, View::Search) => "[/] edit [f]avorite [a]dd",
        (Mode::Normal, _, View::Library) => "[c]reate [d]elete [f]avorite",
        (Mode::Normal, _, View::Playlist(_)) => "[A] play all [d] remove",
    };

    pad(text, width).dim().to_string()
}
