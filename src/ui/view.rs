//! Turns the [`Browser`] into the rows above the player bar.

use crossterm::style::Stylize as _;

use crate::{
    browser::{Browser, Entry, Field, Overlay, View},
    ui::{
        components::{self, pad},
        State,
    },
};

/// The first row to show so that `focused` stays on screen.
fn start(focused: usize, rows: usize) -> usize {
    (focused + 1).saturating_sub(rows)
}

/// Renders a single entry.
fn entry(state: &State, entry: &Entry, focused: bool, width: usize) -> String {
    match entry {
        Entry::Heading(text) => pad(text, width).bold().to_string(),
        Entry::Text(text) => pad(text, width).dim().to_string(),
        Entry::Song { song, index, .. } => components::song_row(
            song,
            *index,
            focused,
            state.current.song().is_some_and(|x| x.id == song.id),
            state.collections.is_favorite(&song.id),
            width,
        ),
        Entry::Playlist(playlist) => components::playlist_row(playlist, focused, width),
    }
}

/// The list of entries, scrolled so the cursor is always visible.
fn list(state: &State, rows: usize, width: usize) -> Vec<String> {
    let entries = state.browser.entries(&state.collections);
    let focused = state.browser.focused(&entries);
    let start = start(focused.unwrap_or(0), rows);

    entries
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(i, x)| entry(state, x, Some(i) == focused, width))
        .collect()
}

/// The search box at the top of the search view.
fn query(browser: &Browser, width: usize) -> String {
    let cursor = if browser.search.editing { "_" } else { "" };
    let text = format!("search: {}{cursor}", browser.search.query);

    pad(&text, width)
}

/// Renders whatever overlay is open, which replaces the list entirely.
fn overlay(state: &State, overlay: &Overlay, rows: usize, width: usize) -> Vec<String> {
    match overlay {
        Overlay::Prompt(prompt) => {
            let (name, description) = match prompt.field {
                Field::Name => ("_", ""),
                Field::Description => ("", "_"),
            };

            vec![
                pad("new playlist", width).bold().to_string(),
                pad(&format!("name: {}{name}", prompt.name), width),
                pad(&format!("description: {}{description}", prompt.description), width),
            ]
        }
        Overlay::Picker { song, cursor } => {
            let heading = format!("add {} to", song.title);
            let mut lines = vec![pad(&heading, width).bold().to_string()];
            let rows = rows.saturating_sub(1);

            lines.extend(
                state
                    .collections
                    .playlists
                    .iter()
                    .enumerate()
                    .skip(start(*cursor, rows))
                    .take(rows)
                    .map(|(i, x)| components::playlist_row(x, i == *cursor, width)),
            );

            lines
        }
        Overlay::Confirm(playlist) => {
            vec![pad(&format!("delete \"{}\"?", playlist.name), width)]
        }
    }
}

/// Renders the current view, which is always exactly `rows + 1` lines
/// including the hints at the bottom.
pub fn render(state: &State, rows: usize, width: usize) -> Vec<String> {
    let browser = &state.browser;
    let mut lines = Vec::with_capacity(rows + 1);

    if let Some(x) = browser.overlay() {
        lines.extend(overlay(state, x, rows, width));
    } else if *browser.view() == View::Search {
        lines.push(query(browser, width));
        lines.extend(list(state, rows.saturating_sub(1), width));
    } else {
        lines.extend(list(state, rows, width));
    }

    lines.truncate(rows);
    lines.resize(rows, " ".repeat(width));
    lines.push(components::hints(browser, width));

    lines
}
