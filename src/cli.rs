//! The non-interactive commands, which print straight to standard output.

use std::io::Write;

use crate::{
    api::{self, Song},
    library::Collections,
    ui::components::format_length,
    Commands,
};

/// Prints one song per line, as `id  title - artist  m:ss`.
fn songs(out: &mut impl Write, songs: &[Song]) -> std::io::Result<()> {
    for song in songs {
        writeln!(
            out,
            "{}\t{}\t{}",
            song.id,
            song.display(),
            format_length(song.length())
        )?;
    }

    Ok(())
}

/// Runs `command` against the backend, writing the results to `out`.
pub async fn run(command: &Commands, client: &api::Client, mut out: impl Write) -> crate::Result<()> {
    match command {
        Commands::Songs { search } => {
            let list = client.songs(search.as_deref().unwrap_or_default()).await?;
            songs(&mut out, &list)?;
        }
        Commands::Playlists => {
            for playlist in client.playlists().await? {
                writeln!(out, "{}\t{}\t{}", playlist.id, playlist.name, playlist.count())?;
            }
        }
        Commands::Playlist { id } => {
            let playlist = client.playlist(id).await?;
            writeln!(out, "{} ({})", playlist.name, playlist.count())?;
            if !playlist.description.is_empty() {
                writeln!(out, "{}", playlist.description)?;
            }

            songs(&mut out, &client.playlist_songs(id).await?)?;
        }
        Commands::Favorites => {
            let collections = Collections {
                songs: client.songs("").await?,
                favorites: client.favorites().await?,
                playlists: Vec::new(),
            };

            songs(&mut out, &collections.favorite_songs())?;
        }
        Commands::Seed => {
            client.init_data().await?;
            writeln!(out, "seeded sample data")?;
        }
    }

    Ok(())
}
