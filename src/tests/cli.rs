#[cfg(test)]
mod cli {
    use crate::{
        cli,
        tests::support::{self, client, json, serve},
        Commands,
    };

    fn routes(method: &str, path: &str) -> (u16, String) {
        let collections = support::collections();

        match (method, path) {
            ("GET", "/api/songs") => (200, json(&collections.songs[..2])),
            ("GET", x) if x.starts_with("/api/songs?") => (200, json(&collections.songs[4..5])),
            ("GET", "/api/songs/s1") => (200, json(&support::song("s1"))),
            ("GET", "/api/songs/s2") => (200, json(&support::song("s2"))),
            ("GET", "/api/playlists") => (200, json(&collections.playlists)),
            ("GET", "/api/playlists/p1") => (200, json(&collections.playlists[0])),
            ("GET", "/api/favorites") => {
                (200, json(&[support::favorite("s2"), support::favorite("s99")]))
            }
            ("POST", "/api/init-data") => (200, String::from("{}")),
            _ => (404, String::from("{}")),
        }
    }

    async fn output(command: Commands) -> String {
        let (address, _) = serve(routes).await;
        let mut out = Vec::new();
        cli::run(&command, &client(&address), &mut out).await.unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn songs_are_listed() {
        let out = output(Commands::Songs { search: None }).await;
        assert_eq!(
            out,
            "s1\ttitle s1 - artist s1\t3:05\ns2\ttitle s2 - artist s2\t3:05\n"
        );

        let out = output(Commands::Songs {
            search: Some(String::from("five")),
        })
        .await;
        assert!(out.starts_with("s5\t"));
    }

    #[tokio::test]
    async fn playlists_are_listed() {
        let out = output(Commands::Playlists).await;
        assert_eq!(out, "p1\tplaylist p1\t2 songs\n");
    }

    #[tokio::test]
    async fn playlist_lists_its_songs() {
        let out = output(Commands::Playlist {
            id: String::from("p1"),
        })
        .await;

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "playlist p1 (2 songs)");
        assert!(lines[1].starts_with("s1\t"));
        assert!(lines[2].starts_with("s2\t"));
    }

    #[tokio::test]
    async fn favorites_skip_unknown_songs() {
        let out = output(Commands::Favorites).await;
        assert_eq!(out, "s2\ttitle s2 - artist s2\t3:05\n");
    }

    #[tokio::test]
    async fn seeding() {
        assert_eq!(output(Commands::Seed).await, "seeded sample data\n");
    }

    #[tokio::test]
    async fn missing_playlist_is_an_error() {
        let (address, _) = serve(routes).await;
        let command = Commands::Playlist {
            id: String::from("nope"),
        };

        assert!(cli::run(&command, &client(&address), Vec::new()).await.is_err());
    }
}
