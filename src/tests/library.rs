#[cfg(test)]
mod collections {
    use crate::{
        library::Collections,
        tests::support::{collections, favorite},
    };

    #[test]
    fn favorite_songs_follow_favorite_order() {
        let mut collections = collections();
        collections.favorites = vec![favorite("s9"), favorite("gone"), favorite("s2")];

        let ids: Vec<_> = collections
            .favorite_songs()
            .into_iter()
            .map(|x| x.id)
            .collect();
        assert_eq!(ids, ["s9", "s2"]);
    }

    #[test]
    fn popular_is_the_first_ten() {
        let collections = collections();
        assert_eq!(collections.popular().len(), 10);
        assert_eq!(collections.popular()[0].id, "s1");

        assert!(Collections::default().popular().is_empty());
    }

    #[test]
    fn lookups() {
        let collections = collections();

        assert!(collections.is_favorite("s3"));
        assert!(!collections.is_favorite("s4"));
        assert!(collections.playlist("p1").is_some());
        assert!(collections.playlist("p2").is_none());
    }
}

#[cfg(test)]
mod library {
    use crate::{
        library::{self, Library, DEFAULT_COVER},
        tests::support::{self, client, json, serve},
    };

    fn routes(method: &str, path: &str) -> (u16, String) {
        let collections = support::collections();

        match (method, path) {
            ("GET", "/api/songs") => (200, json(&collections.songs)),
            ("GET", "/api/playlists") => (200, json(&collections.playlists)),
            ("GET", "/api/favorites") => (200, json(&collections.favorites)),
            ("POST", "/api/playlists") => (200, json(&support::playlist("p2", &[]))),
            ("POST", "/api/favorites") => (200, String::from("{}")),
            _ => (500, String::from("{}")),
        }
    }

    fn failing(_: &str, _: &str) -> (u16, String) {
        (500, String::from("{}"))
    }

    #[tokio::test]
    async fn load_all_fills_everything() {
        let (address, _) = serve(routes).await;
        let mut library = Library::new(client(&address));
        library.load_all().await;

        assert_eq!(library.collections(), &support::collections());
    }

    #[tokio::test]
    async fn failed_loads_keep_what_was_there() {
        let (address, _) = serve(failing).await;
        let mut library = Library::new(client(&address));
        library.collections = support::collections();

        assert!(library.load_songs("").await.is_empty());
        library.load_playlists().await;
        library.load_favorites().await;

        assert_eq!(library.collections(), &support::collections());
    }

    #[tokio::test]
    async fn blank_searches_skip_the_request() {
        let (address, seen) = serve(routes).await;
        let library = Library::new(client(&address));

        assert!(library.search("   ").await.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let (address, seen) = serve(routes).await;
        let mut library = Library::new(client(&address));

        assert!(matches!(
            library.create_playlist("  ", "").await,
            Err(library::Error::EmptyName)
        ));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_playlists_get_the_default_cover() {
        let (address, seen) = serve(routes).await;
        let mut library = Library::new(client(&address));

        let playlist = library.create_playlist(" mix ", "").await.unwrap();
        assert_eq!(playlist.id, "p2");

        let seen = seen.lock().unwrap();
        let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
        assert_eq!(body["name"], "mix");
        assert_eq!(body["cover_url"], DEFAULT_COVER);
        assert_eq!(seen[1].path, "/api/playlists");
    }

    #[tokio::test]
    async fn toggling_a_favorite_reloads() {
        let (address, seen) = serve(routes).await;
        let mut library = Library::new(client(&address));

        // The responder always reports `s3` as liked.
        assert!(library.toggle_favorite("s3").await.unwrap());

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, "POST");
        assert_eq!(seen[1].path, "/api/favorites");
    }

    /// Still lists `s3` as liked, but won't let it be unliked.
    fn stubborn(method: &str, path: &str) -> (u16, String) {
        match (method, path) {
            ("GET", "/api/favorites") => (200, json(&[support::favorite("s3")])),
            _ => (500, String::from("{}")),
        }
    }

    #[tokio::test]
    async fn failed_unlikes_are_errors() {
        let (address, seen) = serve(stubborn).await;
        let mut library = Library::new(client(&address));
        library.collections = support::collections();

        assert!(matches!(
            library.toggle_favorite("s3").await,
            Err(library::Error::Unchanged)
        ));
        assert!(library.is_favorite("s3"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, "DELETE");
        assert_eq!(seen[0].path, "/api/favorites/s3");
    }

    #[tokio::test]
    async fn removal_failures_are_swallowed() {
        let (address, _) = serve(failing).await;
        let mut library = Library::new(client(&address));
        library.collections = support::collections();

        library.remove_favorite("s3").await;
        library.delete_playlist("p1").await;
        assert!(library.is_favorite("s3"));
        assert!(library.playlist_songs("p1").await.is_empty());
    }
}
