#[cfg(test)]
mod client {
    use std::time::Duration;

    use crate::{
        api::{self, Client},
        tests::support::{self, client, json, serve},
    };

    fn routes(method: &str, path: &str) -> (u16, String) {
        let collections = support::collections();

        match (method, path) {
            ("GET", "/api/songs") => (200, json(&collections.songs)),
            ("GET", x) if x.starts_with("/api/songs?") => (200, json(&collections.songs[..1])),
            ("GET", "/api/songs/s1") => (200, json(&support::song("s1"))),
            ("GET", "/api/songs/s2") => (200, json(&support::song("s2"))),
            ("GET", "/api/playlists/p1") => (200, json(&support::playlist("p1", &["s2", "s1"]))),
            ("GET", "/api/playlists/broken") => {
                (200, json(&support::playlist("broken", &["s1", "gone"])))
            }
            ("POST", "/api/playlists") => (201, json(&support::playlist("p9", &[]))),
            ("GET", "/api/favorites") => (200, json(&collections.favorites)),
            ("POST" | "DELETE", _) => (200, String::from("{}")),
            _ => (404, String::from("{\"detail\":\"not found\"}")),
        }
    }

    #[test]
    fn root_gets_api_appended() {
        let client = Client::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(client.root().as_str(), "http://localhost:8000/api");

        let client = Client::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.root().as_str(), "http://localhost:8000/api");

        let client = Client::new("http://example.com/music/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.root().as_str(), "http://example.com/music/api");
    }

    #[test]
    fn invalid_backend_is_rejected() {
        assert!(matches!(
            Client::new("not a url", Duration::from_secs(1)),
            Err(api::Error::Url(_))
        ));
        assert!(matches!(
            Client::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(api::Error::Base)
        ));
    }

    #[test]
    fn endpoint_segments_are_encoded() {
        let client = Client::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        let url = client.endpoint(&["songs", "a b/c"]).unwrap();

        assert_eq!(url.path(), "/api/songs/a%20b%2Fc");
    }

    #[tokio::test]
    async fn songs_only_searches_when_asked() {
        let (address, seen) = serve(routes).await;
        let client = client(&address);

        assert_eq!(client.songs("").await.unwrap().len(), 12);
        assert_eq!(client.songs("lo fi").await.unwrap().len(), 1);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].path, "/api/songs");
        assert!(seen[1].path.starts_with("/api/songs?search=lo"));
    }

    #[tokio::test]
    async fn playlist_songs_keep_their_order() {
        let (address, _) = serve(routes).await;
        let songs = client(&address).playlist_songs("p1").await.unwrap();

        let ids: Vec<_> = songs.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, ["s2", "s1"]);
    }

    #[tokio::test]
    async fn playlist_songs_fail_together() {
        let (address, _) = serve(routes).await;
        assert!(client(&address).playlist_songs("broken").await.is_err());
    }

    #[tokio::test]
    async fn errors_on_bad_status() {
        let (address, _) = serve(routes).await;
        let result = client(&address).playlist("missing").await;

        assert!(matches!(result, Err(api::Error::Request(_))));
    }

    #[tokio::test]
    async fn create_playlist_sends_body() {
        let (address, seen) = serve(routes).await;
        let created = client(&address)
            .create_playlist("road trip", "loud songs", "http://cover")
            .await
            .unwrap();

        assert_eq!(created.id, "p9");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, "POST");
        assert_eq!(seen[0].path, "/api/playlists");

        let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
        assert_eq!(body["name"], "road trip");
        assert_eq!(body["description"], "loud songs");
        assert_eq!(body["cover_url"], "http://cover");
    }

    #[tokio::test]
    async fn mutations_use_the_right_routes() {
        let (address, seen) = serve(routes).await;
        let client = client(&address);

        client.add_favorite("s1").await.unwrap();
        client.remove_favorite("s1").await.unwrap();
        client.add_song_to_playlist("p1", "s4").await.unwrap();
        client.remove_song_from_playlist("p1", "s4").await.unwrap();
        client.delete_playlist("p1").await.unwrap();
        client.init_data().await.unwrap();

        let seen = seen.lock().unwrap();
        let routes: Vec<_> = seen
            .iter()
            .map(|x| (x.method.as_str(), x.path.as_str()))
            .collect();

        assert_eq!(
            routes,
            [
                ("POST", "/api/favorites"),
                ("DELETE", "/api/favorites/s1"),
                ("POST", "/api/playlists/p1/songs"),
                ("DELETE", "/api/playlists/p1/songs/s4"),
                ("DELETE", "/api/playlists/p1"),
                ("POST", "/api/init-data"),
            ]
        );
        assert_eq!(seen[0].body, "{\"song_id\":\"s1\"}");
        assert_eq!(seen[2].body, "{\"song_id\":\"s4\"}");
    }

    #[tokio::test]
    async fn sparse_records_still_parse() {
        fn sparse(_: &str, _: &str) -> (u16, String) {
            (
                200,
                String::from(
                    r#"[{"id":"x","title":"t","artist":"a","audio_url":"http://a"}]"#,
                ),
            )
        }

        let (address, _) = serve(sparse).await;
        let songs = client(&address).songs("").await.unwrap();

        assert_eq!(songs[0].album, "");
        assert_eq!(songs[0].length(), None);
    }
}
