mod api;
mod browser;
mod cli;
mod library;

/// Shared fixtures, and a tiny HTTP responder standing in for the backend.
#[cfg(test)]
pub mod support {
    use std::sync::{Arc, Mutex};

    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
    };

    use crate::{
        api::{self, Favorite, Playlist, Song},
        library::Collections,
    };

    pub fn song(id: &str) -> Song {
        Song {
            id: id.to_owned(),
            title: format!("title {id}"),
            artist: format!("artist {id}"),
            album: String::new(),
            duration: 185.0,
            cover_url: String::new(),
            audio_url: format!("http://localhost/{id}.mp3"),
        }
    }

    pub fn playlist(id: &str, songs: &[&str]) -> Playlist {
        Playlist {
            id: id.to_owned(),
            name: format!("playlist {id}"),
            description: String::new(),
            cover_url: String::new(),
            song_ids: songs.iter().map(|x| (*x).to_owned()).collect(),
        }
    }

    pub fn favorite(song: &str) -> Favorite {
        Favorite {
            song_id: song.to_owned(),
            id: None,
        }
    }

    /// Twelve songs, one playlist of two songs and one liked song.
    pub fn collections() -> Collections {
        Collections {
            songs: (1..=12).map(|x| song(&format!("s{x}"))).collect(),
            playlists: vec![playlist("p1", &["s1", "s2"])],
            favorites: vec![favorite("s3")],
        }
    }

    /// A request as the responder saw it.
    #[derive(Debug, Clone)]
    pub struct Request {
        pub method: String,
        pub path: String,
        pub body: String,
    }

    /// Decides the status and JSON body for a method and path.
    pub type Routes = fn(&str, &str) -> (u16, String);

    /// Finds the end of the headers, if they've all arrived.
    fn header_end(buffer: &[u8]) -> Option<usize> {
        buffer.windows(4).position(|x| x == b"\r\n\r\n").map(|x| x + 4)
    }

    /// Reads the value of the `Content-Length` header.
    fn content_length(headers: &str) -> usize {
        headers
            .lines()
            .filter_map(|x| x.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Starts the responder, returning its address and the requests it has seen.
    pub async fn serve(routes: Routes) -> (String, Arc<Mutex<Vec<Request>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };

                let mut buffer = Vec::new();
                let mut chunk = [0u8; 1024];
                let end = loop {
                    let read = socket.read(&mut chunk).await.unwrap_or(0);
                    if read == 0 {
                        break None;
                    }

                    buffer.extend_from_slice(&chunk[..read]);
                    if let Some(end) = header_end(&buffer) {
                        break Some(end);
                    }
                };

                let Some(end) = end else {
                    continue;
                };

                let headers = String::from_utf8_lossy(&buffer[..end]).to_string();
                let length = content_length(&headers);
                while buffer.len() < end + length {
                    let read = socket.read(&mut chunk).await.unwrap_or(0);
                    if read == 0 {
                        break;
                    }
                    buffer.extend_from_slice(&chunk[..read]);
                }

                let mut line = headers.lines().next().unwrap_or_default().split(' ');
                let method = line.next().unwrap_or_default().to_owned();
                let path = line.next().unwrap_or_default().to_owned();
                let body = String::from_utf8_lossy(&buffer[end..]).to_string();

                let (status, response) = routes(&method, &path);
                log.lock().unwrap().push(Request { method, path, body });

                let reply = format!(
                    "HTTP/1.1 {status} STATUS\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{response}",
                    response.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (address, seen)
    }

    /// A client for a responder started with [`serve`].
    pub fn client(address: &str) -> api::Client {
        api::Client::new(address, std::time::Duration::from_secs(5)).unwrap()
    }

    /// Serializes anything into a JSON string.
    pub fn json(value: &(impl serde::Serialize + ?Sized)) -> String {
        serde_json::to_string(value).unwrap()
    }
}
