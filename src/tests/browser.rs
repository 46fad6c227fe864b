#[cfg(test)]
mod views {
    use crate::{
        browser::{Action, Browser, Entry, View, ViewKind},
        tests::support::{collections, song},
    };

    #[test]
    fn home_shows_popular_and_playlists() {
        let collections = collections();
        let entries = Browser::default().entries(&collections);

        assert_eq!(entries[0], Entry::Heading(String::from("popular tracks")));
        let songs = entries
            .iter()
            .filter(|x| matches!(x, Entry::Song { .. }))
            .count();
        assert_eq!(songs, 10);
        assert_eq!(entries[11], Entry::Heading(String::from("your playlists")));
        assert!(matches!(&entries[12], Entry::Playlist(x) if x.id == "p1"));
    }

    #[test]
    fn home_without_playlists_has_no_section() {
        let mut collections = collections();
        collections.playlists.clear();

        let entries = Browser::default().entries(&collections);
        assert!(!entries
            .iter()
            .any(|x| *x == Entry::Heading(String::from("your playlists"))));
    }

    #[test]
    fn home_song_queues_every_song() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.down(&collections);

        let Action::Play { song, queue } = browser.select(&collections) else {
            panic!("expected to play");
        };

        assert_eq!(song.id, "s2");
        assert_eq!(queue.len(), 12);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let collections = collections();
        let mut browser = Browser::default();

        browser.up();
        assert_eq!(browser.cursor(), 0);

        for _ in 0..50 {
            browser.down(&collections);
        }

        // Ten songs and one playlist.
        assert_eq!(browser.cursor(), 10);
        assert!(matches!(
            browser.selected(&collections),
            Some(Entry::Playlist(_))
        ));
    }

    #[test]
    fn cursor_is_clamped_when_data_shrinks() {
        let mut collections = collections();
        let mut browser = Browser::default();
        for _ in 0..8 {
            browser.down(&collections);
        }

        collections.songs.truncate(3);
        collections.playlists.clear();
        browser.clamp(&collections);

        assert_eq!(browser.cursor(), 2);
    }

    #[test]
    fn selecting_a_playlist_opens_it() {
        let collections = collections();
        let mut browser = Browser::default();
        for _ in 0..10 {
            browser.down(&collections);
        }

        assert_eq!(browser.select(&collections), Action::Open(String::from("p1")));
        assert_eq!(*browser.view(), View::Playlist(String::from("p1")));
        assert!(browser.opened.loading);
        assert_eq!(
            browser.entries(&collections),
            [Entry::Text(String::from("loading..."))]
        );

        browser.set_opened(vec![song("s1"), song("s2")]);
        assert_eq!(browser.title(&collections), "playlist p1");

        let entries = browser.entries(&collections);
        assert_eq!(entries[0], Entry::Heading(String::from("playlist p1 (2 songs)")));
        assert_eq!(entries.len(), 3);

        browser.back();
        assert_eq!(*browser.view(), View::Library);
    }

    #[test]
    fn missing_playlist_says_so() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Playlist(String::from("nope")));
        browser.set_opened(Vec::new());

        assert_eq!(
            browser.entries(&collections),
            [Entry::Text(String::from("playlist not found"))]
        );
    }

    #[test]
    fn play_all_starts_from_the_top() {
        let collections = collections();
        let mut browser = Browser::default();
        assert_eq!(browser.play_all(), Action::None);

        browser.goto(View::Playlist(String::from("p1")));
        browser.set_opened(vec![song("s2"), song("s1")]);

        let Action::Play { song, queue } = browser.play_all() else {
            panic!("expected to play");
        };
        assert_eq!(song.id, "s2");
        assert_eq!(queue.len(), 2);
        assert!(collections.playlist("p1").is_some());
    }

    #[test]
    fn library_lists_liked_songs_and_playlists() {
        let mut collections = collections();
        let mut browser = Browser::default();
        browser.goto(ViewKind::Library.into());

        let entries = browser.entries(&collections);
        assert_eq!(entries[0], Entry::Heading(String::from("liked songs (1)")));
        assert!(matches!(&entries[1], Entry::Song { song, .. } if song.id == "s3"));
        assert_eq!(entries[2], Entry::Heading(String::from("playlists (1)")));

        collections.favorites.clear();
        collections.playlists.clear();
        let entries = browser.entries(&collections);
        assert!(entries.contains(&Entry::Text(String::from("no liked songs yet"))));
        assert!(entries.contains(&Entry::Text(String::from("no playlists yet"))));
    }

    #[test]
    fn liked_songs_queue_only_liked_songs() {
        let mut collections = collections();
        collections.favorites.push(crate::tests::support::favorite("s7"));

        let mut browser = Browser::default();
        browser.goto(View::Library);

        let Action::Play { queue, .. } = browser.select(&collections) else {
            panic!("expected to play");
        };

        let ids: Vec<_> = queue.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, ["s3", "s7"]);
    }

    #[test]
    fn cycling_goes_around() {
        let mut browser = Browser::default();

        browser.cycle();
        assert_eq!(*browser.view(), View::Search);
        browser.cycle();
        assert_eq!(*browser.view(), View::Library);
        browser.cycle();
        assert_eq!(*browser.view(), View::Home);

        browser.goto(View::Playlist(String::from("p1")));
        browser.cycle();
        assert_eq!(*browser.view(), View::Home);
    }
}

#[cfg(test)]
mod search {
    use crate::{
        browser::{Action, Browser, Entry, Mode, View},
        tests::support::{collections, song},
    };

    #[test]
    fn typing_builds_the_query() {
        let mut browser = Browser::default();
        browser.focus_search();
        assert_eq!(browser.mode(), Mode::Typing);

        for character in "lofx".chars() {
            browser.type_char(character);
        }
        browser.erase();
        browser.type_char('i');

        assert_eq!(browser.search.query, "lofi");
        assert_eq!(
            browser.select(&collections()),
            Action::Search(String::from("lofi"))
        );
        assert_eq!(browser.mode(), Mode::Normal);
    }

    #[test]
    fn prompt_text_before_searching() {
        let mut browser = Browser::default();
        browser.goto(View::Search);

        assert_eq!(
            browser.entries(&collections()),
            [Entry::Text(String::from(
                "search for songs, artists, or albums"
            ))]
        );
    }

    #[test]
    fn result_counts() {
        let mut browser = Browser::default();
        browser.goto(View::Search);

        browser.set_results(String::from("zzz"), Vec::new());
        assert_eq!(
            browser.entries(&collections()),
            [Entry::Text(String::from("no results found for \"zzz\""))]
        );

        browser.set_results(String::from("one"), vec![song("s1")]);
        assert_eq!(
            browser.entries(&collections())[0],
            Entry::Heading(String::from("found 1 result"))
        );

        browser.set_results(String::from("two"), vec![song("s1"), song("s2")]);
        assert_eq!(
            browser.entries(&collections())[0],
            Entry::Heading(String::from("found 2 results"))
        );
    }

    #[test]
    fn results_are_the_queue() {
        let mut browser = Browser::default();
        browser.goto(View::Search);
        browser.back();
        browser.set_results(String::from("x"), vec![song("s5"), song("s9")]);
        browser.down(&collections());

        let Action::Play { song, queue } = browser.select(&collections()) else {
            panic!("expected to play");
        };
        assert_eq!(song.id, "s9");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn back_stops_editing() {
        let mut browser = Browser::default();
        browser.focus_search();
        browser.back();

        assert_eq!(browser.mode(), Mode::Normal);
        assert_eq!(*browser.view(), View::Search);
    }
}

#[cfg(test)]
mod overlays {
    use crate::{
        browser::{Action, Browser, Field, Mode, Overlay, View},
        tests::support::collections,
    };

    #[test]
    fn creating_only_from_the_library() {
        let mut browser = Browser::default();
        browser.create_playlist();
        assert!(browser.overlay().is_none());

        browser.goto(View::Library);
        browser.create_playlist();
        assert_eq!(browser.mode(), Mode::Typing);
    }

    #[test]
    fn prompt_needs_a_name() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Library);
        browser.create_playlist();

        assert_eq!(browser.select(&collections), Action::None);
        assert!(matches!(
            browser.overlay(),
            Some(Overlay::Prompt(x)) if x.field == Field::Name
        ));

        browser.type_char('m');
        browser.type_char('e');
        assert_eq!(browser.select(&collections), Action::None);
        browser.type_char('!');

        assert_eq!(
            browser.select(&collections),
            Action::Create {
                name: String::from("me"),
                description: String::from("!"),
            }
        );
        assert!(browser.overlay().is_none());
    }

    #[test]
    fn erasing_an_empty_description_goes_back_to_the_name() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Library);
        browser.create_playlist();
        browser.type_char('a');
        browser.select(&collections);

        browser.erase();
        assert!(matches!(
            browser.overlay(),
            Some(Overlay::Prompt(x)) if x.field == Field::Name
        ));
    }

    #[test]
    fn picker_adds_to_the_chosen_playlist() {
        let collections = collections();
        let mut browser = Browser::default();

        assert_eq!(browser.add_to_playlist(&collections), Action::None);
        assert!(matches!(browser.overlay(), Some(Overlay::Picker { .. })));

        browser.down(&collections);
        assert_eq!(
            browser.select(&collections),
            Action::Add {
                playlist: String::from("p1"),
                song: String::from("s1"),
            }
        );
    }

    #[test]
    fn picker_needs_a_playlist() {
        let mut collections = collections();
        collections.playlists.clear();

        let mut browser = Browser::default();
        assert!(matches!(
            browser.add_to_playlist(&collections),
            Action::Notice(_)
        ));
        assert!(browser.overlay().is_none());
    }

    #[test]
    fn deleting_a_playlist_asks_first() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Library);
        browser.down(&collections);

        assert_eq!(browser.delete(&collections), Action::None);
        assert_eq!(browser.mode(), Mode::Confirming);
        assert_eq!(browser.confirm(), Action::DeletePlaylist(String::from("p1")));
        assert!(browser.overlay().is_none());
    }

    #[test]
    fn declining_keeps_the_playlist() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Library);
        browser.down(&collections);
        browser.delete(&collections);

        browser.back();
        assert!(browser.overlay().is_none());
        assert_eq!(*browser.view(), View::Library);
    }

    #[test]
    fn deleting_in_a_playlist_removes_the_song() {
        let collections = collections();
        let mut browser = Browser::default();
        browser.goto(View::Playlist(String::from("p1")));
        browser.set_opened(vec![
            crate::tests::support::song("s1"),
            crate::tests::support::song("s2"),
        ]);
        browser.down(&collections);

        assert_eq!(
            browser.delete(&collections),
            Action::RemoveSong {
                playlist: String::from("p1"),
                song: String::from("s2"),
            }
        );
    }
}
