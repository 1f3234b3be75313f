use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use lineupcli::pipeline::{
    AddedSong, Artist, ErrorKind, FailureReason, Lineup, MAX_ARTISTS, MusicService, NewPlaylist,
    NoopReporter, PipelineError, PlaylistAssembler, RateLimiter, Reporter, RunResult, RunState,
    ServiceError, Stage, Track, Visibility, build_playlist, sanitize,
};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Search(String),
    Tracks(String),
    Create(NewPlaylist),
    Add(String, Vec<String>),
}

/// In-memory music service that records every call.
struct FakeService {
    playlist_id: String,
    artists: HashMap<String, Artist>,
    tracks: HashMap<String, Vec<Track>>,
    failing_searches: HashSet<String>,
    failing_appends: HashSet<String>,
    fail_create: bool,
    acknowledge: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeService {
    fn new(playlist_id: &str) -> Self {
        Self {
            playlist_id: playlist_id.to_string(),
            artists: HashMap::new(),
            tracks: HashMap::new(),
            failing_searches: HashSet::new(),
            failing_appends: HashSet::new(),
            fail_create: false,
            acknowledge: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_artist(mut self, query: &str, id: &str, titles: &[&str]) -> Self {
        self.artists.insert(
            query.to_string(),
            Artist {
                id: id.to_string(),
                name: query.to_string(),
            },
        );
        let tracks = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Track {
                id: format!("{}-{}", id, i + 1),
                title: title.to_string(),
            })
            .collect();
        self.tracks.insert(id.to_string(), tracks);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn add_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add(playlist, ids) => Some((playlist, ids)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl MusicService for FakeService {
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search(query.to_string()));
        if self.failing_searches.contains(query) {
            return Err(ServiceError::Status {
                status: 500,
                message: "search broke".to_string(),
            });
        }
        Ok(self.artists.get(query).cloned().into_iter().collect())
    }

    async fn artist_tracks(&self, artist_id: &str) -> Result<Vec<Track>, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Tracks(artist_id.to_string()));
        Ok(self.tracks.get(artist_id).cloned().unwrap_or_default())
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(playlist.clone()));
        if self.fail_create {
            return Err(ServiceError::Unauthorized("token revoked".to_string()));
        }
        Ok(self.playlist_id.clone())
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<Option<String>, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Add(playlist_id.to_string(), track_ids.to_vec()));
        if track_ids.iter().any(|id| self.failing_appends.contains(id)) {
            return Err(ServiceError::RateLimited {
                retry_after: Some(30),
            });
        }
        Ok(self.acknowledge.then(|| "snapshot".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Status(String),
    Warning(String, String),
    Progress(f64),
    Final(bool),
}

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn progress(&self) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn warnings(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Warning(artist, message) => Some((artist, message)),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_status(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Status(message.to_string()));
    }

    fn on_warning(&self, artist: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Warning(artist.to_string(), message.to_string()));
    }

    fn on_progress(&self, fraction: f64) {
        self.events.lock().unwrap().push(Event::Progress(fraction));
    }

    fn on_final_result(&self, result: &Result<RunResult, PipelineError>) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Final(result.is_ok()));
    }
}

fn lineup(text: &str) -> Lineup {
    let (lineup, warnings) = sanitize(text, MAX_ARTISTS);
    assert!(warnings.is_empty());
    lineup
}

fn song(artist: &str, title: &str) -> AddedSong {
    AddedSong {
        artist: artist.to_string(),
        title: title.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_partial_failure_keeps_successful_artists() {
    let service = FakeService::new("pl-1").with_artist("Artist A", "a", &["A1", "A2", "A3"]);
    let reporter = RecordingReporter::default();
    let limiter = RateLimiter::default();

    let result = build_playlist(
        &lineup("Artist A\nArtist B"),
        "Festival",
        2,
        &service,
        &reporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(result.playlist_id, "pl-1");
    assert_eq!(result.songs, vec![song("Artist A", "A1"), song("Artist A", "A2")]);
    assert_eq!(result.successful_artists, 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].artist, "Artist B");
    assert_eq!(result.failures[0].reason, FailureReason::ArtistNotFound);

    assert_eq!(
        service.add_calls(),
        vec![("pl-1".to_string(), vec!["a-1".to_string(), "a-2".to_string()])]
    );
    assert_eq!(reporter.progress(), vec![0.5, 1.0, 1.0]);
    assert_eq!(
        reporter.warnings(),
        vec![("Artist B".to_string(), "no artist found".to_string())]
    );
    assert_eq!(reporter.events().last(), Some(&Event::Final(true)));
}

#[tokio::test(start_paused = true)]
async fn test_no_artist_found_ends_in_no_songs_added() {
    let service = FakeService::new("pl-1");
    let reporter = RecordingReporter::default();
    let limiter = RateLimiter::default();
    let mut assembler = PlaylistAssembler::new(&service, &reporter, &limiter);

    let err = assembler
        .run(&lineup("Nobody One\nNobody Two\nNobody Three"), "Festival", 3)
        .await
        .unwrap_err();

    match err {
        PipelineError::NoSongsAdded {
            playlist_id,
            failures,
        } => {
            assert_eq!(playlist_id, "pl-1");
            assert_eq!(failures.len(), 3);
            assert!(
                failures
                    .iter()
                    .all(|f| f.reason == FailureReason::ArtistNotFound)
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(service.add_calls().is_empty());
    assert_eq!(assembler.state(), RunState::Failed);
    assert_eq!(reporter.progress().last(), Some(&1.0));
    assert_eq!(reporter.events().last(), Some(&Event::Final(false)));
}

#[tokio::test(start_paused = true)]
async fn test_empty_playlist_id_stops_before_any_lookup() {
    let service = FakeService::new("").with_artist("Artist A", "a", &["A1"]);
    let reporter = RecordingReporter::default();
    let limiter = RateLimiter::default();

    let err = build_playlist(
        &lineup("Artist A"),
        "Festival",
        3,
        &service,
        &reporter,
        &limiter,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::PlaylistCreationFailed(ServiceError::MissingPlaylistId)
    ));
    assert_eq!(service.calls().len(), 1);
    assert!(matches!(service.calls()[0], Call::Create(_)));
    assert_eq!(reporter.progress(), vec![1.0]);
}

#[tokio::test(start_paused = true)]
async fn test_create_failure_is_fatal() {
    let mut service = FakeService::new("pl-1").with_artist("Artist A", "a", &["A1"]);
    service.fail_create = true;
    let limiter = RateLimiter::default();

    let err = build_playlist(
        &lineup("Artist A"),
        "Festival",
        3,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PipelineError::PlaylistCreationFailed(_)));
    assert_eq!(err.kind(), Some(ErrorKind::Auth));
    assert_eq!(service.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_playlist_is_private_with_description() {
    let service = FakeService::new("pl-1").with_artist("Artist A", "a", &["A1"]);
    let limiter = RateLimiter::default();

    build_playlist(
        &lineup("Artist A"),
        "Primavera",
        4,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(
        service.calls()[0],
        Call::Create(NewPlaylist {
            title: "Primavera".to_string(),
            description: "Top 4 songs from each artist at Primavera".to_string(),
            visibility: Visibility::Private,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_songs_follow_lineup_then_service_order() {
    let service = FakeService::new("pl-1")
        .with_artist("Zeta", "z", &["Z1", "Z2", "Z3"])
        .with_artist("Alpha", "a", &["A1", "A2"])
        .with_artist("Mid", "m", &["M1", "M2", "M3", "M4"]);
    let limiter = RateLimiter::default();

    let result = build_playlist(
        &lineup("Zeta\nAlpha\nMid"),
        "Festival",
        3,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(
        result.songs,
        vec![
            song("Zeta", "Z1"),
            song("Zeta", "Z2"),
            song("Zeta", "Z3"),
            song("Alpha", "A1"),
            song("Alpha", "A2"),
            song("Mid", "M1"),
            song("Mid", "M2"),
            song("Mid", "M3"),
        ]
    );
    assert_eq!(result.successful_artists, 3);
    assert!(result.failures.is_empty());

    let added: Vec<Vec<String>> = service.add_calls().into_iter().map(|(_, ids)| ids).collect();
    assert_eq!(added.len(), 3);
    assert_eq!(added[0], vec!["z-1", "z-2", "z-3"]);
    assert_eq!(added[2], vec!["m-1", "m-2", "m-3"]);
}

#[tokio::test(start_paused = true)]
async fn test_artist_without_tracks_is_a_failure() {
    let service = FakeService::new("pl-1")
        .with_artist("Artist A", "a", &["A1"])
        .with_artist("Silent", "s", &[]);
    let limiter = RateLimiter::default();

    let result = build_playlist(
        &lineup("Silent\nArtist A"),
        "Festival",
        3,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(result.successful_artists, 1);
    assert_eq!(result.failures[0].artist, "Silent");
    assert_eq!(result.failures[0].reason, FailureReason::NoTracksFound);
    assert_eq!(service.add_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_service_errors_do_not_abort_the_run() {
    let mut service = FakeService::new("pl-1")
        .with_artist("Broken Search", "b", &["B1"])
        .with_artist("Broken Append", "x", &["X1"])
        .with_artist("Fine", "f", &["F1"]);
    service.failing_searches.insert("Broken Search".to_string());
    service.failing_appends.insert("x-1".to_string());
    let reporter = RecordingReporter::default();
    let limiter = RateLimiter::default();

    let result = build_playlist(
        &lineup("Broken Search\nBroken Append\nFine"),
        "Festival",
        3,
        &service,
        &reporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(result.successful_artists, 1);
    assert_eq!(result.songs, vec![song("Fine", "F1")]);
    assert_eq!(result.failures.len(), 2);

    match &result.failures[0].reason {
        FailureReason::ExternalCall { stage, kind, .. } => {
            assert_eq!(*stage, Stage::Resolve);
            assert_eq!(*kind, ErrorKind::Service);
        }
        other => panic!("unexpected reason: {other:?}"),
    }
    match &result.failures[1].reason {
        FailureReason::ExternalCall { stage, kind, .. } => {
            assert_eq!(*stage, Stage::Append);
            assert_eq!(*kind, ErrorKind::RateLimit);
        }
        other => panic!("unexpected reason: {other:?}"),
    }

    let progress = reporter.progress();
    assert_eq!(progress.len(), 4);
    assert!((progress[0] - 1.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(progress[3], 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_acknowledgement_counts_as_failure() {
    let mut service = FakeService::new("pl-1").with_artist("Artist A", "a", &["A1"]);
    service.acknowledge = false;
    let limiter = RateLimiter::default();

    let err = build_playlist(
        &lineup("Artist A"),
        "Festival",
        3,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap_err();

    match err {
        PipelineError::NoSongsAdded { failures, .. } => {
            assert_eq!(failures[0].reason, FailureReason::AppendNotAcknowledged);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_songs_per_artist_is_clamped() {
    let titles: Vec<String> = (1..=12).map(|i| format!("T{}", i)).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let service = FakeService::new("pl-1").with_artist("Prolific", "p", &titles);
    let limiter = RateLimiter::default();

    let result = build_playlist(
        &lineup("Prolific"),
        "Festival",
        25,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap();

    assert_eq!(result.songs.len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_lookups_are_rate_limited() {
    let service = FakeService::new("pl-1")
        .with_artist("Artist A", "a", &["A1"])
        .with_artist("Artist B", "b", &["B1"]);
    let limiter = RateLimiter::new(Duration::from_millis(100));
    let start = Instant::now();

    build_playlist(
        &lineup("Artist A\nArtist B"),
        "Festival",
        1,
        &service,
        &NoopReporter,
        &limiter,
    )
    .await
    .unwrap();

    // two searches and two track lookups, three gaps between them
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_assembler_reports_done_state() {
    let service = FakeService::new("pl-1").with_artist("Artist A", "a", &["A1"]);
    let reporter = RecordingReporter::default();
    let limiter = RateLimiter::default();
    let mut assembler = PlaylistAssembler::new(&service, &reporter, &limiter);
    assert_eq!(assembler.state(), RunState::Created);

    assembler
        .run(&lineup("Artist A"), "Festival", 3)
        .await
        .unwrap();

    assert_eq!(assembler.state(), RunState::Done);
    assert_eq!(
        reporter.events()[0],
        Event::Status("Created playlist with ID: pl-1".to_string())
    );
    assert_eq!(reporter.events()[1], Event::Status("Processing Artist A...".to_string()));
}
