use super::{
    error::{ArtistFailure, FailureReason, PipelineError, ServiceError, Stage},
    limiter::RateLimiter,
    reporter::Reporter,
    resolve::{self, MAX_SONGS_PER_ARTIST},
    sanitize::Lineup,
    service::{MusicService, NewPlaylist, Track, Visibility},
};

/// One song that made it into the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedSong {
    pub artist: String,
    pub title: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub playlist_id: String,
    /// Songs in lineup order, then in the order the service ranked them.
    pub songs: Vec<AddedSong>,
    pub successful_artists: usize,
    pub failures: Vec<ArtistFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    Creating,
    Populating,
    Done,
    Failed,
}

/// What happened to a single lineup entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistOutcome {
    Added { artist: String, tracks: Vec<Track> },
    Failed(ArtistFailure),
}

/// Deliberately lenient: the service's append acknowledgement is unreliable,
/// so anything present counts.
fn append_acknowledged(ack: &Option<String>) -> bool {
    ack.is_some()
}

/// Builds one playlist out of a lineup.
pub struct PlaylistAssembler<'a> {
    service: &'a dyn MusicService,
    reporter: &'a dyn Reporter,
    limiter: &'a RateLimiter,
    state: RunState,
}

impl<'a> PlaylistAssembler<'a> {
    pub fn new(
        service: &'a dyn MusicService,
        reporter: &'a dyn Reporter,
        limiter: &'a RateLimiter,
    ) -> Self {
        Self {
            service,
            reporter,
            limiter,
            state: RunState::Created,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Creates a private playlist named `playlist_name` and fills it with up
    /// to `songs_per_artist` tracks of every artist in the lineup.
    ///
    /// Artists that cannot be found or added are recorded as failures and
    /// skipped. The run only fails when the playlist cannot be created or
    /// when not a single artist could be added.
    pub async fn run(
        &mut self,
        lineup: &Lineup,
        playlist_name: &str,
        songs_per_artist: usize,
    ) -> Result<RunResult, PipelineError> {
        let songs_per_artist = songs_per_artist.clamp(1, MAX_SONGS_PER_ARTIST);
        let result = self.execute(lineup, playlist_name, songs_per_artist).await;

        self.state = if result.is_ok() {
            RunState::Done
        } else {
            RunState::Failed
        };
        self.reporter.on_progress(1.0);
        self.reporter.on_final_result(&result);
        result
    }

    async fn execute(
        &mut self,
        lineup: &Lineup,
        playlist_name: &str,
        songs_per_artist: usize,
    ) -> Result<RunResult, PipelineError> {
        self.state = RunState::Creating;
        let playlist_id = self.create_playlist(playlist_name, songs_per_artist).await?;
        self.reporter
            .on_status(&format!("Created playlist with ID: {}", playlist_id));

        self.state = RunState::Populating;
        let mut songs = Vec::new();
        let mut failures = Vec::new();
        let mut successful_artists = 0;

        for (index, artist) in lineup.iter().enumerate() {
            self.reporter.on_status(&format!("Processing {}...", artist));

            match self.add_artist(&playlist_id, artist, songs_per_artist).await {
                ArtistOutcome::Added { artist, tracks } => {
                    successful_artists += 1;
                    self.reporter
                        .on_status(&format!("Added {} songs for {}", tracks.len(), artist));
                    songs.extend(tracks.into_iter().map(|track| AddedSong {
                        artist: artist.clone(),
                        title: track.title,
                    }));
                }
                ArtistOutcome::Failed(failure) => {
                    self.reporter
                        .on_warning(&failure.artist, &failure.reason.to_string());
                    failures.push(failure);
                }
            }

            self.reporter
                .on_progress((index + 1) as f64 / lineup.len() as f64);
        }

        if successful_artists == 0 {
            return Err(PipelineError::NoSongsAdded {
                playlist_id,
                failures,
            });
        }

        Ok(RunResult {
            playlist_id,
            songs,
            successful_artists,
            failures,
        })
    }

    async fn create_playlist(
        &self,
        playlist_name: &str,
        songs_per_artist: usize,
    ) -> Result<String, PipelineError> {
        let playlist = NewPlaylist {
            title: playlist_name.to_string(),
            description: format!(
                "Top {} songs from each artist at {}",
                songs_per_artist, playlist_name
            ),
            visibility: Visibility::Private,
        };

        let playlist_id = self
            .service
            .create_playlist(&playlist)
            .await
            .map_err(PipelineError::PlaylistCreationFailed)?;

        if playlist_id.trim().is_empty() {
            return Err(PipelineError::PlaylistCreationFailed(
                ServiceError::MissingPlaylistId,
            ));
        }
        Ok(playlist_id)
    }

    async fn add_artist(
        &self,
        playlist_id: &str,
        query: &str,
        songs_per_artist: usize,
    ) -> ArtistOutcome {
        let failed = |reason| {
            ArtistOutcome::Failed(ArtistFailure {
                artist: query.to_string(),
                reason,
            })
        };

        let artist = match resolve::resolve_artist(self.service, self.limiter, query).await {
            Ok(Some(artist)) => artist,
            Ok(None) => return failed(FailureReason::ArtistNotFound),
            Err(e) => return failed(FailureReason::external(Stage::Resolve, &e)),
        };

        let tracks =
            match resolve::top_tracks(self.service, self.limiter, &artist, songs_per_artist).await
            {
                Ok(tracks) if tracks.is_empty() => return failed(FailureReason::NoTracksFound),
                Ok(tracks) => tracks,
                Err(e) => return failed(FailureReason::external(Stage::FetchTracks, &e)),
            };

        let track_ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        match self
            .service
            .add_tracks_to_playlist(playlist_id, &track_ids)
            .await
        {
            Ok(ack) if append_acknowledged(&ack) => ArtistOutcome::Added {
                artist: query.to_string(),
                tracks,
            },
            Ok(_) => failed(FailureReason::AppendNotAcknowledged),
            Err(e) => failed(FailureReason::external(Stage::Append, &e)),
        }
    }
}
