//! # Playlist Pipeline
//!
//! Turns a cleaned lineup into a populated playlist on a music service.
//!
//! ```text
//! lineup text
//!     ↓ sanitize
//! Lineup
//!     ↓ for each artist: throttle → search → throttle → top tracks → append
//! RunResult | PipelineError
//! ```
//!
//! The pipeline owns no credentials and prints nothing. It talks to the
//! service through [`MusicService`] and announces progress through a
//! [`Reporter`]. Artists are handled strictly one after another so the
//! playlist order follows the lineup, and a single [`RateLimiter`] spaces
//! the lookup calls.
//!
//! Per-artist problems (unknown artist, no tracks, failed calls) are
//! collected as [`ArtistFailure`]s and never stop the run. Only a failed
//! playlist creation or a run without a single added artist is reported as
//! a [`PipelineError`].

mod assemble;
mod error;
mod limiter;
mod reporter;
mod resolve;
mod sanitize;
mod service;

pub use assemble::{AddedSong, ArtistOutcome, PlaylistAssembler, RunResult, RunState};
pub use error::{ArtistFailure, ErrorKind, FailureReason, PipelineError, ServiceError, Stage};
pub use limiter::{DEFAULT_MIN_CALL_INTERVAL, RateLimiter};
pub use reporter::{NoopReporter, Reporter};
pub use resolve::{DEFAULT_SONGS_PER_ARTIST, MAX_SONGS_PER_ARTIST, resolve_artist, top_tracks};
pub use sanitize::{
    DropReason, Lineup, MAX_ARTISTS, MAX_QUERY_CHARS, MIN_QUERY_CHARS, SanitizeWarning, sanitize,
};
pub use service::{Artist, MusicService, NewPlaylist, Track, Visibility};

/// Runs one playlist build with a fresh assembler.
pub async fn build_playlist(
    lineup: &Lineup,
    playlist_name: &str,
    songs_per_artist: usize,
    service: &dyn MusicService,
    reporter: &dyn Reporter,
    limiter: &RateLimiter,
) -> Result<RunResult, PipelineError> {
    PlaylistAssembler::new(service, reporter, limiter)
        .run(lineup, playlist_name, songs_per_artist)
        .await
}
