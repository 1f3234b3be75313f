use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Broad category of an external call failure.
///
/// Callers pick user-facing remediation from this value instead of
/// inspecting error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
    RateLimit,
    Service,
}

/// Failure of a single call against the music service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("rate limited by service (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    #[error("service answered with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("playlist was created without an identifier")]
    MissingPlaylistId,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unauthorized(_) => ErrorKind::Auth,
            ServiceError::RateLimited { .. } => ErrorKind::RateLimit,
            ServiceError::Status { .. } | ServiceError::MissingPlaylistId => ErrorKind::Service,
            ServiceError::Http(err) => match err.status() {
                Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => ErrorKind::Auth,
                Some(StatusCode::TOO_MANY_REQUESTS) => ErrorKind::RateLimit,
                Some(_) => ErrorKind::Service,
                None if err.is_connect() || err.is_timeout() || err.is_request() => {
                    ErrorKind::Network
                }
                None => ErrorKind::Service,
            },
        }
    }
}

/// Which per-artist step an external call failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    FetchTracks,
    Append,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "artist search",
            Stage::FetchTracks => "track lookup",
            Stage::Append => "adding tracks",
        };
        f.write_str(name)
    }
}

/// Why one artist contributed no tracks to the playlist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("no artist found")]
    ArtistNotFound,

    #[error("no songs found")]
    NoTracksFound,

    #[error("{stage} failed: {message}")]
    ExternalCall {
        stage: Stage,
        kind: ErrorKind,
        message: String,
    },

    #[error("songs might not have been added")]
    AppendNotAcknowledged,
}

impl FailureReason {
    pub(crate) fn external(stage: Stage, err: &ServiceError) -> Self {
        FailureReason::ExternalCall {
            stage,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFailure {
    pub artist: String,
    pub reason: FailureReason,
}

impl fmt::Display for ArtistFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.artist, self.reason)
    }
}

/// Run-level failures. Per-artist problems never end up here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to create playlist: {0}")]
    PlaylistCreationFailed(#[source] ServiceError),

    /// The remote playlist exists but stays empty; it is not removed.
    #[error("no songs could be added to the playlist")]
    NoSongsAdded {
        playlist_id: String,
        failures: Vec<ArtistFailure>,
    },
}

impl PipelineError {
    /// Error kind to base remediation hints on, if the failure came from the service.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PipelineError::PlaylistCreationFailed(err) => Some(err.kind()),
            PipelineError::NoSongsAdded { failures, .. } => {
                failures.iter().find_map(|f| match f.reason {
                    FailureReason::ExternalCall { kind, .. } => Some(kind),
                    _ => None,
                })
            }
        }
    }
}
