use async_trait::async_trait;

use super::error::ServiceError;

/// Artist as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// A single song of an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
}

/// Authenticated access to a music streaming service.
///
/// Implementations hold their own credentials; the pipeline only calls
/// these four operations and never retries them.
#[async_trait]
pub trait MusicService: Send + Sync {
    /// Artists matching `query`, best match first.
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, ServiceError>;

    /// The artist's tracks in the order the service ranks them.
    async fn artist_tracks(&self, artist_id: &str) -> Result<Vec<Track>, ServiceError>;

    /// Creates a playlist and returns its identifier. The identifier may be
    /// empty when the service gives an ambiguous answer.
    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, ServiceError>;

    /// Appends tracks to a playlist. `None` means the service sent no
    /// acknowledgement.
    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<Option<String>, ServiceError>;
}
