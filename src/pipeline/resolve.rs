use super::{
    error::ServiceError,
    limiter::RateLimiter,
    service::{Artist, MusicService, Track},
};

pub const MAX_SONGS_PER_ARTIST: usize = 10;
pub const DEFAULT_SONGS_PER_ARTIST: usize = 3;

/// Looks up the artist behind a lineup query.
///
/// The first search hit wins, there is no ranking or name comparison.
/// `Ok(None)` means the catalog has no match, which is common for
/// festival lineups and not an error.
pub async fn resolve_artist(
    service: &dyn MusicService,
    limiter: &RateLimiter,
    query: &str,
) -> Result<Option<Artist>, ServiceError> {
    limiter.throttle().await;
    let hits = service.search_artists(query).await?;
    Ok(hits.into_iter().next())
}

/// Up to `limit` of the artist's tracks, in the order the service lists them.
pub async fn top_tracks(
    service: &dyn MusicService,
    limiter: &RateLimiter,
    artist: &Artist,
    limit: usize,
) -> Result<Vec<Track>, ServiceError> {
    limiter.throttle().await;
    let mut tracks = service.artist_tracks(&artist.id).await?;
    tracks.truncate(limit.clamp(1, MAX_SONGS_PER_ARTIST));
    Ok(tracks)
}
