//! # Spotify Integration Module
//!
//! Spotify Web API access for lineupcli: the OAuth 2.0 PKCE sign-in and a
//! [`SpotifyClient`] that implements the pipeline's
//! [`MusicService`](crate::pipeline::MusicService).
//!
//! ```text
//! CLI
//!  ↓
//! Pipeline (MusicService trait)
//!  ↓
//! SpotifyClient ── TokenManager (refresh on expiry)
//!  ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user, used for the playlist owner and `check`
//! - `GET /search?type=artist` - Artist lookup, first hit only
//! - `GET /artists/{id}/top-tracks` - Up to ten tracks in Spotify's order
//! - `POST /users/{user_id}/playlists` - Create the private playlist
//! - `POST /playlists/{playlist_id}/tracks` - Append one artist's tracks
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! Non-success answers are mapped to
//! [`ServiceError`](crate::pipeline::ServiceError): 401/403 become
//! `Unauthorized`, 429 becomes `RateLimited` with the `Retry-After` value,
//! everything else `Status`. Nothing is retried here; spacing of calls is
//! the pipeline's rate limiter's job.

pub mod auth;
mod client;

pub use client::SpotifyClient;
