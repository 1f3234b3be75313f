//! Configuration management for the lineup playlist builder.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Only the CLI layer reads them; the
//! playlist pipeline receives everything as plain parameters.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Spotify defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, pipeline::DEFAULT_MIN_CALL_INTERVAL};

/// Loads environment variables from `lineupcli/.env` in the local data directory.
///
/// The directory is created when missing so users have a place to put the
/// file. A missing `.env` is not an error, since every value can also be
/// supplied through the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/lineupcli/.env`
/// - macOS: `~/Library/Application Support/lineupcli/.env`
/// - Windows: `%LOCALAPPDATA%/lineupcli/.env`
///
/// # Errors
///
/// Fails when the directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.exists() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything the CLI stores locally (`.env`, token cache).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lineupcli");
    path
}

fn required(key: &str) -> Res<String> {
    env::var(key).map_err(|_| format!("{} must be set", key).into())
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", "127.0.0.1:8888")
}

/// Spotify user that owns created playlists (`SPOTIFY_USER_ID`).
///
/// Optional; when unset the client asks the API for the current user.
pub fn spotify_user() -> Option<String> {
    env::var("SPOTIFY_USER_ID").ok().filter(|u| !u.is_empty())
}

/// Market used for top track lookups (`SPOTIFY_MARKET`), e.g. `DE`.
pub fn spotify_market() -> Option<String> {
    env::var("SPOTIFY_MARKET").ok().filter(|m| !m.is_empty())
}

/// Client ID of the registered Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Fails when the variable is not set.
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`). Must match the one
/// registered with the Spotify application.
pub fn spotify_redirect_uri() -> String {
    with_default(
        "SPOTIFY_API_REDIRECT_URI",
        &format!("http://{}/callback", server_addr()),
    )
}

/// Permissions requested during authentication (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", "playlist-modify-private")
}

pub fn spotify_apiauth_url() -> String {
    with_default(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apitoken_url() -> String {
    with_default(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Minimum spacing between lookup calls (`LINEUP_MIN_CALL_INTERVAL_MS`).
///
/// Unparsable values fall back to the default of 100 ms.
pub fn min_call_interval() -> Duration {
    env::var("LINEUP_MIN_CALL_INTERVAL_MS")
        .ok()
        .and_then(|ms| ms.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_MIN_CALL_INTERVAL)
}
