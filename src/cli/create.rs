use std::path::PathBuf;

use tabled::Table;
use tokio::io::AsyncReadExt;

use crate::{
    Res, config, error, info,
    pipeline::{self, ErrorKind, Lineup, PipelineError, RateLimiter, RunResult},
    spotify::SpotifyClient,
    success,
    types::SongTableRow,
    utils, warning,
};

use super::report::ConsoleReporter;

pub async fn create(
    input: Option<PathBuf>,
    playlist_name: String,
    songs_per_artist: usize,
    max_artists: usize,
) {
    let lineup = match load_lineup(input, max_artists).await {
        Ok(lineup) => lineup,
        Err(e) => error!("Cannot read lineup. Err: {}", e),
    };

    if lineup.is_empty() {
        error!("No artists left in the lineup. Enter one artist name per line.");
    }

    let client = match SpotifyClient::connect().await {
        Ok(client) => client,
        Err(e) => error!("Cannot connect to Spotify. Err: {}", e),
    };

    info!(
        "Creating playlist '{}' with {} songs from each of {} artists",
        playlist_name,
        songs_per_artist,
        lineup.len()
    );

    let limiter = RateLimiter::new(config::min_call_interval());
    let reporter = ConsoleReporter::new();

    match pipeline::build_playlist(
        &lineup,
        &playlist_name,
        songs_per_artist,
        &client,
        &reporter,
        &limiter,
    )
    .await
    {
        Ok(result) => show_results(&result),
        Err(e) => show_failure(&e),
    }
}

/// Reads and sanitizes the lineup, printing every sanitization warning.
pub(super) async fn load_lineup(input: Option<PathBuf>, max_artists: usize) -> Res<Lineup> {
    let text = read_input(input).await?;
    let (lineup, warnings) = pipeline::sanitize(&text, max_artists);
    for w in &warnings {
        warning!("{}", w);
    }
    Ok(lineup)
}

async fn read_input(input: Option<PathBuf>) -> Res<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(async_fs::read_to_string(path).await?),
        _ => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

fn show_results(result: &RunResult) {
    success!(
        "Successfully created playlist with songs from {} artists!",
        result.successful_artists
    );
    info!("Open playlist: {}", utils::playlist_url(&result.playlist_id));
    info!(
        "Songs added: {}\tArtists: {}",
        result.songs.len(),
        utils::count_artists(&result.songs)
    );

    let rows: Vec<SongTableRow> = result
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| SongTableRow {
            position: i + 1,
            artist: song.artist.clone(),
            title: song.title.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if !result.failures.is_empty() {
        warning!("Skipped {} artists:", result.failures.len());
        for failure in &result.failures {
            warning!("{}", failure);
        }
    }
}

fn show_failure(err: &PipelineError) -> ! {
    warning!("Playlist creation failed: {}", err);

    if let PipelineError::NoSongsAdded {
        playlist_id,
        failures,
    } = err
    {
        for failure in failures {
            warning!("{}", failure);
        }
        warning!(
            "The empty playlist was left in your library: {}",
            utils::playlist_url(playlist_id)
        );
    }

    for hint in remediation_hints(err.kind()) {
        info!("{}", hint);
    }
    error!("You can try again after addressing the issue above.");
}

/// Suggestions for the user depending on what kind of failure ended the run.
pub fn remediation_hints(kind: Option<ErrorKind>) -> &'static [&'static str] {
    match kind {
        Some(ErrorKind::Auth) => &[
            "This appears to be an authentication issue. Please try:",
            "1. Running lineupcli logout and lineupcli auth again",
            "2. Checking that the app was granted the playlist-modify-private scope",
        ],
        Some(ErrorKind::Network) => &[
            "This appears to be a network issue. Please try:",
            "1. Checking your internet connection",
            "2. Trying again in a few minutes",
        ],
        Some(ErrorKind::RateLimit) => &[
            "You might be hitting Spotify's rate limits. Please try:",
            "1. Waiting a few minutes before trying again",
            "2. Reducing the number of songs per artist",
            "3. Processing fewer artists at once",
        ],
        Some(ErrorKind::Service) | None => &[
            "Please check:",
            "- Your authentication is still valid (lineupcli check)",
            "- The artists' names are correct",
            "- Your internet connection is stable",
        ],
    }
}
