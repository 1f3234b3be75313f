use std::path::PathBuf;

use tabled::Table;

use crate::{error, success, types::LineupTableRow};

use super::create::load_lineup;

/// Prints the cleaned lineup without touching Spotify.
pub async fn sanitize(input: Option<PathBuf>, max_artists: usize) {
    let lineup = match load_lineup(input, max_artists).await {
        Ok(lineup) => lineup,
        Err(e) => error!("Cannot read lineup. Err: {}", e),
    };

    if lineup.is_empty() {
        error!("No artists left in the lineup. Enter one artist name per line.");
    }

    let rows: Vec<LineupTableRow> = lineup
        .iter()
        .enumerate()
        .map(|(i, query)| LineupTableRow {
            position: i + 1,
            query: query.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    success!("{} artists ready for a playlist", lineup.len());
}
