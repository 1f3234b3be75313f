//! Festival Lineup Playlist CLI Library
//!
//! This library turns a free-text festival lineup into a private Spotify
//! playlist with the top songs of every artist. It includes the playlist
//! pipeline, the Spotify client it runs against, the sign-in flow and the
//! command-line glue.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token caching and refresh
//! - `pipeline` - Lineup sanitizing, artist/track lookup and playlist assembly
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Spotify wire types and table rows
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use lineupcli::pipeline::{self, NoopReporter, RateLimiter};
//! use lineupcli::spotify::SpotifyClient;
//!
//! #[tokio::main]
//! async fn main() -> lineupcli::Res<()> {
//!     lineupcli::config::load_env().await?;
//!     let client = SpotifyClient::connect().await?;
//!     let (lineup, _warnings) = pipeline::sanitize("Daft Punk\nRoyksopp", 50);
//!     let limiter = RateLimiter::default();
//!     pipeline::build_playlist(&lineup, "Weekend", 3, &client, &NoopReporter, &limiter).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI glue, configuration and sign-in code. The pipeline
/// itself returns typed errors from [`pipeline`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line marked with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Creating playlist '{}'", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line marked with a green checkmark for completed operations.
///
/// ```
/// success!("Added {} songs for {}", count, artist);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line to stderr and exits the process with status 1.
///
/// Only for fatal paths of CLI commands; library code returns errors
/// instead. Evaluates to `!`, so it can end a `match` arm that otherwise
/// produces a value.
///
/// ```
/// let client = match SpotifyClient::connect().await {
///     Ok(client) => client,
///     Err(e) => error!("Cannot connect to Spotify. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line marked with a yellow `!` for recoverable problems, such as
/// an artist that could not be added.
///
/// ```
/// warning!("{}: no artist found", artist);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
