use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lineupcli::{
    cli, config, error,
    pipeline::{DEFAULT_SONGS_PER_ARTIST, MAX_ARTISTS},
    types::PkceToken,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Check that the stored authentication still works
    Check,

    /// Remove the stored authentication
    Logout,

    /// Create a playlist from a festival lineup
    Create(CreateOptions),

    /// Show the cleaned lineup without creating anything
    Sanitize(SanitizeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// File with one artist per line; reads stdin when omitted or `-`
    lineup: Option<PathBuf>,

    /// Name of the new playlist
    #[clap(long, short, default_value = "My Festival Playlist")]
    name: String,

    /// How many top songs to include for each artist
    #[clap(
        long,
        short,
        default_value_t = DEFAULT_SONGS_PER_ARTIST as u8,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    songs_per_artist: u8,

    /// Maximum number of artists taken from the lineup
    #[clap(
        long,
        default_value_t = MAX_ARTISTS as u8,
        value_parser = clap::value_parser!(u8).range(1..=50)
    )]
    max_artists: u8,
}

#[derive(Parser, Debug, Clone)]
pub struct SanitizeOptions {
    /// File with one artist per line; reads stdin when omitted or `-`
    lineup: Option<PathBuf>,

    /// Maximum number of artists taken from the lineup
    #[clap(
        long,
        default_value_t = MAX_ARTISTS as u8,
        value_parser = clap::value_parser!(u8).range(1..=50)
    )]
    max_artists: u8,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Check => cli::check().await,
        Command::Logout => cli::logout().await,
        Command::Create(opt) => {
            cli::create(
                opt.lineup,
                opt.name,
                opt.songs_per_artist as usize,
                opt.max_artists as usize,
            )
            .await
        }
        Command::Sanitize(opt) => cli::sanitize(opt.lineup, opt.max_artists as usize).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
