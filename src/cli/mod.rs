//! # CLI Module
//!
//! User-facing commands of lineupcli. Each command wires configuration,
//! the Spotify client and the playlist pipeline together and takes care of
//! console output; none of the pipeline logic lives here.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify sign-in through OAuth 2.0 PKCE
//! - [`check`] - Verifies the stored token against the API
//! - [`logout`] - Removes the stored token
//! - [`create`] - Builds a playlist from a lineup file or stdin
//! - [`sanitize`] - Shows how a lineup would be cleaned, without any API calls
//!
//! ## Usage
//!
//! ```bash
//! lineupcli auth
//! lineupcli sanitize lineup.txt
//! lineupcli create lineup.txt --name "Festival 2026" --songs-per-artist 5
//! cat lineup.txt | lineupcli create
//! ```
//!
//! ## Error Presentation
//!
//! Per-artist problems are shown as warnings while the run continues. A
//! failed run ends with remediation hints picked from the failure's
//! [`ErrorKind`](crate::pipeline::ErrorKind) and exit status 1.

mod auth;
mod create;
mod lineup;
mod report;

pub use auth::auth;
pub use auth::check;
pub use auth::logout;
pub use create::create;
pub use create::remediation_hints;
pub use lineup::sanitize;
pub use report::ConsoleReporter;
