//! # API Module
//!
//! HTTP endpoints of the short-lived local server that completes the
//! Spotify sign-in.
//!
//! - [`callback`] - Receives the authorization code from Spotify, exchanges
//!   it together with the PKCE verifier for a token and hands the token back
//!   to the waiting `auth` command through shared state.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use lineupcli::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback));
//! ```

mod callback;

pub use callback::callback;
