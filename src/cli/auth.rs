use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error, info,
    management::TokenManager,
    spotify::{self, SpotifyClient},
    success,
    types::PkceToken,
    utils, warning,
};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(shared_state).await {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}

/// Verifies the stored credentials against the API.
pub async fn check() {
    let client = match SpotifyClient::connect().await {
        Ok(client) => client,
        Err(e) => error!("Authentication has expired or is missing. Err: {}", e),
    };

    match client.current_user().await {
        Ok(user) => {
            success!("Authentication is valid!");
            info!(
                "Signed in as {}",
                user.display_name.as_deref().unwrap_or(&user.id)
            );
            info!(
                "Last authenticated: {}",
                utils::format_timestamp(client.obtained_at().await)
            );
        }
        Err(e) => error!("Authentication error: {}", e),
    }
}

pub async fn logout() {
    match TokenManager::clear().await {
        Ok(true) => success!("Logged out, stored token removed."),
        Ok(false) => warning!("Not logged in, nothing to remove."),
        Err(e) => error!("Failed to remove stored token. Err: {}", e),
    }
}
