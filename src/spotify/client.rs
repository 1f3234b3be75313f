use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    pipeline::{Artist, MusicService, NewPlaylist, ServiceError, Track, Visibility},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, SearchArtistsResponse, TopTracksResponse,
    },
};

/// Only the first search hit is ever used.
const SEARCH_LIMIT: &str = "1";

/// Spotify Web API access for a signed-in user.
///
/// Every request fetches a valid access token from the [`TokenManager`],
/// which refreshes it transparently. Requests are never retried.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    user_id: String,
    market: Option<String>,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    /// Builds a client from the cached token and the environment.
    ///
    /// Uses `SPOTIFY_USER_ID` as playlist owner when set, otherwise asks
    /// the API who is signed in.
    pub async fn connect() -> Res<Self> {
        let tokens = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token, please run lineupcli auth: {}", e))?;

        let mut client = Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            user_id: String::new(),
            market: config::spotify_market(),
            tokens: Mutex::new(tokens),
        };

        client.user_id = match config::spotify_user() {
            Some(user_id) => user_id,
            None => client.current_user().await?.id,
        };
        Ok(client)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub async fn obtained_at(&self) -> u64 {
        self.tokens.lock().await.current_token().obtained_at
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ServiceError> {
        let request = self.http.get(format!("{}/me", self.api_url));
        self.send_json(request).await
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ServiceError> {
        let token = self
            .tokens
            .lock()
            .await
            .get_valid_token()
            .await
            .map_err(|e| ServiceError::Unauthorized(e.to_string()))?;
        Ok(request.bearer_auth(token))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = self.authorize(request).await?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(ServiceError::RateLimited { retry_after });
    }

    let message = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ServiceError::Unauthorized(message));
    }

    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, ServiceError> {
        let request = self.http.get(format!("{}/search", self.api_url)).query(&[
            ("q", query),
            ("type", "artist"),
            ("limit", SEARCH_LIMIT),
        ]);

        let res: SearchArtistsResponse = self.send_json(request).await?;
        Ok(res
            .artists
            .items
            .into_iter()
            .map(|a| Artist {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn artist_tracks(&self, artist_id: &str) -> Result<Vec<Track>, ServiceError> {
        let mut request = self
            .http
            .get(format!("{}/artists/{}/top-tracks", self.api_url, artist_id));
        if let Some(market) = &self.market {
            request = request.query(&[("market", market)]);
        }

        let res: TopTracksResponse = self.send_json(request).await?;
        Ok(res
            .tracks
            .into_iter()
            .map(|t| Track {
                id: t.id,
                title: t.name,
            })
            .collect())
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<String, ServiceError> {
        let body = CreatePlaylistRequest {
            name: playlist.title.clone(),
            description: playlist.description.clone(),
            public: playlist.visibility == Visibility::Public,
            collaborative: false,
        };
        let request = self
            .http
            .post(format!("{}/users/{}/playlists", self.api_url, self.user_id))
            .json(&body);

        let res: CreatePlaylistResponse = self.send_json(request).await?;
        Ok(res.id.unwrap_or_default())
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<Option<String>, ServiceError> {
        let body = AddTrackToPlaylistRequest {
            uris: track_ids
                .iter()
                .map(|id| format!("spotify:track:{}", id))
                .collect(),
        };
        let request = self
            .http
            .post(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
            .json(&body);

        let res: AddTrackToPlaylistResponse = self.send_json(request).await?;
        Ok(res.snapshot_id)
    }
}
