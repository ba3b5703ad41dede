use std::sync::Arc;

use derivative::Derivative;
use serde_json::Value;

use crate::StdResult;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(url::ParseError),
    #[error("JSON Deserialization error: {0}")]
    JsonDeserialize(serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Http(error)
    }
}

impl From<url::ParseError> for FetchError {
    fn from(error: url::ParseError) -> Self {
        FetchError::InvalidUrl(error)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::JsonDeserialize(error)
    }
}

/// Reads a response body as JSON, keeping decode failures apart from
/// transport failures.
pub async fn read_json(res: reqwest::Response) -> StdResult<Value, FetchError> {
    let body = res.error_for_status()?.text().await?;
    decode_json(&body)
}

fn decode_json(body: &str) -> StdResult<Value, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Steam Web API client. Responses are handed back untouched; reading them
/// is [`crate::library`]'s job.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Client {
    #[derivative(Debug = "ignore")]
    http: reqwest::Client,
    api_base: Arc<url::Url>,
    #[derivative(Debug = "ignore")]
    api_key: Arc<String>,
    steam_id: Arc<String>,
}

impl Client {
    pub fn new(api_base: url::Url, api_key: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: Arc::new(api_base),
            api_key: Arc::new(api_key.into()),
            steam_id: Arc::new(steam_id.into()),
        }
    }

    fn owned_games_request(&self) -> StdResult<reqwest::RequestBuilder, FetchError> {
        let url = self.api_base.join("IPlayerService/GetOwnedGames/v1/")?;
        let query = [
            ("key", self.api_key.as_str()),
            ("steamid", self.steam_id.as_str()),
            ("include_played_free_games", "1"),
            ("format", "json"),
        ];

        Ok(self.http.get(url).query(&query))
    }

    fn wishlist_request(&self) -> StdResult<reqwest::RequestBuilder, FetchError> {
        let url = self.api_base.join("IWishlistService/GetWishlist/v1/")?;
        let query = [
            ("key", self.api_key.as_str()),
            ("steamid", self.steam_id.as_str()),
        ];

        Ok(self.http.get(url).query(&query))
    }

    #[tracing::instrument(level = "debug", err)]
    pub async fn fetch_owned_games(&self) -> StdResult<Value, FetchError> {
        let res = self.owned_games_request()?.send().await?;
        read_json(res).await
    }

    #[tracing::instrument(level = "debug", err)]
    pub async fn fetch_wishlist(&self) -> StdResult<Value, FetchError> {
        let res = self.wishlist_request()?.send().await?;
        read_json(res).await
    }
}
