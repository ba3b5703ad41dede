//! This module provides the CheapShark deals client and reads the deals
//! payload into [`RawDeal`]s.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::{
    StdResult,
    models::RawDeal,
    steam::{self, FetchError},
    util::ResLog,
};

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_base: Arc<url::Url>,
}

impl Client {
    pub fn new(api_base: url::Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: Arc::new(api_base),
        }
    }

    fn deals_request(&self, page_size: u32) -> StdResult<reqwest::RequestBuilder, FetchError> {
        let url = self.api_base.join("api/1.0/deals")?;
        let page_size = page_size.to_string();
        let query = [("onSale", "1"), ("pageSize", page_size.as_str())];

        Ok(self.http.get(url).query(&query))
    }

    /// `/deals` answers with a bare array; it comes back wrapped as
    /// `{ "data": [...] }`, the shape [`deals_from_payload`] reads.
    #[tracing::instrument(level = "debug", err)]
    pub async fn fetch_deals(&self, page_size: u32) -> StdResult<Value, FetchError> {
        let res = self.deals_request(page_size)?.send().await?;
        let body = steam::read_json(res).await?;

        Ok(json!({ "data": body }))
    }
}

/// Reads `data` from a deals payload. Entries that are not objects are
/// skipped; a missing or non-list `data` yields no deals.
pub fn deals_from_payload(payload: Option<&Value>) -> Vec<RawDeal> {
    let Some(data) = payload.and_then(|p| p.get("data")).and_then(Value::as_array) else {
        return Vec::new();
    };

    data.iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            if !item.is_object() {
                warn!(idx, "Skipping deal that is not an object");
                return None;
            }
            RawDeal::deserialize(item).twarn().ok()
        })
        .collect()
}
