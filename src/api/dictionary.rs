//! Public dictionary lookup used as an alternative word validator.
//!
//! `GET {base}/{word}` answers with a JSON array of entries for known words and
//! `404` for unknown ones.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::http::{check_status, decode};
use super::WordValidator;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: Client,
    base: Url,
}

impl DictionaryClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base })
    }

    /// Lookup URL for a word, with the word percent-encoded as one path segment.
    pub fn lookup_url(&self, word: &str) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(&word.to_lowercase());
        Ok(url)
    }
}

#[async_trait]
impl WordValidator for DictionaryClient {
    async fn validate(&self, word: &str) -> Result<bool, ApiError> {
        let url = self.lookup_url(word)?;
        let path = url.path().to_string();
        tracing::debug!(%url, "dictionary lookup");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                path: path.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let entries: Vec<serde_json::Value> = decode(&path, check_status(&path, response)?).await?;
        Ok(!entries.is_empty())
    }
}
