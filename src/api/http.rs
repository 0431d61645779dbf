//! reqwest client for the word/score backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    ScoreApi, ScoreSubmission, ValidationRequest, ValidationResponse, WordApi, WordRecord,
    WordValidator, ALL_WORDS_PATH, RANDOM_WORD_PATH, SAVE_SCORE_PATH, TOP_SCORES_PATH,
    VALIDATE_PATH,
};
use crate::error::ApiError;
use crate::state::scores::LeaderboardEntry;

/// Backend client. Cloning shares the underlying connection pool.
///
/// No request timeout is set; calls settle whenever the transport does.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|source| request_error(path, source))?;
        decode(path, check_status(path, response)?).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|source| request_error(path, source))?;
        check_status(path, response)
    }
}

fn request_error(path: &str, source: reqwest::Error) -> ApiError {
    ApiError::Request {
        path: path.to_string(),
        source,
    }
}

pub(crate) fn check_status(path: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(
    path: &str,
    response: Response,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|source| request_error(path, source))
}

#[async_trait]
impl WordApi for HttpApi {
    async fn all_words(&self) -> Result<Vec<WordRecord>, ApiError> {
        self.get_json(ALL_WORDS_PATH).await
    }

    async fn random_word(&self) -> Result<WordRecord, ApiError> {
        self.get_json(RANDOM_WORD_PATH).await
    }
}

#[async_trait]
impl WordValidator for HttpApi {
    async fn validate(&self, word: &str) -> Result<bool, ApiError> {
        let response = self
            .post_json(VALIDATE_PATH, &ValidationRequest { word })
            .await?;
        let body: ValidationResponse = decode(VALIDATE_PATH, response).await?;
        Ok(body.valid)
    }
}

#[async_trait]
impl ScoreApi for HttpApi {
    async fn save_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
        self.post_json(SAVE_SCORE_PATH, submission).await?;
        Ok(())
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.get_json(TOP_SCORES_PATH).await
    }
}
