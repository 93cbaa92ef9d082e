use async_trait::async_trait;
use quiz_core::model::RawQuestion;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use super::config::{BatchRequest, TriviaConfig};
use super::response::parse_batch;
use super::source::QuestionSource;
use crate::error::QuizError;

/// Open Trivia DB `api.php` client.
#[derive(Clone, Debug)]
pub struct OpenTdbClient {
    client: Client,
    endpoint: Url,
}

impl OpenTdbClient {
    /// # Errors
    ///
    /// Returns `QuizError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &TriviaConfig) -> Result<Self, QuizError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Full request url for `request`, e.g. `.../api.php?amount=10&type=multiple`.
    #[must_use]
    pub fn request_url(&self, request: &BatchRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &request.amount().to_string());
            query.append_pair("type", request.kind().as_str());
            if let Some(category) = request.category() {
                query.append_pair("category", &category.to_string());
            }
            if let Some(difficulty) = request.difficulty() {
                query.append_pair("difficulty", difficulty.as_str());
            }
        }
        url
    }
}

#[async_trait]
impl QuestionSource for OpenTdbClient {
    async fn fetch_question_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<Vec<RawQuestion>, QuizError> {
        let url = self.request_url(request);
        info!(%url, amount = request.amount(), "fetching question batch");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "question provider returned an error status");
            return Err(QuizError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let batch = parse_batch(&body).inspect_err(|err| {
            warn!(error = %err, "question provider rejected the request");
        })?;

        info!(count = batch.len(), "question batch received");
        Ok(batch)
    }
}
