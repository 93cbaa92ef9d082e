use std::sync::Arc;

use quiz_core::model::{Question, prepare};
use tracing::debug;

use super::engine::{LoadOutcome, LoadTicket, QuizEngine};
use crate::error::QuizError;
use crate::trivia::{BatchRequest, QuestionSource};

/// Fetches and prepares question batches for a `QuizEngine`.
///
/// Callers that cannot hold the engine across an await (UI signals) use
/// `QuizEngine::start`, then `fetch_batch`, then `QuizEngine::finish_load`.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    request: BatchRequest,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, request: BatchRequest) -> Self {
        Self { source, request }
    }

    #[must_use]
    pub fn request(&self) -> &BatchRequest {
        &self.request
    }

    /// Fetch one batch and prepare it for play.
    ///
    /// # Errors
    ///
    /// Returns the source's `QuizError`, `QuizError::EmptyBatch` when the batch
    /// has no questions, or `QuizError::Preparation` for a malformed question.
    pub async fn fetch_batch(&self) -> Result<Vec<Question>, QuizError> {
        let raw = self.source.fetch_question_batch(&self.request).await?;
        if raw.is_empty() {
            return Err(QuizError::EmptyBatch);
        }
        let questions = prepare(&raw)?;
        debug!(count = questions.len(), "question batch prepared");
        Ok(questions)
    }

    /// Complete the load identified by `ticket`.
    pub async fn load(&self, engine: &mut QuizEngine, ticket: LoadTicket) -> LoadOutcome {
        let result = self.fetch_batch().await;
        engine.finish_load(ticket, result)
    }

    /// Start the quiz and wait for its first batch.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` unless the engine is idle. Fetch
    /// failures are not errors here; they leave the engine in its error state.
    pub async fn start(&self, engine: &mut QuizEngine) -> Result<LoadOutcome, QuizError> {
        let ticket = engine.start()?;
        Ok(self.load(engine, ticket).await)
    }

    /// Restart from an error or finished quiz and wait for the new batch.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` while idle or loading.
    pub async fn restart(&self, engine: &mut QuizEngine) -> Result<LoadOutcome, QuizError> {
        let ticket = engine.restart()?;
        Ok(self.load(engine, ticket).await)
    }
}
