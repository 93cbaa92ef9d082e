use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::{Difficulty, RawQuestion};

use super::config::BatchRequest;
use super::response::ProviderStatus;
use crate::error::QuizError;

/// Produces one batch of raw questions per call.
///
/// Implementations make a single attempt; retrying is left to an explicit restart.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_question_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<Vec<RawQuestion>, QuizError>;
}

/// Serves a fixed batch (or a fixed provider failure) from memory.
#[derive(Clone, Debug)]
pub struct StaticQuestionSource {
    outcome: Result<Vec<RawQuestion>, ProviderStatus>,
    calls: Arc<AtomicUsize>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(batch: Vec<RawQuestion>) -> Self {
        Self {
            outcome: Ok(batch),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn failing(status: ProviderStatus) -> Self {
        Self {
            outcome: Err(status),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Built-in offline batch.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            RawQuestion::new(
                "What is the capital of Australia?",
                "Canberra",
                ["Sydney", "Melbourne", "Perth"],
            )
            .with_category("Geography")
            .with_difficulty(Difficulty::Easy),
            RawQuestion::new(
                "Which planet is known as the &quot;Red Planet&quot;?",
                "Mars",
                ["Venus", "Jupiter", "Mercury"],
            )
            .with_category("Science &amp; Nature")
            .with_difficulty(Difficulty::Easy),
            RawQuestion::new(
                "Who composed &quot;The Four Seasons&quot;?",
                "Antonio Vivaldi",
                ["Johann Sebastian Bach", "Wolfgang Amadeus Mozart", "Fr&eacute;d&eacute;ric Chopin"],
            )
            .with_category("Entertainment: Music")
            .with_difficulty(Difficulty::Medium),
            RawQuestion::new(
                "In what year did the Berlin Wall fall?",
                "1989",
                ["1987", "1991", "1985"],
            )
            .with_category("History")
            .with_difficulty(Difficulty::Medium),
            RawQuestion::new(
                "What is the smallest prime number that isn&#039;t odd?",
                "2",
                ["1", "3", "0"],
            )
            .with_category("Science: Mathematics")
            .with_difficulty(Difficulty::Hard),
        ])
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_question_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<Vec<RawQuestion>, QuizError> {
        self.calls.fetch_add(1, Ordering::AcqRel);
        match &self.outcome {
            Ok(batch) => Ok(batch
                .iter()
                .take(usize::from(request.amount()))
                .cloned()
                .collect()),
            Err(status) => Err(QuizError::Protocol(*status)),
        }
    }
}
