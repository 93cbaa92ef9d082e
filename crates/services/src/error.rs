//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SessionOpError};

use crate::trivia::ProviderStatus;

/// User-facing message shown whenever a batch cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch quiz. Please try again.";

/// Errors emitted while reading quiz configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid question amount: {raw}")]
    InvalidAmount { raw: String },
    #[error("question amount must be between 1 and {max}, got {amount}")]
    AmountOutOfRange { amount: u32, max: u8 },
    #[error("invalid category id: {raw}")]
    InvalidCategory { raw: String },
    #[error("invalid difficulty: {raw} (expected easy, medium or hard)")]
    InvalidDifficulty { raw: String },
    #[error("invalid question type: {raw} (expected multiple or boolean)")]
    InvalidKind { raw: String },
    #[error("invalid request timeout: {raw}")]
    InvalidTimeout { raw: String },
    #[error("invalid base url {raw}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
}

/// Errors emitted by the question source and the quiz lifecycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question provider reported: {0}")]
    Protocol(ProviderStatus),
    #[error("question provider returned no questions")]
    EmptyBatch,
    #[error("malformed question batch: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Preparation(#[from] QuestionError),
    #[error(transparent)]
    InvalidOperation(#[from] SessionOpError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Coarse classification used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizErrorKind {
    /// The request never produced a response body.
    FetchTransport,
    /// The provider answered, but not with a usable batch.
    FetchProtocol,
    /// An operation was called outside the state that allows it.
    InvalidOperation,
    Configuration,
}

impl QuizError {
    #[must_use]
    pub fn kind(&self) -> QuizErrorKind {
        match self {
            QuizError::Transport(_) => QuizErrorKind::FetchTransport,
            QuizError::HttpStatus(_)
            | QuizError::Protocol(_)
            | QuizError::EmptyBatch
            | QuizError::Decode(_)
            | QuizError::Preparation(_) => QuizErrorKind::FetchProtocol,
            QuizError::InvalidOperation(_) => QuizErrorKind::InvalidOperation,
            QuizError::Config(_) => QuizErrorKind::Configuration,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            QuizErrorKind::FetchTransport | QuizErrorKind::FetchProtocol => FETCH_FAILED_MESSAGE,
            QuizErrorKind::InvalidOperation => "That action is not available right now.",
            QuizErrorKind::Configuration => "Quiz settings are invalid.",
        }
    }
}
