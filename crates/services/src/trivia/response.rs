use std::fmt;

use quiz_core::model::{Difficulty, QuestionKind, RawQuestion};
use serde::Deserialize;

use crate::error::QuizError;

/// Non-success `response_code` values reported by Open Trivia DB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderStatus {
    /// Not enough questions for the requested parameters.
    NoResults,
    InvalidParameter,
    TokenNotFound,
    /// The session token has served every question for the query.
    TokenEmpty,
    RateLimited,
    Unknown(u8),
}

impl ProviderStatus {
    /// Maps a provider code; `0` means success and yields `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::NoResults),
            2 => Some(Self::InvalidParameter),
            3 => Some(Self::TokenNotFound),
            4 => Some(Self::TokenEmpty),
            5 => Some(Self::RateLimited),
            other => Some(Self::Unknown(other)),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::NoResults => 1,
            Self::InvalidParameter => 2,
            Self::TokenNotFound => 3,
            Self::TokenEmpty => 4,
            Self::RateLimited => 5,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => f.write_str("no questions match the requested parameters"),
            Self::InvalidParameter => f.write_str("invalid request parameter"),
            Self::TokenNotFound => f.write_str("session token not found"),
            Self::TokenEmpty => f.write_str("session token exhausted"),
            Self::RateLimited => f.write_str("too many requests"),
            Self::Unknown(code) => write!(f, "unknown response code {code}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<OpenTdbQuestion>,
}

#[derive(Debug, Deserialize)]
struct OpenTdbQuestion {
    #[serde(rename = "type", default)]
    kind: QuestionKind,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    category: Option<String>,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl From<OpenTdbQuestion> for RawQuestion {
    fn from(item: OpenTdbQuestion) -> Self {
        RawQuestion {
            prompt: item.question,
            correct_answer: item.correct_answer,
            incorrect_answers: item.incorrect_answers,
            category: item.category,
            difficulty: item.difficulty,
            kind: item.kind,
        }
    }
}

/// Decode an `api.php` body into raw questions.
///
/// Text is returned still entity-encoded; decoding happens during preparation.
///
/// # Errors
///
/// Returns `QuizError::Decode` for malformed JSON and `QuizError::Protocol`
/// when `response_code` is non-zero.
pub fn parse_batch(body: &[u8]) -> Result<Vec<RawQuestion>, QuizError> {
    let response: OpenTdbResponse = serde_json::from_slice(body)?;
    if let Some(status) = ProviderStatus::from_code(response.response_code) {
        return Err(QuizError::Protocol(status));
    }
    Ok(response.results.into_iter().map(RawQuestion::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizErrorKind;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "medium",
                "category": "Science &amp; Nature",
                "question": "What is the chemical symbol for &quot;gold&quot;?",
                "correct_answer": "Au",
                "incorrect_answers": ["Ag", "Gd", "Go"]
            },
            {
                "type": "boolean",
                "difficulty": "easy",
                "category": "General Knowledge",
                "question": "The sky is blue.",
                "correct_answer": "True",
                "incorrect_answers": ["False"]
            }
        ]
    }"#;

    #[test]
    fn parses_results_without_decoding() {
        let batch = parse_batch(SAMPLE.as_bytes()).unwrap();
        assert_eq!(batch.len(), 2);

        let first = &batch[0];
        assert_eq!(first.prompt, "What is the chemical symbol for &quot;gold&quot;?");
        assert_eq!(first.correct_answer, "Au");
        assert_eq!(first.incorrect_answers, vec!["Ag", "Gd", "Go"]);
        assert_eq!(first.category.as_deref(), Some("Science &amp; Nature"));
        assert_eq!(first.difficulty, Some(Difficulty::Medium));
        assert_eq!(first.kind, QuestionKind::Multiple);

        assert_eq!(batch[1].kind, QuestionKind::Boolean);
    }

    #[test]
    fn kind_and_difficulty_read_from_provider_labels() {
        let body = br#"{
            "response_code": 0,
            "results": [
                {"type": "boolean", "difficulty": "hard", "question": "Q1", "correct_answer": "True", "incorrect_answers": ["False"]},
                {"question": "Q2", "correct_answer": "A", "incorrect_answers": ["B"]}
            ]
        }"#;
        let batch = parse_batch(body).unwrap();
        assert_eq!(batch[0].kind, QuestionKind::Boolean);
        assert_eq!(batch[0].difficulty, Some(Difficulty::Hard));
        assert_eq!(batch[1].kind, QuestionKind::Multiple);
        assert_eq!(batch[1].difficulty, None);
        assert_eq!(batch[1].category, None);

        let err = parse_batch(
            br#"{"response_code": 0, "results": [{"type": "essay", "question": "Q", "correct_answer": "A"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn non_zero_response_code_is_a_protocol_error() {
        let err = parse_batch(br#"{"response_code": 1, "results": []}"#).unwrap_err();
        assert!(matches!(err, QuizError::Protocol(ProviderStatus::NoResults)));
        assert_eq!(err.kind(), QuizErrorKind::FetchProtocol);

        let err = parse_batch(br#"{"response_code": 5}"#).unwrap_err();
        assert!(matches!(err, QuizError::Protocol(ProviderStatus::RateLimited)));
    }

    #[test]
    fn empty_results_parse_as_empty_batch() {
        let batch = parse_batch(br#"{"response_code": 0, "results": []}"#).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_batch(b"<html>busy</html>").unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn status_codes_map_and_display() {
        assert_eq!(ProviderStatus::from_code(0), None);
        assert_eq!(ProviderStatus::from_code(9), Some(ProviderStatus::Unknown(9)));
        assert_eq!(ProviderStatus::TokenEmpty.code(), 4);
        assert_eq!(
            ProviderStatus::Unknown(9).to_string(),
            "unknown response code 9"
        );
    }
}
