mod client;
mod config;
mod response;
mod source;

// Public API of the question source adapter.
pub use client::OpenTdbClient;
pub use config::{BatchRequest, DEFAULT_AMOUNT, DEFAULT_BASE_URL, MAX_AMOUNT, TriviaConfig};
pub use response::{ProviderStatus, parse_batch};
pub use source::{QuestionSource, StaticQuestionSource};
