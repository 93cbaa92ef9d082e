#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod trivia;

pub use error::{ConfigError, FETCH_FAILED_MESSAGE, QuizError, QuizErrorKind};
pub use sessions::{LoadOutcome, LoadTicket, QuizEngine, QuizLoopService, QuizProgress, QuizState};
pub use trivia::{
    BatchRequest, OpenTdbClient, ProviderStatus, QuestionSource, StaticQuestionSource,
    TriviaConfig,
};
