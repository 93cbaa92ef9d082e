mod ids;
mod options;
mod question;
mod session;
mod text;

pub use ids::SessionGeneration;
pub use options::{OptionState, classify_option};
pub use question::{
    Difficulty, Question, QuestionError, QuestionKind, RawQuestion, prepare, prepare_one,
    prepare_with_rng,
};
pub use session::{
    AdvanceOutcome, AnswerOutcome, AnswerRecord, QuizSession, QuizStage, QuizSummary,
    SessionOpError,
};
pub use text::decode_entities;
