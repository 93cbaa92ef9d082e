#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    OptionState, Question, QuestionError, QuizSession, QuizStage, QuizSummary, RawQuestion,
    SessionGeneration, SessionOpError,
};
