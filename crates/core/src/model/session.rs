use thiserror::Error;

use crate::model::options::{OptionState, classify_option};
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionOpError {
    #[error("cannot start a quiz without questions")]
    Empty,

    #[error("question {number} has already been answered")]
    AlreadyAnswered { number: usize },

    #[error("no answer selected for question {number}")]
    NoAnswerSelected { number: usize },

    #[error("{answer:?} is not an option for question {number}")]
    UnknownOption { number: usize, answer: String },

    #[error("quiz already completed")]
    Completed,

    #[error("no active quiz")]
    NotActive,

    #[error("quiz already started")]
    AlreadyStarted,

    #[error("cannot restart while {0}")]
    CannotRestart(&'static str),
}

//
// ─── STAGE ─────────────────────────────────────────────────────────────────────
//

/// Where the current question stands.
///
/// A finished quiz carries no selection, so `Complete` has no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStage {
    AnswerPending,
    AnswerRevealed { selected: String },
    Complete,
}

/// Result of `QuizSession::select_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub score: usize,
    pub correct_answer: String,
}

/// Result of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    Completed { score: usize, total: usize },
}

/// What the player picked for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub prompt: String,
    pub correct_answer: String,
    pub selected: String,
    pub is_correct: bool,
}

/// Final tally of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnswerRecord>,
}

impl QuizSummary {
    /// Score as a whole percentage, rounded half up.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 + self.total / 2) / self.total
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough over a prepared batch.
///
/// Steps through the questions in order; each question accepts exactly one
/// answer, and `advance` is only legal once that answer is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    stage: QuizStage,
    answers: Vec<AnswerRecord>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `SessionOpError::Empty` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionOpError> {
        if questions.is_empty() {
            return Err(SessionOpError::Empty);
        }

        let capacity = questions.len();
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            stage: QuizStage::AnswerPending,
            answers: Vec::with_capacity(capacity),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    /// Size of the batch actually received.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn stage(&self) -> &QuizStage {
        &self.stage
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        match &self.stage {
            QuizStage::AnswerRevealed { selected } => Some(selected.as_str()),
            QuizStage::AnswerPending | QuizStage::Complete => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.stage, QuizStage::Complete)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        matches!(self.stage, QuizStage::AnswerRevealed { .. })
    }

    /// The question being asked, or `None` once the quiz is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Presentation state of every option of the current question, in order.
    #[must_use]
    pub fn option_states(&self) -> Vec<(&str, OptionState)> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let selected = self.selected_answer();
        question
            .answer_options()
            .iter()
            .map(|option| {
                let state = classify_option(option, question.correct_answer(), selected);
                (option.as_str(), state)
            })
            .collect()
    }

    /// Record the answer for the current question and reveal it.
    ///
    /// # Errors
    ///
    /// Returns `SessionOpError::Completed` if the quiz is finished,
    /// `SessionOpError::AlreadyAnswered` if this question was already answered, and
    /// `SessionOpError::UnknownOption` if `answer` is not one of its options.
    /// The session is left untouched on error.
    pub fn select_answer(&mut self, answer: &str) -> Result<AnswerOutcome, SessionOpError> {
        let number = self.question_number();
        match self.stage {
            QuizStage::Complete => return Err(SessionOpError::Completed),
            QuizStage::AnswerRevealed { .. } => {
                return Err(SessionOpError::AlreadyAnswered { number });
            }
            QuizStage::AnswerPending => {}
        }

        let question = &self.questions[self.current];
        if !question.has_option(answer) {
            return Err(SessionOpError::UnknownOption {
                number,
                answer: answer.to_string(),
            });
        }

        let is_correct = question.is_correct(answer);
        self.answers.push(AnswerRecord {
            prompt: question.prompt().to_string(),
            correct_answer: question.correct_answer().to_string(),
            selected: answer.to_string(),
            is_correct,
        });
        let correct_answer = question.correct_answer().to_string();

        if is_correct {
            self.score += 1;
        }
        self.stage = QuizStage::AnswerRevealed {
            selected: answer.to_string(),
        };

        Ok(AnswerOutcome {
            is_correct,
            score: self.score,
            correct_answer,
        })
    }

    /// Move past the revealed question.
    ///
    /// # Errors
    ///
    /// Returns `SessionOpError::NoAnswerSelected` before the current question is
    /// answered and `SessionOpError::Completed` once the quiz is finished.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionOpError> {
        match self.stage {
            QuizStage::Complete => return Err(SessionOpError::Completed),
            QuizStage::AnswerPending => {
                return Err(SessionOpError::NoAnswerSelected {
                    number: self.question_number(),
                });
            }
            QuizStage::AnswerRevealed { .. } => {}
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.stage = QuizStage::AnswerPending;
            Ok(AdvanceOutcome::Next {
                index: self.current,
            })
        } else {
            self.stage = QuizStage::Complete;
            Ok(AdvanceOutcome::Completed {
                score: self.score,
                total: self.questions.len(),
            })
        }
    }

    /// Final tally, available once the quiz is complete.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.is_complete().then(|| QuizSummary {
            score: self.score,
            total: self.questions.len(),
            answers: self.answers.clone(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
