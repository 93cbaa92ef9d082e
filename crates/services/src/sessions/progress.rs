use quiz_core::model::QuizSession;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen.
    pub number: usize,
    pub total: usize,
    pub answered: usize,
    pub score: usize,
    pub is_complete: bool,
}

impl From<&QuizSession> for QuizProgress {
    fn from(session: &QuizSession) -> Self {
        Self {
            number: session.question_number(),
            total: session.total_questions(),
            answered: session.answers().len(),
            score: session.score(),
            is_complete: session.is_complete(),
        }
    }
}
