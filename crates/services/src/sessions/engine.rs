use quiz_core::model::{
    AdvanceOutcome, AnswerOutcome, Question, QuizSession, SessionGeneration, SessionOpError,
};
use tracing::{debug, info, warn};

use super::progress::QuizProgress;
use crate::error::{QuizError, QuizErrorKind};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of one quiz screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    Idle,
    Loading,
    Error { kind: QuizErrorKind, message: String },
    Active(QuizSession),
}

/// Proof that a load was started; hand it back with the fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: SessionGeneration,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }
}

/// What `QuizEngine::finish_load` did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { total: usize },
    Failed(QuizErrorKind),
    /// The result belonged to an abandoned load and was dropped.
    Stale,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Owns the quiz lifecycle: loading, error, and the active session.
///
/// Every load is tagged with a fresh `SessionGeneration`; a fetch that
/// completes after a newer start cannot overwrite the newer session.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    generation: SessionGeneration,
    state: QuizState,
}

impl QuizEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Active(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, QuizState::Loading)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session().is_some_and(QuizSession::is_complete)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            QuizState::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        self.session().map(QuizProgress::from)
    }

    /// True exactly when the current question has a revealed answer.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session().is_some_and(QuizSession::can_advance)
    }

    /// True exactly in the error and completed states.
    #[must_use]
    pub fn can_restart(&self) -> bool {
        match &self.state {
            QuizState::Error { .. } => true,
            QuizState::Active(session) => session.is_complete(),
            QuizState::Idle | QuizState::Loading => false,
        }
    }

    /// Enter `Loading` from `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `SessionOpError::AlreadyStarted` unless the engine is idle.
    pub fn start(&mut self) -> Result<LoadTicket, QuizError> {
        if !matches!(self.state, QuizState::Idle) {
            return Err(SessionOpError::AlreadyStarted.into());
        }
        Ok(self.begin_load())
    }

    /// Discard the current session or error and load a fresh batch.
    ///
    /// An unfinished session may be abandoned this way as well.
    ///
    /// # Errors
    ///
    /// Returns `SessionOpError::CannotRestart` while idle or loading.
    pub fn restart(&mut self) -> Result<LoadTicket, QuizError> {
        match self.state {
            QuizState::Idle => Err(SessionOpError::CannotRestart("idle").into()),
            QuizState::Loading => Err(SessionOpError::CannotRestart("loading").into()),
            QuizState::Error { .. } | QuizState::Active(_) => Ok(self.begin_load()),
        }
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.next();
        self.state = QuizState::Loading;
        debug!(generation = %self.generation, "quiz loading");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result to the load identified by `ticket`.
    ///
    /// A ticket from an older generation, or one that was already applied, is
    /// ignored and leaves the state untouched.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, QuizError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation || !self.is_loading() {
            warn!(
                ticket = %ticket.generation,
                current = %self.generation,
                "dropping stale question batch"
            );
            return LoadOutcome::Stale;
        }

        let session = result.and_then(|questions| {
            QuizSession::new(questions).map_err(|_| QuizError::EmptyBatch)
        });
        match session {
            Ok(session) => {
                let total = session.total_questions();
                info!(generation = %self.generation, total, "quiz ready");
                self.state = QuizState::Active(session);
                LoadOutcome::Ready { total }
            }
            Err(err) => {
                let kind = err.kind();
                warn!(generation = %self.generation, error = %err, "quiz failed to load");
                self.state = QuizState::Error {
                    kind,
                    message: err.user_message().to_string(),
                };
                LoadOutcome::Failed(kind)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session or when the
    /// session rejects the answer.
    pub fn select_answer(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        let outcome = self.session_mut()?.select_answer(answer)?;
        debug!(correct = outcome.is_correct, score = outcome.score, "answer revealed");
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session or before
    /// the current question is answered.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        let outcome = self.session_mut()?.advance()?;
        if let AdvanceOutcome::Completed { score, total } = outcome {
            info!(score, total, "quiz completed");
        }
        Ok(outcome)
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        match &mut self.state {
            QuizState::Active(session) => Ok(session),
            _ => Err(SessionOpError::NotActive.into()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
