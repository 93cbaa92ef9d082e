use quiz_core::model::{OptionState, QuizSession, QuizSummary};
use services::{QuizEngine, QuizProgress, QuizState};

/// Largest option count reachable from the number-key shortcuts.
const MAX_HOTKEYS: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// Pick the option at this position in the current question.
    Select(usize),
    Next,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub label: String,
    pub state: OptionState,
    pub class: &'static str,
    pub hotkey: Option<usize>,
}

impl AnswerOptionVm {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state.is_interactive()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub meta: Option<String>,
    pub prompt: String,
    pub options: Vec<AnswerOptionVm>,
    /// Present exactly when an answer has been revealed.
    pub next_label: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub prompt: String,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub score_label: String,
    pub percent_label: String,
    pub review: Vec<ReviewItemVm>,
}

impl From<&QuizSummary> for QuizResultVm {
    fn from(summary: &QuizSummary) -> Self {
        Self {
            score_label: format!("You scored {} out of {}", summary.score, summary.total),
            percent_label: format!("{}%", summary.percent()),
            review: summary
                .answers
                .iter()
                .enumerate()
                .map(|(index, answer)| ReviewItemVm {
                    number: index + 1,
                    prompt: answer.prompt.clone(),
                    selected: answer.selected.clone(),
                    correct_answer: answer.correct_answer.clone(),
                    is_correct: answer.is_correct,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreenVm {
    Loading,
    Error { message: String },
    Question(QuestionVm),
    Results(QuizResultVm),
}

impl QuizScreenVm {
    #[must_use]
    pub fn can_restart(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::Results(_))
    }
}

#[must_use]
pub fn option_class(state: OptionState) -> &'static str {
    match state {
        OptionState::Interactive => "quiz-option quiz-option--interactive",
        OptionState::Correct => "quiz-option quiz-option--correct",
        OptionState::Incorrect => "quiz-option quiz-option--incorrect",
        OptionState::Dimmed => "quiz-option quiz-option--dimmed",
    }
}

/// Project the engine onto what the quiz screen draws.
#[must_use]
pub fn map_quiz_screen(engine: &QuizEngine) -> QuizScreenVm {
    match engine.state() {
        QuizState::Idle | QuizState::Loading => QuizScreenVm::Loading,
        QuizState::Error { message, .. } => QuizScreenVm::Error {
            message: message.clone(),
        },
        QuizState::Active(session) => map_session(session),
    }
}

fn map_session(session: &QuizSession) -> QuizScreenVm {
    if let Some(summary) = session.summary() {
        return QuizScreenVm::Results(QuizResultVm::from(&summary));
    }
    let Some(question) = session.current_question() else {
        return QuizScreenVm::Loading;
    };

    let meta = match (question.category(), question.difficulty()) {
        (Some(category), Some(difficulty)) => Some(format!("{category} · {difficulty}")),
        (Some(category), None) => Some(category.to_string()),
        (None, Some(difficulty)) => Some(difficulty.to_string()),
        (None, None) => None,
    };
    let options = session
        .option_states()
        .into_iter()
        .enumerate()
        .map(|(index, (label, state))| AnswerOptionVm {
            label: label.to_string(),
            state,
            class: option_class(state),
            hotkey: (index < MAX_HOTKEYS).then_some(index + 1),
        })
        .collect();
    let next_label = session.can_advance().then(|| {
        if session.is_last_question() {
            "Finish Quiz"
        } else {
            "Next Question"
        }
    });

    let progress = QuizProgress::from(session);
    QuizScreenVm::Question(QuestionVm {
        heading: format!("Question {} of {}", progress.number, progress.total),
        meta,
        prompt: question.prompt().to_string(),
        options,
        next_label,
    })
}

/// Keyboard shortcuts: `1`-`9` pick an option, `Enter` moves on or restarts.
#[must_use]
pub fn intent_for_key(key: &str, screen: &QuizScreenVm) -> Option<QuizIntent> {
    match screen {
        QuizScreenVm::Question(question) => {
            if key == "Enter" {
                return question.next_label.map(|_| QuizIntent::Next);
            }
            let digit = key.parse::<usize>().ok()?;
            let option = question
                .options
                .iter()
                .position(|option| option.hotkey == Some(digit))?;
            question.options[option]
                .is_enabled()
                .then_some(QuizIntent::Select(option))
        }
        QuizScreenVm::Error { .. } | QuizScreenVm::Results(_) => {
            (key == "Enter").then_some(QuizIntent::Restart)
        }
        QuizScreenVm::Loading => None,
    }
}
