/// How an answer option is presented for the current question.
///
/// Exactly one state applies to every option at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionState {
    /// Nothing selected yet; the option can be picked.
    Interactive,
    /// An answer was revealed and this option is the correct one.
    Correct,
    /// This option was picked and it is wrong.
    Incorrect,
    /// An answer was revealed and this option is neither correct nor picked.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, OptionState::Interactive)
    }
}

/// Classify one option against the correct answer and the current selection.
#[must_use]
pub fn classify_option(option: &str, correct: &str, selected: Option<&str>) -> OptionState {
    let Some(selected) = selected else {
        return OptionState::Interactive;
    };

    if option == correct {
        OptionState::Correct
    } else if option == selected {
        OptionState::Incorrect
    } else {
        OptionState::Dimmed
    }
}
