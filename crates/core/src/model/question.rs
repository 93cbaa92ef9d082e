use rand::Rng;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use super::text::decode_entities;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Structural problems found while preparing a provider record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("correct answer is empty")]
    EmptyCorrectAnswer,

    #[error("answer option {index} is empty")]
    EmptyAnswerOption { index: usize },

    #[error("correct answer {answer:?} is also listed as incorrect")]
    CorrectAmongIncorrect { answer: String },

    #[error("correct answer must appear exactly once in the options, found {count}")]
    CorrectAnswerCount { count: usize },
}

//
// ─── METADATA ─────────────────────────────────────────────────────────────────
//

/// Provider-assigned difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parses the provider's lowercase label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Question format requested from and reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Four options, one correct.
    #[default]
    Multiple,
    /// True / False.
    Boolean,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

//
// ─── RAW QUESTION ─────────────────────────────────────────────────────────────
//

/// A question record as delivered by the question source.
///
/// Text fields are still HTML-entity encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestion {
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub kind: QuestionKind,
}

impl RawQuestion {
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, correct_answer: impl Into<String>, incorrect: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect.into_iter().map(Into::into).collect(),
            category: None,
            difficulty: None,
            kind: QuestionKind::Multiple,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }
}

//
// ─── PREPARED QUESTION ────────────────────────────────────────────────────────
//

/// A decoded question with its answer options in display order.
///
/// The correct answer is always present in `answer_options` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    answer_options: Vec<String>,
    category: Option<String>,
    difficulty: Option<Difficulty>,
    kind: QuestionKind,
}

impl Question {
    /// Build a question from already-decoded parts with options in final order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or correct answer is empty, or if the
    /// correct answer does not appear exactly once in `answer_options`.
    pub fn from_parts(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        answer_options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }
        if let Some(index) = answer_options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyAnswerOption { index });
        }
        let count = answer_options
            .iter()
            .filter(|option| **option == correct_answer)
            .count();
        if count != 1 {
            return Err(QuestionError::CorrectAnswerCount { count });
        }

        Ok(Self {
            prompt,
            correct_answer,
            answer_options,
            category: None,
            difficulty: None,
            kind: QuestionKind::Multiple,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn answer_options(&self) -> &[String] {
        &self.answer_options
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Index of the correct answer within `answer_options`.
    #[must_use]
    pub fn correct_position(&self) -> usize {
        self.answer_options
            .iter()
            .position(|option| *option == self.correct_answer)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.answer_options.iter().any(|option| option == answer)
    }
}

//
// ─── PREPARATION ──────────────────────────────────────────────────────────────
//

/// Prepare a batch using the thread-local RNG.
///
/// # Errors
///
/// Returns the first `QuestionError` found in the batch.
pub fn prepare(raw: &[RawQuestion]) -> Result<Vec<Question>, QuestionError> {
    let mut rng = rand::rng();
    prepare_with_rng(raw, &mut rng)
}

/// Prepare a batch with a caller-supplied RNG (seeded in tests).
///
/// # Errors
///
/// Returns the first `QuestionError` found in the batch.
pub fn prepare_with_rng<R: Rng + ?Sized>(
    raw: &[RawQuestion],
    rng: &mut R,
) -> Result<Vec<Question>, QuestionError> {
    raw.iter().map(|question| prepare_one(question, rng)).collect()
}

/// Decode one record and insert its correct answer among the incorrect ones.
///
/// The insertion slot is drawn uniformly from `0..=incorrect_count`, so the
/// correct answer is as likely to land first or last as anywhere in between.
///
/// # Errors
///
/// Returns `QuestionError` when a text field is empty or the correct answer is
/// duplicated among the incorrect answers.
pub fn prepare_one<R: Rng + ?Sized>(
    raw: &RawQuestion,
    rng: &mut R,
) -> Result<Question, QuestionError> {
    let prompt = decode_entities(&raw.prompt);
    if prompt.trim().is_empty() {
        return Err(QuestionError::EmptyPrompt);
    }

    let correct_answer = decode_entities(&raw.correct_answer);
    if correct_answer.trim().is_empty() {
        return Err(QuestionError::EmptyCorrectAnswer);
    }

    let mut answer_options: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|answer| decode_entities(answer))
        .collect();
    if let Some(index) = answer_options.iter().position(|o| o.trim().is_empty()) {
        return Err(QuestionError::EmptyAnswerOption { index });
    }
    if answer_options.contains(&correct_answer) {
        return Err(QuestionError::CorrectAmongIncorrect {
            answer: correct_answer,
        });
    }

    let slot = rng.random_range(0..=answer_options.len());
    answer_options.insert(slot, correct_answer.clone());

    Ok(Question {
        prompt,
        correct_answer,
        answer_options,
        category: raw.category.as_deref().map(decode_entities),
        difficulty: raw.difficulty,
        kind: raw.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn capital() -> RawQuestion {
        RawQuestion::new("Capital of France?", "Paris", ["Rome", "Berlin", "Madrid"])
    }

    #[test]
    fn correct_answer_appears_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let question = prepare_one(&capital(), &mut rng).unwrap();
            assert_eq!(question.answer_options().len(), 4);
            let hits = question
                .answer_options()
                .iter()
                .filter(|o| *o == "Paris")
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn insertion_slot_is_uniform_including_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 40_000;
        let mut counts = [0_usize; 4];
        for _ in 0..trials {
            let question = prepare_one(&capital(), &mut rng).unwrap();
            counts[question.correct_position()] += 1;
        }

        let expected = trials / counts.len();
        for (slot, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 10,
                "slot {slot} got {count}, expected about {expected}"
            );
        }
    }

    #[test]
    fn incorrect_answers_keep_relative_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let question = prepare_one(&capital(), &mut rng).unwrap();
        let incorrect: Vec<&str> = question
            .answer_options()
            .iter()
            .map(String::as_str)
            .filter(|o| *o != "Paris")
            .collect();
        assert_eq!(incorrect, vec!["Rome", "Berlin", "Madrid"]);
    }

    #[test]
    fn no_incorrect_answers_yields_single_option() {
        let raw = RawQuestion::new("Only one?", "Yes", Vec::<String>::new());
        let question = prepare_one(&raw, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(question.answer_options(), ["Yes".to_string()]);
    }

    #[test]
    fn preparation_decodes_entities() {
        let raw = RawQuestion::new(
            "Who wrote &quot;Hamlet&quot;?",
            "William Shakespeare",
            ["Christopher Marlowe", "Ben Jonson", "Fran&ccedil;ois Rabelais"],
        )
        .with_category("Entertainment: Books &amp; Plays")
        .with_difficulty(Difficulty::Easy);
        let question = prepare_one(&raw, &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(question.prompt(), "Who wrote \"Hamlet\"?");
        assert!(question.has_option("François Rabelais"));
        assert_eq!(question.category(), Some("Entertainment: Books & Plays"));
        assert_eq!(question.difficulty(), Some(Difficulty::Easy));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = prepare_one(&RawQuestion::new("  ", "A", ["B"]), &mut rng).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);

        let err = prepare_one(&RawQuestion::new("Q", "", ["B"]), &mut rng).unwrap_err();
        assert_eq!(err, QuestionError::EmptyCorrectAnswer);

        let err = prepare_one(&RawQuestion::new("Q", "A", ["B", ""]), &mut rng).unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswerOption { index: 1 });
    }

    #[test]
    fn correct_answer_listed_as_incorrect_is_rejected() {
        let raw = RawQuestion::new("Q", "A", ["B", "A"]);
        let err = prepare_one(&raw, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectAmongIncorrect { .. }));
    }

    #[test]
    fn prepare_keeps_batch_order() {
        let batch = vec![
            RawQuestion::new("Q1", "A1", ["x"]),
            RawQuestion::new("Q2", "A2", ["y"]),
        ];
        let prepared = prepare(&batch).unwrap();
        let prompts: Vec<&str> = prepared.iter().map(Question::prompt).collect();
        assert_eq!(prompts, vec!["Q1", "Q2"]);
    }

    #[test]
    fn from_parts_checks_correct_answer_count() {
        let ok = Question::from_parts("Q", "A", vec!["B".into(), "A".into()]).unwrap();
        assert_eq!(ok.correct_position(), 1);

        let missing = Question::from_parts("Q", "A", vec!["B".into()]).unwrap_err();
        assert_eq!(missing, QuestionError::CorrectAnswerCount { count: 0 });

        let twice = Question::from_parts("Q", "A", vec!["A".into(), "A".into()]).unwrap_err();
        assert_eq!(twice, QuestionError::CorrectAnswerCount { count: 2 });
    }

    #[test]
    fn difficulty_parses_provider_labels() {
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
    }
}
