use std::sync::Arc;

use quiz_core::model::RawQuestion;
use services::{ProviderStatus, StaticQuestionSource};

use super::test_harness::{PendingSource, setup_view_harness};
use crate::vm::QuizIntent;

fn two_questions() -> StaticQuestionSource {
    StaticQuestionSource::new(vec![
        RawQuestion::new("Which planet is largest?", "Jupiter", ["Mars", "Venus", "Earth"]),
        RawQuestion::new("How many legs does a spider have?", "8", ["6", "10", "4"]),
    ])
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_loading() {
    let mut harness = setup_view_harness(Arc::new(PendingSource));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading quiz..."), "missing loading text in {html}");
    assert!(!html.contains("Try Again"), "unexpected retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(Arc::new(two_questions()));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing heading in {html}");
    assert!(html.contains("Which planet is largest?"), "missing prompt in {html}");
    for option in ["Jupiter", "Mars", "Venus", "Earth"] {
        assert!(html.contains(option), "missing option {option} in {html}");
    }
    assert!(html.contains("quiz-option--interactive"), "options not interactive in {html}");
    assert!(!html.contains("Next Question"), "next shown before answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reveals_answer_and_advances() {
    let mut harness = setup_view_harness(Arc::new(two_questions()));
    harness.rebuild();
    harness.settle().await;

    let correct = harness.correct_position().expect("active question");
    harness.dispatch(QuizIntent::Select(correct));
    let html = harness.render();
    assert!(html.contains("quiz-option--correct"), "missing correct class in {html}");
    assert!(html.contains("quiz-option--dimmed"), "missing dimmed class in {html}");
    assert!(!html.contains("quiz-option--interactive"), "options still live in {html}");
    assert!(html.contains("Next Question"), "missing next button in {html}");

    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "did not advance in {html}");
    assert!(!html.contains("Next Question"), "next shown before answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_completes_and_restarts() {
    let source = two_questions();
    let mut harness = setup_view_harness(Arc::new(source.clone()));
    harness.rebuild();
    harness.settle().await;

    let correct = harness.correct_position().expect("first question");
    harness.dispatch(QuizIntent::Select(correct));
    harness.dispatch(QuizIntent::Next);

    let correct = harness.correct_position().expect("second question");
    let wrong = usize::from(correct == 0);
    harness.dispatch(QuizIntent::Select(wrong));
    assert!(harness.render().contains("Finish Quiz"));
    harness.dispatch(QuizIntent::Next);

    let html = harness.render();
    assert!(html.contains("Quiz Completed 🎉"), "missing title in {html}");
    assert!(html.contains("You scored 1 out of 2"), "missing score in {html}");
    assert!(html.contains("50%"), "missing percent in {html}");
    assert!(html.contains("Correct answer: 8"), "missing review in {html}");
    assert!(html.contains("Restart Quiz"), "missing restart in {html}");

    harness.dispatch(QuizIntent::Restart);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "restart did not reload in {html}");
    assert_eq!(source.calls(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let source = StaticQuestionSource::failing(ProviderStatus::NoResults);
    let mut harness = setup_view_harness(Arc::new(source.clone()));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to fetch quiz. Please try again."),
        "missing error message in {html}"
    );
    assert!(html.contains("Try Again"), "missing retry in {html}");

    harness.dispatch(QuizIntent::Restart);
    harness.settle().await;
    assert_eq!(source.calls(), 2);
}
