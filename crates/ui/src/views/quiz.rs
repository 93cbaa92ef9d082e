use dioxus::document::eval;
use dioxus::prelude::*;
use services::{QuizEngine, QuizState};

use crate::context::AppContext;
use crate::vm::{
    QuestionVm, QuizIntent, QuizResultVm, QuizScreenVm, intent_for_key, map_quiz_screen,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let engine = use_signal(QuizEngine::new);
    let notice = use_signal(|| None::<&'static str>);

    // Each run of the loader owns one ticket; a restarted loader drops the old fetch.
    let loader = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut engine = engine;
        let mut notice = notice;

        async move {
            let ticket = {
                let mut guard = engine.write();
                if matches!(guard.state(), QuizState::Idle) {
                    guard.start()
                } else {
                    guard.restart()
                }
            };
            let ticket = match ticket {
                Ok(ticket) => ticket,
                Err(err) => {
                    notice.set(Some(err.user_message()));
                    return;
                }
            };
            let result = quiz_loop.fetch_batch().await;
            engine.write().finish_load(ticket, result);
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut engine = engine;
        let mut notice = notice;
        let mut loader = loader;

        let result = match intent {
            QuizIntent::Select(index) => {
                let answer = engine
                    .peek()
                    .session()
                    .and_then(|session| session.current_question())
                    .and_then(|question| question.answer_options().get(index).cloned());
                let Some(answer) = answer else {
                    return;
                };
                engine.write().select_answer(&answer).map(|_| ())
            }
            QuizIntent::Next => engine.write().advance().map(|_| ()),
            QuizIntent::Restart => {
                if engine.peek().can_restart() {
                    loader.restart();
                }
                Ok(())
            }
        };
        notice.set(result.err().map(|err| err.user_message()));
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, engine);
            }
        }
    }

    use_effect(move || {
        let _ = eval("document.getElementById(\"quiz-root\")?.focus();");
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let key = evt.data.key().to_string();
        let screen = map_quiz_screen(&engine.peek());
        if let Some(intent) = intent_for_key(&key, &screen) {
            evt.prevent_default();
            dispatch_intent.call(intent);
        }
    });

    let screen = map_quiz_screen(&engine.read());

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            div { class: "quiz-card",
                if let Some(message) = notice() {
                    p { class: "quiz-notice", role: "alert", "{message}" }
                }
                match screen {
                    QuizScreenVm::Loading => rsx! {
                        p { class: "quiz-status", "Loading quiz..." }
                    },
                    QuizScreenVm::Error { message } => rsx! {
                        p { class: "quiz-status quiz-status--error", "{message}" }
                        button {
                            class: "btn btn-primary",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(QuizIntent::Restart),
                            "Try Again"
                        }
                    },
                    QuizScreenVm::Question(question) => rsx! {
                        QuestionPanel { question, on_intent: dispatch_intent }
                    },
                    QuizScreenVm::Results(result) => rsx! {
                        ResultsPanel { result, on_intent: dispatch_intent }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        h2 { class: "quiz-heading", "{question.heading}" }
        if let Some(meta) = question.meta.as_deref() {
            p { class: "quiz-meta", "{meta}" }
        }
        p { class: "quiz-prompt", "{question.prompt}" }
        div { class: "quiz-options",
            for (index, option) in question.options.iter().enumerate() {
                button {
                    key: "{index}",
                    class: "{option.class}",
                    r#type: "button",
                    disabled: !option.is_enabled(),
                    onclick: move |_| on_intent.call(QuizIntent::Select(index)),
                    if let Some(hotkey) = option.hotkey {
                        span { class: "quiz-option__key", "{hotkey}" }
                    }
                    span { class: "quiz-option__label", "{option.label}" }
                }
            }
        }
        if let Some(label) = question.next_label {
            button {
                class: "btn btn-primary quiz-next",
                id: "quiz-next",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "{label}"
            }
        }
    }
}

fn review_class(is_correct: bool) -> &'static str {
    if is_correct {
        "quiz-review__item quiz-review__item--correct"
    } else {
        "quiz-review__item quiz-review__item--incorrect"
    }
}

#[component]
fn ResultsPanel(result: QuizResultVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-results",
            h1 { class: "quiz-results__title", "Quiz Completed 🎉" }
            p { class: "quiz-results__score", "{result.score_label}" }
            p { class: "quiz-results__percent", "{result.percent_label}" }
            ol { class: "quiz-review",
                for item in result.review.iter() {
                    li {
                        key: "{item.number}",
                        class: review_class(item.is_correct),
                        p { class: "quiz-review__prompt", "{item.prompt}" }
                        p { class: "quiz-review__answer", "Your answer: {item.selected}" }
                        if !item.is_correct {
                            p { class: "quiz-review__correct", "Correct answer: {item.correct_answer}" }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Restart Quiz"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    engine: Rc<RefCell<Option<Signal<QuizEngine>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, engine: Signal<QuizEngine>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.engine.borrow_mut() = Some(engine);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn engine(&self) -> Signal<QuizEngine> {
        (*self.engine.borrow()).expect("quiz engine registered")
    }
}
