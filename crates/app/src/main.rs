use std::env;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    OpenTdbClient, QuestionSource, QuizLoopService, StaticQuestionSource, TriviaConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

/// `QUIZ_DEMO` switches to the built-in offline questions.
fn demo_requested(value: Option<&str>) -> bool {
    value.is_some_and(|raw| {
        matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn build_source(
    config: &TriviaConfig,
) -> Result<Arc<dyn QuestionSource>, Box<dyn std::error::Error>> {
    if demo_requested(env::var("QUIZ_DEMO").ok().as_deref()) {
        info!("serving built-in demo questions");
        return Ok(Arc::new(StaticQuestionSource::demo()));
    }
    info!(
        endpoint = %config.endpoint,
        amount = config.request.amount(),
        "serving questions from Open Trivia DB"
    );
    Ok(Arc::new(OpenTdbClient::new(config)?))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TriviaConfig::from_env()?;
    let source = build_source(&config)?;
    let quiz_loop = Arc::new(QuizLoopService::new(source, config.request.clone()));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
