mod engine;
mod progress;
mod workflow;

// Public API of the quiz lifecycle.
pub use engine::{LoadOutcome, LoadTicket, QuizEngine, QuizState};
pub use progress::QuizProgress;
pub use workflow::QuizLoopService;
