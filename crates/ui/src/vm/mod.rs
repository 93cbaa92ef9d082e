mod quiz_vm;

pub use quiz_vm::{
    AnswerOptionVm, QuestionVm, QuizIntent, QuizResultVm, QuizScreenVm, ReviewItemVm,
    intent_for_key, map_quiz_screen, option_class,
};
