mod progress_vm;
mod quiz_vm;

pub use progress_vm::{LessonVm, ProgressVm, map_progress};
pub use quiz_vm::{
    OptionTone, QuizCardVm, QuizFeedbackVm, QuizIntent, QuizNoticeVm, QuizOptionVm, QuizStatsVm,
    QuizVm, map_quiz, media_url,
};
