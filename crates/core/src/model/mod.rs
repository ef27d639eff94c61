mod catalog;
mod engagement;
mod ids;
mod progress;
mod quiz;
mod toast;

pub use ids::{CommentId, ModuleId, ParseIdError, QuestionId, QuizId, StoryId};

pub use catalog::{
    CompletionReply, MessageReply, ModuleDetail, ModuleSummary, Page, QuizSummary,
};
pub use engagement::{
    Comment, CommentAuthor, CommentDraft, CommentError, ContentRef, NewComment, RatingError,
    RatingRequest, RatingScore, StarRating,
};
pub use progress::{
    ProgressPercent, ProgressState, ProgressSync, ScrollGeometry, TrackerPhase, elapsed_minutes,
};
pub use quiz::{
    Answer, QuestionKind, QuestionOption, QuestionResult, QuizDefinition, QuizQuestion,
    QuizResult, QuizState, QuizStateError, QuizSubmission, Selection,
};
pub use toast::{
    TOAST_ENTER_DELAY, TOAST_FADE_OUT, TOAST_VISIBLE_FOR, ToastLevel, ToastPhase,
};
