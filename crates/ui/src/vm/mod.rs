mod catalog_vm;
mod markdown_vm;
mod quiz_vm;

pub use catalog_vm::{
    CommentVm, ModuleCardVm, ModulePageVm, QuizLinkVm, map_comments, map_module_cards,
    map_module_page,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{QuestionOutcomeVm, QuizResultVm, map_quiz_result};
