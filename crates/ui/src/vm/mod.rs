mod markup_vm;
mod question_vm;

pub use markup_vm::{markdown_to_html, prompt_to_html, sanitize_html};
pub use question_vm::{
    BROKEN_IMAGE_FALLBACK_URL, ChoiceState, ChoiceVm, FeedbackVm, QuestionVm, question_vm,
};
