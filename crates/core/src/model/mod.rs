mod image;
mod prompt;
mod question;
mod result;
mod session;

pub use image::{DEFAULT_PLACEHOLDER_URL, ImageError, ImageOrigin, ImageRef};
pub use prompt::{Prompt, Segment};
pub use question::{CHOICE_COUNT, Question, QuestionDraft, QuestionError};
pub use result::{FALLBACK_MESSAGE, FALLBACK_RANK, ResultContent};
pub use session::{AnswerOutcome, Advance, LoadToken, LoadingPhase, Screen, Session};
