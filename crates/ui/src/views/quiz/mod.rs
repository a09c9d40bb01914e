mod question;
mod screens;
mod scripts;
mod view;

pub use screens::ScreenView;
pub use view::{QuizIntent, QuizView};

#[cfg(test)]
pub(crate) use view::{QuizTestHandles, intent_for_key};

#[cfg(test)]
mod intent_smoke;
