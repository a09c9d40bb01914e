mod quiz;

pub use quiz::{QuizIntent, QuizView, ScreenView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
