use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionDraft};

use crate::error::GatewayError;

/// Validate a generated batch, shuffling each question's choices first.
///
/// # Errors
///
/// Returns `GatewayError::WrongCount` when the batch size differs from `expected`,
/// or `GatewayError::InvalidQuestion` for the first draft that fails validation.
pub fn validate_batch<R: Rng + ?Sized>(
    drafts: Vec<QuestionDraft>,
    expected: usize,
    rng: &mut R,
) -> Result<Vec<Question>, GatewayError> {
    if drafts.len() != expected {
        return Err(GatewayError::WrongCount {
            expected,
            actual: drafts.len(),
        });
    }

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, mut draft)| {
            draft.choices.shuffle(rng);
            draft
                .validate()
                .map_err(|source| GatewayError::InvalidQuestion { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draft(answer: &str) -> QuestionDraft {
        QuestionDraft {
            question: "It is sadly ( ) that farmers go hungry.".into(),
            choices: vec![
                "indefinite".into(),
                "ironic".into(),
                "restless".into(),
                "superficial".into(),
            ],
            answer: answer.into(),
            explanation: String::new(),
            image_prompt: "a farmer in a dry field".into(),
        }
    }

    #[test]
    fn wrong_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = validate_batch(vec![draft("ironic")], 3, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::WrongCount {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn invalid_question_reports_its_index() {
        let mut rng = StdRng::seed_from_u64(2);
        let drafts = vec![draft("ironic"), draft("missing")];
        let err = validate_batch(drafts, 2, &mut rng).unwrap_err();
        match err {
            GatewayError::InvalidQuestion { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, QuestionError::AnswerNotInChoices("missing".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shuffle_keeps_the_choice_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = validate_batch(vec![draft("ironic")], 1, &mut rng).unwrap();
        let mut choices = questions[0].choices().to_vec();
        choices.sort();
        assert_eq!(choices, ["indefinite", "ironic", "restless", "superficial"]);
        assert_eq!(questions[0].answer(), "ironic");
    }

    #[test]
    fn answer_position_is_roughly_uniform() {
        const RUNS: usize = 4000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [0usize; 4];

        for _ in 0..RUNS {
            let questions = validate_batch(vec![draft("ironic")], 1, &mut rng).unwrap();
            counts[questions[0].answer_position()] += 1;
        }

        // Expected 1000 per slot; allow a wide margin.
        for count in counts {
            assert!((850..=1150).contains(&count), "skewed counts: {counts:?}");
        }
    }
}
