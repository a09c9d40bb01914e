//! Prompt text and response schemas sent to the generator.

use serde_json::{Value, json};

const WORKED_EXAMPLES: &str = "\
Example 1:
A: Thanks for showing me the outline of your sales presentation. It's good, but it's a bit ( ) in some places.
B: I guess I do repeat some information too much. I'll try to take some of it out.
Choices: 1 decisive, 2 subjective, 3 redundant, 4 distinct
Answer: 3 redundant

Example 2:
Lisa went to the interview even though she thought there was a low ( ) of her getting the job. As she expected, she was not hired.
Choices: 1 restoration, 2 credibility, 3 contention, 4 probability
Answer: 4 probability

Example 3:
It is sadly ( ) that, in developing countries, many of the farmers who grow nutritious crops for export do not have enough food to feed their own families.
Choices: 1 indefinite, 2 ironic, 3 restless, 4 superficial
Answer: 2 ironic";

const IMAGE_STYLE: &str =
    "photorealistic style, high detail, cinematic lighting, professional photography";

#[must_use]
pub fn questions_prompt(count: usize) -> String {
    format!(
        "Write {count} Eiken-style English vocabulary questions for Japanese learners, \
         modelled on the worked examples below.\n\n{WORKED_EXAMPLES}\n\n\
         Each question is one sentence or a short A/B dialogue with exactly one blank written as ( ). \
         Give four single-word choices, exactly one of them correct. \
         Explain in Japanese what the correct word means and why it fits. \
         Add an English prompt for an image generator that depicts the situation. \
         Return a JSON array of {count} objects using the keys in the schema. Do not use Markdown."
    )
}

#[must_use]
pub fn image_prompt(subject: &str) -> String {
    format!("{}, {IMAGE_STYLE}", subject.trim())
}

#[must_use]
pub fn closing_prompt(score: usize, total: usize) -> String {
    format!(
        "A learner just finished an English vocabulary quiz and answered {score} out of {total} \
         questions correctly. Based on this score, give a short, fun and encouraging rank title \
         and a slightly longer message. Keep the tone positive and supportive of further study."
    )
}

#[must_use]
pub fn questions_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "Question text. Dialogues include both A and B lines. The blank is written ( )."
                },
                "choices": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Four choices: one correct, three incorrect."
                },
                "answer": {
                    "type": "STRING",
                    "description": "The correct choice, exactly as written in choices."
                },
                "explanation": {
                    "type": "STRING",
                    "description": "Short explanation in Japanese of the word's meaning and why it is correct."
                },
                "image_prompt": {
                    "type": "STRING",
                    "description": "High quality English prompt for an image generator depicting the question."
                }
            },
            "required": ["question", "choices", "answer", "explanation", "image_prompt"]
        }
    })
}

#[must_use]
pub fn result_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "rank": {
                "type": "STRING",
                "description": "Rank title based on the score, e.g. English Rookie or Vocabulary Master."
            },
            "message": {
                "type": "STRING",
                "description": "Positive message based on the score that encourages further study."
            }
        },
        "required": ["rank", "message"]
    })
}
