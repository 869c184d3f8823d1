//! The onboarding quiz: ten workplace-scenario questions whose answers feed
//! the profile-generation prompt.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const QUIZ_JSON: &str = include_str!("../assets/quiz.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub topic: String,
    pub scenario: String,
    pub options: Vec<QuizOption>,
}

static QUESTIONS: OnceLock<Vec<QuizQuestion>> = OnceLock::new();

/// The question bank, in presentation order.
pub fn questions() -> &'static [QuizQuestion] {
    QUESTIONS.get_or_init(|| {
        serde_json::from_str(QUIZ_JSON)
            .unwrap_or_else(|e| panic!("embedded quiz.json is invalid: {e}"))
    })
}

/// Render the selected answers as the transcript block embedded in the
/// generation prompt. `answers` maps question id to the selected option
/// label; unknown labels render as "N/A" rather than failing.
pub fn answers_transcript(answers: &BTreeMap<u32, String>) -> String {
    questions()
        .iter()
        .map(|q| {
            let selected = answers
                .get(&q.id)
                .and_then(|label| q.options.iter().find(|o| &o.label == label))
                .map(|o| o.text.as_str())
                .unwrap_or("N/A");
            format!("Q{}: {}\nSelected: {}", q.id, q.scenario, selected)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
