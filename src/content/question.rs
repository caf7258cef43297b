use serde::{Deserialize, Serialize};

use crate::content::card::{Difficulty, normalize_text};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 8;

/// A multiple-choice exam question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Question {
    pub source_exam: String,
    pub year: Option<i32>,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(alias = "vestibular", alias = "source", default)]
    pub source_exam: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(
        alias = "correctAnswer",
        alias = "correctAnswerIndex",
        alias = "correct_answer_index"
    )]
    pub correct_answer: Option<usize>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestionRejection {
    #[error("question at position {0} has no text")]
    MissingText(usize),
    #[error("question at position {position} has {count} options (expected 2 to 8)")]
    OptionCount { position: usize, count: usize },
    #[error("question at position {position} marks option {index} correct but has {count} options")]
    AnswerOutOfRange {
        position: usize,
        index: usize,
        count: usize,
    },
    #[error("question at position {0} has no correct answer")]
    MissingAnswer(usize),
}

impl Question {
    pub fn from_raw(raw: &RawQuestion, position: usize) -> Result<Self, QuestionRejection> {
        let question = raw
            .question
            .as_deref()
            .map(normalize_text)
            .filter(|t| !t.is_empty())
            .ok_or(QuestionRejection::MissingText(position))?;

        let count = raw.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(QuestionRejection::OptionCount { position, count });
        }
        let index = raw
            .correct_answer
            .ok_or(QuestionRejection::MissingAnswer(position))?;
        if index >= count {
            return Err(QuestionRejection::AnswerOutOfRange {
                position,
                index,
                count,
            });
        }

        let difficulty = raw
            .difficulty
            .as_deref()
            .and_then(|label| label.parse().ok())
            .unwrap_or(Difficulty::Basic);

        Ok(Self {
            source_exam: raw
                .source_exam
                .as_deref()
                .map(normalize_text)
                .unwrap_or_default(),
            year: raw.year,
            difficulty,
            question,
            options: raw.options.iter().map(|o| normalize_text(o)).collect(),
            correct_answer: index,
            explanation: raw
                .explanation
                .as_deref()
                .map(normalize_text)
                .filter(|t| !t.is_empty()),
        })
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// Option letter as shown to the user: 0 -> 'A'.
pub fn option_letter(index: usize) -> char {
    (b'A' + (index as u8 % 26)) as char
}
