use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::card::RawCard;
use crate::content::question::RawQuestion;

pub const CARDS_FILE: &str = "cards.json";
pub const QUESTIONS_FILE: &str = "questions.json";

/// A card dataset: the structured `{metadata, cards}` layout, or the bare
/// array written by the first versions of the tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum CardsDocument {
    Structured(StructuredCards<RawCard>),
    Bare(Vec<RawCard>),
}

impl CardsDocument {
    pub fn into_cards(self) -> Vec<RawCard> {
        match self {
            CardsDocument::Structured(doc) => doc.cards,
            CardsDocument::Bare(cards) => cards,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StructuredCards<C> {
    #[serde(default)]
    pub metadata: DeckMetadata,
    pub cards: Vec<C>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeckMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "totalCards")]
    pub total_cards: usize,
    #[serde(default)]
    pub categories: BTreeMap<String, LabelCount>,
    #[serde(default)]
    pub difficulties: BTreeMap<String, LabelCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestionsDocument {
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}
