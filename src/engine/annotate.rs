//! Builds a structured card document from a raw card array, labelling
//! every card with the classifier.

use chrono::{DateTime, Utc};

use crate::content::card::{Card, CardType, Category, Difficulty, RawCard, normalize_text};
use crate::content::deck::DeckSummary;
use crate::engine::classify::classify;
use crate::store::schema::{DeckMetadata, LabelCount, StructuredCards};

pub fn category_name(category: Category) -> &'static str {
    match category {
        Category::Permutation => "Permutação",
        Category::Arrangement => "Arranjo",
        Category::Combination => "Combinação",
        Category::Principles => "Princípios",
        Category::General => "Geral",
    }
}

pub fn difficulty_name(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Basic => "Básico",
        Difficulty::Intermediate => "Intermediário",
        Difficulty::Advanced => "Avançado",
    }
}

/// Classify each entry and number the survivors from 1. Entries without
/// question or answer text are dropped with a warning. Existing labels on
/// the input are ignored.
pub fn annotate(raw: &[RawCard]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(raw.len());
    for (position, entry) in raw.iter().enumerate() {
        let question = entry.question.as_deref().map(normalize_text).unwrap_or_default();
        let answer = entry.answer.as_deref().map(normalize_text).unwrap_or_default();
        if question.is_empty() || answer.is_empty() {
            log::warn!("skipping entry {position}: missing question or answer");
            continue;
        }
        let explanation = entry
            .explanation
            .as_deref()
            .map(normalize_text)
            .filter(|e| !e.is_empty());
        let kind = entry
            .kind
            .as_deref()
            .map(CardType::from_label)
            .unwrap_or(CardType::Other);

        let labels = classify(kind, &question, &answer, explanation.as_deref());
        cards.push(Card::build(
            cards.len() as u32 + 1,
            kind,
            labels.category,
            labels.difficulty,
            labels.tags,
            question,
            answer,
            explanation,
        ));
    }
    cards
}

pub fn metadata(cards: &[Card], title: Option<String>, generated_at: DateTime<Utc>) -> DeckMetadata {
    let summary = DeckSummary::from_cards(cards);
    DeckMetadata {
        title,
        total_cards: summary.total,
        categories: summary
            .by_category
            .iter()
            .map(|(c, &count)| {
                let entry = LabelCount {
                    name: Some(category_name(*c).to_string()),
                    count,
                };
                (c.as_str().to_string(), entry)
            })
            .collect(),
        difficulties: summary
            .by_difficulty
            .iter()
            .map(|(d, &count)| {
                let entry = LabelCount {
                    name: Some(difficulty_name(*d).to_string()),
                    count,
                };
                (d.as_str().to_string(), entry)
            })
            .collect(),
        generated_at: Some(generated_at),
    }
}

pub fn annotate_document(
    raw: &[RawCard],
    title: Option<String>,
    generated_at: DateTime<Utc>,
) -> StructuredCards<Card> {
    let cards = annotate(raw);
    StructuredCards {
        metadata: metadata(&cards, title, generated_at),
        cards,
    }
}
