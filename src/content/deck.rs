use std::collections::BTreeMap;

use crate::content::card::{Card, Category, Difficulty};

/// Card counts over a whole dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckSummary {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
    /// Alphabetical by tag.
    pub by_tag: BTreeMap<String, usize>,
}

impl DeckSummary {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut summary = Self {
            total: cards.len(),
            ..Self::default()
        };
        for card in cards {
            *summary.by_category.entry(card.category).or_insert(0) += 1;
            *summary.by_difficulty.entry(card.difficulty).or_insert(0) += 1;
            for tag in &card.tags {
                *summary.by_tag.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn difficulty_count(&self, difficulty: Difficulty) -> usize {
        self.by_difficulty.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::card::CardType;

    fn card(category: Category, difficulty: Difficulty, tags: &[&str]) -> Card {
        Card::build(
            1,
            CardType::Formula,
            category,
            difficulty,
            tags.iter().map(|t| t.to_string()).collect(),
            "q".to_string(),
            "a".to_string(),
            None,
        )
    }

    #[test]
    fn counts_every_dimension() {
        let cards = vec![
            card(Category::Permutation, Difficulty::Basic, &["fatorial"]),
            card(Category::Permutation, Difficulty::Advanced, &["anagrama", "fatorial"]),
            card(Category::Combination, Difficulty::Basic, &[]),
        ];
        let summary = DeckSummary::from_cards(&cards);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.category_count(Category::Permutation), 2);
        assert_eq!(summary.category_count(Category::Arrangement), 0);
        assert_eq!(summary.difficulty_count(Difficulty::Basic), 2);
        assert_eq!(summary.tags().collect::<Vec<_>>(), vec!["anagrama", "fatorial"]);
        assert_eq!(summary.by_tag["fatorial"], 2);
    }

    #[test]
    fn empty_deck() {
        let summary = DeckSummary::from_cards(&[]);
        assert_eq!(summary, DeckSummary::default());
    }
}
