use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::content::card::{Card, Category, Difficulty, normalize_text};

/// Either no constraint or a single accepted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "todas" | "todos" => Ok(Selection::All),
            _ => s.parse().map(Selection::Only),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// The active card predicate. The default value passes every card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub category: Selection<Category>,
    pub difficulty: Selection<Difficulty>,
    /// A card must carry every one of these.
    pub tags: BTreeSet<String>,
    pub search: String,
}

/// A partial predicate; `None` fields leave the current value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub category: Option<Selection<Category>>,
    pub difficulty: Option<Selection<Difficulty>>,
    pub tags: Option<BTreeSet<String>>,
    pub search: Option<String>,
}

impl FilterUpdate {
    pub fn category(category: Selection<Category>) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn difficulty(difficulty: Selection<Difficulty>) -> Self {
        Self {
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }
}

impl CardFilter {
    pub fn merge(&self, update: FilterUpdate) -> Self {
        Self {
            category: update.category.unwrap_or(self.category),
            difficulty: update.difficulty.unwrap_or(self.difficulty),
            tags: update.tags.unwrap_or_else(|| self.tags.clone()),
            search: update.search.unwrap_or_else(|| self.search.clone()),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        self.category.is_all()
            && self.difficulty.is_all()
            && self.tags.is_empty()
            && self.search.trim().is_empty()
    }

    /// The update that adds `tag` to the required set, or removes it if present.
    pub fn toggled_tag(&self, tag: &str) -> FilterUpdate {
        let mut tags = self.tags.clone();
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        FilterUpdate {
            tags: Some(tags),
            ..FilterUpdate::default()
        }
    }

    fn needle(&self) -> String {
        normalize_text(&self.search).to_lowercase()
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.matches_with(card, &self.needle())
    }

    fn matches_with(&self, card: &Card, needle: &str) -> bool {
        self.category.accepts(&card.category)
            && self.difficulty.accepts(&card.difficulty)
            && self.tags.iter().all(|tag| card.has_tag(tag))
            && (needle.is_empty() || card.search_text().contains(needle))
    }
}

/// Cards passing `filter`, in source order.
pub fn apply_filter<'a>(cards: &'a [Card], filter: &CardFilter) -> Vec<&'a Card> {
    let needle = filter.needle();
    cards
        .iter()
        .filter(|card| filter.matches_with(card, &needle))
        .collect()
}

/// Positions in `cards` of the cards passing `filter`, ascending.
pub fn filter_indices(cards: &[Card], filter: &CardFilter) -> Vec<usize> {
    let needle = filter.needle();
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| filter.matches_with(card, &needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::card::CardType;

    fn card(id: u32, category: Category, difficulty: Difficulty, tags: &[&str], q: &str) -> Card {
        Card::build(
            id,
            CardType::Example,
            category,
            difficulty,
            tags.iter().map(|t| t.to_string()).collect(),
            q.to_string(),
            format!("resposta {id}"),
            None,
        )
    }

    fn deck() -> Vec<Card> {
        vec![
            card(1, Category::Permutation, Difficulty::Basic, &["fatorial"], "Quanto é 4!?"),
            card(2, Category::Combination, Difficulty::Intermediate, &["subconjuntos"], "C(5,2)"),
            card(3, Category::Permutation, Difficulty::Advanced, &["anagrama", "com-repeticao"], "Anagramas de BANANA"),
            card(4, Category::Arrangement, Difficulty::Basic, &[], "Presidente e vice"),
            card(5, Category::Permutation, Difficulty::Intermediate, &["anagrama"], "Anagramas de AMOR"),
        ]
    }

    fn ids(cards: &[&Card]) -> Vec<u32> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn pass_through_returns_everything_in_order() {
        let cards = deck();
        let filter = CardFilter::default();
        assert!(filter.is_pass_through());
        assert_eq!(ids(&apply_filter(&cards, &filter)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn category_filter_keeps_source_order() {
        let cards = deck();
        let filter = CardFilter::default().merge(FilterUpdate::category(Selection::Only(
            Category::Permutation,
        )));
        assert_eq!(ids(&apply_filter(&cards, &filter)), vec![1, 3, 5]);
        assert_eq!(filter_indices(&cards, &filter), vec![0, 2, 4]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let cards = deck();
        let upper = CardFilter::default().merge(FilterUpdate::search("  ANAGRAMAS "));
        let lower = CardFilter::default().merge(FilterUpdate::search("anagramas"));
        assert_eq!(ids(&apply_filter(&cards, &upper)), vec![3, 5]);
        assert_eq!(apply_filter(&cards, &upper), apply_filter(&cards, &lower));
    }

    #[test]
    fn search_covers_tags_and_answers() {
        let cards = deck();
        let by_tag = CardFilter::default().merge(FilterUpdate::search("com-repeticao"));
        assert_eq!(ids(&apply_filter(&cards, &by_tag)), vec![3]);
        let by_answer = CardFilter::default().merge(FilterUpdate::search("resposta 4"));
        assert_eq!(ids(&apply_filter(&cards, &by_answer)), vec![4]);
    }

    #[test]
    fn tags_use_and_semantics() {
        let cards = deck();
        let one = CardFilter::default().merge(FilterUpdate::tags(["anagrama"]));
        let two = one.merge(one.toggled_tag("com-repeticao"));
        assert_eq!(ids(&apply_filter(&cards, &one)), vec![3, 5]);
        assert_eq!(ids(&apply_filter(&cards, &two)), vec![3]);
    }

    #[test]
    fn adding_a_tag_never_grows_the_result() {
        let cards = deck();
        let tags = ["anagrama", "fatorial", "subconjuntos", "com-repeticao", "missing"];
        for base in &tags {
            let before = CardFilter::default().merge(FilterUpdate::tags([*base]));
            for extra in &tags {
                let after = before.merge(FilterUpdate::tags([*base, *extra]));
                let a = filter_indices(&cards, &after);
                let b = filter_indices(&cards, &before);
                assert!(a.iter().all(|i| b.contains(i)), "{base}+{extra}");
            }
        }
    }

    #[test]
    fn result_is_always_a_subsequence() {
        let cards = deck();
        let filters = [
            FilterUpdate::category(Selection::Only(Category::Combination)),
            FilterUpdate::difficulty(Selection::Only(Difficulty::Basic)),
            FilterUpdate::search("de"),
            FilterUpdate::tags(["anagrama"]),
        ];
        for update in filters {
            let indices = filter_indices(&cards, &CardFilter::default().merge(update));
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
            assert!(indices.iter().all(|&i| i < cards.len()));
        }
    }

    #[test]
    fn toggling_a_tag_twice_restores_the_filter() {
        let filter = CardFilter::default();
        let on = filter.merge(filter.toggled_tag("fatorial"));
        assert!(on.tags.contains("fatorial"));
        let off = on.merge(on.toggled_tag("fatorial"));
        assert_eq!(off, filter);
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let filter = CardFilter::default()
            .merge(FilterUpdate::category(Selection::Only(Category::Arrangement)))
            .merge(FilterUpdate::search("vice"));
        assert_eq!(filter.category, Selection::Only(Category::Arrangement));
        assert_eq!(filter.search, "vice");
        assert!(!filter.is_pass_through());
    }

    #[test]
    fn no_match_is_an_empty_list() {
        let cards = deck();
        let filter = CardFilter::default().merge(FilterUpdate::search("integral"));
        assert!(apply_filter(&cards, &filter).is_empty());
    }

    #[test]
    fn selection_parsing() {
        assert_eq!("all".parse::<Selection<Category>>().unwrap(), Selection::All);
        assert_eq!("todas".parse::<Selection<Category>>().unwrap(), Selection::All);
        assert_eq!(
            "arranjo".parse::<Selection<Category>>().unwrap(),
            Selection::Only(Category::Arrangement)
        );
        assert!("nonsense".parse::<Selection<Difficulty>>().is_err());
    }
}
