//! Keyword rules that label cards offline. Runs in the `annotate_cards`
//! binary, never while studying.

use std::sync::LazyLock;

use regex::Regex;

use crate::content::card::{CardType, Category, Difficulty, normalize_text};

static MULTI_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2,}").expect("static pattern"));

/// Category rules, first match wins.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Permutation,
        &["permutação", "anagrama", "ordenar", "p("],
    ),
    (
        Category::Arrangement,
        &["arranjo", "a(", "presidente", "vice"],
    ),
    (
        Category::Combination,
        &["combinação", "c(", "subconjunto", "escolher"],
    ),
    (
        Category::Principles,
        &["princípio", "produto cartesiano", "pares ordenados"],
    ),
];

const BASIC_KEYWORDS: &[&str] = &["fórmula", "definição"];
const INTERMEDIATE_KEYWORDS: &[&str] = &["banana", "circular", "repetição"];

/// Tag rules over question and answer text, applied in order.
const TAG_RULES: &[(&str, &[&str])] = &[
    ("com-repeticao", &["repetição"]),
    ("sem-repeticao", &["sem repetição"]),
    ("anagrama", &["anagrama"]),
    ("senhas", &["senha"]),
    ("circular", &["circular"]),
    ("subconjuntos", &["subconjunto"]),
    ("fatorial", &["fatorial", "!"]),
    ("conceitos", &["diferença"]),
    ("principio-multiplicativo", &["princípio"]),
];

pub const FALLBACK_TAG: &str = "geral";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

fn folded(parts: &[&str]) -> String {
    normalize_text(&parts.join(" ")).to_lowercase()
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

pub fn classify(
    kind: CardType,
    question: &str,
    answer: &str,
    explanation: Option<&str>,
) -> Classification {
    let full = folded(&[question, answer, explanation.unwrap_or("")]);
    let face = folded(&[question, answer]);
    Classification {
        category: category_of(&full),
        difficulty: difficulty_of(kind, &full),
        tags: tags_of(kind, &face),
    }
}

/// `text` is expected lower-cased.
pub fn category_of(text: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| mentions_any(text, keywords))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

pub fn difficulty_of(kind: CardType, text: &str) -> Difficulty {
    if kind == CardType::Formula || mentions_any(text, BASIC_KEYWORDS) {
        Difficulty::Basic
    } else if mentions_any(text, INTERMEDIATE_KEYWORDS) || MULTI_DIGIT.is_match(text) {
        Difficulty::Intermediate
    } else if kind == CardType::Tip && text.contains("diferença") {
        Difficulty::Advanced
    } else {
        Difficulty::Basic
    }
}

pub fn tags_of(kind: CardType, text: &str) -> Vec<String> {
    let kind_tag = match kind {
        CardType::Formula => Some("formula-fundamental"),
        CardType::Example => Some("exemplo-pratico"),
        CardType::Tip => Some("metodologia"),
        CardType::Other => None,
    };

    let mut tags: Vec<String> = Vec::new();
    let keyword_tags = TAG_RULES
        .iter()
        .filter(|(_, keywords)| mentions_any(text, keywords))
        .map(|(tag, _)| *tag);
    for tag in kind_tag.into_iter().chain(keyword_tags) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_wins_over_later_rules() {
        let c = classify(
            CardType::Example,
            "Quantos anagramas tem a palavra AMOR?",
            "Escolher a ordem: 4! = 24",
            None,
        );
        assert_eq!(c.category, Category::Permutation);
    }

    #[test]
    fn arrangement_from_president_example() {
        let c = classify(
            CardType::Example,
            "De quantas formas escolher presidente e vice entre 5 pessoas?",
            "A(5,2) = 20",
            None,
        );
        assert_eq!(c.category, Category::Arrangement);
        assert_eq!(c.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn uncategorized_text_is_general() {
        assert_eq!(category_of("quanto vale um mais um?"), Category::General);
    }

    #[test]
    fn formula_cards_are_basic() {
        assert_eq!(
            difficulty_of(CardType::Formula, "anagramas de banana"),
            Difficulty::Basic
        );
    }

    #[test]
    fn tip_about_differences_is_advanced() {
        assert_eq!(
            difficulty_of(CardType::Tip, "a diferença entre arranjo e combinação"),
            Difficulty::Advanced
        );
        assert_eq!(
            difficulty_of(CardType::Example, "a diferença entre arranjo e combinação"),
            Difficulty::Basic
        );
    }

    #[test]
    fn multi_digit_numbers_raise_difficulty() {
        assert_eq!(difficulty_of(CardType::Example, "c(10,3)"), Difficulty::Intermediate);
        assert_eq!(difficulty_of(CardType::Example, "c(5,3)"), Difficulty::Basic);
    }

    #[test]
    fn factorial_tag_is_not_repeated() {
        let tags = tags_of(CardType::Formula, "o fatorial 5! vale 120");
        assert_eq!(tags, vec!["formula-fundamental", "fatorial"]);
    }

    #[test]
    fn repetition_tags_stack() {
        let tags = tags_of(CardType::Other, "permutação sem repetição");
        assert_eq!(tags, vec!["com-repeticao", "sem-repeticao"]);
    }

    #[test]
    fn untagged_card_gets_fallback() {
        assert_eq!(tags_of(CardType::Other, "nada aqui"), vec![FALLBACK_TAG]);
    }

    #[test]
    fn explanation_only_affects_category_and_difficulty() {
        let c = classify(
            CardType::Other,
            "Pergunta",
            "Resposta",
            Some("Use o princípio multiplicativo"),
        );
        assert_eq!(c.category, Category::Principles);
        assert_eq!(c.tags, vec![FALLBACK_TAG]);
    }
}
