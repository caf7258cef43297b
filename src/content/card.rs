use std::fmt;
use std::str::FromStr;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "permutacao")]
    Permutation,
    #[serde(alias = "arranjo")]
    Arrangement,
    #[serde(alias = "combinacao")]
    Combination,
    #[serde(alias = "principios")]
    Principles,
    #[serde(alias = "geral")]
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Permutation,
        Category::Arrangement,
        Category::Combination,
        Category::Principles,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Permutation => "permutation",
            Category::Arrangement => "arrangement",
            Category::Combination => "combination",
            Category::Principles => "principles",
            Category::General => "general",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "permutation" | "permutacao" => Ok(Category::Permutation),
            "arrangement" | "arranjo" => Ok(Category::Arrangement),
            "combination" | "combinacao" => Ok(Category::Combination),
            "principles" | "principios" => Ok(Category::Principles),
            "general" | "geral" => Ok(Category::General),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "basico")]
    Basic,
    #[serde(alias = "intermediario")]
    Intermediate,
    #[serde(alias = "avancado")]
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "basic" | "basico" | "facil" | "easy" => Ok(Difficulty::Basic),
            "intermediate" | "intermediario" | "medio" | "medium" => Ok(Difficulty::Intermediate),
            "advanced" | "avancado" | "dificil" | "hard" => Ok(Difficulty::Advanced),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Formula,
    #[serde(alias = "exemplo")]
    Example,
    #[serde(alias = "dica")]
    Tip,
    #[serde(other)]
    Other,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Formula => "formula",
            CardType::Example => "example",
            CardType::Tip => "tip",
            CardType::Other => "other",
        }
    }

    /// Lenient parse: anything unrecognised is `Other`.
    pub fn from_label(s: &str) -> Self {
        match fold_label(s).as_str() {
            "formula" => CardType::Formula,
            "example" | "exemplo" => CardType::Example,
            "tip" | "dica" => CardType::Tip,
            _ => CardType::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0:?}")]
pub struct UnknownLabel(pub String);

/// Lower-case and strip the Portuguese diacritics that appear in dataset labels.
fn fold_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// NFC-normalize and trim a piece of dataset text.
pub fn normalize_text(text: &str) -> String {
    let nfc = ComposingNormalizerBorrowed::new_nfc().normalize(text);
    nfc.trim().to_string()
}

/// A study card. Built once at load time by [`Card::from_raw`]; never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: CardType,
    pub category: Category,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip)]
    search_text: String,
}

/// Card as it appears on disk, including the legacy short field names.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(alias = "q", default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(alias = "a", default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardRejection {
    #[error("card at position {0} has no question text")]
    MissingQuestion(usize),
    #[error("card at position {0} has no answer text")]
    MissingAnswer(usize),
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(normalize_text).filter(|t| !t.is_empty())
}

impl Card {
    /// Adapt a raw dataset entry. `position` is the zero-based index in the
    /// document and doubles as the id source when the entry carries none.
    pub fn from_raw(raw: &RawCard, position: usize) -> Result<Self, CardRejection> {
        let question =
            non_empty(raw.question.as_deref()).ok_or(CardRejection::MissingQuestion(position))?;
        let answer =
            non_empty(raw.answer.as_deref()).ok_or(CardRejection::MissingAnswer(position))?;
        let explanation = non_empty(raw.explanation.as_deref());

        let category = match raw.category.as_deref() {
            Some(label) => label.parse().unwrap_or_else(|_| {
                log::warn!("card {position}: unknown category {label:?}, using general");
                Category::General
            }),
            None => Category::General,
        };
        let difficulty = match raw.difficulty.as_deref() {
            Some(label) => label.parse().unwrap_or_else(|_| {
                log::warn!("card {position}: unknown difficulty {label:?}, using basic");
                Difficulty::Basic
            }),
            None => Difficulty::Basic,
        };
        let kind = raw
            .kind
            .as_deref()
            .map(CardType::from_label)
            .unwrap_or(CardType::Other);

        let mut tags: Vec<String> = Vec::new();
        for tag in raw.tags.iter().flatten() {
            let tag = normalize_text(tag);
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(Self::build(
            raw.id.unwrap_or(position as u32 + 1),
            kind,
            category,
            difficulty,
            tags,
            question,
            answer,
            explanation,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn build(
        id: u32,
        kind: CardType,
        category: Category,
        difficulty: Difficulty,
        tags: Vec<String>,
        question: String,
        answer: String,
        explanation: Option<String>,
    ) -> Self {
        let mut parts: Vec<&str> = vec![question.as_str(), answer.as_str()];
        if let Some(ref e) = explanation {
            parts.push(e.as_str());
        }
        parts.extend(tags.iter().map(|t| t.as_str()));
        let search_text = parts.join(" ").to_lowercase();

        Self {
            id,
            kind,
            category,
            difficulty,
            tags,
            question,
            answer,
            explanation,
            search_text,
        }
    }

    /// Lower-cased question, answer, explanation and tags joined by spaces.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(q: &str, a: &str) -> RawCard {
        RawCard {
            question: Some(q.to_string()),
            answer: Some(a.to_string()),
            ..RawCard::default()
        }
    }

    #[test]
    fn legacy_short_field_names_are_accepted() {
        let json = r#"{"type": "exemplo", "q": "Quantos anagramas?", "a": "120"}"#;
        let raw: RawCard = serde_json::from_str(json).unwrap();
        let card = Card::from_raw(&raw, 4).unwrap();
        assert_eq!(card.question, "Quantos anagramas?");
        assert_eq!(card.answer, "120");
        assert_eq!(card.kind, CardType::Example);
        assert_eq!(card.id, 5);
    }

    #[test]
    fn portuguese_labels_map_to_categories() {
        assert_eq!("permutacao".parse::<Category>().unwrap(), Category::Permutation);
        assert_eq!("Combinação".parse::<Category>().unwrap(), Category::Combination);
        assert_eq!("princípios".parse::<Category>().unwrap(), Category::Principles);
        assert_eq!("intermediario".parse::<Difficulty>().unwrap(), Difficulty::Intermediate);
        assert_eq!("avançado".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("nonsense".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_labels_fall_back() {
        let mut r = raw("q", "a");
        r.category = Some("probabilidade".to_string());
        r.difficulty = Some("???".to_string());
        r.kind = Some("curiosidade".to_string());
        let card = Card::from_raw(&r, 0).unwrap();
        assert_eq!(card.category, Category::General);
        assert_eq!(card.difficulty, Difficulty::Basic);
        assert_eq!(card.kind, CardType::Other);
    }

    #[test]
    fn missing_text_is_rejected() {
        let r = RawCard {
            answer: Some("x".to_string()),
            ..RawCard::default()
        };
        assert_eq!(Card::from_raw(&r, 2), Err(CardRejection::MissingQuestion(2)));

        let r = raw("q", "   ");
        assert_eq!(Card::from_raw(&r, 0), Err(CardRejection::MissingAnswer(0)));
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let mut r = raw("q", "a");
        r.tags = Some(vec![
            "fatorial".to_string(),
            "anagrama".to_string(),
            "fatorial".to_string(),
            " ".to_string(),
        ]);
        let card = Card::from_raw(&r, 0).unwrap();
        assert_eq!(card.tags, vec!["fatorial", "anagrama"]);
    }

    #[test]
    fn decomposed_text_is_composed() {
        // "ção" written with a combining cedilla and combining tilde
        let r = raw("Permutac\u{0327}a\u{0303}o", "a");
        let card = Card::from_raw(&r, 0).unwrap();
        assert_eq!(card.question, "Permutação");
    }

    #[test]
    fn search_text_includes_every_field() {
        let mut r = raw("Quantos Anagramas", "5!");
        r.explanation = Some("Permutação simples".to_string());
        r.tags = Some(vec!["Fatorial".to_string()]);
        let card = Card::from_raw(&r, 0).unwrap();
        assert_eq!(card.search_text(), "quantos anagramas 5! permutação simples fatorial");
    }
}
