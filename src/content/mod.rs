pub mod card;
pub mod deck;
pub mod question;
pub mod source;

use std::io;
use std::thread::{self, JoinHandle};

pub use card::{Card, CardType, Category, Difficulty};
pub use deck::DeckSummary;
pub use question::Question;
pub use source::DatasetSource;

use crate::store::schema::{CARDS_FILE, CardsDocument, QUESTIONS_FILE, QuestionsDocument};

/// Why a dataset could not be loaded. Carries messages rather than source
/// errors so it can live in session state and be compared in tests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("could not read dataset: {0}")]
    Io(String),
    #[error("could not download dataset: {0}")]
    Network(String),
    #[error("malformed dataset: {0}")]
    Parse(String),
    #[error("dataset has no usable entries: {0}")]
    Invalid(String),
    #[error("dataset not found: {0}")]
    Missing(String),
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dataset {
    Cards,
    Questions,
}

impl Dataset {
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Cards => CARDS_FILE,
            Dataset::Questions => QUESTIONS_FILE,
        }
    }
}

/// Result of a background load, tagged with the dataset it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded {
    Cards(Result<Vec<Card>, LoadError>),
    Questions(Result<Vec<Question>, LoadError>),
}

#[derive(Clone, Debug)]
pub struct ContentStore {
    source: DatasetSource,
}

impl ContentStore {
    pub fn new(source: DatasetSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn load_cards(&self) -> Result<Vec<Card>, LoadError> {
        let raw = self.source.fetch(CARDS_FILE)?;
        let cards = parse_cards(&raw)?;
        log::info!("loaded {} cards from {}", cards.len(), self.source);
        Ok(cards)
    }

    pub fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        let raw = self.source.fetch(QUESTIONS_FILE)?;
        let questions = parse_questions(&raw)?;
        log::info!("loaded {} questions from {}", questions.len(), self.source);
        Ok(questions)
    }

    pub fn load(&self, dataset: Dataset) -> Loaded {
        match dataset {
            Dataset::Cards => Loaded::Cards(self.load_cards()),
            Dataset::Questions => Loaded::Questions(self.load_questions()),
        }
    }

    /// Load on a worker thread and hand the result to `callback` there.
    /// There is no cancellation: every started load delivers exactly once.
    pub fn load_in_background<F>(&self, dataset: Dataset, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Loaded) + Send + 'static,
    {
        let store = self.clone();
        thread::spawn(move || {
            let loaded = store.load(dataset);
            if let Loaded::Cards(Err(ref e)) | Loaded::Questions(Err(ref e)) = loaded {
                log::warn!("loading {} failed: {e}", dataset.file_name());
            }
            callback(loaded);
        })
    }
}

/// Parse and adapt a card document. Entries that cannot be adapted are
/// skipped; a non-empty document with no usable entry is an error.
pub fn parse_cards(json: &str) -> Result<Vec<Card>, LoadError> {
    let doc: CardsDocument =
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
    let raw = doc.into_cards();

    let mut cards = Vec::with_capacity(raw.len());
    for (position, entry) in raw.iter().enumerate() {
        match Card::from_raw(entry, position) {
            Ok(card) => cards.push(card),
            Err(rejection) => log::warn!("skipping card: {rejection}"),
        }
    }
    if cards.is_empty() && !raw.is_empty() {
        return Err(LoadError::Invalid(format!(
            "none of {} cards could be read",
            raw.len()
        )));
    }
    Ok(cards)
}

pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let doc: QuestionsDocument =
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;

    let mut questions = Vec::with_capacity(doc.questions.len());
    for (position, entry) in doc.questions.iter().enumerate() {
        match Question::from_raw(entry, position) {
            Ok(question) => questions.push(question),
            Err(rejection) => log::warn!("skipping question: {rejection}"),
        }
    }
    if questions.is_empty() && !doc.questions.is_empty() {
        return Err(LoadError::Invalid(format!(
            "none of {} questions could be read",
            doc.questions.len()
        )));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::store::json_store::JsonStore;

    #[test]
    fn bare_and_structured_documents_agree() {
        let bare = r#"[{"q": "Quanto é 3!?", "a": "6", "category": "permutacao"}]"#;
        let structured =
            r#"{"metadata": {}, "cards": [{"question": "Quanto é 3!?", "answer": "6", "category": "permutation"}]}"#;
        assert_eq!(parse_cards(bare).unwrap(), parse_cards(structured).unwrap());
    }

    #[test]
    fn bad_entries_are_skipped() {
        let json = r#"[{"q": "", "a": "x"}, {"q": "ok", "a": "fine"}]"#;
        let cards = parse_cards(json).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, 2);
    }

    #[test]
    fn document_without_usable_cards_is_invalid() {
        let json = r#"[{"q": "no answer"}]"#;
        assert!(matches!(parse_cards(json), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn empty_document_is_not_an_error() {
        assert_eq!(parse_cards("[]").unwrap(), Vec::new());
        assert_eq!(parse_questions(r#"{"questions": []}"#).unwrap(), Vec::new());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_cards("{not json"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_questions("[1, 2]"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn directory_source_reads_both_datasets() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store
            .save(
                CARDS_FILE,
                &serde_json::json!([{"q": "a", "a": "b"}, {"q": "c", "a": "d"}]),
            )
            .unwrap();
        store
            .save(
                QUESTIONS_FILE,
                &serde_json::json!({"questions": [
                    {"question": "?", "options": ["x", "y"], "correct_answer": 0}
                ]}),
            )
            .unwrap();

        let content = ContentStore::new(DatasetSource::Directory(dir.path().to_path_buf()));
        assert_eq!(content.load_cards().unwrap().len(), 2);
        assert_eq!(content.load_questions().unwrap().len(), 1);
    }

    #[test]
    fn missing_directory_dataset_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let content = ContentStore::new(DatasetSource::Directory(dir.path().to_path_buf()));
        assert!(matches!(content.load_questions(), Err(LoadError::Missing(_))));
    }

    #[test]
    fn background_load_delivers_through_callback() {
        let (tx, rx) = mpsc::channel();
        let content = ContentStore::new(DatasetSource::Bundled);
        content
            .load_in_background(Dataset::Cards, move |loaded| {
                let _ = tx.send(loaded);
            })
            .join()
            .unwrap();
        match rx.recv().unwrap() {
            Loaded::Cards(Ok(cards)) => assert!(!cards.is_empty()),
            other => panic!("unexpected load result: {other:?}"),
        }
    }
}
