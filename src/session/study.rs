use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::content::{Card, DeckSummary, LoadError};
use crate::engine::filter::{CardFilter, FilterUpdate, filter_indices};
use crate::session::stats::{Outcome, SessionStats};

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Uninitialized,
    Loaded,
    Failed(LoadError),
}

/// What a transition changed. Queued until the presentation drains it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Loaded,
    Failed,
    Filter,
    Position,
    Flip,
    Reverse,
    Shuffle,
    StudyMode,
    StatsReset,
    Outcome(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardView<'a> {
    NotLoaded,
    Failed(&'a LoadError),
    Empty,
    Card(&'a Card),
}

/// Snapshot handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct StudyView<'a> {
    pub current: CardView<'a>,
    /// Zero-based index into the filtered list.
    pub position: Option<usize>,
    pub filtered: usize,
    pub total: usize,
    pub flipped: bool,
    pub reversed: bool,
    pub study_mode: bool,
    pub stats: &'a SessionStats,
    pub filter: &'a CardFilter,
    pub deck: &'a DeckSummary,
}

impl StudyView<'_> {
    /// Text on the visible face and on the hidden one, honoring `reversed`.
    pub fn faces(&self) -> Option<(&str, &str)> {
        match self.current {
            CardView::Card(card) if self.reversed => {
                Some((card.answer.as_str(), card.question.as_str()))
            }
            CardView::Card(card) => Some((card.question.as_str(), card.answer.as_str())),
            _ => None,
        }
    }
}

pub struct StudySession {
    phase: Phase,
    cards: Vec<Card>,
    deck: DeckSummary,
    filter: CardFilter,
    /// Indices into `cards` passing `filter`, in display order.
    order: Vec<usize>,
    position: Option<usize>,
    flipped: bool,
    reversed: bool,
    study_mode: bool,
    stats: SessionStats,
    changes: Vec<Change>,
    rng: SmallRng,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic shuffles and random picks, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            phase: Phase::Uninitialized,
            cards: Vec::new(),
            deck: DeckSummary::default(),
            filter: CardFilter::default(),
            order: Vec::new(),
            position: None,
            flipped: false,
            reversed: false,
            study_mode: false,
            stats: SessionStats::default(),
            changes: Vec::new(),
            rng,
        }
    }

    pub fn load(&mut self, cards: Vec<Card>) {
        log::debug!("study session loaded with {} cards", cards.len());
        self.deck = DeckSummary::from_cards(&cards);
        self.cards = cards;
        self.phase = Phase::Loaded;
        self.filter = CardFilter::default();
        self.refilter();
        self.changes.push(Change::Loaded);
    }

    pub fn load_failed(&mut self, error: LoadError) {
        log::debug!("study session failed: {error}");
        self.phase = Phase::Failed(error);
        self.cards.clear();
        self.deck = DeckSummary::default();
        self.order.clear();
        self.position = None;
        self.flipped = false;
        self.changes.push(Change::Failed);
    }

    fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    fn refilter(&mut self) {
        self.order = filter_indices(&self.cards, &self.filter);
        self.position = if self.order.is_empty() { None } else { Some(0) };
        self.flipped = false;
    }

    /// Merge `update` into the predicate and restart at the first match.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        if !self.is_loaded() {
            return;
        }
        self.filter = self.filter.merge(update);
        self.refilter();
        log::debug!(
            "filter {:?} matches {} of {} cards",
            self.filter,
            self.order.len(),
            self.cards.len()
        );
        self.changes.push(Change::Filter);
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        let update = self.filter.toggled_tag(tag);
        self.set_filter(update);
    }

    pub fn clear_filters(&mut self) {
        if self.filter.is_pass_through() {
            return;
        }
        let cleared = CardFilter::default();
        self.set_filter(FilterUpdate {
            category: Some(cleared.category),
            difficulty: Some(cleared.difficulty),
            tags: Some(cleared.tags),
            search: Some(cleared.search),
        });
    }

    fn move_to(&mut self, position: usize) {
        self.position = Some(position);
        self.flipped = false;
        self.changes.push(Change::Position);
    }

    pub fn next(&mut self) {
        if let Some(pos) = self.position {
            self.move_to((pos + 1) % self.order.len());
        }
    }

    pub fn previous(&mut self) {
        if let Some(pos) = self.position {
            let len = self.order.len();
            self.move_to((pos + len - 1) % len);
        }
    }

    pub fn random(&mut self) {
        if self.position.is_some() {
            let pick = self.rng.gen_range(0..self.order.len());
            self.move_to(pick);
        }
    }

    pub fn flip(&mut self) {
        if self.position.is_some() {
            self.flipped = !self.flipped;
            self.changes.push(Change::Flip);
        }
    }

    /// Swap which face is shown first.
    pub fn toggle_reverse(&mut self) {
        self.reversed = !self.reversed;
        self.flipped = false;
        self.changes.push(Change::Reverse);
    }

    /// Permute the filtered list in place and restart at its head.
    pub fn shuffle(&mut self) {
        if self.position.is_none() {
            return;
        }
        self.order.shuffle(&mut self.rng);
        self.position = Some(0);
        self.flipped = false;
        self.changes.push(Change::Shuffle);
    }

    pub fn toggle_study_mode(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.study_mode = !self.study_mode;
        if self.study_mode {
            self.stats = SessionStats::started();
        } else {
            self.stats.stop();
        }
        log::debug!("study mode {}", if self.study_mode { "on" } else { "off" });
        self.changes.push(Change::StudyMode);
    }

    /// Zero the counters and restart the timer without leaving study mode.
    pub fn reset_stats(&mut self) {
        if !self.study_mode {
            return;
        }
        self.stats = SessionStats::started();
        log::debug!("study stats reset");
        self.changes.push(Change::StatsReset);
    }

    /// Count an outcome for the current card. Does not advance.
    pub fn record_outcome(&mut self, outcome: Outcome) -> bool {
        if !self.study_mode {
            return false;
        }
        let Some(category) = self.current_card().map(|c| c.category) else {
            return false;
        };
        self.stats.record(outcome, category);
        self.changes.push(Change::Outcome(outcome));
        true
    }

    /// Drain the change queue.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.position
            .and_then(|pos| self.order.get(pos))
            .map(|&idx| &self.cards[idx])
    }

    pub fn filtered_cards(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().map(|&idx| &self.cards[idx])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn filter(&self) -> &CardFilter {
        &self.filter
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn in_study_mode(&self) -> bool {
        self.study_mode
    }

    pub fn view(&self) -> StudyView<'_> {
        let current = match &self.phase {
            Phase::Uninitialized => CardView::NotLoaded,
            Phase::Failed(err) => CardView::Failed(err),
            Phase::Loaded => self.current_card().map_or(CardView::Empty, CardView::Card),
        };
        StudyView {
            current,
            position: self.position,
            filtered: self.order.len(),
            total: self.cards.len(),
            flipped: self.flipped,
            reversed: self.reversed,
            study_mode: self.study_mode,
            stats: &self.stats,
            filter: &self.filter,
            deck: &self.deck,
        }
    }
}
