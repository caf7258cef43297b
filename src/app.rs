use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use combicards::config::Config;
use combicards::content::{Category, ContentStore, Dataset, Difficulty, Loaded};
use combicards::engine::filter::{FilterUpdate, Selection};
use combicards::session::{Change, Outcome, QuizPhase, QuizSession, StudySession};
use rust_i18n::t;

use crate::event::AppEvent;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Flashcards,
    Quiz,
    Filters,
    Stats,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

/// A short status message that disappears on its own.
pub struct Flash {
    pub text: String,
    pub kind: FlashKind,
    until: Instant,
}

/// Rows of the filter screen: category, difficulty, then one per tag.
pub const FILTER_FIXED_ROWS: usize = 2;

pub struct App {
    pub screen: AppScreen,
    /// Where overlay screens return to.
    pub base_screen: AppScreen,
    pub study: StudySession,
    pub quiz: QuizSession,
    pub content: ContentStore,
    pub config: Config,
    pub theme: &'static Theme,
    pub show_explanation: bool,
    /// Text being typed into the search box, if it is open.
    pub search_input: Option<String>,
    pub filter_cursor: usize,
    pub flash: Option<Flash>,
    pub cards_loading: bool,
    pub questions_loading: bool,
    pub should_quit: bool,
    pending_advance: Option<Instant>,
    initial_filter: Option<FilterUpdate>,
    events: Sender<AppEvent>,
}

impl App {
    pub fn new(
        config: Config,
        theme: &'static Theme,
        content: ContentStore,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            screen: AppScreen::Flashcards,
            base_screen: AppScreen::Flashcards,
            study: StudySession::new(),
            quiz: QuizSession::new(),
            content,
            config,
            theme,
            show_explanation: false,
            search_input: None,
            filter_cursor: 0,
            flash: None,
            cards_loading: false,
            questions_loading: false,
            should_quit: false,
            pending_advance: None,
            initial_filter: None,
            events,
        }
    }

    /// Filter applied once the cards arrive.
    pub fn set_initial_filter(&mut self, update: FilterUpdate) {
        self.initial_filter = Some(update);
    }

    pub fn start_load(&mut self, dataset: Dataset) {
        match dataset {
            Dataset::Cards => self.cards_loading = true,
            Dataset::Questions => self.questions_loading = true,
        }
        log::info!("loading {} from {}", dataset.file_name(), self.content.source());
        let tx = self.events.clone();
        self.content.load_in_background(dataset, move |loaded| {
            let _ = tx.send(AppEvent::Loaded(loaded));
        });
    }

    pub fn on_loaded(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Cards(result) => {
                self.cards_loading = false;
                match result {
                    Ok(cards) => {
                        self.study.load(cards);
                        if let Some(update) = self.initial_filter.take() {
                            self.study.set_filter(update);
                        }
                        if self.config.start_reversed && !self.study.is_reversed() {
                            self.study.toggle_reverse();
                        }
                        if self.config.shuffle_on_load {
                            self.study.shuffle();
                        }
                    }
                    Err(err) => self.study.load_failed(err),
                }
                self.process_changes();
            }
            Loaded::Questions(result) => {
                self.questions_loading = false;
                match result {
                    Ok(questions) => self.quiz.load(questions),
                    Err(err) => self.quiz.load_failed(err),
                }
            }
        }
    }

    /// Retry whatever failed on the current screen.
    pub fn retry(&mut self) {
        match self.base_screen {
            AppScreen::Quiz if matches!(self.quiz.phase(), QuizPhase::Failed(_)) => {
                self.start_load(Dataset::Questions)
            }
            _ if matches!(self.study.phase(), combicards::session::Phase::Failed(_)) => {
                self.start_load(Dataset::Cards)
            }
            _ => {}
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.pending_advance.is_some_and(|at| now >= at) {
            self.pending_advance = None;
            self.study.next();
            self.process_changes();
        }
        if self.flash.as_ref().is_some_and(|f| now >= f.until) {
            self.flash = None;
        }
    }

    fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.config.advance_delay_ms)
    }

    pub fn flash(&mut self, text: impl Into<String>, kind: FlashKind) {
        let shown_for = self.advance_delay().max(Duration::from_millis(1200));
        self.flash = Some(Flash {
            text: text.into(),
            kind,
            until: Instant::now() + shown_for,
        });
    }

    /// React to whatever the study session changed since the last call.
    pub fn process_changes(&mut self) {
        for change in self.study.take_changes() {
            match change {
                Change::Loaded | Change::Filter | Change::Position | Change::Shuffle => {
                    self.show_explanation = false;
                    self.pending_advance = None;
                }
                Change::Failed => {
                    self.show_explanation = false;
                    self.pending_advance = None;
                    self.search_input = None;
                }
                Change::Outcome(outcome) => {
                    let (text, kind) = match outcome {
                        Outcome::Correct => (t!("feedback.correct"), FlashKind::Success),
                        Outcome::Incorrect => (t!("feedback.incorrect"), FlashKind::Error),
                        Outcome::Skipped => (t!("feedback.skipped"), FlashKind::Info),
                    };
                    self.flash(text, kind);
                    self.pending_advance = Some(Instant::now() + self.advance_delay());
                }
                Change::StudyMode => {
                    let text = if self.study.in_study_mode() {
                        t!("feedback.study_on")
                    } else {
                        t!("feedback.study_off")
                    };
                    self.flash(text, FlashKind::Info);
                }
                Change::StatsReset => self.flash(t!("feedback.stats_reset"), FlashKind::Info),
                Change::Flip | Change::Reverse => {}
            }
        }
    }

    /// Mark the current card. Only once the answer side is showing, and
    /// only one outcome per card while the advance is pending.
    pub fn record(&mut self, outcome: Outcome) {
        if self.pending_advance.is_some() || !self.answer_visible() {
            return;
        }
        if self.study.record_outcome(outcome) {
            self.process_changes();
            if self.config.advance_delay_ms == 0 {
                self.tick();
            }
        }
    }

    fn answer_visible(&self) -> bool {
        self.study.is_flipped() != self.study.is_reversed()
    }

    pub fn shuffle(&mut self) {
        self.study.shuffle();
        if self.study.view().position.is_some() {
            self.flash(t!("feedback.shuffled"), FlashKind::Info);
        }
        self.process_changes();
    }

    pub fn go_to(&mut self, screen: AppScreen) {
        match screen {
            AppScreen::Flashcards | AppScreen::Quiz => {
                self.base_screen = screen;
                if screen == AppScreen::Quiz
                    && *self.quiz.phase() == QuizPhase::Uninitialized
                    && !self.questions_loading
                {
                    self.start_load(Dataset::Questions);
                }
            }
            AppScreen::Filters => self.filter_cursor = 0,
            AppScreen::Stats | AppScreen::Help => {}
        }
        self.screen = screen;
    }

    pub fn back(&mut self) {
        self.screen = self.base_screen;
    }

    pub fn toggle_mode(&mut self) {
        let target = match self.base_screen {
            AppScreen::Quiz => AppScreen::Flashcards,
            _ => AppScreen::Quiz,
        };
        self.go_to(target);
    }

    pub fn open_search(&mut self) {
        self.search_input = Some(self.study.filter().search.clone());
    }

    pub fn search_push(&mut self, ch: char) {
        if let Some(input) = self.search_input.as_mut() {
            input.push(ch);
            let text = input.clone();
            self.study.set_filter(FilterUpdate::search(text));
            self.process_changes();
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(input) = self.search_input.as_mut() {
            input.pop();
            let text = input.clone();
            self.study.set_filter(FilterUpdate::search(text));
            self.process_changes();
        }
    }

    pub fn close_search(&mut self, keep: bool) {
        if !keep {
            self.study.set_filter(FilterUpdate::search(""));
            self.process_changes();
        }
        self.search_input = None;
    }

    pub fn filter_row_count(&self) -> usize {
        FILTER_FIXED_ROWS + self.study.view().deck.by_tag.len()
    }

    pub fn filter_cursor_down(&mut self) {
        let rows = self.filter_row_count();
        if self.filter_cursor + 1 < rows {
            self.filter_cursor += 1;
        }
    }

    pub fn filter_cursor_up(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    /// Change the value of the selected filter row. `forward` picks the
    /// cycling direction for category and difficulty; tag rows toggle.
    pub fn filter_change(&mut self, forward: bool) {
        let update = match self.filter_cursor {
            0 => FilterUpdate::category(cycle(
                self.study.filter().category,
                &Category::ALL,
                forward,
            )),
            1 => FilterUpdate::difficulty(cycle(
                self.study.filter().difficulty,
                &Difficulty::ALL,
                forward,
            )),
            row => {
                let tag = self
                    .study
                    .view()
                    .deck
                    .tags()
                    .nth(row - FILTER_FIXED_ROWS)
                    .map(str::to_string);
                match tag {
                    Some(tag) => self.study.filter().toggled_tag(&tag),
                    None => return,
                }
            }
        };
        self.study.set_filter(update);
        self.process_changes();
    }

    pub fn clear_filters(&mut self) {
        self.study.clear_filters();
        self.process_changes();
    }

    pub fn save_config(&mut self) {
        match self.config.save() {
            Ok(()) => self.flash(t!("feedback.config_saved"), FlashKind::Success),
            Err(e) => {
                log::warn!("saving config failed: {e}");
                self.flash(e.to_string(), FlashKind::Error);
            }
        }
    }
}

/// Step through `All` followed by every value, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(current: Selection<T>, values: &[T], forward: bool) -> Selection<T> {
    let mut ring: Vec<Selection<T>> = vec![Selection::All];
    ring.extend(values.iter().copied().map(Selection::Only));
    let idx = ring.iter().position(|s| *s == current).unwrap_or(0);
    let len = ring.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    ring[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_through_all() {
        let all = Selection::<Difficulty>::All;
        let first = cycle(all, &Difficulty::ALL, true);
        assert_eq!(first, Selection::Only(Difficulty::Basic));
        assert_eq!(cycle(all, &Difficulty::ALL, false), Selection::Only(Difficulty::Advanced));
        assert_eq!(
            cycle(Selection::Only(Difficulty::Advanced), &Difficulty::ALL, true),
            Selection::All
        );
    }
}
