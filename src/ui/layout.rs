use ratatui::layout::{Constraint, Layout, Rect};

/// Terminals at least this wide get the statistics sidebar.
const SIDEBAR_MIN_WIDTH: u16 = 100;
const SIDEBAR_WIDTH: u16 = 34;
/// The deck progress bar needs this much room under the card.
const PROGRESS_MIN_WIDTH: u16 = 60;
const PROGRESS_MIN_BODY_HEIGHT: u16 = 20;
const PROGRESS_HEIGHT: u16 = 3;
/// Two borders and one line of text.
const EXPLANATION_MIN_ROWS: u16 = 3;
const CARD_BODY_MIN_ROWS: u16 = 3;

/// Top-level regions of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Card or quiz panel.
    pub content: Rect,
    /// Deck progress under the content, when asked for and there is room.
    pub progress: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, with_progress: bool) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .areas(area);

        let (main, sidebar) = if area.width >= SIDEBAR_MIN_WIDTH {
            let [main, side] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
                    .areas(body);
            (main, Some(side))
        } else {
            (body, None)
        };

        let fits_progress = area.width >= PROGRESS_MIN_WIDTH && body.height >= PROGRESS_MIN_BODY_HEIGHT;
        let (content, progress) = if with_progress && fits_progress {
            let [content, bar] =
                Layout::vertical([Constraint::Min(8), Constraint::Length(PROGRESS_HEIGHT)])
                    .areas(main);
            (content, Some(bar))
        } else {
            (main, None)
        };

        Self {
            header,
            content,
            progress,
            sidebar,
            footer,
        }
    }
}

/// Rows inside a flashcard's border: face label, body, optional
/// explanation box and the key reminder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardLayout {
    pub label: Rect,
    pub body: Rect,
    pub explanation: Option<Rect>,
    pub footer: Rect,
}

impl CardLayout {
    /// The explanation takes a third of the card but never squeezes the
    /// body below three rows; it is dropped when it cannot show a line.
    pub fn new(inner: Rect, show_explanation: bool) -> Self {
        let spare = inner.height.saturating_sub(2 + CARD_BODY_MIN_ROWS);
        let explanation_rows = if show_explanation {
            (inner.height / 3).max(EXPLANATION_MIN_ROWS).min(spare)
        } else {
            0
        };
        let explanation_rows = if explanation_rows < EXPLANATION_MIN_ROWS { 0 } else { explanation_rows };

        let [label, body, explanation, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(CARD_BODY_MIN_ROWS),
            Constraint::Length(explanation_rows),
            Constraint::Length(1),
        ])
        .areas(inner);

        Self {
            label,
            body,
            explanation: (explanation_rows > 0).then_some(explanation),
            footer,
        }
    }

    /// Body area for `rows` lines of text, centered vertically with a
    /// one-column margin on each side.
    pub fn body_for(&self, rows: u16) -> Rect {
        let pad = self.body.height.saturating_sub(rows) / 2;
        Rect::new(
            self.body.x.saturating_add(1),
            self.body.y + pad,
            self.body.width.saturating_sub(2),
            self.body.height - pad,
        )
    }
}

/// Overlays drawn on top of the flashcard or quiz screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Popup {
    Filters,
    Stats,
    Help,
}

impl Popup {
    /// Preferred share of the screen in percent, then the smallest size
    /// that still shows the content unwrapped.
    fn geometry(self) -> ((u16, u16), (u16, u16)) {
        match self {
            Popup::Filters => ((60, 70), (48, 12)),
            Popup::Stats => ((60, 80), (44, 18)),
            // The longest key line is 64 columns plus borders.
            Popup::Help => ((60, 70), (70, 20)),
        }
    }

    /// Where to draw this popup, centered and clamped to `screen`.
    pub fn area(self, screen: Rect) -> Rect {
        let ((pct_w, pct_h), (min_w, min_h)) = self.geometry();
        let share = |len: u16, pct: u16| (u32::from(len) * u32::from(pct) / 100) as u16;
        let width = share(screen.width, pct_w).max(min_w).min(screen.width);
        let height = share(screen.height, pct_h).max(min_h).min(screen.height);
        Rect::new(
            screen.x + (screen.width - width) / 2,
            screen.y + (screen.height - height) / 2,
            width,
            height,
        )
    }
}

/// Greedily pack key hints into as few rows of `width` columns as
/// possible. Rows start with a space and hints are two spaces apart.
pub fn pack_hints<S: AsRef<str>>(hints: &[S], width: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    if width == 0 {
        return rows;
    }
    for hint in hints.iter().map(AsRef::as_ref).filter(|h| !h.is_empty()) {
        match rows.last_mut() {
            Some(row) if row.chars().count() + 2 + hint.chars().count() <= width => {
                row.push_str("  ");
                row.push_str(hint);
            }
            _ => rows.push(format!(" {hint}")),
        }
    }
    rows
}
