use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use combicards::engine::filter::Selection;
use combicards::session::StudyView;

use crate::ui::theme::Theme;
use crate::ui::{category_label, difficulty_label};

/// Category and difficulty selectors followed by one toggle per tag.
pub struct FilterPanel<'a> {
    view: StudyView<'a>,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> FilterPanel<'a> {
    pub fn new(view: StudyView<'a>, cursor: usize, theme: &'a Theme) -> Self {
        Self { view, cursor, theme }
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let filter = self.view.filter;
        let deck = self.view.deck;

        let block = Block::bordered()
            .title(format!(
                " {} · {} ",
                t!("filters.title"),
                t!("status.filtered", count = self.view.filtered, total = self.view.total)
            ))
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        let row_style = |row: usize| {
            if row == self.cursor {
                Style::default().fg(colors.bg()).bg(colors.accent())
            } else {
                Style::default().fg(colors.fg())
            }
        };
        let all = t!("filters.all").into_owned();

        let category = match filter.category {
            Selection::All => all.clone(),
            Selection::Only(c) => format!("{} ({})", category_label(c), deck.category_count(c)),
        };
        let difficulty = match filter.difficulty {
            Selection::All => all,
            Selection::Only(d) => format!("{} ({})", difficulty_label(d), deck.difficulty_count(d)),
        };

        let label_style = Style::default().fg(colors.text_dim());
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{:<12}", t!("filters.category")), label_style),
                Span::styled(format!("◀ {category} ▶"), row_style(0)),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<12}", t!("filters.difficulty")), label_style),
                Span::styled(format!("◀ {difficulty} ▶"), row_style(1)),
            ]),
            Line::from(""),
            Line::styled(
                t!("filters.tags").into_owned(),
                label_style.add_modifier(Modifier::BOLD),
            ),
        ];

        if deck.by_tag.is_empty() {
            lines.push(Line::styled(format!("  {}", t!("filters.none")), label_style));
        }
        for (i, (tag, count)) in deck.by_tag.iter().enumerate() {
            let checked = if filter.tags.contains(tag) { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{checked} {tag} ({count})"), row_style(i + 2)),
            ]));
        }

        lines.push(Line::from(""));
        let search = if filter.search.is_empty() {
            t!("filters.none").into_owned()
        } else {
            format!("\"{}\"", filter.search)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", t!("filters.search")), label_style),
            Span::styled(search, Style::default().fg(colors.accent())),
        ]));

        // Keep the cursor row on screen when the tag list is long.
        let cursor_line = (if self.cursor < 2 { self.cursor } else { self.cursor + 2 }) as u16;
        let scroll = cursor_line.saturating_sub(inner.height.saturating_sub(1));
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}
