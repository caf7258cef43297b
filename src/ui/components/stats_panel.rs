use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use combicards::content::Category;
use combicards::session::stats::format_elapsed;
use combicards::session::{QuizTally, StudyView};

use crate::ui::category_label;
use crate::ui::theme::Theme;

/// Session counters. The compact form fits the sidebar; the full form
/// adds the per-category breakdown, deck counts and the quiz tally.
pub struct StatsPanel<'a> {
    view: StudyView<'a>,
    quiz: Option<QuizTally>,
    compact: bool,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn sidebar(view: StudyView<'a>, theme: &'a Theme) -> Self {
        Self {
            view,
            quiz: None,
            compact: true,
            theme,
        }
    }

    pub fn full(view: StudyView<'a>, quiz: QuizTally, theme: &'a Theme) -> Self {
        Self {
            view,
            quiz: Some(quiz),
            compact: false,
            theme,
        }
    }
}

fn row<'l>(label: String, value: String, label_style: Style, value_style: Style) -> Line<'l> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), label_style),
        Span::styled(value, value_style),
    ])
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stats = self.view.stats;
        let label = Style::default().fg(colors.text_dim());
        let value = Style::default().fg(colors.fg());
        let heading = Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = Vec::new();
        if !self.view.study_mode && stats.cards_viewed == 0 {
            lines.push(Line::styled(t!("stats.inactive").into_owned(), label));
            lines.push(Line::from(""));
        }

        lines.push(row(t!("stats.viewed").into_owned(), stats.cards_viewed.to_string(), label, value));
        lines.push(row(
            t!("stats.correct").into_owned(),
            stats.correct.to_string(),
            label,
            Style::default().fg(colors.success()),
        ));
        lines.push(row(
            t!("stats.incorrect").into_owned(),
            stats.incorrect.to_string(),
            label,
            Style::default().fg(colors.error()),
        ));
        lines.push(row(t!("stats.skipped").into_owned(), stats.skipped.to_string(), label, value));
        lines.push(row(
            t!("stats.accuracy").into_owned(),
            format!("{:.1}%", stats.accuracy()),
            label,
            value,
        ));
        lines.push(row(t!("stats.streak").into_owned(), stats.current_streak.to_string(), label, value));
        lines.push(row(t!("stats.best_streak").into_owned(), stats.best_streak.to_string(), label, value));
        lines.push(row(t!("stats.time").into_owned(), format_elapsed(stats.elapsed()), label, value));
        if !self.compact {
            lines.push(row(t!("stats.pace").into_owned(), format!("{:.1}", stats.pace_secs()), label, value));

            lines.push(Line::from(""));
            lines.push(Line::styled(t!("stats.by_category").into_owned(), heading));
            for category in Category::ALL {
                let seen = stats.by_category.get(&category).copied().unwrap_or(0);
                lines.push(row(
                    format!("  {}", category_label(category)),
                    seen.to_string(),
                    Style::default().fg(colors.category(category)),
                    value,
                ));
            }

            lines.push(Line::from(""));
            lines.push(Line::styled(t!("stats.deck").into_owned(), heading));
            lines.push(row(
                format!("  {}", t!("filters.title")),
                t!("status.filtered", count = self.view.filtered, total = self.view.total).into_owned(),
                label,
                value,
            ));
            for category in Category::ALL {
                lines.push(row(
                    format!("  {}", category_label(category)),
                    self.view.deck.category_count(category).to_string(),
                    Style::default().fg(colors.category(category)),
                    value,
                ));
            }
        }

        if let Some(tally) = self.quiz {
            lines.push(Line::from(""));
            lines.push(Line::styled(t!("stats.quiz").into_owned(), heading));
            lines.push(Line::styled(
                t!(
                    "quiz.tally",
                    correct = tally.correct,
                    incorrect = tally.incorrect,
                    skipped = tally.skipped
                )
                .into_owned(),
                value,
            ));
            lines.push(row(
                t!("stats.accuracy").into_owned(),
                format!("{:.1}%", tally.accuracy()),
                label,
                value,
            ));
        }

        let border = if self.compact { colors.border() } else { colors.border_focused() };
        let block = Block::bordered()
            .title(format!(" {} ", t!("stats.title")))
            .border_style(Style::default().fg(border));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}
