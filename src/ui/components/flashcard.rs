use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use combicards::session::{CardView, StudyView};

use crate::ui::layout::CardLayout;
use crate::ui::math::render_text;
use crate::ui::theme::Theme;
use crate::ui::{category_label, difficulty_label};

/// The current card, or whatever stands in for it while loading or
/// when nothing matches the filters.
pub struct Flashcard<'a> {
    view: StudyView<'a>,
    show_explanation: bool,
    theme: &'a Theme,
}

impl<'a> Flashcard<'a> {
    pub fn new(view: StudyView<'a>, show_explanation: bool, theme: &'a Theme) -> Self {
        Self {
            view,
            show_explanation,
            theme,
        }
    }

    fn render_message(&self, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);
        let top = inner.y + inner.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect::new(inner.x, top, inner.width, inner.height.saturating_sub(top - inner.y));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }
}

impl Widget for Flashcard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let card = match self.view.current {
            CardView::NotLoaded => {
                let line = Line::styled(t!("status.loading").into_owned(), Style::default().fg(colors.text_dim()));
                self.render_message(vec![line], area, buf);
                return;
            }
            CardView::Failed(err) => {
                let lines = vec![
                    Line::styled(
                        t!("status.failed", error = err.to_string()).into_owned(),
                        Style::default().fg(colors.error()),
                    ),
                    Line::from(""),
                    Line::styled(t!("status.retry").into_owned(), Style::default().fg(colors.text_dim())),
                ];
                self.render_message(lines, area, buf);
                return;
            }
            CardView::Empty => {
                let lines = vec![
                    Line::styled(t!("status.empty").into_owned(), Style::default().fg(colors.warning())),
                    Line::from(""),
                    Line::styled(t!("status.empty_hint").into_owned(), Style::default().fg(colors.text_dim())),
                ];
                self.render_message(lines, area, buf);
                return;
            }
            CardView::Card(card) => card,
        };

        let badge_color = colors.category(card.category);
        let mut title = vec![
            Span::styled(
                format!(" {} ", category_label(card.category)),
                Style::default().fg(colors.bg()).bg(badge_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", difficulty_label(card.difficulty)),
                Style::default().fg(colors.text_dim()),
            ),
        ];
        if !card.tags.is_empty() {
            title.push(Span::styled(
                format!("#{} ", card.tags.join(" #")),
                Style::default().fg(colors.accent()),
            ));
        }

        let block = Block::bordered()
            .title(Line::from(title))
            .border_style(Style::default().fg(badge_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some((front, back)) = self.view.faces() else {
            return;
        };
        let answer_side = self.view.flipped != self.view.reversed;
        let face_text = if self.view.flipped { back } else { front };
        let (face_label, face_color) = if answer_side {
            (t!("card.answer"), colors.card_back())
        } else {
            (t!("card.question"), colors.card_front())
        };

        let layout = CardLayout::new(inner, self.show_explanation);

        Paragraph::new(Line::styled(
            face_label.into_owned(),
            Style::default().fg(colors.text_dim()).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(layout.label, buf);

        let body: Vec<Line> = render_text(face_text)
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::default().fg(face_color)))
            .collect();
        let body_area = layout.body_for(body.len() as u16);
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body_area, buf);

        if let Some(explanation_area) = layout.explanation {
            let text = match &card.explanation {
                Some(e) => render_text(e),
                None => t!("card.no_explanation").into_owned(),
            };
            let block = Block::bordered()
                .title(format!(" {} ", t!("card.explanation")))
                .border_style(Style::default().fg(colors.border()));
            Paragraph::new(text)
                .style(Style::default().fg(colors.explanation()))
                .wrap(Wrap { trim: true })
                .block(block)
                .render(explanation_area, buf);
        }

        let footer = if !answer_side {
            t!("card.reveal")
        } else if self.view.study_mode {
            t!("card.rate")
        } else {
            return;
        };
        Paragraph::new(Line::styled(footer.into_owned(), Style::default().fg(colors.text_dim())))
            .alignment(Alignment::Center)
            .render(layout.footer, buf);
    }
}
