use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use combicards::content::question::option_letter;
use combicards::session::{QuizPhase, QuizSession};

use crate::ui::difficulty_label;
use crate::ui::math::render_text;
use crate::ui::theme::Theme;

pub struct QuizPanel<'a> {
    quiz: &'a QuizSession,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> QuizPanel<'a> {
    pub fn new(quiz: &'a QuizSession, loading: bool, theme: &'a Theme) -> Self {
        Self {
            quiz,
            loading,
            theme,
        }
    }
}

impl Widget for QuizPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let dim = Style::default().fg(colors.text_dim());

        let mut lines: Vec<Line> = Vec::new();
        let mut title = format!(" {} ", t!("quiz.title"));

        match (self.quiz.phase(), self.quiz.current()) {
            (QuizPhase::Failed(err), _) => {
                lines.push(Line::styled(
                    t!("status.quiz_failed", error = err.to_string()).into_owned(),
                    Style::default().fg(colors.error()),
                ));
                lines.push(Line::from(""));
                lines.push(Line::styled(t!("status.retry").into_owned(), dim));
            }
            (QuizPhase::Uninitialized, _) => {
                if self.loading {
                    lines.push(Line::styled(t!("status.loading").into_owned(), dim));
                }
            }
            (QuizPhase::Loaded, None) => {
                lines.push(Line::styled(t!("quiz.empty").into_owned(), Style::default().fg(colors.warning())));
            }
            (QuizPhase::Loaded, Some(question)) => {
                title = format!(
                    " {} ",
                    t!(
                        "quiz.position",
                        current = self.quiz.position() + 1,
                        total = self.quiz.questions().len()
                    )
                );
                let mut source = question.source_exam.clone();
                if let Some(year) = question.year {
                    source.push_str(&format!(" {year}"));
                }
                lines.push(Line::from(vec![
                    Span::styled(source, Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", difficulty_label(question.difficulty)), dim),
                ]));
                lines.push(Line::from(""));
                for text_line in render_text(&question.question).lines() {
                    lines.push(Line::styled(text_line.to_string(), Style::default().fg(colors.card_front())));
                }
                lines.push(Line::from(""));

                let feedback = self.quiz.feedback();
                for (i, option) in question.options.iter().enumerate() {
                    let selected = self.quiz.selected() == Some(i);
                    let marker = if selected { "▶" } else { " " };
                    let mut style = Style::default().fg(colors.fg());
                    if let Some(fb) = feedback {
                        if i == fb.correct {
                            style = Style::default().fg(colors.success()).add_modifier(Modifier::BOLD);
                        } else if i == fb.chosen {
                            style = Style::default().fg(colors.error()).add_modifier(Modifier::CROSSED_OUT);
                        }
                    } else if selected {
                        style = Style::default().fg(colors.bg()).bg(colors.accent());
                    }
                    lines.push(Line::from(vec![
                        Span::styled(format!("{marker} "), Style::default().fg(colors.accent())),
                        Span::styled(format!("{}) {}", option_letter(i), render_text(option)), style),
                    ]));
                }

                if let Some(fb) = feedback {
                    lines.push(Line::from(""));
                    let verdict = if fb.is_correct {
                        Line::styled(t!("quiz.correct").into_owned(), Style::default().fg(colors.success()))
                    } else {
                        Line::styled(
                            t!("quiz.incorrect", letter = option_letter(fb.correct)).into_owned(),
                            Style::default().fg(colors.error()),
                        )
                    };
                    lines.push(verdict);
                    lines.push(Line::from(""));
                    lines.push(Line::styled(
                        t!("quiz.explanation").into_owned(),
                        dim.add_modifier(Modifier::ITALIC),
                    ));
                    let explanation = match &question.explanation {
                        Some(e) => render_text(e),
                        None => t!("quiz.no_explanation").into_owned(),
                    };
                    for text_line in explanation.lines() {
                        lines.push(Line::styled(text_line.to_string(), Style::default().fg(colors.explanation())));
                    }
                }
            }
        }

        let tally = self.quiz.tally();
        let block = Block::bordered()
            .title(title)
            .title_bottom(
                Line::from(format!(
                    " {} ",
                    t!(
                        "quiz.tally",
                        correct = tally.correct,
                        incorrect = tally.incorrect,
                        skipped = tally.skipped
                    )
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(colors.border_focused()));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}
