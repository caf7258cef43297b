use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Position within the filtered deck, drawn as a one-line bar.
pub struct DeckProgress<'a> {
    label: String,
    current: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> DeckProgress<'a> {
    /// `current` is one-based; zero means nothing is shown.
    pub fn new(label: impl Into<String>, current: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.into(),
            current: current.min(total),
            total,
            theme,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

impl Widget for DeckProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64).round() as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label = format!("{}/{}", self.current, self.total);
        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_handles_empty_deck() {
        let theme = Theme::default();
        assert_eq!(DeckProgress::new("", 0, 0, &theme).ratio(), 0.0);
        assert_eq!(DeckProgress::new("", 3, 4, &theme).ratio(), 0.75);
        assert_eq!(DeckProgress::new("", 9, 4, &theme).ratio(), 1.0);
    }

    #[test]
    fn renders_position_label() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        DeckProgress::new("deck", 2, 5, &theme).render(area, &mut buf);
        let row: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("2/5"));
    }
}
