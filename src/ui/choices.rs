//! Choices container widget.
//!
//! A plain list container: stacks arbitrary pre-styled child lines inside one
//! bordered block. Selection handling and item styling belong to the caller;
//! this widget has no logic of its own and accepts any child count,
//! including zero.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Widget},
};

use super::theme::Theme;

/// List container for narrative choice elements
pub struct ChoiceList<'a> {
    children: Vec<Line<'a>>,
    theme: &'a Theme,
}

impl<'a> ChoiceList<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            children: Vec::new(),
            theme,
        }
    }

    pub fn children(mut self, children: Vec<Line<'a>>) -> Self {
        self.children = children;
        self
    }
}

impl Widget for ChoiceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.rule))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        for (offset, child) in self.children.iter().enumerate() {
            if offset as u16 >= inner.height {
                break;
            }
            buf.set_line(inner.x, inner.y + offset as u16, child, inner.width);
        }
    }
}
