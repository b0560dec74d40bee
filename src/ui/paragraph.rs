//! Paragraph block widget.
//!
//! Renders one paragraph group: a contiguous run of narrative lines shown as
//! a single visual block. Styling comes from the resolved first line of the
//! group; if that line could not be resolved the block falls back to the
//! dimmed style. The widget also exposes its wrapped rows so the line-stream
//! view can scroll across block boundaries.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::story::LineRecord;

/// One paragraph of narrative lines
pub struct ParagraphBlock<'a> {
    /// Resolved first line of the group, or None when the lookup missed
    first_line: Option<&'a LineRecord>,
    /// Lines to render inside the block, in order
    children: Vec<&'a LineRecord>,
    theme: &'a Theme,
    /// Left indent in columns
    indent: u16,
}

impl<'a> ParagraphBlock<'a> {
    pub fn new(first_line: Option<&'a LineRecord>, theme: &'a Theme) -> Self {
        Self {
            first_line,
            children: Vec::new(),
            theme,
            indent: 0,
        }
    }

    pub fn children(mut self, children: Vec<&'a LineRecord>) -> Self {
        self.children = children;
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    /// Wrapped display rows for the given total width
    pub fn rows(&self, width: u16) -> Vec<Line<'static>> {
        let text_width = width.saturating_sub(self.indent) as usize;
        if text_width == 0 {
            return Vec::new();
        }

        let style = self.text_style();
        let pad = " ".repeat(self.indent as usize);

        let mut rows = Vec::new();
        for child in &self.children {
            for wrapped in wrap(&child.text, text_width) {
                // Opening row of the block is emphasized
                let row_style = if rows.is_empty() {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                rows.push(Line::from(vec![
                    Span::raw(pad.clone()),
                    Span::styled(wrapped, row_style),
                ]));
            }
        }
        rows
    }

    fn text_style(&self) -> Style {
        let fg = if self.first_line.is_some() {
            self.theme.foreground
        } else {
            self.theme.dimmed
        };
        Style::default().fg(fg).bg(self.theme.background)
    }
}

impl Widget for ParagraphBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (offset, row) in self.rows(area.width).iter().enumerate() {
            if offset as u16 >= area.height {
                break;
            }
            buf.set_line(area.x, area.y + offset as u16, row, area.width);
        }
    }
}

/// Greedy display-width-aware word wrap.
///
/// Words longer than the width are broken mid-word. Empty input still yields
/// one (empty) row so empty lines keep their vertical space.
pub(crate) fn wrap(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(!current.is_empty());

        if current_width + sep + word_width <= max_width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // Break an overlong word by character
            for c in word.chars() {
                let cw = c.width().unwrap_or(0);
                if current_width + cw > max_width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += cw;
            }
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}
