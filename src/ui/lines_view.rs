//! Line-stream view: renders the whole narrative as paragraph blocks.
//!
//! Grouping follows `paragraphs`: the first group renders entirely inside one
//! paragraph block; every later group starts with the delimiter line that
//! caused the split, rendered outside any block (a rule row for hard breaks,
//! a blank row for soft breaks), followed by the remainder of the group as a
//! block of its own. Lines are looked up by id at draw time; ids with no
//! record render nothing and leave sibling groups untouched.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use super::paragraph::ParagraphBlock;
use super::paragraphs::paragraph_groups;
use super::theme::Theme;
use crate::story::{BreakLevel, LineId, LineRecord, StoryState};

/// Compute every display row of the narrative for the given width.
///
/// `ids` is the ordered line-id sequence; `lookup` resolves one id to its
/// record and may miss.
pub fn narrative_rows<'s, F>(
    ids: &[LineId],
    lookup: F,
    theme: &Theme,
    width: u16,
    indent: u16,
) -> Vec<Line<'static>>
where
    F: Fn(&LineId) -> Option<&'s LineRecord>,
{
    let groups = paragraph_groups(ids, &lookup);
    let mut rows = Vec::new();

    for (group_idx, group) in groups.iter().enumerate() {
        if group_idx == 0 {
            // Whole leading group is one paragraph
            push_paragraph(&mut rows, group, &lookup, theme, width, indent);
            continue;
        }

        // Later groups open with the delimiter that caused the split
        if let Some(delimiter) = group.first().and_then(&lookup) {
            rows.push(delimiter_row(delimiter, theme, width));
        }
        push_paragraph(&mut rows, &group[1..], &lookup, theme, width, indent);
    }

    rows
}

/// Append one paragraph block's rows; an empty or fully-unresolved group
/// contributes nothing.
fn push_paragraph<'s, F>(
    rows: &mut Vec<Line<'static>>,
    group: &[LineId],
    lookup: &F,
    theme: &Theme,
    width: u16,
    indent: u16,
) where
    F: Fn(&LineId) -> Option<&'s LineRecord>,
{
    let children: Vec<&LineRecord> = group.iter().filter_map(lookup).collect();
    if children.is_empty() {
        return;
    }

    let first_line = group.first().and_then(lookup);
    let block = ParagraphBlock::new(first_line, theme)
        .children(children)
        .indent(indent);
    rows.extend(block.rows(width));
}

/// The row a delimiter line occupies outside any paragraph
fn delimiter_row(delimiter: &LineRecord, theme: &Theme, width: u16) -> Line<'static> {
    let style = Style::default().fg(theme.rule).bg(theme.background);
    match delimiter.break_level {
        BreakLevel::Hard => {
            Line::from(Span::styled("─".repeat(width as usize), style))
        }
        // Soft breaks (and the unreachable None) take a blank row
        _ => Line::from(Span::styled(String::new(), style)),
    }
}

/// Scrollable widget over the full narrative
pub struct LinesView<'a> {
    story: &'a StoryState,
    theme: &'a Theme,
    scroll: u16,
    indent: u16,
}

impl<'a> LinesView<'a> {
    pub fn new(story: &'a StoryState, theme: &'a Theme) -> Self {
        Self {
            story,
            theme,
            scroll: 0,
            indent: 0,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    /// Total row count at the given width, for scroll clamping
    pub fn total_rows(&self, width: u16) -> usize {
        self.rows(width).len()
    }

    fn rows(&self, width: u16) -> Vec<Line<'static>> {
        narrative_rows(
            self.story.line_ids(),
            |id| self.story.line(id),
            self.theme,
            width,
            self.indent,
        )
    }
}

impl Widget for LinesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows = self.rows(area.width);
        for (offset, row) in rows.iter().skip(self.scroll as usize).enumerate() {
            if offset as u16 >= area.height {
                break;
            }
            buf.set_line(area.x, area.y + offset as u16, row, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::LineKind;

    fn normal(id: &str, index: usize, text: &str) -> LineRecord {
        LineRecord {
            id: LineId::from(id),
            index,
            kind: LineKind::Normal,
            break_level: BreakLevel::None,
            text: text.to_string(),
        }
    }

    fn delimiter(id: &str, index: usize, level: BreakLevel) -> LineRecord {
        LineRecord {
            id: LineId::from(id),
            index,
            kind: LineKind::Empty,
            break_level: level,
            text: String::new(),
        }
    }

    fn row_text(row: &Line) -> String {
        row.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn texts(rows: &[Line]) -> Vec<String> {
        rows.iter().map(row_text).collect()
    }

    #[test]
    fn test_no_delimiters_single_paragraph_in_order() {
        let story = StoryState::from_records(
            vec![
                normal("1", 0, "one"),
                normal("2", 1, "two"),
                normal("3", 2, "three"),
            ],
            vec![],
        )
        .unwrap();

        let rows = narrative_rows(story.line_ids(), |id| story.line(id), &Theme::default(), 40, 0);
        assert_eq!(texts(&rows), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_hard_delimiter_renders_rule_between_paragraphs() {
        let story = StoryState::from_records(
            vec![
                normal("1", 0, "one"),
                delimiter("2", 1, BreakLevel::Hard),
                normal("3", 2, "three"),
            ],
            vec![],
        )
        .unwrap();

        let rows = narrative_rows(story.line_ids(), |id| story.line(id), &Theme::default(), 10, 0);
        assert_eq!(
            texts(&rows),
            vec!["one".to_string(), "─".repeat(10), "three".to_string()]
        );
    }

    #[test]
    fn test_soft_delimiter_renders_blank_row() {
        let story = StoryState::from_records(
            vec![
                normal("1", 0, "one"),
                delimiter("2", 1, BreakLevel::Soft),
                normal("3", 2, "three"),
            ],
            vec![],
        )
        .unwrap();

        let rows = narrative_rows(story.line_ids(), |id| story.line(id), &Theme::default(), 10, 0);
        assert_eq!(texts(&rows), vec!["one", "", "three"]);
    }

    #[test]
    fn test_missing_id_renders_nothing_for_slot() {
        let story = StoryState::from_records(
            vec![normal("1", 0, "one"), normal("3", 2, "three")],
            vec![],
        )
        .unwrap();
        // "2" is stale; its slot is silently empty, siblings unaffected
        let ids = [LineId::from("1"), LineId::from("2"), LineId::from("3")];

        let rows = narrative_rows(&ids, |id| story.line(id), &Theme::default(), 40, 0);
        assert_eq!(texts(&rows), vec!["one", "three"]);
    }

    #[test]
    fn test_delimiter_at_start_leaves_no_leading_paragraph() {
        let story = StoryState::from_records(
            vec![delimiter("gap", 0, BreakLevel::Hard), normal("1", 1, "one")],
            vec![],
        )
        .unwrap();

        // Leading group is empty, so the rule row comes first
        let rows = narrative_rows(story.line_ids(), |id| story.line(id), &Theme::default(), 8, 0);
        assert_eq!(texts(&rows), vec!["─".repeat(8), "one".to_string()]);
    }

    #[test]
    fn test_trailing_delimiter_has_no_following_paragraph() {
        let story = StoryState::from_records(
            vec![normal("1", 0, "one"), delimiter("gap", 1, BreakLevel::Soft)],
            vec![],
        )
        .unwrap();

        let rows = narrative_rows(story.line_ids(), |id| story.line(id), &Theme::default(), 40, 0);
        assert_eq!(texts(&rows), vec!["one", ""]);
    }

    #[test]
    fn test_rerender_produces_identical_rows() {
        let story = StoryState::from_records(
            vec![
                normal("1", 0, "one"),
                delimiter("2", 1, BreakLevel::Hard),
                normal("3", 2, "three"),
            ],
            vec![],
        )
        .unwrap();

        let theme = Theme::default();
        let first = narrative_rows(story.line_ids(), |id| story.line(id), &theme, 20, 0);
        let second = narrative_rows(story.line_ids(), |id| story.line(id), &theme, 20, 0);
        assert_eq!(texts(&first), texts(&second));
    }

    #[test]
    fn test_widget_applies_scroll() {
        let story = StoryState::from_records(
            vec![
                normal("1", 0, "one"),
                normal("2", 1, "two"),
                normal("3", 2, "three"),
            ],
            vec![],
        )
        .unwrap();
        let theme = Theme::default();

        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        LinesView::new(&story, &theme).scroll(1).render(area, &mut buf);

        let top: String = (0..3)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(top, "two");
    }

    #[test]
    fn test_total_rows_counts_wrapping() {
        let story = StoryState::from_records(
            vec![normal("1", 0, "alpha beta gamma")],
            vec![],
        )
        .unwrap();
        let theme = Theme::default();

        let view = LinesView::new(&story, &theme);
        assert_eq!(view.total_rows(40), 1);
        assert_eq!(view.total_rows(6), 3);
    }
}
