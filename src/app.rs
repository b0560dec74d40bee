use crate::config::Config;
use crate::story::{Choice, StoryState};

/// Application state
pub struct App {
    /// Loaded story (lines and choices)
    story: StoryState,
    /// Configuration
    config: Config,
    /// Vertical scroll offset into the narrative rows
    scroll: u16,
    /// Largest useful scroll offset, updated by the draw pass
    max_scroll: u16,
    /// Highlighted choice index
    selected_choice: usize,
    /// Set when the user asks to quit
    quit: bool,
}

impl App {
    pub fn new(story: StoryState, config: Config) -> Self {
        Self {
            story,
            config,
            scroll: 0,
            max_scroll: 0,
            selected_choice: 0,
            quit: false,
        }
    }

    pub fn story(&self) -> &StoryState {
        &self.story
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Scroll toward the start of the narrative
    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    /// Scroll toward the end, clamped to the last known row count
    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll;
    }

    /// Called by the draw pass once it knows how many rows the narrative
    /// occupies at the current width
    pub fn set_max_scroll(&mut self, total_rows: usize, visible_rows: u16) {
        let total = u16::try_from(total_rows).unwrap_or(u16::MAX);
        self.max_scroll = total.saturating_sub(visible_rows);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    pub fn selected_choice(&self) -> usize {
        self.selected_choice
    }

    pub fn choices(&self) -> &[Choice] {
        self.story.choices()
    }

    /// Highlight the next choice, wrapping at the end
    pub fn next_choice(&mut self) {
        let total = self.choices().len();
        if total > 0 {
            self.selected_choice = (self.selected_choice + 1) % total;
        }
    }

    /// Highlight the previous choice, wrapping at the start
    pub fn prev_choice(&mut self) {
        let total = self.choices().len();
        if total == 0 {
            return;
        }
        self.selected_choice = if self.selected_choice == 0 {
            total - 1
        } else {
            self.selected_choice - 1
        };
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{BreakLevel, LineId, LineKind, LineRecord};

    fn app_with_choices(count: usize) -> App {
        let records = vec![LineRecord {
            id: LineId::from("l1"),
            index: 0,
            kind: LineKind::Normal,
            break_level: BreakLevel::None,
            text: "text".to_string(),
        }];
        let choices = (0..count)
            .map(|i| Choice {
                id: format!("c{i}"),
                text: format!("choice {i}"),
            })
            .collect();
        let story = StoryState::from_records(records, choices).unwrap();
        App::new(story, Config::default())
    }

    #[test]
    fn test_choice_navigation_wraps() {
        let mut app = app_with_choices(3);
        assert_eq!(app.selected_choice(), 0);

        app.next_choice();
        app.next_choice();
        assert_eq!(app.selected_choice(), 2);
        app.next_choice();
        assert_eq!(app.selected_choice(), 0); // Wrap to start

        app.prev_choice();
        assert_eq!(app.selected_choice(), 2); // Wrap to end
    }

    #[test]
    fn test_choice_navigation_with_no_choices() {
        let mut app = app_with_choices(0);
        app.next_choice();
        app.prev_choice();
        assert_eq!(app.selected_choice(), 0);
    }

    #[test]
    fn test_scroll_clamps_at_both_ends() {
        let mut app = app_with_choices(0);
        app.set_max_scroll(20, 5); // 15 rows of slack

        app.scroll_up(3);
        assert_eq!(app.scroll(), 0);

        app.scroll_down(100);
        assert_eq!(app.scroll(), 15);

        app.scroll_up(1);
        assert_eq!(app.scroll(), 14);
    }

    #[test]
    fn test_max_scroll_shrink_pulls_offset_back() {
        let mut app = app_with_choices(0);
        app.set_max_scroll(20, 5);
        app.scroll_to_bottom();
        assert_eq!(app.scroll(), 15);

        // Narrower content after a resize
        app.set_max_scroll(8, 5);
        assert_eq!(app.scroll(), 3);
    }

    #[test]
    fn test_row_counts_beyond_u16_saturate() {
        let mut app = app_with_choices(0);
        // Would wrap to a tiny max_scroll if converted with `as`
        app.set_max_scroll(100_000, 5);
        assert_eq!(app.scroll(), 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll(), u16::MAX - 5);
    }

    #[test]
    fn test_content_shorter_than_view_never_scrolls() {
        let mut app = app_with_choices(0);
        app.set_max_scroll(3, 10);
        app.scroll_down(5);
        assert_eq!(app.scroll(), 0);
    }
}
