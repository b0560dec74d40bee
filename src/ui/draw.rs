//! Top-level draw pass.
//!
//! Splits the frame into the narrative area, the choices list, and a one-row
//! status bar, then delegates to the widgets.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::{ChoiceList, LinesView, Theme};

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.config().resolve_theme();

    // Fill background with theme color
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let choices_height = choices_area_height(app, area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                 // Narrative
            Constraint::Length(choices_height), // Choices
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    draw_narrative(f, app, chunks[0], &theme);
    if choices_height > 0 {
        draw_choices(f, app, chunks[1], &theme);
    }
    draw_status_bar(f, app, chunks[2], &theme);
}

/// Rows the choices block needs: one per choice plus the border, capped so
/// the narrative keeps most of the screen. Zero when the story has no
/// choices.
fn choices_area_height(app: &App, frame_height: u16) -> u16 {
    let count = app.choices().len() as u16;
    if count == 0 {
        return 0;
    }
    (count + 2).min(frame_height / 2)
}

/// Draw the narrative line stream inside its bordered block
fn draw_narrative(f: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    let title = match app.story().title() {
        Some(t) => format!(" {t} "),
        None => " tale ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.rule))
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let indent = app.config().appearance.paragraph_indent;

    // Clamp the scroll offset against the rows this width produces
    let total_rows = LinesView::new(app.story(), theme)
        .indent(indent)
        .total_rows(inner.width);
    app.set_max_scroll(total_rows, inner.height);

    let view = LinesView::new(app.story(), theme)
        .indent(indent)
        .scroll(app.scroll());
    f.render_widget(view, inner);
}

/// Draw the choices list; items are styled here and handed to the container
fn draw_choices(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let appearance = &app.config().appearance;
    let selected = app.selected_choice();

    let children: Vec<Line> = app
        .choices()
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("{}{}", appearance.selected_bullet, choice.text),
                    Style::default()
                        .fg(theme.choice_selected_fg)
                        .bg(theme.choice_selected_bg)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("{}{}", appearance.choice_bullet, choice.text),
                    Style::default().fg(theme.choice).bg(theme.background),
                ))
            }
        })
        .collect();

    f.render_widget(ChoiceList::new(theme).children(children), area);
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let choices = app.choices().len();

    let status = if choices > 0 {
        format!(
            " {}/{} choices | j/k: scroll | Tab: next choice | q: quit",
            app.selected_choice() + 1,
            choices
        )
    } else {
        format!(" row {} | j/k: scroll | q: quit", app.scroll() + 1)
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().fg(theme.status).bg(theme.background));

    f.render_widget(status_bar, area);
}
