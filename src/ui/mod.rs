//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Main draw function
//! - `paragraphs.rs` - Paragraph grouping over the line stream
//! - `lines_view.rs` - Narrative line-stream widget
//! - `paragraph.rs` - Single paragraph block widget
//! - `choices.rs` - Choices list container
//! - `theme.rs` - Color themes and presets

pub mod choices;
mod draw;
pub mod lines_view;
pub mod paragraph;
pub mod paragraphs;
pub mod theme;

// Re-export main draw function
pub use draw::draw;

// Re-export commonly used types
pub use choices::ChoiceList;
pub use lines_view::LinesView;
pub use theme::Theme;
