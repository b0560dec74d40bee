//! Story state: narrative lines and choices loaded from a story file.
//!
//! The renderer treats this as an external read-only store. Lines are looked
//! up by opaque id; a lookup is allowed to fail (e.g. a stale id while the
//! story is being swapped out) and the renderer must cope by rendering
//! nothing for that slot.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Opaque identifier for a narrative line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub String);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of content a line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Normal,
    Empty,
}

/// Strength of the paragraph separation a line signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakLevel {
    None,
    Soft,
    Hard,
}

/// A single narrative line as the renderer sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub id: LineId,
    /// Ordering position within the story
    pub index: usize,
    pub kind: LineKind,
    pub break_level: BreakLevel,
    pub text: String,
}

impl LineRecord {
    /// An empty line with a non-none break level starts a new paragraph
    pub fn is_delimiter(&self) -> bool {
        self.kind == LineKind::Empty && self.break_level != BreakLevel::None
    }
}

/// A choice option; opaque to this layer beyond its display text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}

/// Line as written in the story file. `index` is assigned from file position.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: LineId,
    #[serde(default = "default_kind")]
    kind: LineKind,
    #[serde(default = "default_break_level")]
    break_level: BreakLevel,
    #[serde(default)]
    text: String,
}

fn default_kind() -> LineKind {
    LineKind::Normal
}

fn default_break_level() -> BreakLevel {
    BreakLevel::None
}

/// Story file format
#[derive(Debug, Serialize, Deserialize)]
struct StoryFile {
    version: u32,
    #[serde(default)]
    title: Option<String>,
    lines: Vec<StoredLine>,
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Structural problems in a story file that parse fine as JSON
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("duplicate line id: {0}")]
    DuplicateId(LineId),
    #[error("unsupported story file version {0} (expected 1)")]
    UnsupportedVersion(u32),
    #[error("story has no lines")]
    Empty,
}

/// The external store the renderer reads from
#[derive(Debug, Clone)]
pub struct StoryState {
    title: Option<String>,
    order: Vec<LineId>,
    lines: HashMap<LineId, LineRecord>,
    choices: Vec<Choice>,
}

impl StoryState {
    /// Build a store from already-indexed records, ordered by each record's
    /// `index`.
    pub fn from_records(
        mut records: Vec<LineRecord>,
        choices: Vec<Choice>,
    ) -> Result<Self, StoryError> {
        if records.is_empty() {
            return Err(StoryError::Empty);
        }
        records.sort_by_key(|record| record.index);
        let mut order = Vec::with_capacity(records.len());
        let mut lines = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            if lines.insert(id.clone(), record).is_some() {
                return Err(StoryError::DuplicateId(id));
            }
            order.push(id);
        }
        Ok(Self {
            title: None,
            order,
            lines,
            choices,
        })
    }

    /// Ordered ids of every line in the story
    pub fn line_ids(&self) -> &[LineId] {
        &self.order
    }

    /// Look up one line by id. May miss; callers render nothing for a miss.
    pub fn line(&self, id: &LineId) -> Option<&LineRecord> {
        self.lines.get(id)
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Load a story from a JSON file
pub fn load(path: &Path) -> Result<StoryState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read story from {}", path.display()))?;

    let file: StoryFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse story from {}", path.display()))?;

    if file.version != 1 {
        return Err(StoryError::UnsupportedVersion(file.version).into());
    }

    let records: Vec<LineRecord> = file
        .lines
        .into_iter()
        .enumerate()
        .map(|(index, stored)| LineRecord {
            id: stored.id,
            index,
            kind: stored.kind,
            break_level: stored.break_level,
            text: stored.text,
        })
        .collect();

    let mut state = StoryState::from_records(records, file.choices)
        .with_context(|| format!("Invalid story file {}", path.display()))?;
    state.title = file.title;

    tracing::info!(
        "Loaded story with {} lines, {} choices",
        state.order.len(),
        state.choices.len()
    );

    Ok(state)
}
