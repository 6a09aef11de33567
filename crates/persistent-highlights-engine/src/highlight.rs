use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color given to highlights created without an explicit one
pub const DEFAULT_COLOR: &str = "yellow";

/// A persisted highlight.
///
/// `start` and `end` are char offsets into the linear text of the content
/// container the highlight was made in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub color: String,
}

impl Highlight {
    pub fn new(id: impl Into<String>, start: usize, end: usize, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            color: color.into(),
        }
    }

    /// Chars covered; reversed offsets cover none.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// An empty highlight never produces a marker.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of fresh highlight ids.
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn generate(&mut self) -> String {
        self()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
