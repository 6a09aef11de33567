use crate::highlight::Highlight;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid highlight store at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize highlights: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Highlight list persisted as a JSON array.
///
/// Order is creation order and is significant: materializing applies
/// highlights in this order. Every mutation writes the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStore {
    path: PathBuf,
    highlights: Vec<Highlight>,
}

impl HighlightStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            log::debug!("No highlight store at {}, starting empty", path.display());
            return Ok(Self {
                path,
                highlights: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let highlights = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        };
        Ok(Self { path, highlights })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Append a newly created highlight
    pub fn on_highlight(&mut self, highlight: Highlight) -> Result<(), StoreError> {
        let mut highlights = self.highlights.clone();
        highlights.push(highlight);
        self.replace(highlights)
    }

    /// Delete the highlight at `index`; out of range is a no-op
    pub fn on_delete(&mut self, index: usize) -> Result<Option<Highlight>, StoreError> {
        if index >= self.highlights.len() {
            return Ok(None);
        }
        let mut highlights = self.highlights.clone();
        let removed = highlights.remove(index);
        self.replace(highlights)?;
        Ok(Some(removed))
    }

    pub fn on_delete_all(&mut self) -> Result<(), StoreError> {
        self.replace(Vec::new())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_list(&self.path, &self.highlights)
    }

    /// Write `highlights` and only then adopt them, so a failed write leaves
    /// memory matching the file.
    fn replace(&mut self, highlights: Vec<Highlight>) -> Result<(), StoreError> {
        write_list(&self.path, &highlights)?;
        self.highlights = highlights;
        Ok(())
    }
}

fn write_list(path: &Path, highlights: &[Highlight]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(highlights).map_err(StoreError::Serialize)?;
    fs::write(path, content)?;
    Ok(())
}
