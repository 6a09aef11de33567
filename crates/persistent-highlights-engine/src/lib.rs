pub mod apply;
pub mod content;
pub mod highlight;
pub mod materialize;
pub mod remove;
pub mod render;
pub mod resolve;
pub mod selection;
pub mod store;
pub mod tree;

// Re-export key types for easier usage
pub use apply::apply_highlight;
pub use content::{ContentError, load_markdown, parse_markdown};
pub use highlight::{DEFAULT_COLOR, Highlight, IdGenerator, UuidGenerator};
pub use materialize::{MaterializeSummary, apply_stored_highlights, find_boundaries, materialize};
pub use remove::{remove_overlapping, strip_markers};
pub use render::{outline, to_html};
pub use resolve::text_offset;
pub use selection::{SelectionSource, StaticSelection, create_highlight_from_selection};
pub use store::{HighlightStore, StoreError};
pub use tree::{DocumentTree, NodeId, NodeKind, Position, TreeBuilder, TreeError, TreeRange};
