//! Block kinds, payloads, and the block value itself.
//!
//! ## Design: kind lives in the payload
//!
//! `BlockPayload` is a sum type with one variant per kind, so a block's kind
//! is whatever variant its payload is. `Block` keeps its fields private and
//! only swaps payloads of the same variant (`with_payload`), which makes
//! "a block never changes kind" a property of the type rather than a
//! convention callers have to remember.
//!
//! Serialized blocks look like `{"id": "...", "type": "TODO", "content": "...",
//! "checked": false}`: the kind tag and payload fields sit next to the id.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::ids::BlockId;

/// What a block *is*. Closed set, fixed at creation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum BlockKind {
    /// Free-form multi-line text.
    Text,
    /// Checklist item.
    #[strum(serialize = "todo", serialize = "to-do", serialize = "checklist")]
    Todo,
    /// Image by URL, with an optional caption.
    #[strum(serialize = "image", serialize = "img")]
    Image,
    /// Code listing with an optional language label.
    Code,
    /// Rectangular grid of string cells.
    Table,
}

impl BlockKind {
    /// Parse from string (case-insensitive).
    ///
    /// Supports aliases: "to-do"/"checklist" -> Todo, "img" -> Image.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Todo => "todo",
            BlockKind::Image => "image",
            BlockKind::Code => "code",
            BlockKind::Table => "table",
        }
    }

    /// All kinds, in picker order.
    pub fn all() -> impl Iterator<Item = BlockKind> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of a Text block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub content: String,
}

/// Payload of a Todo block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub checked: bool,
}

/// Payload of an Image block. Both fields start unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImagePayload {
    /// An image counts as set only with a non-empty URL.
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Payload of a Code block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Columns in a freshly created table, and in the first row added to a rowless one.
pub const DEFAULT_TABLE_COLUMNS: usize = 2;

/// Rows in a freshly created table.
pub const DEFAULT_TABLE_ROWS: usize = 2;

/// Payload of a Table block: row-major grid of cells.
///
/// Rows are expected to be rectangular. Deserializing a table without `rows`
/// yields the default 2×2 grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePayload {
    #[serde(default = "default_rows")]
    pub rows: Vec<Vec<String>>,
}

fn default_rows() -> Vec<Vec<String>> {
    vec![vec![String::new(); DEFAULT_TABLE_COLUMNS]; DEFAULT_TABLE_ROWS]
}

impl Default for TablePayload {
    fn default() -> Self {
        Self {
            rows: default_rows(),
        }
    }
}

impl TablePayload {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the grid, taken from the first row (0 for a rowless table).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Check that every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Get a cell, if it lies inside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Kind-specific fields of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum BlockPayload {
    Text(TextPayload),
    Todo(TodoPayload),
    Image(ImagePayload),
    Code(CodePayload),
    Table(TablePayload),
}

impl BlockPayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockPayload::Text(_) => BlockKind::Text,
            BlockPayload::Todo(_) => BlockKind::Todo,
            BlockPayload::Image(_) => BlockKind::Image,
            BlockPayload::Code(_) => BlockKind::Code,
            BlockPayload::Table(_) => BlockKind::Table,
        }
    }
}

impl From<TextPayload> for BlockPayload {
    fn from(p: TextPayload) -> Self {
        BlockPayload::Text(p)
    }
}

impl From<TodoPayload> for BlockPayload {
    fn from(p: TodoPayload) -> Self {
        BlockPayload::Todo(p)
    }
}

impl From<ImagePayload> for BlockPayload {
    fn from(p: ImagePayload) -> Self {
        BlockPayload::Image(p)
    }
}

impl From<CodePayload> for BlockPayload {
    fn from(p: CodePayload) -> Self {
        BlockPayload::Code(p)
    }
}

impl From<TablePayload> for BlockPayload {
    fn from(p: TablePayload) -> Self {
        BlockPayload::Table(p)
    }
}

/// A payload was offered to a block of a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("payload of kind {found} cannot replace a {expected} block")]
pub struct KindMismatch {
    pub expected: BlockKind,
    pub found: BlockKind,
}

/// One addressable unit of document content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    #[serde(flatten)]
    payload: BlockPayload,
}

impl Block {
    pub fn new(id: BlockId, payload: impl Into<BlockPayload>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &BlockPayload {
        &self.payload
    }

    /// A new block with the same id and kind carrying `payload`.
    pub fn with_payload(&self, payload: BlockPayload) -> Result<Block, KindMismatch> {
        if payload.kind() != self.kind() {
            return Err(KindMismatch {
                expected: self.kind(),
                found: payload.kind(),
            });
        }
        Ok(Block {
            id: self.id,
            payload,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_from_str_aliases() {
        assert_eq!(BlockKind::from_str("TEXT"), Some(BlockKind::Text));
        assert_eq!(BlockKind::from_str("to-do"), Some(BlockKind::Todo));
        assert_eq!(BlockKind::from_str("Checklist"), Some(BlockKind::Todo));
        assert_eq!(BlockKind::from_str("img"), Some(BlockKind::Image));
        assert_eq!(BlockKind::from_str("paragraph"), None);
    }

    #[test]
    fn test_block_kind_as_str_roundtrips() {
        for kind in BlockKind::all() {
            assert_eq!(BlockKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(BlockKind::all().count(), 5);
    }

    #[test]
    fn test_payload_kind_matches_variant() {
        assert_eq!(BlockPayload::from(TodoPayload::default()).kind(), BlockKind::Todo);
        assert_eq!(BlockPayload::from(TablePayload::default()).kind(), BlockKind::Table);
    }

    #[test]
    fn test_table_default_is_2x2() {
        let table = TablePayload::default();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(table.is_rectangular());
        assert_eq!(table.cell(1, 1), Some(""));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_image_has_image_ignores_empty_url() {
        let mut image = ImagePayload::default();
        assert!(!image.has_image());
        image.image_url = Some(String::new());
        assert!(!image.has_image());
        image.image_url = Some("https://example.com/a.png".into());
        assert!(image.has_image());
    }

    #[test]
    fn test_with_payload_preserves_id_and_rejects_other_kind() {
        let block = Block::new(BlockId::new(), TextPayload::default());
        let updated = block
            .with_payload(TextPayload { content: "hi".into() }.into())
            .unwrap();
        assert_eq!(updated.id(), block.id());
        assert_eq!(updated.kind(), BlockKind::Text);

        let err = block.with_payload(TodoPayload::default().into()).unwrap_err();
        assert_eq!(err.expected, BlockKind::Text);
        assert_eq!(err.found, BlockKind::Todo);
    }

    #[test]
    fn test_block_json_shape() {
        let id = BlockId::new();
        let block = Block::new(
            id,
            ImagePayload {
                image_url: Some("https://example.com/a.png".into()),
                caption: None,
            },
        );
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "IMAGE");
        assert_eq!(value["imageUrl"], "https://example.com/a.png");
        assert!(value.get("caption").is_none());
        assert_eq!(value["id"], id.to_string());

        let parsed: Block = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn test_table_without_rows_deserializes_to_default() {
        let json = format!(r#"{{"id":"{}","type":"TABLE"}}"#, BlockId::new());
        let block: Block = serde_json::from_str(&json).unwrap();
        match block.payload() {
            BlockPayload::Table(table) => assert_eq!(table, &TablePayload::default()),
            other => panic!("expected table, got {other:?}"),
        }
    }
}
