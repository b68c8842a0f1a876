//! Block registry — static catalog of block kinds.
//!
//! Maps each kind to its picker metadata and to the payload a new block of
//! that kind starts with. Both lookups are total: the match is exhaustive over
//! [`BlockKind`], so adding a kind without registering it fails to compile.

use serde::Serialize;

use crate::{
    Block, BlockId, BlockKind, BlockPayload, CodePayload, ImagePayload, TablePayload,
    TextPayload, TodoPayload,
};

/// Display metadata for a block kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockTypeInfo {
    /// Human-facing label for the type picker.
    pub label: &'static str,
    /// Icon identifier (lucide icon name).
    pub icon: &'static str,
}

/// Heading the type picker groups every kind under.
pub const PICKER_HEADING: &str = "BASIC BLOCKS";

/// Describe a kind for the type picker.
pub fn describe(kind: BlockKind) -> BlockTypeInfo {
    match kind {
        BlockKind::Text => BlockTypeInfo {
            label: "Text",
            icon: "type",
        },
        BlockKind::Todo => BlockTypeInfo {
            label: "To-do",
            icon: "check-square",
        },
        BlockKind::Image => BlockTypeInfo {
            label: "Image",
            icon: "image",
        },
        BlockKind::Code => BlockTypeInfo {
            label: "Code",
            icon: "code",
        },
        BlockKind::Table => BlockTypeInfo {
            label: "Table",
            icon: "table-2",
        },
    }
}

/// Default payload for a new block of `kind`.
pub fn default_payload(kind: BlockKind) -> BlockPayload {
    match kind {
        BlockKind::Text => TextPayload::default().into(),
        BlockKind::Todo => TodoPayload::default().into(),
        BlockKind::Image => ImagePayload::default().into(),
        BlockKind::Code => CodePayload::default().into(),
        BlockKind::Table => TablePayload::default().into(),
    }
}

/// A new block of `kind` with id `id` and the kind's default payload.
pub fn create_default(kind: BlockKind, id: BlockId) -> Block {
    Block::new(id, default_payload(kind))
}

/// Every kind with its metadata, in picker order.
pub fn catalog() -> impl Iterator<Item = (BlockKind, BlockTypeInfo)> {
    BlockKind::all().map(|kind| (kind, describe(kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_kind_matches() {
        for kind in BlockKind::all() {
            let id = BlockId::new();
            let block = create_default(kind, id);
            assert_eq!(block.kind(), kind);
            assert_eq!(block.id(), id);
        }
    }

    #[test]
    fn test_default_payloads() {
        let id = BlockId::new();
        assert_eq!(
            create_default(BlockKind::Text, id).payload(),
            &BlockPayload::Text(TextPayload {
                content: String::new()
            })
        );
        assert_eq!(
            create_default(BlockKind::Todo, id).payload(),
            &BlockPayload::Todo(TodoPayload {
                content: String::new(),
                checked: false
            })
        );
        assert_eq!(
            create_default(BlockKind::Image, id).payload(),
            &BlockPayload::Image(ImagePayload {
                image_url: None,
                caption: None
            })
        );
        assert_eq!(
            create_default(BlockKind::Code, id).payload(),
            &BlockPayload::Code(CodePayload {
                content: String::new(),
                language: None
            })
        );
        assert_eq!(
            create_default(BlockKind::Table, id).payload(),
            &BlockPayload::Table(TablePayload {
                rows: vec![vec![String::new(); 2]; 2]
            })
        );
    }

    #[test]
    fn test_describe_labels() {
        assert_eq!(describe(BlockKind::Todo).label, "To-do");
        assert_eq!(describe(BlockKind::Table).icon, "table-2");
    }

    #[test]
    fn test_catalog_order() {
        let labels: Vec<_> = catalog().map(|(_, info)| info.label).collect();
        assert_eq!(labels, ["Text", "To-do", "Image", "Code", "Table"]);
    }
}
