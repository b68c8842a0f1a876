//! Error types for block document operations.

use thiserror::Error;

use crate::{BlockId, BlockKind};

/// Errors that can occur while editing a block document.
///
/// Stale ids are not errors: remove/update/move on a missing block are no-ops.
/// Whenever one of these is returned the document is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// A payload of another kind was offered to a block.
    #[error("block {id:?} is a {expected} block, got a {found} payload")]
    KindMismatch {
        id: BlockId,
        expected: BlockKind,
        found: BlockKind,
    },

    /// An edit meant for one kind's editor was sent to a block of another kind.
    #[error("{edit} edit cannot be applied to {block} block")]
    EditKindMismatch { edit: BlockKind, block: BlockKind },

    /// Table cell address outside the grid.
    #[error("cell [{row}][{col}] is outside a {rows}x{cols} table")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
