//! Block document model for Telos.
//!
//! A document is an ordered sequence of typed blocks (text, to-do, image,
//! code, table) that a user composes and rearranges by drag-and-drop. This
//! crate owns everything about that sequence and nothing about how it is
//! drawn.
//!
//! # Components
//!
//! - [`registry`]: kind → picker label/icon, kind → default block
//! - [`BlockStore`]: sole mutator; every change publishes a new [`DocumentSnapshot`]
//! - [`reorder`]: drag source/target → permutation of the sequence
//! - [`editor`]: one editing strategy per kind, dispatched exhaustively
//!
//! # Data flow
//!
//! ```text
//! edit event ──► editor::apply_edit ──► BlockStore::update ──► DocumentSnapshot
//! drag end   ──► BlockStore::move_block ──► reorder::reorder ──► DocumentSnapshot
//! ```
//!
//! All operations are synchronous and in-memory. A single owner holds the
//! store mutably; snapshots are `Send + Sync` and can be handed to any number
//! of readers.

pub mod editor;
mod error;
pub mod registry;
pub mod reorder;
mod store;

pub use editor::{
    BlockEdit, BlockEditor, CodeEdit, EditorAction, EditorView, Field, FieldMode, FieldView,
    ImageEdit, TableEdit, TextEdit, TodoEdit, apply_edit, editor_view,
};
pub use error::BlockError;
pub use registry::{BlockTypeInfo, catalog, create_default, describe};
pub use store::{BlockStore, DocumentSnapshot, list_blocks};
pub use telos_types::{
    Block, BlockId, BlockKind, BlockPayload, CodePayload, DEFAULT_TABLE_COLUMNS,
    DEFAULT_TABLE_ROWS, DocumentId, ImagePayload, PrefixError, TablePayload, TextPayload,
    TodoPayload, resolve_block_prefix,
};

/// Result type for block document operations.
pub type Result<T> = std::result::Result<T, BlockError>;
