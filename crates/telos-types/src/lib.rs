//! Shared identity and block types for Telos documents.
//!
//! This crate is the leaf of the workspace: typed ids, the closed set of block
//! kinds, and the kind-specific payloads. It has **no internal telos
//! dependencies** and no behavior beyond shape; the store, reordering, and
//! editors live in `telos-blocks`.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`BlockId`]       | Stable, unique block address (UUIDv7)        |
//! | [`DocumentId`]    | Which editing session's document             |
//! | [`BlockKind`]     | Text, Todo, Image, Code, Table               |
//! | [`BlockPayload`]  | Kind-specific fields, one variant per kind   |
//! | [`Block`]         | Id + payload; kind fixed at creation         |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod ids;

// Re-export primary types at crate root for convenience.
pub use block::{
    Block, BlockKind, BlockPayload, CodePayload, DEFAULT_TABLE_COLUMNS, DEFAULT_TABLE_ROWS,
    ImagePayload, KindMismatch, TablePayload, TextPayload, TodoPayload,
};
pub use ids::{BlockId, DocumentId, PrefixError, resolve_block_prefix};
