//! Block store — the single writer of a document's block sequence.
//!
//! The store holds the canonical ordered blocks for one editing session. Every
//! mutation builds a new sequence and publishes it as a fresh
//! [`DocumentSnapshot`]; snapshots handed out earlier keep pointing at the
//! blocks they were taken from, so a reader never sees a half-applied change.
//!
//! Stale ids (a UI event racing a removal) are no-ops, logged at `warn`.

use std::sync::Arc;

use crate::editor::{self, BlockEdit};
use crate::reorder;
use crate::registry;
use crate::{
    Block, BlockError, BlockId, BlockKind, BlockPayload, DocumentId, Result, TextPayload,
    TodoPayload,
};

/// Immutable view of a document at one version.
///
/// Cheap to clone; the blocks are shared.
#[derive(Clone, Debug)]
pub struct DocumentSnapshot {
    document_id: DocumentId,
    version: u64,
    blocks: Arc<[Block]>,
}

impl DocumentSnapshot {
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// Store version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == *id)
    }

    /// Position of a block in document order.
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == *id)
    }

    /// Block ids in document order.
    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(Block::id).collect()
    }

    /// Serialize the block sequence as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&*self.blocks)
            .map_err(|e| BlockError::Serialization(e.to_string()))
    }
}

/// Read-only projection of a snapshot for rendering.
pub fn list_blocks(document: &DocumentSnapshot) -> &[Block] {
    document.blocks()
}

/// Owner of one document's block sequence.
pub struct BlockStore {
    /// Current published state.
    current: DocumentSnapshot,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStore {
    /// Create a store with an empty document.
    pub fn new() -> Self {
        Self::with_document_id(DocumentId::new())
    }

    /// Create an empty store for a given document.
    pub fn with_document_id(document_id: DocumentId) -> Self {
        Self {
            current: DocumentSnapshot {
                document_id,
                version: 0,
                blocks: Arc::from(Vec::new()),
            },
        }
    }

    /// Create a store seeded with the welcome document a new session starts from.
    pub fn with_welcome() -> Self {
        let seed = [
            BlockPayload::from(TextPayload {
                content: "Welcome to Telos, please add values you would like to keep track of below"
                    .into(),
            }),
            BlockPayload::from(TodoPayload {
                content: "Try adding new blocks".into(),
                checked: false,
            }),
            BlockPayload::from(TextPayload {
                content: "Drag blocks to reorder them".into(),
            }),
        ];
        let mut store = Self::new();
        let blocks = seed
            .into_iter()
            .map(|payload| Block::new(BlockId::new(), payload))
            .collect();
        store.commit(blocks);
        store
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document_id(&self) -> DocumentId {
        self.current.document_id
    }

    /// Get the current version (bumped on every effective mutation).
    pub fn version(&self) -> u64 {
        self.current.version
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.current.clone()
    }

    /// Blocks in document order.
    pub fn list_blocks(&self) -> &[Block] {
        self.current.blocks()
    }

    pub fn block_count(&self) -> usize {
        self.current.len()
    }

    pub fn get_block(&self, id: &BlockId) -> Option<&Block> {
        self.current.get(id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn commit(&mut self, blocks: Vec<Block>) -> DocumentSnapshot {
        self.current = DocumentSnapshot {
            document_id: self.current.document_id,
            version: self.current.version + 1,
            blocks: Arc::from(blocks),
        };
        self.snapshot()
    }

    fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::new();
            if self.current.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Append a new block of `kind` with its default payload.
    pub fn add(&mut self, kind: BlockKind) -> DocumentSnapshot {
        let block = registry::create_default(kind, self.fresh_id());
        let id = block.id();
        let mut blocks = self.current.blocks.to_vec();
        blocks.push(block);
        let snapshot = self.commit(blocks);
        tracing::debug!(block = ?id, %kind, len = snapshot.len(), "added block");
        snapshot
    }

    /// Remove the block with `id`. Removing a missing block is a no-op.
    pub fn remove(&mut self, id: &BlockId) -> DocumentSnapshot {
        if self.current.get(id).is_none() {
            tracing::warn!(block = ?id, "remove: block not found, ignoring");
            return self.snapshot();
        }
        let blocks = self
            .current
            .blocks
            .iter()
            .filter(|b| b.id() != *id)
            .cloned()
            .collect();
        let snapshot = self.commit(blocks);
        tracing::debug!(block = ?id, len = snapshot.len(), "removed block");
        snapshot
    }

    /// Replace the payload of the block with `id`, keeping its id and kind.
    ///
    /// A missing block is a no-op. A payload of another kind is rejected and
    /// leaves the document unchanged.
    pub fn update(&mut self, id: &BlockId, payload: BlockPayload) -> Result<DocumentSnapshot> {
        let Some(index) = self.current.position(id) else {
            tracing::warn!(block = ?id, "update: block not found, ignoring");
            return Ok(self.snapshot());
        };
        let replaced = self.current.blocks[index]
            .with_payload(payload)
            .map_err(|e| {
                tracing::warn!(block = ?id, error = %e, "update rejected");
                BlockError::KindMismatch {
                    id: *id,
                    expected: e.expected,
                    found: e.found,
                }
            })?;
        let mut blocks = self.current.blocks.to_vec();
        blocks[index] = replaced;
        let snapshot = self.commit(blocks);
        tracing::debug!(block = ?id, "updated block");
        Ok(snapshot)
    }

    /// Run `edit` through the block's editor and store the result via `update`.
    ///
    /// A missing block is a no-op.
    pub fn apply_edit(&mut self, id: &BlockId, edit: BlockEdit) -> Result<DocumentSnapshot> {
        let Some(block) = self.current.get(id) else {
            tracing::warn!(block = ?id, "edit: block not found, ignoring");
            return Ok(self.snapshot());
        };
        let payload = editor::apply_edit(block, edit).inspect_err(|e| {
            tracing::warn!(block = ?id, error = %e, "edit rejected");
        })?;
        self.update(id, payload)
    }

    /// Move `source` to where `target` is (one call per completed drag).
    ///
    /// No-op when the ids are equal or either is missing.
    pub fn move_block(&mut self, source: &BlockId, target: &BlockId) -> DocumentSnapshot {
        if source == target {
            return self.snapshot();
        }
        if self.current.get(source).is_none() || self.current.get(target).is_none() {
            tracing::warn!(?source, ?target, "move: block not found, ignoring");
            return self.snapshot();
        }
        let blocks = reorder::reorder(&self.current.blocks, source, target, Block::id);
        let snapshot = self.commit(blocks);
        tracing::debug!(?source, ?target, "moved block");
        snapshot
    }
}
