//! Typed identifiers for documents and blocks.
//!
//! Both wrap UUIDv7 (time-ordered, globally unique), so ids minted during a
//! session never collide and never get reused. They display as standard UUID
//! text for logging; the `short()` form (first 8 hex chars) is for
//! human-facing UI and never used as a lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block identifier (UUIDv7). Assigned at creation, stable for the block's lifetime.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(uuid::Uuid);

/// A document identifier (UUIDv7), one per editing session.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(uuid::Uuid);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Create a new time-ordered ID (UUIDv7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// First 8 hex characters — for human display only, not lookup.
            pub fn short(&self) -> String {
                self.0.as_simple().to_string()[..8].to_string()
            }

            /// Full 32-character hex string (no hyphens).
            pub fn to_hex(&self) -> String {
                self.0.as_simple().to_string()
            }

            /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(s).map(Self)
            }

            /// Check if a query string matches this ID by hex prefix.
            pub fn matches_hex_prefix(&self, prefix: &str) -> bool {
                self.to_hex().starts_with(&prefix.to_ascii_lowercase())
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $T {
            fn from(u: uuid::Uuid) -> Self {
                Self(u)
            }
        }

        impl From<$T> for uuid::Uuid {
            fn from(id: $T) -> uuid::Uuid {
                id.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Full UUID with hyphens for log readability
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_typed_id!(BlockId, "BlockId");
impl_typed_id!(DocumentId, "DocumentId");

// ── Prefix resolution ───────────────────────────────────────────────────────

/// Error from prefix resolution.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PrefixError {
    #[error("no block matches '{0}'")]
    NoMatch(String),
    #[error("ambiguous prefix '{prefix}': matches {candidates:?}")]
    Ambiguous {
        prefix: String,
        candidates: Vec<String>,
    },
}

/// Resolve a query string against the block ids of a document.
///
/// Resolution order:
/// 1. Exact id (hex or hyphenated UUID)
/// 2. Unique hex prefix match
/// 3. Error (no match or ambiguous)
pub fn resolve_block_prefix(
    ids: impl Iterator<Item = BlockId>,
    query: &str,
) -> Result<BlockId, PrefixError> {
    let entries: Vec<BlockId> = ids.collect();

    if let Ok(exact) = BlockId::parse(query)
        && entries.contains(&exact)
    {
        return Ok(exact);
    }

    let hex_matches: Vec<BlockId> = entries
        .into_iter()
        .filter(|id| id.matches_hex_prefix(query))
        .collect();

    match hex_matches.len() {
        0 => Err(PrefixError::NoMatch(query.to_string())),
        1 => Ok(hex_matches[0]),
        _ => Err(PrefixError::Ambiguous {
            prefix: query.to_string(),
            candidates: hex_matches.iter().map(|id| id.short()).collect(),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
