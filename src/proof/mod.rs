//! Audit trails and proof verification
//!
//! A trail is produced by [`MerkleTree::audit_trail`](crate::MerkleTree::audit_trail)
//! and consumed by [`verify_proof`], which never touches the tree.

mod trail;
mod verify;

pub use trail::{AuditTrail, Branch, TrailEntry};
pub use verify::verify_proof;
