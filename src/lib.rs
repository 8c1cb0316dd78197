//! # merkle_audit
//!
//! A binary Merkle tree over an ordered sequence of data chunks.
//!
//! Any single chunk can be proven a member of the original set with a short
//! audit trail and a previously trusted root hash, without transmitting the
//! rest of the data.
//!
//! ## Core Concepts
//!
//! - **Tree**: built bottom-up from leaf hashes; odd levels pair the last
//!   node with itself
//! - **Audit trail**: sibling hashes from a leaf up to the root, each tagged
//!   with the side it sits on, closed by the root hash
//! - **Verification**: recomputes the root from a leaf hash and a trail and
//!   compares it with a trusted root, without access to the tree
//!
//! ## Example
//!
//! ```
//! use merkle_audit::{verify_proof, HashPrimitive, MerkleTree, Sha256};
//!
//! let tree = MerkleTree::build(["a", "b", "c"], &Sha256)?;
//! let leaf = Sha256.hash(b"c");
//! let trail = tree.audit_trail(&leaf)?;
//! assert!(verify_proof(tree.root_hash(), &leaf, &trail, &Sha256)?);
//! # Ok::<(), merkle_audit::Error>(())
//! ```

pub mod chunk;
pub mod config;
pub mod model;
pub mod proof;
pub mod tree;
pub mod viz;

mod error;

pub use chunk::Chunker;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Algorithm, Blake3, Digest, HashPrimitive, HexJoin, Sha256};
pub use proof::{verify_proof, AuditTrail, Branch, TrailEntry};
pub use tree::{MerkleTree, NodeId, TreeNode};
