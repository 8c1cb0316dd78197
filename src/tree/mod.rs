//! Binary hash tree over an ordered sequence of chunks
//!
//! - Leaves hash the input chunks in order
//! - Each internal node hashes its left and right child digests
//! - The root hash commits to every chunk and its position

mod merkle;
mod node;

pub use merkle::MerkleTree;
pub use node::{NodeId, TreeNode};
