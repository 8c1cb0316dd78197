//! Tree node types

use crate::model::Digest;

/// Index of a node inside a [`MerkleTree`](super::MerkleTree) arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the binary hash tree
///
/// Children are owned by the tree arena and referenced by id. Either both
/// children are present (internal node) or neither is (leaf). The parent
/// link only serves upward traversal.
#[derive(Clone, Debug)]
pub struct TreeNode {
    hash: Digest,
    payload: Option<Vec<u8>>,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
}

impl TreeNode {
    /// Create a leaf node
    pub(crate) fn leaf(hash: Digest, payload: Option<Vec<u8>>) -> Self {
        TreeNode {
            hash,
            payload,
            parent: None,
            children: None,
        }
    }

    /// Create an internal node over two children
    pub(crate) fn internal(hash: Digest, left: NodeId, right: NodeId) -> Self {
        TreeNode {
            hash,
            payload: None,
            parent: None,
            children: Some((left, right)),
        }
    }

    /// Link this node under `parent`; a node is linked at most once
    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        debug_assert!(
            self.parent.is_none() || self.parent == Some(parent),
            "node already linked to a different parent"
        );
        self.parent = Some(parent);
    }

    pub fn hash(&self) -> &Digest {
        &self.hash
    }

    /// Original chunk bytes; only leaves built from chunks carry one
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
