//! Merkle tree construction and audit trail derivation

use super::{NodeId, TreeNode};
use crate::model::{Digest, HashPrimitive};
use crate::proof::{AuditTrail, Branch, TrailEntry};
use crate::{Error, Result};

/// A binary hash tree built once from an ordered sequence of chunks
///
/// Nodes live in an arena owned by the tree; the root reaches every node
/// through child links and each node points back at its parent by id.
/// Odd levels are completed by pairing the last node with itself, so every
/// internal node has exactly two children.
///
/// The tree is immutable after construction and can be shared across
/// threads for concurrent trail queries.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    nodes: Vec<TreeNode>,
    leaves: Vec<NodeId>,
    root: NodeId,
    height: usize,
}

impl MerkleTree {
    /// Build a tree from data chunks, hashing each one into a leaf
    ///
    /// Fails with [`Error::EmptyInput`] when `chunks` is empty.
    pub fn build<I, C, P>(chunks: I, primitive: &P) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
        P: HashPrimitive + ?Sized,
    {
        let nodes: Vec<TreeNode> = chunks
            .into_iter()
            .map(|chunk| {
                let chunk = chunk.as_ref();
                TreeNode::leaf(primitive.hash(chunk), Some(chunk.to_vec()))
            })
            .collect();
        Self::from_leaf_nodes(nodes, primitive)
    }

    /// Build a tree over leaf digests computed elsewhere
    ///
    /// Leaves built this way carry no payload.
    pub fn from_leaf_hashes<I, P>(hashes: I, primitive: &P) -> Result<Self>
    where
        I: IntoIterator<Item = Digest>,
        P: HashPrimitive + ?Sized,
    {
        let nodes = hashes
            .into_iter()
            .map(|hash| TreeNode::leaf(hash, None))
            .collect();
        Self::from_leaf_nodes(nodes, primitive)
    }

    fn from_leaf_nodes<P: HashPrimitive + ?Sized>(
        mut nodes: Vec<TreeNode>,
        primitive: &P,
    ) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let leaves: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
        let (root, height) = build_parents(&mut nodes, &leaves, primitive);

        tracing::debug!(
            leaves = leaves.len(),
            nodes = nodes.len(),
            height,
            root = %nodes[root.0].hash().short(),
            "built merkle tree"
        );

        Ok(MerkleTree {
            nodes,
            leaves,
            root,
            height,
        })
    }

    /// Get the root node
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root.0]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Get the root hash
    pub fn root_hash(&self) -> &Digest {
        self.root().hash()
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always false: a tree has at least one leaf
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of edges between any leaf and the root, `ceil(log2(n))`
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Leaf ids in input order
    pub fn leaf_ids(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Leaf nodes in input order
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.leaves.iter().map(move |id| &self.nodes[id.0])
    }

    /// Get the leaf at `index`
    pub fn leaf(&self, index: usize) -> Option<&TreeNode> {
        self.leaves.get(index).map(|id| &self.nodes[id.0])
    }

    /// Position of the first leaf whose hash equals `hash`
    ///
    /// Identical chunks produce identical leaf hashes; the first one in
    /// input order wins. Use [`MerkleTree::audit_trail_at`] to address a
    /// specific duplicate.
    pub fn position_of(&self, hash: &Digest) -> Option<usize> {
        self.leaves().position(|leaf| leaf.hash() == hash)
    }

    /// Whether any leaf has the given hash
    pub fn contains(&self, hash: &Digest) -> bool {
        self.position_of(hash).is_some()
    }

    /// Number of parent links between `id` and the root
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent() {
            node = &self.nodes[parent.0];
            depth += 1;
        }
        Some(depth)
    }

    /// Audit trail for the first leaf whose hash equals `leaf_hash`
    ///
    /// Fails with [`Error::LeafNotFound`] when no leaf matches.
    pub fn audit_trail(&self, leaf_hash: &Digest) -> Result<AuditTrail> {
        let index = self.position_of(leaf_hash).ok_or_else(|| {
            tracing::debug!(leaf = %leaf_hash.short(), "no leaf for audit trail");
            Error::LeafNotFound(leaf_hash.to_hex())
        })?;
        Ok(self.trail_from(self.leaves[index]))
    }

    /// Audit trail for the leaf at `index`
    pub fn audit_trail_at(&self, index: usize) -> Result<AuditTrail> {
        let id = self
            .leaves
            .get(index)
            .copied()
            .ok_or(Error::LeafIndexOutOfRange {
                index,
                len: self.leaves.len(),
            })?;
        Ok(self.trail_from(id))
    }

    /// Walk from `leaf` to the root, collecting each sibling
    ///
    /// Every call builds its own trail; nothing is carried over between calls.
    fn trail_from(&self, leaf: NodeId) -> AuditTrail {
        let mut entries = Vec::with_capacity(self.height + 1);
        let mut current = leaf;

        while let Some(parent_id) = self.nodes[current.0].parent() {
            let parent = &self.nodes[parent_id.0];
            if let Some((left, right)) = parent.children() {
                // A self-paired node is both children; it records its twin on the left
                let entry = if right == current {
                    TrailEntry::new(*self.nodes[left.0].hash(), Branch::Left)
                } else {
                    TrailEntry::new(*self.nodes[right.0].hash(), Branch::Right)
                };
                entries.push(entry);
            }
            current = parent_id;
        }

        debug_assert_eq!(current, self.root);
        entries.push(TrailEntry::new(*self.root_hash(), Branch::Root));
        AuditTrail::new(entries)
    }
}

/// Reduce one level at a time until a single node remains
///
/// Returns the root id and the number of levels built above the leaves.
fn build_parents<P: HashPrimitive + ?Sized>(
    nodes: &mut Vec<TreeNode>,
    leaves: &[NodeId],
    primitive: &P,
) -> (NodeId, usize) {
    let mut level = leaves.to_vec();
    let mut height = 0;

    while level.len() > 1 {
        let mut parents = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let left = pair[0];
            // Last node of an odd level is paired with itself
            let right = pair.get(1).copied().unwrap_or(left);

            let hash = primitive.combine(nodes[left.0].hash(), nodes[right.0].hash());
            let id = NodeId(nodes.len());
            nodes.push(TreeNode::internal(hash, left, right));
            nodes[left.0].set_parent(id);
            nodes[right.0].set_parent(id);
            parents.push(id);
        }
        level = parents;
        height += 1;
    }

    (level[0], height)
}
