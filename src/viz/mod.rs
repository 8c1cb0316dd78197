//! Text rendering of a tree
//!
//! One node per line in pre-order, children indented two spaces deeper
//! than their parent. Leaves show their payload next to the hash.

use crate::tree::{MerkleTree, TreeNode};
use std::fmt::{self, Write};

const INDENT: usize = 2;

/// Render the whole tree to a string
pub fn render(tree: &MerkleTree) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_tree(&mut out, tree);
    out
}

/// Write the tree to any formatter sink
pub fn write_tree<W: Write>(out: &mut W, tree: &MerkleTree) -> fmt::Result {
    let mut stack = vec![(tree.root_id(), 0usize)];

    while let Some((id, indent)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        writeln!(out, "{:indent$}{}", "", label(node), indent = indent)?;

        if let Some((left, right)) = node.children() {
            // Right first so the left subtree is printed first
            stack.push((right, indent + INDENT));
            stack.push((left, indent + INDENT));
        }
    }
    Ok(())
}

fn label(node: &TreeNode) -> String {
    match node.payload() {
        Some(payload) => format!("{} - {}", String::from_utf8_lossy(payload), node.hash()),
        None => node.hash().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HashPrimitive, Sha256};

    #[test]
    fn test_render_singleton() {
        let tree = MerkleTree::build(["a"], &Sha256).unwrap();
        assert_eq!(render(&tree), format!("a - {}\n", Sha256.hash(b"a")));
    }

    #[test]
    fn test_render_indents_children() {
        let tree = MerkleTree::build(["a", "b", "c"], &Sha256).unwrap();
        let out = render(&tree);
        let lines: Vec<&str> = out.lines().collect();

        // root, p1, a, b, p2, c, c (c is linked twice under p2)
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], tree.root_hash().to_hex());
        assert!(lines[1].starts_with("  ") && !lines[1].starts_with("   "));
        assert_eq!(lines[2], format!("    a - {}", Sha256.hash(b"a")));
        assert_eq!(lines[3], format!("    b - {}", Sha256.hash(b"b")));
        assert_eq!(lines[5], lines[6]);
    }
}
