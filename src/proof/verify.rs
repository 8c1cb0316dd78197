//! Independent proof verification

use super::AuditTrail;
use crate::model::{Digest, HashPrimitive};
use crate::Result;

/// Check that `leaf_hash` combined with `trail` reproduces `trusted_root`
///
/// This needs no access to the tree. The trail may come from an untrusted
/// party: its shape is validated first, and the root hash it carries is
/// ignored in favour of `trusted_root`.
///
/// Returns `Ok(false)` when the recomputed root differs and
/// `Err(Error::MalformedTrail)` when the trail cannot be replayed at all.
pub fn verify_proof<P: HashPrimitive + ?Sized>(
    trusted_root: &Digest,
    leaf_hash: &Digest,
    trail: &AuditTrail,
    primitive: &P,
) -> Result<bool> {
    let computed = trail.compute_root(leaf_hash, primitive)?;
    let verified = computed == *trusted_root;
    tracing::debug!(
        leaf = %leaf_hash.short(),
        steps = trail.steps().len(),
        verified,
        "verified audit trail"
    );
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sha256;
    use crate::proof::{Branch, TrailEntry};
    use crate::Error;

    #[test]
    fn test_singleton_trail_verifies_without_steps() {
        let leaf = Sha256.hash(b"only");
        let trail = AuditTrail::new(vec![TrailEntry::new(leaf, Branch::Root)]);
        assert!(verify_proof(&leaf, &leaf, &trail, &Sha256).unwrap());
        assert!(!verify_proof(&Sha256.hash(b"other"), &leaf, &trail, &Sha256).unwrap());
    }

    #[test]
    fn test_terminal_hash_is_not_trusted() {
        let a = Sha256.hash(b"a");
        let b = Sha256.hash(b"b");
        let root = Sha256.combine(&a, &b);
        let forged_root = Sha256.hash(b"forged");

        // Trail claims a forged root; verification still recomputes
        let trail = AuditTrail::new(vec![
            TrailEntry::new(b, Branch::Right),
            TrailEntry::new(forged_root, Branch::Root),
        ]);
        assert!(verify_proof(&root, &a, &trail, &Sha256).unwrap());
        assert!(!verify_proof(&forged_root, &a, &trail, &Sha256).unwrap());
    }

    #[test]
    fn test_malformed_trail_is_an_error() {
        let a = Sha256.hash(b"a");
        let trail = AuditTrail::new(vec![TrailEntry::new(a, Branch::Right)]);
        assert!(matches!(
            verify_proof(&a, &a, &trail, &Sha256),
            Err(Error::MalformedTrail(_))
        ));
    }
}
