//! Audit trail types

use crate::model::{Digest, HashPrimitive};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a trail entry's hash relative to the path node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    /// Sibling sits to the left: parent = H(sibling || current)
    Left,
    /// Sibling sits to the right: parent = H(current || sibling)
    Right,
    /// Terminal entry carrying the root hash
    Root,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Branch::Left => "L",
            Branch::Right => "R",
            Branch::Root => "-",
        };
        f.write_str(s)
    }
}

/// One `(hash, branch)` pair of an audit trail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrailEntry {
    pub hash: Digest,
    pub branch: Branch,
}

impl TrailEntry {
    pub fn new(hash: Digest, branch: Branch) -> Self {
        TrailEntry { hash, branch }
    }

    /// Apply this step to the running hash
    ///
    /// Returns `None` for the terminal entry, which takes no part in the
    /// recomputation.
    pub fn apply<P: HashPrimitive + ?Sized>(&self, current: &Digest, primitive: &P) -> Option<Digest> {
        match self.branch {
            Branch::Left => Some(primitive.combine(&self.hash, current)),
            Branch::Right => Some(primitive.combine(current, &self.hash)),
            Branch::Root => None,
        }
    }
}

/// Ordered sibling path from a leaf up to the root
///
/// The first entry is the leaf's immediate sibling and the last entry is
/// `(root, Root)`. A trail received from elsewhere is not trusted: call
/// [`AuditTrail::validate`] (or verify through [`verify_proof`](super::verify_proof),
/// which does so) before relying on its shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail(Vec<TrailEntry>);

impl AuditTrail {
    /// Wrap entries as-is, without validation
    pub fn new(entries: Vec<TrailEntry>) -> Self {
        AuditTrail(entries)
    }

    /// Parse a trail from JSON, rejecting unknown branch markers
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::MalformedTrail(e.to_string()))
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<TrailEntry> {
        self.0
    }

    /// Entries that take part in recomputation (everything but the terminal entry)
    pub fn steps(&self) -> &[TrailEntry] {
        match self.0.last() {
            Some(last) if last.branch == Branch::Root => &self.0[..self.0.len() - 1],
            _ => &self.0,
        }
    }

    /// Hash carried by the terminal entry, if the trail has one
    pub fn root_hash(&self) -> Option<&Digest> {
        self.0
            .last()
            .filter(|entry| entry.branch == Branch::Root)
            .map(|entry| &entry.hash)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that the trail ends with exactly one terminal entry
    pub fn validate(&self) -> Result<()> {
        let (last, rest) = self
            .0
            .split_last()
            .ok_or_else(|| Error::MalformedTrail("trail is empty".into()))?;

        if last.branch != Branch::Root {
            return Err(Error::MalformedTrail(
                "trail does not end with a root entry".into(),
            ));
        }

        if let Some(pos) = rest.iter().position(|e| e.branch == Branch::Root) {
            return Err(Error::MalformedTrail(format!(
                "root entry at position {} before end of trail",
                pos
            )));
        }

        Ok(())
    }

    /// Recompute the root from `leaf` by replaying every step
    pub fn compute_root<P: HashPrimitive + ?Sized>(&self, leaf: &Digest, primitive: &P) -> Result<Digest> {
        self.validate()?;
        let mut current = *leaf;
        for entry in self.steps() {
            if let Some(next) = entry.apply(&current, primitive) {
                current = next;
            }
        }
        Ok(current)
    }
}

impl From<Vec<TrailEntry>> for AuditTrail {
    fn from(entries: Vec<TrailEntry>) -> Self {
        AuditTrail(entries)
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a TrailEntry;
    type IntoIter = std::slice::Iter<'a, TrailEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
