//! Core value types: digests and the hash primitives that produce them

mod digest;
mod primitive;

pub use digest::{Digest, DIGEST_LEN};
pub use primitive::{Algorithm, Blake3, HashPrimitive, HexJoin, Sha256};
