/*
    Watch-only hierarchical deterministic wallet module.

    Everything here works from extended public keys alone: parsing and
    serializing xpubs, CKDpub child derivation and path traversal. The
    string-in string-out helpers cover the common case of walking from
    an exported account xpub straight to a leaf key.
*/

pub mod ckd;
pub mod extended_key;
pub mod path;

pub use ckd::{derive_xpub, HARDENED_OFFSET};
pub use extended_key::Xpub;
pub use path::Path;

use std::str::FromStr;

use crate::error::Error;

/// Derive the non-hardened child of a serialized xpub, returning the
/// child in serialized form.
pub fn derive_child_xpub(xpub: &str, index: u32) -> Result<String, Error> {
    Ok(Xpub::from_str(xpub)?.derive_child(index)?.serialize())
}

/// Walk a whole path of non-hardened indexes from a serialized xpub.
pub fn derive_xpub_at_path(xpub: &str, path: &[u32]) -> Result<String, Error> {
    Ok(Xpub::from_str(xpub)?
        .derive_path(&Path::from(path))?
        .serialize())
}

/// The compressed public key of a serialized xpub, hex encoded.
pub fn xpub_to_public_key_hex(xpub: &str) -> Result<String, Error> {
    Ok(hex::encode(Xpub::from_str(xpub)?.public_key()))
}
