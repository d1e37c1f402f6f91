/*
    Shared error types.

    Every failure in this crate is deterministic given its input and is
    surfaced synchronously as one of these variants. Nothing is retried
    internally: retrying with identical input reproduces the identical error.
*/

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A payload has the wrong length, layout or alphabet for what it
    /// claims to be.
    #[error("malformed payload: {0}")]
    Format(String),

    /// The trailing four checksum bytes of a Base58Check string do not match
    /// the double-SHA256 of its payload.
    #[error("base58check checksum mismatch")]
    Checksum,

    /// A public key failed the on-curve check, a scalar was not below the
    /// curve order, or a derivation produced the point at infinity.
    #[error("invalid public key: {0}")]
    InvalidKey(&'static str),

    /// A hardened index was requested. Hardened derivation needs the parent
    /// private key, which an xpub does not carry.
    #[error("index {0} is hardened; hardened derivation requires the parent private key")]
    HardenedIndex(u32),

    /// Deriving one more level would push the depth byte past 255.
    #[error("derivation depth would exceed 255")]
    DepthOverflow,

    /// A key had the wrong length or prefix for the requested address scheme.
    #[error("unsuitable key for this address scheme: {0}")]
    KeyFormat(&'static str),

    /// A script limit was exceeded (opcode range, key count or total size).
    #[error("script limit exceeded: {0}")]
    ScriptLimit(&'static str),

    /// A multi-step path derivation aborted. Carries which step failed and
    /// the error that stopped it.
    #[error("derivation failed at path step {step} (index {index}): {source}")]
    DerivationStep {
        step: usize,
        index: u32,
        source: Box<Error>,
    },
}
