/*
    BIP32 extended public keys.

    Serialized form is exactly 78 bytes:

        version[0..4] depth[4..5] parent_fingerprint[5..9]
        child_number[9..13] chain_code[13..45] key[45..78]

    wrapped in Base58Check. Only the public versions (xpub, tpub) exist
    here. Values are immutable once parsed or derived.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use std::fmt;
use std::str::FromStr;

use crate::{
    curve::Point,
    encoding::{Base58, VersionPrefix},
    error::Error,
    hash,
    hdwallet::{ckd, path::Path},
    util::try_into,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xpub {
    version: VersionPrefix,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    /// The index this node was derived with. Nodes created by a private
    /// key holder can carry a hardened index (>= 2^31) here even though
    /// this crate can only derive non-hardened children onward.
    pub child_number: u32,
    chaincode: [u8; 32],
    key: Point,
}

impl Xpub {
    pub(crate) fn construct(
        version: VersionPrefix,
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
        chaincode: [u8; 32],
        key: Point,
    ) -> Self {
        Self {
            version,
            depth,
            parent_fingerprint,
            child_number,
            chaincode,
            key,
        }
    }

    pub fn version(&self) -> VersionPrefix {
        self.version
    }

    pub fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    /// The compressed 33 byte public key of this node (serP).
    pub fn public_key(&self) -> [u8; 33] {
        self.key.compress()
    }

    pub(crate) fn point(&self) -> Point {
        self.key
    }

    /// This node's own fingerprint: the first four bytes of the Hash160 of
    /// its compressed public key. Becomes the parent fingerprint of every
    /// child.
    pub fn fingerprint(&self) -> [u8; 4] {
        try_into(hash::hash160(&self.public_key())[0..4].to_vec())
    }

    /// Derive the non-hardened child at `index`.
    pub fn derive_child(&self, index: u32) -> Result<Xpub, Error> {
        ckd::derive_xpub(self, index)
    }

    /// Left-fold `derive_child` over a path. The first failing step aborts
    /// the traversal; the error reports which step and why.
    pub fn derive_path(&self, path: &Path) -> Result<Xpub, Error> {
        let mut node = *self;
        for (step, &index) in path.indexes.iter().enumerate() {
            node = ckd::derive_xpub(&node, index).map_err(|e| Error::DerivationStep {
                step,
                index,
                source: Box::new(e),
            })?;
        }
        Ok(node)
    }

    /// Base58Check string form, the inverse of `from_str`.
    pub fn serialize(&self) -> String {
        let mut payload = Vec::with_capacity(74);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_number.to_be_bytes());
        payload.extend_from_slice(&self.chaincode);
        payload.extend_from_slice(&self.public_key());
        Base58::new(Some(self.version), &payload).check_encode()
    }
}

impl FromStr for Xpub {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let bytes = Base58::check_decode(s)?;
        if bytes.len() != 78 {
            return Err(Error::Format(format!(
                "extended key payload is {} bytes, expected 78",
                bytes.len()
            )));
        }

        let version = u32::from_be_bytes(try_into(bytes[0..4].to_vec()));
        let version = VersionPrefix::from_extended_key_version(version)?;
        let depth = bytes[4];
        let parent_fingerprint: [u8; 4] = try_into(bytes[5..9].to_vec());
        let child_number = u32::from_be_bytes(try_into(bytes[9..13].to_vec()));
        let chaincode: [u8; 32] = try_into(bytes[13..45].to_vec());
        let key_bytes: [u8; 33] = try_into(bytes[45..78].to_vec());
        let key = Point::from_compressed(&key_bytes)?;

        Ok(Self::construct(
            version,
            depth,
            parent_fingerprint,
            child_number,
            chaincode,
            key,
        ))
    }
}

impl fmt::Display for Xpub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP32 test vector 1, node m/0' (public part).
    const ROOT: &str = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";

    #[test]
    fn parse_extracts_every_field() {
        let xpub = Xpub::from_str(ROOT).unwrap();
        assert_eq!(xpub.version(), VersionPrefix::Xpub);
        assert_eq!(xpub.depth, 1);
        assert_eq!(hex::encode(xpub.parent_fingerprint), "3442193e");
        // The node itself was derived hardened (m/0'), so the stored child
        // number carries the hardened bit.
        assert_eq!(xpub.child_number, 0x8000_0000);
        assert_eq!(
            hex::encode(xpub.chaincode()),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
        assert_eq!(
            hex::encode(xpub.public_key()),
            "035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56"
        );
        assert_eq!(hex::encode(xpub.fingerprint()), "5c1bd648");
    }

    #[test]
    fn serialize_is_the_inverse_of_parse() {
        let xpub = Xpub::from_str(ROOT).unwrap();
        assert_eq!(xpub.serialize(), ROOT);
        assert_eq!(Xpub::from_str(&xpub.serialize()).unwrap(), xpub);
    }

    #[test]
    fn parse_accepts_tpub() {
        // Same node re-tagged with the testnet version bytes.
        let tpub = "tpubD8eQVK4Kdxg3gHrF62jGP7dKVCoYiEB8dFSpuTawkL5YxTus5j5pf83vaKnii4bc6v2NVEy81P2gYrJczYne3QNNwMTS53p5uzDyHvnw2jm";
        let parsed = Xpub::from_str(tpub).unwrap();
        assert_eq!(parsed.version(), VersionPrefix::Tpub);
        assert_eq!(parsed.serialize(), tpub);
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        let mut corrupted = String::from(ROOT);
        corrupted.pop();
        corrupted.push('z');
        assert_eq!(Xpub::from_str(&corrupted), Err(Error::Checksum));
    }

    #[test]
    fn parse_rejects_wrong_payload_length() {
        // 77 byte payload with a valid checksum.
        let truncated = "Deb7pP3DTJGn51PZiaEEHWAnMSDT6EJRQXWhM5VtnHtPJ64KdHpcaCA17j12D5EoiMzQQZjhXWZEFLXjLQkGzhmVotdx2XkJXvxUVKwxRBZYy1";
        assert!(matches!(Xpub::from_str(truncated), Err(Error::Format(_))));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        // The same node under a BIP-49 ypub prefix, valid checksum.
        let ypub = "ypub6T73GjuZ5NG5FnrWUCXoPHPTL3rLfTfZzjNkLJRgnRhYGH4PGAQJ8k3EMVfXBUJHiecGd93ovwZBjxRaKPMQxCbgk6QYyRyLbkhCvXJ8PtA";
        assert!(matches!(Xpub::from_str(ypub), Err(Error::Format(_))));
    }

    #[test]
    fn parse_rejects_key_off_the_curve() {
        // Key field replaced with x = 5, whose x^3 + 7 has no square root;
        // checksum recomputed to isolate the curve check.
        let bad = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LF5M5NuBaP5s1KnfD3kBp8dgdPsp7WvZSjpm2QquYNc2KLSvWt4";
        assert_eq!(
            Xpub::from_str(bad),
            Err(Error::InvalidKey("x coordinate is not on the curve"))
        );
    }
}
