use crate::error::Error;

/// Version bytes prepended to Base58Check payloads.
///
/// Address prefixes are one byte; BIP32 extended key prefixes are four.
/// Only the public-key versions exist here: this crate never holds a
/// private key, so there is nothing WIF- or xprv-shaped to tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    // One byte address prefixes
    P2PKHAddress = 0x00,
    P2PKHTestnetAddress = 0x6F,
    P2SHAddress = 0x05,
    P2SHTestnetAddress = 0xC4,

    // Four byte BIP32 prefixes
    Xpub = 0x0488B21E,
    Tpub = 0x043587CF,
}

impl VersionPrefix {
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            VersionPrefix::P2PKHAddress => vec![0x00],
            VersionPrefix::P2PKHTestnetAddress => vec![0x6F],
            VersionPrefix::P2SHAddress => vec![0x05],
            VersionPrefix::P2SHTestnetAddress => vec![0xC4],

            // Four byte cases
            _ => (self as u32).to_be_bytes().to_vec(),
        }
    }

    /// Look up an extended key version field. Address prefixes never appear
    /// in a four byte field, so only xpub and tpub resolve.
    pub fn from_extended_key_version(version: u32) -> Result<Self, Error> {
        match version {
            0x0488B21E => Ok(VersionPrefix::Xpub),
            0x043587CF => Ok(VersionPrefix::Tpub),
            _ => Err(Error::Format(format!(
                "unknown extended public key version 0x{:08x}",
                version
            ))),
        }
    }
}
