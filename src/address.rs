/*
    Address module.

    Renders public key bytes as address strings:
      - P2PKH          (legacy Base58Check)
      - P2WPKH-in-P2SH (BIP-49 nested segwit)
      - P2SH multisig  (m-of-n redeem script hash)
      - Ethereum       (Keccak-256 of the uncompressed key body)

    Bitcoin schemes take a 33 byte compressed key; Ethereum takes the
    65 byte uncompressed form. `compress` converts between the two at
    the byte level, no curve arithmetic involved.
*/

use crate::{
    encoding::{Base58, VersionPrefix},
    error::Error,
    hash,
    script::{Opcode, RedeemScript, ScriptBuilder},
    util::Network,
};

pub struct Address;

impl Address {
    /// Legacy pay-to-public-key-hash address.
    pub fn p2pkh(public_key: &[u8], network: Network) -> Result<String, Error> {
        require_compressed(public_key)?;
        let prefix = match network {
            Network::Bitcoin => VersionPrefix::P2PKHAddress,
            Network::Testnet => VersionPrefix::P2PKHTestnetAddress,
        };
        Ok(Base58::new(Some(prefix), &hash::hash160(public_key)).check_encode())
    }

    /// BIP-49 nested segwit address: a p2sh wrap of the witness program
    /// `OP_0 <20 byte key hash>`.
    pub fn p2wpkh_in_p2sh(public_key: &[u8], network: Network) -> Result<String, Error> {
        require_compressed(public_key)?;
        let script_sig = ScriptBuilder::new()
            .push_opcode(Opcode::Op0)
            .push_data(&hash::hash160(public_key))?
            .into_script();
        Ok(Self::p2sh(&script_sig, network))
    }

    /// m-of-n multisig wrapped in p2sh. Key order does not matter; the
    /// redeem script sorts them.
    pub fn p2sh_multisig(m: u8, keys: &[Vec<u8>], network: Network) -> Result<String, Error> {
        Ok(Self::p2sh(&RedeemScript::multisig(m, keys)?, network))
    }

    fn p2sh(script: &RedeemScript, network: Network) -> String {
        let prefix = match network {
            Network::Bitcoin => VersionPrefix::P2SHAddress,
            Network::Testnet => VersionPrefix::P2SHTestnetAddress,
        };
        Base58::new(Some(prefix), &script.hash()).check_encode()
    }

    /// Ethereum address: "0x" plus the last 20 bytes of the Keccak-256
    /// digest of the uncompressed key without its 0x04 prefix.
    pub fn ethereum(public_key: &[u8]) -> Result<String, Error> {
        require_uncompressed(public_key)?;
        let digest = hash::keccak256(&public_key[1..]);
        Ok(format!("0x{}", hex::encode(&digest[12..])))
    }

    /// Compress an uncompressed key: keep x, fold y down to its parity.
    pub fn compress(public_key: &[u8]) -> Result<[u8; 33], Error> {
        require_uncompressed(public_key)?;
        let mut compressed = [0u8; 33];
        compressed[0] = if public_key[64] & 1 == 1 { 0x03 } else { 0x02 };
        compressed[1..].copy_from_slice(&public_key[1..33]);
        Ok(compressed)
    }
}

fn require_compressed(public_key: &[u8]) -> Result<(), Error> {
    if public_key.len() != 33 {
        return Err(Error::KeyFormat("compressed public keys are 33 bytes"));
    }
    if public_key[0] != 0x02 && public_key[0] != 0x03 {
        return Err(Error::KeyFormat(
            "compressed public keys start with 0x02 or 0x03",
        ));
    }
    Ok(())
}

fn require_uncompressed(public_key: &[u8]) -> Result<(), Error> {
    if public_key.len() != 65 {
        return Err(Error::KeyFormat("uncompressed public keys are 65 bytes"));
    }
    if public_key[0] != 0x04 {
        return Err(Error::KeyFormat("uncompressed public keys start with 0x04"));
    }
    Ok(())
}
