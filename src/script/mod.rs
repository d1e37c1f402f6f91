/*
    Bitcoin script assembly, limited to what address construction needs:
    redeem scripts for m-of-n multisig (BIP-11, sorted keys as in BIP-67)
    and the nested segwit scriptSig.
*/

pub mod builder;

pub use builder::{Builder as ScriptBuilder, Opcode};

use crate::{error::Error, hash};

/// Relay standardness cap on redeem script size.
pub const MAX_REDEEM_SCRIPT_BYTES: usize = 500;

/// Consensus cap on OP_CHECKMULTISIG key count.
pub const MAX_MULTISIG_KEYS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    pub code: Vec<u8>,
}

impl RedeemScript {
    pub fn new(code: Vec<u8>) -> Self {
        Self { code }
    }

    /**
        Hash the script with Hash160
    */
    pub fn hash(&self) -> [u8; 20] {
        hash::hash160(&self.code)
    }

    /// Redeem script for an m-of-n multisig:
    /// `OP_M <key 1> ... <key n> OP_N OP_CHECKMULTISIG`.
    ///
    /// Keys are sorted ascending by raw byte value first, so the same key
    /// set yields the same script no matter how the caller orders it.
    /// OP_N tops out at 16, which caps n below the consensus limit of 20.
    pub fn multisig(m: u8, keys: &[Vec<u8>]) -> Result<Self, Error> {
        let n = keys.len();
        if n > MAX_MULTISIG_KEYS {
            return Err(Error::ScriptLimit(
                "OP_CHECKMULTISIG accepts at most 20 keys",
            ));
        }
        if m == 0 || m as usize > n {
            return Err(Error::ScriptLimit(
                "required signatures must satisfy 1 <= m <= n",
            ));
        }

        let mut keys: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
        keys.sort();

        let mut builder = ScriptBuilder::new().push_opcode(Opcode::num(m as i8)?);
        for key in keys {
            builder = builder.push_data(key)?;
        }
        let script = builder
            .push_opcode(Opcode::num(n as i8)?)
            .push_opcode(Opcode::CheckMultiSig)
            .into_script();

        if script.code.len() > MAX_REDEEM_SCRIPT_BYTES {
            return Err(Error::ScriptLimit("redeem script exceeds 500 bytes"));
        }
        Ok(script)
    }
}
