/*
    Script builder module.

    Opcodes are a closed enumeration of the classes this crate emits:
    the empty push, single byte data pushes, the small-number opcodes and
    OP_CHECKMULTISIG. Each class carries its own range check, so an opcode
    value that exists is always encodable.
*/

use super::RedeemScript;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// OP_0, pushes an empty array.
    Op0,
    /// OP_PUSHBYTES_1 ..= OP_PUSHBYTES_75, pushes that many following bytes.
    PushBytes(u8),
    /// OP_1NEGATE and OP_1 ..= OP_16, push a small number.
    Num(i8),
    /// OP_CHECKMULTISIG.
    CheckMultiSig,
}

impl Opcode {
    /// Small-number opcode for n in {-1, 1 ..= 16}.
    pub fn num(n: i8) -> Result<Opcode, Error> {
        match n {
            -1 | 1..=16 => Ok(Opcode::Num(n)),
            _ => Err(Error::ScriptLimit("OP_N encodes only -1 and 1 through 16")),
        }
    }

    /// Push-length opcode for payloads of 1 to 75 bytes. Longer payloads
    /// would need OP_PUSHDATA, which no supported script produces.
    pub fn push_bytes(len: usize) -> Result<Opcode, Error> {
        match len {
            1..=75 => Ok(Opcode::PushBytes(len as u8)),
            _ => Err(Error::ScriptLimit(
                "single byte pushes cover 1 through 75 bytes",
            )),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::Op0 => 0x00,
            Opcode::PushBytes(n) => n,
            Opcode::Num(-1) => 0x4F,
            // OP_1 is 0x51
            Opcode::Num(n) => 0x50 + n as u8,
            Opcode::CheckMultiSig => 0xAE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Builder {
    code: Vec<u8>,
}

impl Builder {
    /// Return a new instance of self
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    /// Append a single opcode.
    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.code.push(opcode.to_byte());
        self
    }

    /// Append a length-prefixed data push.
    pub fn push_data(mut self, data: &[u8]) -> Result<Self, Error> {
        self = self.push_opcode(Opcode::push_bytes(data.len())?);
        self.code.extend_from_slice(data);
        Ok(self)
    }

    /// Convert self into a redeem script
    pub fn into_script(self) -> RedeemScript {
        RedeemScript::new(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_n_bytes() {
        // Same shape as the original scripting tests: -1, 1, 2, 16.
        let expected: [(i8, u8); 4] = [(-1, 0x4F), (1, 0x51), (2, 0x52), (16, 0x60)];
        for &(n, byte) in expected.iter() {
            assert_eq!(Opcode::num(n).unwrap().to_byte(), byte);
        }
    }

    #[test]
    fn op_n_outside_range() {
        assert!(Opcode::num(-2).is_err());
        assert!(Opcode::num(0).is_err());
        assert!(Opcode::num(17).is_err());
    }

    #[test]
    fn push_n_bytes() {
        let expected: [(usize, u8); 6] =
            [(1, 0x01), (5, 0x05), (10, 0x0A), (16, 0x10), (20, 0x14), (75, 0x4B)];
        for &(n, byte) in expected.iter() {
            assert_eq!(Opcode::push_bytes(n).unwrap().to_byte(), byte);
        }
    }

    #[test]
    fn push_n_outside_range() {
        assert!(Opcode::push_bytes(0).is_err());
        assert!(Opcode::push_bytes(76).is_err());
    }

    #[test]
    fn push_data_prefixes_length() {
        let script = Builder::new().push_data(b"pushme").unwrap().into_script();
        assert_eq!(script.code.len(), b"pushme".len() + 1);
        assert_eq!(script.code[0], b"pushme".len() as u8);
        assert_eq!(&script.code[1..], b"pushme");
    }

    #[test]
    fn builder_concatenates_in_order() {
        let script = Builder::new()
            .push_opcode(Opcode::Op0)
            .push_data(&[0xAB; 20])
            .unwrap()
            .into_script();
        assert_eq!(script.code[0], 0x00);
        assert_eq!(script.code[1], 20);
        assert_eq!(script.code.len(), 22);
    }
}
