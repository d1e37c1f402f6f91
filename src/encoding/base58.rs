/*
    Base58 and Base58Check.

    Base58Check appends the first four bytes of the double-SHA256 of the
    payload as a checksum, then base58 encodes the whole thing. Each leading
    zero byte of the payload becomes one leading '1' in the text form.
*/

use crate::{
    encoding::version_prefix::VersionPrefix,
    error::Error,
    hash,
};

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// Byte value -> digit value, -1 for characters outside the alphabet.
const DIGIT_MAP: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1,  0,  1,  2,  3,  4,  5,  6,  7,  8, -1, -1, -1, -1, -1, -1,
    -1,  9, 10, 11, 12, 13, 14, 15, 16, -1, 17, 18, 19, 20, 21, -1,
    22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, -1, -1, -1, -1, -1,
    -1, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, -1, 44, 45, 46,
    47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, -1, -1, -1, -1, -1,
];

#[derive(Debug)]
pub struct Base58 {
    prefix: Option<VersionPrefix>,
    payload: Vec<u8>,
}

impl Base58 {
    pub fn new(prefix: Option<VersionPrefix>, payload: &[u8]) -> Base58 {
        Base58 {
            prefix,
            payload: payload.to_vec(),
        }
    }

    /// Base58Check: prefix | payload | first 4 bytes of sha256d(prefix | payload).
    pub fn check_encode(self) -> String {
        let mut bytes = match self.prefix {
            Some(p) => p.to_bytes(),
            None => Vec::new(),
        };
        bytes.extend_from_slice(&self.payload);
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);

        // The checksum is already part of the payload here.
        Base58 {
            prefix: None,
            payload: bytes,
        }
        .encode()
    }

    /// Plain base58, no checksum.
    pub fn encode(self) -> String {
        let data = match self.prefix {
            Some(p) => {
                let mut d = p.to_bytes();
                d.extend_from_slice(&self.payload);
                d
            }
            None => self.payload,
        };

        let zeroes = data.iter().take_while(|&&b| b == 0).count();

        // Repeatedly divide the big-endian number by 58; digits come out
        // least significant first.
        let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
        for &byte in &data[zeroes..] {
            let mut carry = byte as u32;
            for digit in digits.iter_mut() {
                let acc = (*digit as u32) * 256 + carry;
                *digit = (acc % 58) as u8;
                carry = acc / 58;
            }
            while carry > 0 {
                digits.push((carry % 58) as u8);
                carry /= 58;
            }
        }

        let mut result = String::with_capacity(zeroes + digits.len());
        for _ in 0..zeroes {
            result.push('1');
        }
        for &d in digits.iter().rev() {
            result.push(ALPHABET[d as usize] as char);
        }
        result
    }

    /// Decode a base58 string to bytes. Neither the checksum nor any version
    /// prefix is stripped.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Error> {
        let zeroes = encoded.bytes().take_while(|&b| b == b'1').count();

        // log(58) / log(256), rounded up
        let capacity = encoded.len() * 733 / 1000 + 1;
        let mut bytes: Vec<u8> = Vec::with_capacity(capacity);
        for c in encoded[zeroes..].chars() {
            let digit = if c.is_ascii() { DIGIT_MAP[c as usize] } else { -1 };
            if digit < 0 {
                return Err(Error::Format(format!("invalid base58 character {:?}", c)));
            }

            let mut carry = digit as u32;
            for byte in bytes.iter_mut() {
                let acc = (*byte as u32) * 58 + carry;
                *byte = (acc % 256) as u8;
                carry = acc / 256;
            }
            while carry > 0 {
                bytes.push((carry % 256) as u8);
                carry /= 256;
            }
        }

        let mut result = vec![0u8; zeroes];
        result.extend(bytes.iter().rev());
        Ok(result)
    }

    /// Decode a Base58Check string, verify the trailing checksum, and return
    /// the payload with the checksum removed. The version prefix stays in
    /// place because its length depends on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Error> {
        let bytes = Base58::decode(encoded)?;
        if bytes.len() < 4 {
            return Err(Error::Format(
                "payload too short to carry a checksum".to_string(),
            ));
        }

        let (payload, checksum) = bytes.split_at(bytes.len() - 4);
        if hash::sha256d(payload)[0..4] != *checksum {
            return Err(Error::Checksum);
        }
        Ok(payload.to_vec())
    }
}
