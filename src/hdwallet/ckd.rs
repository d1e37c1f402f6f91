/*
    Public child key derivation (CKDpub).

    Only non-hardened derivation is possible without private key
    material. For index i < 2^31:

        I  = HMAC-SHA512(key = parent chain code,
                         data = serP(parent) || ser32(i))
        IL = I[0..32] as a big-endian scalar
        child key        = point(IL) * G + parent point
        child chain code = I[32..64]

    BIP32 says to skip to i + 1 when IL >= n or the sum is infinity.
    That retry is left to the caller; this function reports the invalid
    index instead of silently answering for a different one.
*/

use crate::{
    curve::{uint::U256, Point, N},
    error::Error,
    hash,
    hdwallet::extended_key::Xpub,
    util::try_into,
};

pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Derive the non-hardened child of `parent` at `index`.
pub fn derive_xpub(parent: &Xpub, index: u32) -> Result<Xpub, Error> {
    if index >= HARDENED_OFFSET {
        return Err(Error::HardenedIndex(index));
    }
    let depth = parent.depth.checked_add(1).ok_or(Error::DepthOverflow)?;

    let mut data = [0u8; 37];
    data[0..33].copy_from_slice(&parent.public_key());
    data[33..37].copy_from_slice(&index.to_be_bytes());
    let i = hash::hmac_sha512(&parent.chaincode(), &data);

    let il = U256::from_be_bytes(&try_into(i[0..32].to_vec()));
    if il >= N {
        // Probability ~2^-128, but the check is mandatory.
        return Err(Error::InvalidKey("scalar is not below the curve order"));
    }
    let key = Point::generator().mul(&il)?.add(&parent.point());
    if key.is_infinity() {
        return Err(Error::InvalidKey("derived child is the point at infinity"));
    }

    Ok(Xpub::construct(
        parent.version(),
        depth,
        parent.fingerprint(),
        index,
        try_into(i[32..64].to_vec()),
        key,
    ))
}
