use std::convert::TryInto;

/**
    Converts a vector into an array.

    Panics when the length does not match, so only use it on slices whose
    length has already been checked.
*/
pub fn try_into<T, const N: usize>(v: Vec<T>) -> [T; N] {
    v.try_into()
        .unwrap_or_else(|v: Vec<T>| panic!("Expected {}, found {}", N, v.len()))
}

/// Network an address is encoded for. Selects the version byte of every
/// Bitcoin-family scheme.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Network {
    Bitcoin,
    Testnet,
}
