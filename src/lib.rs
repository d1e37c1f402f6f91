/*
    Library to derive addresses from extended public keys,
    without ever touching private key material.

    Covers parsing and serializing BIP32 xpubs, non-hardened child key
    derivation (CKDpub), and rendering the resulting public keys as
    P2PKH, nested segwit (BIP49), P2SH multisig and Ethereum addresses.

    References:
        - BIP32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
            extended keys and the child key derivation functions

        - BIP49 (https://github.com/bitcoin/bips/blob/master/bip-0049.mediawiki)
            p2wpkh nested in p2sh addresses

        - SEC 2 (https://www.secg.org/sec2-v2.pdf)
            the secp256k1 domain parameters
*/

//Outward facing modules
pub mod address;
pub mod encoding;
pub mod hdwallet;
pub mod script;
pub mod util;

//Modules for internal use
pub(crate) mod curve;
pub(crate) mod hash;

mod error;
pub mod prelude;

pub use error::Error;
