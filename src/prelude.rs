/*
    This module contains the default imports for the library.

    Import the library using:
        use xpub_address::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{
    address::Address,
    encoding::VersionPrefix,
    error::Error,
    hdwallet::{
        derive_child_xpub, derive_xpub_at_path, xpub_to_public_key_hex, Path, Xpub,
        HARDENED_OFFSET,
    },
    script::RedeemScript,
    util::Network,
};
