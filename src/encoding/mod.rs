/*
    Base58Check encoding and the version prefixes that ride in front of it.
*/

pub mod base58;
pub mod version_prefix;

pub use base58::Base58;
pub use version_prefix::VersionPrefix;
