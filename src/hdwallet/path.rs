/*
    Derivation paths.

    A path is the list of child indexes to walk from a starting node,
    written "m/0/1/2". Hardened markers (', h, H) are understood by the
    parser but rejected, since hardened steps cannot be taken from a
    public key.
*/

use std::fmt;
use std::str::FromStr;

use crate::{error::Error, hdwallet::ckd::HARDENED_OFFSET};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub indexes: Vec<u32>,
}

impl Path {
    pub fn new(indexes: Vec<u32>) -> Self {
        Self { indexes }
    }

    /// The empty path, deriving nothing.
    pub fn empty() -> Self {
        Self { indexes: vec![] }
    }
}

impl From<&[u32]> for Path {
    fn from(indexes: &[u32]) -> Self {
        Self::new(indexes.to_vec())
    }
}

impl From<Vec<u32>> for Path {
    fn from(indexes: Vec<u32>) -> Self {
        Self::new(indexes)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(Error::Format(format!(
                "derivation path {:?} does not start with \"m\"",
                s
            )));
        }

        let mut indexes = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix(|c| matches!(c, '\'' | 'h' | 'H')) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| Error::Format(format!("invalid path component {:?}", part)))?;
            if hardened {
                return Err(Error::HardenedIndex(index | HARDENED_OFFSET));
            }
            if index >= HARDENED_OFFSET {
                return Err(Error::HardenedIndex(index));
            }
            indexes.push(index);
        }
        Ok(Self { indexes })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indexes {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let path = Path::from_str("m/44/0/1").unwrap();
        assert_eq!(path.indexes, vec![44, 0, 1]);
        assert_eq!(path.to_string(), "m/44/0/1");
        assert_eq!(Path::from_str("m").unwrap(), Path::empty());
        assert_eq!(Path::empty().to_string(), "m");
    }

    #[test]
    fn rejects_missing_m() {
        assert!(matches!(Path::from_str("44/0/1"), Err(Error::Format(_))));
        assert!(matches!(Path::from_str(""), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_garbage_components() {
        assert!(matches!(Path::from_str("m/0/x"), Err(Error::Format(_))));
        assert!(matches!(Path::from_str("m//1"), Err(Error::Format(_))));
        assert!(matches!(Path::from_str("m/-1"), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_hardened_components() {
        assert_eq!(
            Path::from_str("m/44'/0"),
            Err(Error::HardenedIndex(44 | HARDENED_OFFSET))
        );
        assert_eq!(
            Path::from_str("m/0h"),
            Err(Error::HardenedIndex(HARDENED_OFFSET))
        );
        assert_eq!(
            Path::from_str("m/2147483648"),
            Err(Error::HardenedIndex(HARDENED_OFFSET))
        );
    }
}
