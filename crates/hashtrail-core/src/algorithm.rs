//! Digest algorithm selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ConfigError;

/// Cryptographic hash function used for every file in a run.
///
/// The `Display` form is the label written into the report header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5, 128-bit output.
    #[strum(serialize = "MD5")]
    Md5,
    /// SHA-256, 256-bit output.
    #[strum(serialize = "SHA256")]
    Sha256,
    /// SHA-512, 512-bit output.
    #[strum(serialize = "SHA512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Parse an algorithm name such as `md5` or `SHA256`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::from_str(name.trim()).map_err(|_| ConfigError::UnknownAlgorithm {
            name: name.to_string(),
        })
    }

    /// Output width in bits.
    pub fn bits(self) -> usize {
        match self {
            Self::Md5 => 128,
            Self::Sha256 => 256,
            Self::Sha512 => 512,
        }
    }

    /// Length of the hex rendering of a digest.
    pub fn hex_len(self) -> usize {
        self.bits() / 4
    }

    /// Column label used in the report header.
    pub fn label(self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels() {
        assert_eq!(DigestAlgorithm::Md5.label(), "MD5");
        assert_eq!(DigestAlgorithm::Sha256.label(), "SHA256");
        assert_eq!(DigestAlgorithm::Sha512.label(), "SHA512");
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(DigestAlgorithm::from_name("md5").unwrap(), DigestAlgorithm::Md5);
        assert_eq!(DigestAlgorithm::from_name("Sha256").unwrap(), DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::from_name(" SHA512 ").unwrap(), DigestAlgorithm::Sha512);
    }

    #[test]
    fn test_from_name_unknown() {
        let err = DigestAlgorithm::from_name("crc32").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAlgorithm { ref name } if name == "crc32"));
    }

    #[test]
    fn test_hex_lengths() {
        let lens: Vec<usize> = DigestAlgorithm::iter().map(DigestAlgorithm::hex_len).collect();
        assert_eq!(lens, vec![32, 64, 128]);
    }
}
