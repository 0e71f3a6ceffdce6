//! Digest engine.
//!
//! Dispatches over the supported algorithms and renders digests as
//! uppercase hex. Content is fed in fixed-size chunks, so large files never
//! have to fit in memory; the result equals a one-shot digest of the same
//! bytes.

use std::io::{self, ErrorKind, Read};

use md5::Md5;
use sha2::{Digest, Sha256, Sha512};

use hashtrail_core::DigestAlgorithm;

/// Chunk size used when streaming file content into a hasher.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Incremental hasher for one of the supported algorithms.
#[derive(Clone)]
pub enum DigestHasher {
    Md5(Md5),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl DigestHasher {
    /// Create a fresh hasher.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Md5 => Self::Md5(Md5::new()),
            DigestAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            DigestAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    /// Feed more content.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    /// Consume the hasher and return the uppercase hex digest.
    pub fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => hex::encode_upper(h.finalize()),
            Self::Sha256(h) => hex::encode_upper(h.finalize()),
            Self::Sha512(h) => hex::encode_upper(h.finalize()),
        }
    }
}

/// Digest a complete buffer.
pub fn digest(bytes: &[u8], algorithm: DigestAlgorithm) -> String {
    let mut hasher = DigestHasher::new(algorithm);
    hasher.update(bytes);
    hasher.finalize_hex()
}

/// Digest everything a reader yields until EOF.
pub fn digest_reader<R: Read>(reader: &mut R, algorithm: DigestAlgorithm) -> io::Result<String> {
    let mut hasher = DigestHasher::new(algorithm);
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(hasher.finalize_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            digest(b"abc", DigestAlgorithm::Md5),
            "900150983CD24FB0D6963F7D28E17F72"
        );
        assert_eq!(
            digest(b"abc", DigestAlgorithm::Sha256),
            "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
        );
        assert_eq!(
            digest(b"abc", DigestAlgorithm::Sha512),
            "DDAF35A193617ABACC417349AE20413112E6FA4E89A97EA20A9EEEE64B55D39A\
             2192992A274FC1A836BA3C23A3FEEBBD454D4423643CE80E2A9AC94FA54CA49F"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            digest(b"", DigestAlgorithm::Md5),
            "D41D8CD98F00B204E9800998ECF8427E"
        );
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        // Larger than one read buffer so several chunks are fed.
        let data: Vec<u8> = (0..READ_BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();

        for algorithm in [
            DigestAlgorithm::Md5,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha512,
        ] {
            let streamed = digest_reader(&mut Cursor::new(&data), algorithm).unwrap();
            assert_eq!(streamed, digest(&data, algorithm));
            assert_eq!(streamed.len(), algorithm.hex_len());
            assert!(streamed.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_read_error_propagates() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device gone"))
            }
        }

        let err = digest_reader(&mut Failing, DigestAlgorithm::Sha256).unwrap_err();
        assert_eq!(err.to_string(), "device gone");
    }
}
