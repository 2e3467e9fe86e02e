//! Streaming hash collaborator.
//!
//! The catalog core never computes digests itself; this module is the
//! collaborator that supplies them, as lower-case hex strings ready to be
//! stored on Rom/Disk entries. All three digests are computed in a single
//! pass.

use std::io::{Read, Seek};

use sha1::Digest;

use crate::error::TransformError;
use crate::rule::SkipRule;
use crate::transform::transform;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Hash results for one byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHashes {
    /// CRC32 as lower-case hex
    pub crc32: String,
    /// MD5 as lower-case hex
    pub md5: String,
    /// SHA1 as lower-case hex
    pub sha1: String,
    /// Number of bytes hashed
    pub size: u64,
}

/// Hash an in-memory byte slice.
pub fn hash_bytes(data: &[u8]) -> FileHashes {
    let mut crc = crc32fast::Hasher::new();
    crc.update(data);
    let mut sha = sha1::Sha1::new();
    sha.update(data);

    FileHashes {
        crc32: format!("{:08x}", crc.finalize()),
        md5: format!("{:x}", md5::compute(data)),
        sha1: format!("{:x}", sha.finalize()),
        size: data.len() as u64,
    }
}

/// Hash a stream to exhaustion, 64 KB at a time.
pub fn hash_stream<R: Read>(reader: &mut R) -> Result<FileHashes, TransformError> {
    let mut crc = crc32fast::Hasher::new();
    let mut sha = sha1::Sha1::new();
    let mut md5_ctx = md5::Context::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut size: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
        sha.update(&buf[..n]);
        md5_ctx.consume(&buf[..n]);
        size += n as u64;
    }

    Ok(FileHashes {
        crc32: format!("{:08x}", crc.finalize()),
        md5: format!("{:x}", md5_ctx.compute()),
        sha1: format!("{:x}", sha.finalize()),
        size,
    })
}

/// Normalize a stream through a header-skip rule, then hash the result.
///
/// This is what catalog hashes are computed over: the payload after the
/// vendor header is stripped or reordered. An empty normalized payload is
/// a failure, matching the transform layer's output contract.
pub fn hash_with_rule<R: Read + Seek>(
    reader: &mut R,
    rule: &SkipRule,
) -> Result<FileHashes, TransformError> {
    let bytes = transform(reader, rule)?;
    if bytes.is_empty() {
        return Err(TransformError::EmptyOutput);
    }
    Ok(hash_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::TransformOp;
    use std::io::Cursor;

    #[test]
    fn test_known_vector() {
        let hashes = hash_bytes(b"abc");
        assert_eq!(hashes.crc32, "352441c2");
        assert_eq!(hashes.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(hashes.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(hashes.size, 3);
    }

    #[test]
    fn test_stream_matches_bytes() {
        let data = vec![0x5Au8; 200_000]; // spans multiple chunks
        let from_stream = hash_stream(&mut Cursor::new(data.clone())).unwrap();
        assert_eq!(from_stream, hash_bytes(&data));
    }

    #[test]
    fn test_hash_with_rule_skips_header() {
        let mut data = vec![0xFF; 16];
        data.extend_from_slice(b"abc");

        let rule = SkipRule::new(16, None, TransformOp::None);
        let hashes = hash_with_rule(&mut Cursor::new(data), &rule).unwrap();
        assert_eq!(hashes.crc32, "352441c2");
        assert_eq!(hashes.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_empty_payload_is_a_failure() {
        let rule = SkipRule::new(3, None, TransformOp::None);
        let result = hash_with_rule(&mut Cursor::new(b"abc".to_vec()), &rule);
        assert!(matches!(result, Err(TransformError::EmptyOutput)));
    }
}
