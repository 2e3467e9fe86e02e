//! Header-skip byte transforms and the streaming hash collaborator.
//!
//! A [`rule::SkipRule`] describes how to strip or reorder a vendor-specific
//! header region before a file is hashed: an offset range plus one of the
//! byte-window operations. [`transform`] applies rules to streams,
//! [`hasher`] computes the CRC32/MD5/SHA1 triple over raw or normalized
//! bytes.

pub mod error;
pub mod hasher;
pub mod rule;
pub mod transform;

pub use error::TransformError;
pub use hasher::{hash_bytes, hash_stream, hash_with_rule, FileHashes};
pub use rule::{SkipRule, TransformOp};
pub use transform::{transform, transform_file, transform_stream};
