use crate::error::TransformError;

/// Byte-window operation applied while copying the selected range.
///
/// Variants are ordered by severity; the ordering drives the length
/// preconditions in [`SkipRule::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TransformOp {
    /// Copy bytes unchanged.
    #[default]
    None,
    /// Reverse the bit order of every byte (bit 7 swaps with bit 0).
    Bitswap,
    /// Swap adjacent byte pairs: `[A,B,C,D]` becomes `[B,A,D,C]`.
    Byteswap,
    /// Reverse each 4-byte group: `[A,B,C,D]` becomes `[D,C,B,A]`.
    Wordswap,
    /// Rotate each 4-byte group by two: `[A,B,C,D]` becomes `[C,D,A,B]`.
    WordByteswap,
}

/// A header-skip recipe: an offset range plus one transform operation.
///
/// Offsets may be negative, meaning "from the end of the stream". A missing
/// start offset makes the rule invalid; a missing end offset means end of
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipRule {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub op: TransformOp,
}

impl SkipRule {
    pub fn new(start: i64, end: Option<i64>, op: TransformOp) -> Self {
        Self {
            start: Some(start),
            end,
            op,
        }
    }

    /// Resolve one offset against the stream length. Negative values count
    /// back from the end; anything out of range is a precondition failure.
    fn resolve_offset(offset: i64, len: u64) -> Result<u64, TransformError> {
        let resolved = if offset >= 0 {
            offset as u64
        } else {
            let back = offset.unsigned_abs();
            len.checked_sub(back).ok_or_else(|| {
                TransformError::precondition(format!(
                    "offset {offset} reaches before the start of a {len}-byte stream"
                ))
            })?
        };
        if resolved > len {
            return Err(TransformError::precondition(format!(
                "offset {offset} is beyond the end of a {len}-byte stream"
            )));
        }
        Ok(resolved)
    }

    /// Check the rule against a stream length and resolve the byte range to
    /// copy. Rules that fail here are reported as not applicable; the
    /// transform is never attempted, let alone partially applied.
    pub fn validate(&self, len: u64) -> Result<(u64, u64), TransformError> {
        let start = self
            .start
            .ok_or_else(|| TransformError::invalid_rule("rule has no start offset"))?;

        if self.op >= TransformOp::Byteswap && len % 2 != 0 {
            return Err(TransformError::precondition(format!(
                "{:?} requires an even stream length, got {len}",
                self.op
            )));
        }
        if self.op >= TransformOp::Wordswap && len % 4 != 0 {
            return Err(TransformError::precondition(format!(
                "{:?} requires a stream length divisible by 4, got {len}",
                self.op
            )));
        }

        let start = Self::resolve_offset(start, len)?;
        if self.op == TransformOp::Bitswap && start % 2 != 0 {
            return Err(TransformError::precondition(format!(
                "bitswap requires an even start offset, got {start}"
            )));
        }

        let end = match self.end {
            // Clamp: processing stops at the resolved end or EOF,
            // whichever comes first
            Some(end) if end >= 0 => (end as u64).min(len),
            Some(end) => Self::resolve_offset(end, len)?,
            None => len,
        };

        if end < start {
            return Err(TransformError::precondition(format!(
                "end offset {end} precedes start offset {start}"
            )));
        }

        Ok((start, end))
    }
}
