//! Conversion between block lists and flat coding buffers
//!
//! The coding engine works on one contiguous buffer holding `n` blocks of a
//! single uniform size. Callers usually hold a list of blocks of arbitrary
//! lengths. [`assemble`] right-pads each block with zeros and concatenates
//! them; [`split`] slices an engine result back into per-block buffers.

use log::{error, trace};

use crate::error::{CodecError, Result};

/// Length of the longest block, or 0 for an empty list
pub fn max_block_len<B: AsRef<[u8]>>(blocks: &[B]) -> usize {
    blocks
        .iter()
        .map(|block| block.as_ref().len())
        .max()
        .unwrap_or(0)
}

/// Zero-pad every block to `size` bytes and concatenate them in order
///
/// Blocks are never truncated: a block longer than `size` is an error.
pub fn assemble<B: AsRef<[u8]>>(blocks: &[B], size: usize) -> Result<Vec<u8>> {
    if blocks.is_empty() {
        return Err(CodecError::invalid("block list cannot be empty"));
    }

    let total = blocks.len().checked_mul(size).ok_or_else(|| {
        CodecError::InvalidArgument(format!(
            "{} blocks of {} bytes overflow the buffer size",
            blocks.len(),
            size
        ))
    })?;

    let mut buffer = Vec::with_capacity(total);
    for (index, block) in blocks.iter().enumerate() {
        let block = block.as_ref();
        if block.len() > size {
            return Err(CodecError::InvalidArgument(format!(
                "block {} is {} bytes, larger than block size {}",
                index,
                block.len(),
                size
            )));
        }
        trace!(
            "block {}: {} bytes + {} padding",
            index,
            block.len(),
            size - block.len()
        );
        buffer.extend_from_slice(block);
        buffer.resize(buffer.len() + size - block.len(), 0);
    }

    debug_assert_eq!(buffer.len(), total);
    Ok(buffer)
}

/// Slice `buffer` into exactly `count` blocks of `size` bytes
///
/// The buffer must hold exactly `count * size` bytes. Anything else means the
/// coding engine broke its contract and is reported as
/// [`CodecError::ContractViolation`].
pub fn split(buffer: &[u8], count: usize, size: usize) -> Result<Vec<Vec<u8>>> {
    let expected = count
        .checked_mul(size)
        .ok_or(CodecError::ContractViolation {
            expected: usize::MAX,
            actual: buffer.len(),
        })?;

    if buffer.len() != expected {
        error!(
            "coding buffer is {} bytes, expected {} blocks of {} bytes",
            buffer.len(),
            count,
            size
        );
        return Err(CodecError::ContractViolation {
            expected,
            actual: buffer.len(),
        });
    }

    // chunks_exact panics on a zero chunk size
    if size == 0 {
        return Ok(vec![Vec::new(); count]);
    }

    Ok(buffer.chunks_exact(size).map(<[u8]>::to_vec).collect())
}
