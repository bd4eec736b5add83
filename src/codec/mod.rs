//! Encode and decode orchestration
//!
//! Two calling conventions are offered for each direction:
//!
//! - `*_from_bytes`: the caller hands over one flat buffer that is already
//!   padded to a uniform, aligned block size. It goes straight to the engine.
//! - `*_from_blocks`: the caller hands over a list of blocks of any length.
//!   The block size is derived from the longest block, every block is
//!   zero-padded to it, and the engine output is sliced back into blocks.
//!
//! When the engine declines (returns nothing) the result is empty rather than
//! an error. A non-empty engine result of the wrong length is reported as
//! [`CodecError::ContractViolation`].

pub mod config;

pub use config::CodecConfig;

use log::{debug, error};

use crate::alignment;
use crate::blocks::{assemble, max_block_len, split};
use crate::engine::CodingEngine;
use crate::error::{CodecError, Result};
use crate::matrix::Matrix;

/// Encode `k` padded data blocks held in one buffer
///
/// Returns the `(k + m) * size` byte engine output, or an empty buffer if
/// the engine declined.
pub fn encode_from_bytes<E: CodingEngine + ?Sized>(
    engine: &E,
    matrix: &Matrix,
    data: &[u8],
    size: usize,
    packet_size: usize,
) -> Result<Vec<u8>> {
    let Some(encoded) = accepted(engine.encode(matrix, data, size, packet_size)?) else {
        debug!(
            "encode declined (k={}, m={}, size={})",
            matrix.k(),
            matrix.m(),
            size
        );
        return Ok(Vec::new());
    };
    check_len(&encoded, matrix.total_blocks(), size)?;
    Ok(encoded)
}

/// Encode a list of data blocks of any length
///
/// Returns `k + m` blocks of the aligned size (data blocks first, the first
/// coding block at index `k`), or an empty list if the engine declined.
pub fn encode_from_blocks<E, B>(
    engine: &E,
    matrix: &Matrix,
    blocks: &[B],
    packet_size: usize,
) -> Result<Vec<Vec<u8>>>
where
    E: CodingEngine + ?Sized,
    B: AsRef<[u8]>,
{
    if blocks.is_empty() {
        return Err(CodecError::invalid("length of blocks cannot be < 1"));
    }

    let size = alignment::align_size(matrix, max_block_len(blocks), packet_size)?;
    debug!(
        "encoding {} blocks at aligned size {} (k={}, m={})",
        blocks.len(),
        size,
        matrix.k(),
        matrix.m()
    );
    let data = assemble(blocks, size)?;

    let encoded = encode_from_bytes(engine, matrix, &data, size, packet_size)?;
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    split(&encoded, matrix.total_blocks(), size)
}

/// Decode a flat buffer of `k + m` padded blocks
///
/// Erased blocks must already be zero-filled. Returns `k * size` bytes when
/// `data_only` is set, `(k + m) * size` otherwise, or an empty buffer if the
/// engine declined.
pub fn decode_from_bytes<E: CodingEngine + ?Sized>(
    engine: &E,
    matrix: &Matrix,
    data: &[u8],
    erasures: &[usize],
    size: usize,
    packet_size: usize,
    data_only: bool,
) -> Result<Vec<u8>> {
    let decoded = engine.decode(matrix, data, erasures, size, packet_size, data_only)?;
    let Some(decoded) = accepted(decoded) else {
        debug!(
            "decode declined (k={}, m={}, size={}, erasures={:?})",
            matrix.k(),
            matrix.m(),
            size,
            erasures
        );
        return Ok(Vec::new());
    };
    check_len(&decoded, output_blocks(matrix, data_only), size)?;
    Ok(decoded)
}

/// Decode a list of `k + m` blocks of any length
///
/// Erased blocks may be shorter than the rest or empty; the block size is
/// taken from the longest block supplied. Returns `k` blocks when `data_only`
/// is set, `k + m` otherwise, or an empty list if the engine declined.
pub fn decode_from_blocks<E, B>(
    engine: &E,
    matrix: &Matrix,
    blocks: &[B],
    erasures: &[usize],
    packet_size: usize,
    data_only: bool,
) -> Result<Vec<Vec<u8>>>
where
    E: CodingEngine + ?Sized,
    B: AsRef<[u8]>,
{
    if blocks.is_empty() {
        return Err(CodecError::invalid("length of blocks cannot be < 1"));
    }

    let size = alignment::align_size(matrix, max_block_len(blocks), packet_size)?;
    debug!(
        "decoding {} blocks at aligned size {} with erasures {:?}",
        blocks.len(),
        size,
        erasures
    );
    let data = assemble(blocks, size)?;

    let decoded = decode_from_bytes(
        engine,
        matrix,
        &data,
        erasures,
        size,
        packet_size,
        data_only,
    )?;
    if decoded.is_empty() {
        return Ok(Vec::new());
    }
    split(&decoded, output_blocks(matrix, data_only), size)
}

fn accepted(result: Option<Vec<u8>>) -> Option<Vec<u8>> {
    result.filter(|buffer| !buffer.is_empty())
}

fn output_blocks(matrix: &Matrix, data_only: bool) -> usize {
    if data_only {
        matrix.k()
    } else {
        matrix.total_blocks()
    }
}

fn check_len(buffer: &[u8], count: usize, size: usize) -> Result<()> {
    let expected = count.checked_mul(size);
    if expected == Some(buffer.len()) {
        return Ok(());
    }
    error!(
        "coding engine returned {} bytes, expected {} blocks of {} bytes",
        buffer.len(),
        count,
        size
    );
    Err(CodecError::ContractViolation {
        expected: expected.unwrap_or(usize::MAX),
        actual: buffer.len(),
    })
}

/// A matrix and engine pair reused across many calls
///
/// Holds no mutable state; share it across threads when the engine is `Sync`.
#[derive(Debug, Clone)]
pub struct ErasureCodec<E> {
    engine: E,
    matrix: Matrix,
    config: CodecConfig,
}

impl<E: CodingEngine> ErasureCodec<E> {
    pub fn new(engine: E, matrix: Matrix) -> Self {
        Self {
            engine,
            matrix,
            config: CodecConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Aligned block size for `size` bytes under this codec's matrix and packet size
    pub fn align_size(&self, size: usize) -> Result<usize> {
        alignment::align_size(&self.matrix, size, self.config.packet_size)
    }

    pub fn encode_bytes(&self, data: &[u8], size: usize) -> Result<Vec<u8>> {
        encode_from_bytes(
            &self.engine,
            &self.matrix,
            data,
            size,
            self.config.packet_size,
        )
    }

    pub fn encode_blocks<B: AsRef<[u8]>>(&self, blocks: &[B]) -> Result<Vec<Vec<u8>>> {
        encode_from_blocks(&self.engine, &self.matrix, blocks, self.config.packet_size)
    }

    pub fn decode_bytes(&self, data: &[u8], erasures: &[usize], size: usize) -> Result<Vec<u8>> {
        decode_from_bytes(
            &self.engine,
            &self.matrix,
            data,
            erasures,
            size,
            self.config.packet_size,
            self.config.data_only,
        )
    }

    pub fn decode_blocks<B: AsRef<[u8]>>(
        &self,
        blocks: &[B],
        erasures: &[usize],
    ) -> Result<Vec<Vec<u8>>> {
        decode_from_blocks(
            &self.engine,
            &self.matrix,
            blocks,
            erasures,
            self.config.packet_size,
            self.config.data_only,
        )
    }
}
