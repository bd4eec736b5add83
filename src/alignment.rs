//! Block size alignment
//!
//! Every block handed to a coding engine must be a multiple of the matrix's
//! alignment width. Bit-matrices work on `w` packets of `packet_size` bytes
//! at a time; word matrices use a fixed 16-byte width regardless of `w`.

use crate::error::{CodecError, Result};
use crate::matrix::Matrix;

/// Alignment width for non-bitmatrix codes
pub const STANDARD_ALIGNMENT: usize = 16;

/// Block-size granularity required by `matrix` with the given packet size
///
/// `packet_size` is ignored for standard matrices.
pub fn alignment_width(matrix: &Matrix, packet_size: usize) -> Result<usize> {
    if !matrix.is_bitmatrix() {
        return Ok(STANDARD_ALIGNMENT);
    }
    if packet_size == 0 {
        return Err(CodecError::invalid("packet size must be > 0 for a bitmatrix"));
    }
    matrix.w().checked_mul(packet_size).ok_or_else(|| {
        CodecError::InvalidArgument(format!(
            "alignment width overflows: w={} * packet_size={}",
            matrix.w(),
            packet_size
        ))
    })
}

/// Smallest multiple of the alignment width that is `>= size`
///
/// Already aligned sizes are returned unchanged.
pub fn align_size(matrix: &Matrix, size: usize, packet_size: usize) -> Result<usize> {
    let width = alignment_width(matrix, packet_size)?;
    if size % width == 0 {
        return Ok(size);
    }
    size.div_ceil(width).checked_mul(width).ok_or_else(|| {
        CodecError::InvalidArgument(format!("size {size} cannot be aligned to {width}"))
    })
}
