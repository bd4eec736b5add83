//! Block buffer management for erasure coding
//!
//! Sits between caller-supplied byte blocks of arbitrary length and a coding
//! engine that only accepts uniformly sized, aligned, zero-padded buffers.
//!
//! - [`Matrix`] describes the `k + m` code shape.
//! - [`align_size`] computes the padded block size for a matrix.
//! - [`assemble`] and [`split`] convert between block lists and flat buffers.
//! - [`encode_from_blocks`] / [`decode_from_blocks`] (and the flat-buffer
//!   `*_from_bytes` variants) drive a [`CodingEngine`].
//!
//! [`ReedSolomonEngine`] is a ready-made GF(2^8) engine.

pub mod alignment;
pub mod blocks;
pub mod codec;
pub mod engine;
pub mod error;
pub mod matrix;

pub use alignment::{align_size, alignment_width, STANDARD_ALIGNMENT};
pub use blocks::{assemble, max_block_len, split};
pub use codec::{
    decode_from_blocks, decode_from_bytes, encode_from_blocks, encode_from_bytes, CodecConfig,
    ErasureCodec,
};
pub use engine::{CodingEngine, ReedSolomonEngine};
pub use error::{CodecError, Result};
pub use matrix::{Matrix, MatrixKind};
