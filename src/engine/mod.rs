//! Coding engine capability
//!
//! The Galois-field work is delegated to an engine implementing
//! [`CodingEngine`]. Engines see only aligned, zero-padded flat buffers; all
//! padding and slicing happens in [`crate::blocks`] and [`crate::codec`].
//!
//! An engine signals "no answer" (too many erasures, unsolvable submatrix,
//! ...) with `Ok(None)` or an empty buffer. `Err` is reserved for usage
//! errors and genuine failures.

pub mod reed_solomon;

pub use reed_solomon::ReedSolomonEngine;

use std::sync::Arc;

use crate::error::Result;
use crate::matrix::Matrix;

/// Encode/decode primitive over flat, aligned buffers
pub trait CodingEngine {
    /// Compute coding blocks for `k` data blocks of `size` bytes.
    ///
    /// Returns the data followed by the `m` coding blocks, `(k + m) * size` bytes.
    fn encode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        size: usize,
        packet_size: usize,
    ) -> Result<Option<Vec<u8>>>;

    /// Reconstruct erased blocks from a `(k + m) * size` byte buffer.
    ///
    /// Erased positions are expected to be zero-filled. Returns `k * size`
    /// bytes when `data_only` is set, `(k + m) * size` otherwise.
    fn decode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        erasures: &[usize],
        size: usize,
        packet_size: usize,
        data_only: bool,
    ) -> Result<Option<Vec<u8>>>;
}

macro_rules! forward_engine {
    ($($ty:ty),*) => {$(
        impl<E: CodingEngine + ?Sized> CodingEngine for $ty {
            #[inline]
            fn encode(
                &self,
                matrix: &Matrix,
                data: &[u8],
                size: usize,
                packet_size: usize,
            ) -> Result<Option<Vec<u8>>> {
                (**self).encode(matrix, data, size, packet_size)
            }

            #[inline]
            fn decode(
                &self,
                matrix: &Matrix,
                data: &[u8],
                erasures: &[usize],
                size: usize,
                packet_size: usize,
                data_only: bool,
            ) -> Result<Option<Vec<u8>>> {
                (**self).decode(matrix, data, erasures, size, packet_size, data_only)
            }
        }
    )*};
}

forward_engine!(&E, Box<E>, Arc<E>);
