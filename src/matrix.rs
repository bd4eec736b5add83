//! Coding matrix descriptor
//!
//! A [`Matrix`] only describes the shape of a code: how many data and coding
//! blocks there are, the word size, and whether the engine works on whole
//! words or on bit-packed packets. The coefficients themselves live inside
//! the coding engine.

use crate::error::{CodecError, Result};

/// Whether a matrix codes whole words or bit-packed packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixKind {
    /// Word-oriented matrix; blocks align to a fixed 16-byte width
    #[default]
    Standard,
    /// Bit-matrix; blocks align to `w * packet_size` and every call needs a packet size
    Bitmatrix,
}

/// Immutable description of a `k + m` erasure code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    k: usize,
    m: usize,
    w: usize,
    kind: MatrixKind,
}

impl Matrix {
    /// Create a matrix descriptor, rejecting zero block counts or word size
    pub fn new(k: usize, m: usize, w: usize, kind: MatrixKind) -> Result<Self> {
        if k == 0 {
            return Err(CodecError::invalid("k must be >= 1"));
        }
        if m == 0 {
            return Err(CodecError::invalid("m must be >= 1"));
        }
        if w == 0 {
            return Err(CodecError::invalid("w must be >= 1"));
        }
        Ok(Self { k, m, w, kind })
    }

    pub fn standard(k: usize, m: usize, w: usize) -> Result<Self> {
        Self::new(k, m, w, MatrixKind::Standard)
    }

    pub fn bitmatrix(k: usize, m: usize, w: usize) -> Result<Self> {
        Self::new(k, m, w, MatrixKind::Bitmatrix)
    }

    /// Number of data blocks
    #[inline]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Number of coding blocks
    #[inline]
    pub const fn m(&self) -> usize {
        self.m
    }

    /// Word size used by the field arithmetic
    #[inline]
    pub const fn w(&self) -> usize {
        self.w
    }

    #[inline]
    pub const fn kind(&self) -> MatrixKind {
        self.kind
    }

    #[inline]
    pub const fn is_bitmatrix(&self) -> bool {
        matches!(self.kind, MatrixKind::Bitmatrix)
    }

    /// Data plus coding blocks (`k + m`)
    #[inline]
    pub const fn total_blocks(&self) -> usize {
        self.k + self.m
    }
}
