//! GF(2^8) Reed-Solomon engine backed by `reed-solomon-erasure`
//!
//! Only word-oriented matrices with `w == 8` are supported, and at most 256
//! blocks in total. The code is systematic, so encoding copies the data
//! blocks through unchanged and appends `m` parity blocks.

use std::sync::{Arc, RwLock};

use log::debug;
use reed_solomon_erasure::galois_8::ReedSolomon;
use reed_solomon_erasure::Error as RsError;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::CodingEngine;
use crate::error::{CodecError, Result};
use crate::matrix::{Matrix, MatrixKind};

/// Maximum `k + m` for GF(2^8)
pub const MAX_TOTAL_BLOCKS: usize = 256;

type Shards = SmallVec<[Option<Vec<u8>>; 16]>;

/// Reed-Solomon coding engine with a per-shape codec cache
#[derive(Default)]
pub struct ReedSolomonEngine {
    codecs: RwLock<FxHashMap<(usize, usize), Arc<ReedSolomon>>>,
}

impl ReedSolomonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `matrix` describes a shape this engine can code
    pub fn supports(matrix: &Matrix) -> bool {
        Self::check_matrix(matrix).is_ok()
    }

    fn check_matrix(matrix: &Matrix) -> Result<()> {
        let unsupported = |reason| CodecError::UnsupportedMatrix {
            k: matrix.k(),
            m: matrix.m(),
            w: matrix.w(),
            bitmatrix: matrix.is_bitmatrix(),
            reason,
        };
        if matrix.kind() != MatrixKind::Standard {
            return Err(unsupported("bitmatrix coding is not supported"));
        }
        if matrix.w() != 8 {
            return Err(unsupported("only w=8 is supported"));
        }
        if matrix.total_blocks() > MAX_TOTAL_BLOCKS {
            return Err(unsupported("k + m exceeds 256"));
        }
        Ok(())
    }

    fn codec(&self, matrix: &Matrix) -> Result<Arc<ReedSolomon>> {
        Self::check_matrix(matrix)?;
        let key = (matrix.k(), matrix.m());

        if let Ok(cache) = self.codecs.read() {
            if let Some(codec) = cache.get(&key) {
                return Ok(Arc::clone(codec));
            }
        }

        let codec = Arc::new(ReedSolomon::new(matrix.k(), matrix.m()).map_err(engine_error)?);
        // Skip caching if the lock is poisoned
        if let Ok(mut cache) = self.codecs.write() {
            cache.entry(key).or_insert_with(|| Arc::clone(&codec));
        }
        Ok(codec)
    }
}

impl std::fmt::Debug for ReedSolomonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.codecs.read().map(|cache| cache.len()).unwrap_or(0);
        f.debug_struct("ReedSolomonEngine")
            .field("cached_codecs", &cached)
            .finish()
    }
}

impl CodingEngine for ReedSolomonEngine {
    fn encode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        size: usize,
        _packet_size: usize,
    ) -> Result<Option<Vec<u8>>> {
        let codec = self.codec(matrix)?;
        expect_len(data, matrix.k(), size)?;
        if size == 0 {
            debug!("encode declined: zero block size");
            return Ok(None);
        }

        let mut shards: SmallVec<[Vec<u8>; 16]> =
            data.chunks_exact(size).map(<[u8]>::to_vec).collect();
        shards.extend((0..matrix.m()).map(|_| vec![0u8; size]));

        match codec.encode(&mut shards[..]) {
            Ok(()) => Ok(Some(shards.concat())),
            Err(err) => declined_or_failed("encode", err),
        }
    }

    fn decode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        erasures: &[usize],
        size: usize,
        _packet_size: usize,
        data_only: bool,
    ) -> Result<Option<Vec<u8>>> {
        let codec = self.codec(matrix)?;
        let total = matrix.total_blocks();
        expect_len(data, total, size)?;

        let mut erased = FxHashSet::default();
        for &index in erasures {
            if index >= total {
                return Err(CodecError::InvalidArgument(format!(
                    "erasure index {index} out of range for {total} blocks"
                )));
            }
            erased.insert(index);
        }
        if size == 0 {
            debug!("decode declined: zero block size");
            return Ok(None);
        }

        // Erased slots are dropped, whatever bytes the caller left in them
        let mut shards: Shards = data
            .chunks_exact(size)
            .enumerate()
            .map(|(index, block)| (!erased.contains(&index)).then(|| block.to_vec()))
            .collect();

        let outcome = if data_only {
            codec.reconstruct_data(&mut shards[..])
        } else {
            codec.reconstruct(&mut shards[..])
        };
        if let Err(err) = outcome {
            return declined_or_failed("decode", err);
        }

        let count = if data_only { matrix.k() } else { total };
        let mut decoded = Vec::with_capacity(count * size);
        for (index, shard) in shards.iter().take(count).enumerate() {
            match shard {
                Some(block) => decoded.extend_from_slice(block),
                None => {
                    return Err(CodecError::Engine(format!(
                        "block {index} was not reconstructed"
                    )))
                }
            }
        }
        Ok(Some(decoded))
    }
}

fn expect_len(data: &[u8], count: usize, size: usize) -> Result<()> {
    match count.checked_mul(size) {
        Some(expected) if expected == data.len() => Ok(()),
        _ => Err(CodecError::InvalidArgument(format!(
            "buffer is {} bytes, expected {} blocks of {} bytes",
            data.len(),
            count,
            size
        ))),
    }
}

fn declined_or_failed(op: &str, err: RsError) -> Result<Option<Vec<u8>>> {
    match err {
        RsError::TooFewShardsPresent | RsError::EmptyShard => {
            debug!("{op} declined: {err}");
            Ok(None)
        }
        other => Err(engine_error(other)),
    }
}

fn engine_error(err: RsError) -> CodecError {
    CodecError::Engine(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        Matrix::standard(3, 2, 8).unwrap()
    }

    #[test]
    fn test_encode_is_systematic() {
        let engine = ReedSolomonEngine::new();
        let data: Vec<u8> = (0..48).collect();
        let encoded = engine.encode(&matrix(), &data, 16, 0).unwrap().unwrap();
        assert_eq!(encoded.len(), 5 * 16);
        assert_eq!(&encoded[..48], &data[..]);
    }

    #[test]
    fn test_decode_recovers_two_erasures() {
        let engine = ReedSolomonEngine::new();
        let data: Vec<u8> = (0..48).map(|i| (i * 7) as u8).collect();
        let encoded = engine.encode(&matrix(), &data, 16, 0).unwrap().unwrap();

        let mut damaged = encoded.clone();
        damaged[0..16].fill(0);
        damaged[64..80].fill(0);
        let decoded = engine
            .decode(&matrix(), &damaged, &[0, 4], 16, 0, false)
            .unwrap()
            .unwrap();
        assert_eq!(decoded, encoded);
    }

    #[test]
    fn test_decode_too_many_erasures_declines() {
        let engine = ReedSolomonEngine::new();
        let data = vec![1u8; 48];
        let encoded = engine.encode(&matrix(), &data, 16, 0).unwrap().unwrap();
        let decoded = engine
            .decode(&matrix(), &encoded, &[0, 1, 2], 16, 0, true)
            .unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_decode_rejects_out_of_range_erasure() {
        let engine = ReedSolomonEngine::new();
        let buffer = vec![0u8; 80];
        assert!(matches!(
            engine.decode(&matrix(), &buffer, &[5], 16, 0, false),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(!ReedSolomonEngine::supports(&Matrix::standard(3, 2, 16).unwrap()));
        assert!(!ReedSolomonEngine::supports(&Matrix::bitmatrix(3, 2, 8).unwrap()));
        assert!(!ReedSolomonEngine::supports(&Matrix::standard(250, 10, 8).unwrap()));
        assert!(ReedSolomonEngine::supports(&matrix()));
    }

    #[test]
    fn test_codec_cache_reused() {
        let engine = ReedSolomonEngine::new();
        let a = engine.codec(&matrix()).unwrap();
        let b = engine.codec(&matrix()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
