//! Stub coding engines shared by the integration tests

#![allow(dead_code)]

use std::sync::Mutex;

use ecblocks::{CodecError, CodingEngine, Matrix, Result};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine that never produces output
pub struct DecliningEngine {
    pub empty_buffer: bool,
}

impl DecliningEngine {
    fn declined(&self) -> Option<Vec<u8>> {
        if self.empty_buffer {
            Some(Vec::new())
        } else {
            None
        }
    }
}

impl CodingEngine for DecliningEngine {
    fn encode(&self, _: &Matrix, _: &[u8], _: usize, _: usize) -> Result<Option<Vec<u8>>> {
        Ok(self.declined())
    }

    fn decode(
        &self,
        _: &Matrix,
        _: &[u8],
        _: &[usize],
        _: usize,
        _: usize,
        _: bool,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self.declined())
    }
}

/// Engine that returns a buffer `short_by` bytes shorter than it should
pub struct TruncatingEngine {
    pub short_by: usize,
}

impl CodingEngine for TruncatingEngine {
    fn encode(
        &self,
        matrix: &Matrix,
        _: &[u8],
        size: usize,
        _: usize,
    ) -> Result<Option<Vec<u8>>> {
        Ok(Some(vec![0xAA; matrix.total_blocks() * size - self.short_by]))
    }

    fn decode(
        &self,
        matrix: &Matrix,
        _: &[u8],
        _: &[usize],
        size: usize,
        _: usize,
        data_only: bool,
    ) -> Result<Option<Vec<u8>>> {
        let count = if data_only { matrix.k() } else { matrix.total_blocks() };
        Ok(Some(vec![0xAA; count * size - self.short_by]))
    }
}

/// Arguments seen by a [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub data: Vec<u8>,
    pub erasures: Option<Vec<usize>>,
    pub size: usize,
    pub packet_size: usize,
    pub data_only: bool,
}

/// Engine that records its arguments and answers with correctly shaped buffers
///
/// Coding blocks are filled with `0xC0 + index`; decode echoes the input.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<Call>>,
}

impl RecordingEngine {
    pub fn last_call(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().expect("no engine call")
    }
}

impl CodingEngine for RecordingEngine {
    fn encode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        size: usize,
        packet_size: usize,
    ) -> Result<Option<Vec<u8>>> {
        self.calls.lock().unwrap().push(Call {
            data: data.to_vec(),
            erasures: None,
            size,
            packet_size,
            data_only: false,
        });
        let mut out = data.to_vec();
        for index in 0..matrix.m() {
            out.extend(std::iter::repeat(0xC0 + index as u8).take(size));
        }
        Ok(Some(out))
    }

    fn decode(
        &self,
        matrix: &Matrix,
        data: &[u8],
        erasures: &[usize],
        size: usize,
        packet_size: usize,
        data_only: bool,
    ) -> Result<Option<Vec<u8>>> {
        if erasures.iter().any(|&index| index >= matrix.total_blocks()) {
            return Err(CodecError::InvalidArgument("erasure out of range".into()));
        }
        self.calls.lock().unwrap().push(Call {
            data: data.to_vec(),
            erasures: Some(erasures.to_vec()),
            size,
            packet_size,
            data_only,
        });
        let keep = if data_only { matrix.k() * size } else { data.len() };
        Ok(Some(data[..keep].to_vec()))
    }
}
