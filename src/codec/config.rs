//! Per-call options for encode and decode

/// Options shared by every call an [`super::ErasureCodec`] makes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Packet size for bit-matrix codes (0 = unset, only valid for standard matrices)
    pub packet_size: usize,
    /// Return only the `k` data blocks from decode
    pub data_only: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            packet_size: 0,
            data_only: false,
        }
    }
}

impl CodecConfig {
    pub fn new(packet_size: usize, data_only: bool) -> Self {
        Self {
            packet_size,
            data_only,
        }
    }

    pub fn with_packet_size(mut self, packet_size: usize) -> Self {
        self.packet_size = packet_size;
        self
    }

    pub fn with_data_only(mut self, data_only: bool) -> Self {
        self.data_only = data_only;
        self
    }
}
