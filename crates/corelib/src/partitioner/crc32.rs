//! CRC-32 partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

/// Number of positions on a CRC-32 ring.
pub const CRC32_RING_SIZE: u64 = 1 << 31;

/// CRC-32 (IEEE polynomial) of the key, reduced modulo 2^31.
///
/// This is the default partitioner.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Partitioner;

impl Partitioner for Crc32Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        Token((u64::from(crc32fast::hash(key)) % CRC32_RING_SIZE) as u32)
    }

    fn ring_size(&self) -> u64 {
        CRC32_RING_SIZE
    }

    fn name(&self) -> &'static str {
        "Crc32Partitioner"
    }
}
