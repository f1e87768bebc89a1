//! XXH3 partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;
use xxhash_rust::xxh3::xxh3_64;

/// Low 32 bits of XXH3-64 over the key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        Token(xxh3_64(key) as u32)
    }

    fn ring_size(&self) -> u64 {
        1 << 32
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
