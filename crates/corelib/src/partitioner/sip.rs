//! SipHash partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Low 32 bits of SipHash-1-3 over the key, with fixed zero keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner;

impl Partitioner for SipPartitioner {
    fn partition(&self, key: &[u8]) -> Token {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        Token(hasher.finish() as u32)
    }

    fn ring_size(&self) -> u64 {
        1 << 32
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
