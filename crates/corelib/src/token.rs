//! Ring positions.
//!
//! A token is the 32-bit position a partitioner assigns to a key or to a
//! virtual node name. Tokens are ordered, so a sorted list of virtual nodes
//! can be binary searched by token.

use std::fmt;

/// Position on the hash ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token(pub u32);

impl Token {
    /// Clockwise distance from `self` to `other` on a ring of `ring_size`
    /// positions.
    ///
    /// Both tokens must be below `ring_size`.
    pub fn distance_to(&self, other: &Self, ring_size: u64) -> u64 {
        let from = u64::from(self.0);
        let to = u64::from(other.0);
        if to >= from {
            to - from
        } else {
            ring_size - from + to
        }
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
