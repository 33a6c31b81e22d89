//! Compact Target Encoding
//!
//! The 32-bit "nBits" form of a 256-bit difficulty target: an 8-bit byte
//! length (exponent) followed by a 24-bit mantissa whose top bit is a sign
//! flag.
//!
//! **IMPORTANT**: a target is a CEILING. A HIGHER target is EASIER, a LOWER
//! target is HARDER.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::U256;

const MANTISSA_MASK: u32 = 0x007f_ffff;
const SIGN_BIT: u32 = 0x0080_0000;

/// A target in its persisted compact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTarget(pub u32);

/// Result of decoding a compact target, with its validity flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTarget {
    pub target: U256,
    /// Mantissa is non-zero and the sign bit is set.
    pub negative: bool,
    /// The encoded value does not fit in 256 bits.
    pub overflow: bool,
}

impl DecodedTarget {
    /// A usable target: not negative, not overflowing, not zero.
    pub fn is_valid(&self) -> bool {
        !self.negative && !self.overflow && !self.target.is_zero()
    }
}

impl CompactTarget {
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Decode, reporting sign and overflow conditions.
    ///
    /// Overflowing encodings keep the low 256 bits of the shifted mantissa;
    /// the flag marks them unusable.
    pub fn decode(self) -> DecodedTarget {
        let size = self.0 >> 24;
        let mut word = self.0 & MANTISSA_MASK;

        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        let target = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            let shift = 8 * (size as usize - 3);
            if shift >= 256 {
                U256::zero()
            } else {
                U256::from(word) << shift
            }
        };

        DecodedTarget {
            target,
            negative: word != 0 && (self.0 & SIGN_BIT) != 0,
            overflow,
        }
    }

    /// Decode ignoring the sign and overflow flags.
    pub fn to_target(self) -> U256 {
        self.decode().target
    }

    /// Encode a target, truncating the mantissa to 24 bits.
    pub fn from_target(target: U256) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (target >> (8 * (size - 3))).low_u64() as u32
        };

        // The sign bit must stay clear; borrow one more exponent byte instead.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        CompactTarget(compact | ((size as u32) << 24))
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for CompactTarget {
    fn from(value: u32) -> Self {
        CompactTarget(value)
    }
}

/// Expected number of hashes needed to meet `bits`: `2^256 / (target + 1)`.
///
/// Invalid compact values contribute no work.
pub fn block_proof(bits: CompactTarget) -> U256 {
    let decoded = bits.decode();
    if !decoded.is_valid() {
        return U256::zero();
    }
    // 2^256 does not fit; (~target / (target + 1)) + 1 is the same quotient.
    let target = decoded.target;
    (!target / (target + U256::one())) + U256::one()
}
