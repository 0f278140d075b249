//! DAI format codes and format resolution.
//!
//! [`DaiFormat`] packs the electrical configuration of a digital audio
//! interface into one code: serial protocol, clock gating, signal inversion,
//! and which side of the link provides the bit and frame clocks.
//! [`parse_dai_format`] derives the code for one dai-link from its tree
//! annotations, reverting to legacy single-node parsing on the codec when no
//! link-level master annotation exists.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::tree::TreeSource;

/// Bit-packed DAI format code.
///
/// Layout:
///
/// | bits | field              | meaning                                     |
/// |------|--------------------|---------------------------------------------|
/// | 0-3  | protocol           | [`DaiFormat::I2S`] through [`DaiFormat::PDM`] |
/// | 4    | clock gating       | set = bit clock is continuous, clear = gated |
/// | 8    | bitclock inversion | set = inverted                               |
/// | 9    | frame inversion    | set = inverted                               |
/// | 12   | bit clock role     | set = codec provides the bit clock           |
/// | 13   | frame clock role   | set = codec provides the frame sync          |
///
/// Bits 12-13 form the clock-role component ([`DaiFormat::ROLE_MASK`]); the
/// rest is the format component. A role pair is one of the four combinations
/// of the two role bits, so exactly one pair is in effect at any time, with
/// both bits clear meaning the codec consumes both clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaiFormat(u32);

impl DaiFormat {
    /// I2S protocol.
    pub const I2S: DaiFormat = DaiFormat(1);
    /// Right-justified protocol.
    pub const RIGHT_J: DaiFormat = DaiFormat(2);
    /// Left-justified protocol.
    pub const LEFT_J: DaiFormat = DaiFormat(3);
    /// DSP mode A protocol.
    pub const DSP_A: DaiFormat = DaiFormat(4);
    /// DSP mode B protocol.
    pub const DSP_B: DaiFormat = DaiFormat(5);
    /// AC97 protocol.
    pub const AC97: DaiFormat = DaiFormat(6);
    /// PDM protocol.
    pub const PDM: DaiFormat = DaiFormat(7);

    /// Bit clock keeps running while no audio is streaming.
    pub const CONTINUOUS_CLOCK: DaiFormat = DaiFormat(1 << 4);
    /// Bit clock polarity is inverted.
    pub const BITCLOCK_INVERTED: DaiFormat = DaiFormat(1 << 8);
    /// Frame sync polarity is inverted.
    pub const FRAME_INVERTED: DaiFormat = DaiFormat(1 << 9);
    /// The codec side provides the bit clock.
    pub const CODEC_BITCLOCK_PROVIDER: DaiFormat = DaiFormat(1 << 12);
    /// The codec side provides the frame sync.
    pub const CODEC_FRAME_PROVIDER: DaiFormat = DaiFormat(1 << 13);

    /// Mask covering the protocol field.
    pub const PROTOCOL_MASK: u32 = 0x0000_000f;
    /// Mask covering both clock-role bits.
    pub const ROLE_MASK: u32 = 0x0000_3000;

    /// An all-clear format code.
    pub const fn empty() -> Self {
        DaiFormat(0)
    }

    /// Raw bit value of this code.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a code from a raw bit value.
    pub const fn from_bits(bits: u32) -> Self {
        DaiFormat(bits)
    }

    /// True if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The protocol field, isolated from the rest of the code.
    pub const fn protocol(self) -> DaiFormat {
        DaiFormat(self.0 & Self::PROTOCOL_MASK)
    }

    /// This code with the clock-role component cleared, leaving the codec as
    /// consumer of both clocks.
    pub const fn without_roles(self) -> DaiFormat {
        DaiFormat(self.0 & !Self::ROLE_MASK)
    }

    /// True if the codec side provides the bit clock.
    pub const fn codec_provides_bitclock(self) -> bool {
        self.0 & Self::CODEC_BITCLOCK_PROVIDER.0 != 0
    }

    /// True if the codec side provides the frame sync.
    pub const fn codec_provides_frame(self) -> bool {
        self.0 & Self::CODEC_FRAME_PROVIDER.0 != 0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: DaiFormat) -> bool {
        self.0 & other.0 == other.0
    }

    /// Name of the protocol field, when it holds a known protocol.
    pub const fn protocol_name(self) -> Option<&'static str> {
        match self.0 & Self::PROTOCOL_MASK {
            1 => Some("i2s"),
            2 => Some("right_j"),
            3 => Some("left_j"),
            4 => Some("dsp_a"),
            5 => Some("dsp_b"),
            6 => Some("ac97"),
            7 => Some("pdm"),
            _ => None,
        }
    }
}

impl BitOr for DaiFormat {
    type Output = DaiFormat;

    fn bitor(self, rhs: DaiFormat) -> DaiFormat {
        DaiFormat(self.0 | rhs.0)
    }
}

impl BitOrAssign for DaiFormat {
    fn bitor_assign(&mut self, rhs: DaiFormat) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DaiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.protocol_name() {
            Some(name) => write!(f, "{name}")?,
            None => write!(f, "none")?,
        }
        if self.contains(Self::CONTINUOUS_CLOCK) {
            write!(f, "|cont")?;
        }
        if self.contains(Self::BITCLOCK_INVERTED) {
            write!(f, "|ib")?;
        }
        if self.contains(Self::FRAME_INVERTED) {
            write!(f, "|if")?;
        }
        match (self.codec_provides_bitclock(), self.codec_provides_frame()) {
            (true, true) => write!(f, "|cbp-cfp"),
            (true, false) => write!(f, "|cbp-cfc"),
            (false, true) => write!(f, "|cbc-cfp"),
            (false, false) => write!(f, "|cbc-cfc"),
        }
    }
}

/// Error returned when a protocol name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown DAI protocol '{0}'")]
pub struct UnknownProtocol(pub String);

impl FromStr for DaiFormat {
    type Err = UnknownProtocol;

    /// Parse a protocol name (`i2s`, `dsp_a`, ...) into its protocol code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "i2s" => Ok(Self::I2S),
            "right_j" => Ok(Self::RIGHT_J),
            "left_j" => Ok(Self::LEFT_J),
            "dsp_a" => Ok(Self::DSP_A),
            "dsp_b" => Ok(Self::DSP_B),
            "ac97" => Ok(Self::AC97),
            "pdm" => Ok(Self::PDM),
            other => Err(UnknownProtocol(other.to_string())),
        }
    }
}

/// Derive the DAI format code for one dai-link.
///
/// Parses the format and master annotations on `node` with `prefix`-scoped
/// property lookup, clears any clock-role bits carried by the raw value, and
/// derives the role pair by comparing `codec` against the parsed master
/// references. When a non-empty prefix was given but neither master reference
/// resolved, the link carries a legacy single-node description instead: the
/// codec node is re-parsed with no prefix, its own clock-role bits are
/// discarded, and the rest is merged with the role-cleared link-level value.
///
/// Never fails: parse failures inside the provider degrade to an empty
/// annotation set per the [`TreeSource::format_annotations`] contract. The
/// master node handles are transient and dropped before returning.
pub fn parse_dai_format<T: TreeSource>(
    tree: &T,
    node: &T::Node,
    codec: &T::Node,
    prefix: &str,
) -> DaiFormat {
    let ann = tree.format_annotations(node, prefix);
    let mut fmt = ann.format.without_roles();

    if !prefix.is_empty() && ann.bitclock_master.is_none() && ann.frame_master.is_none() {
        debug!(?node, ?codec, "no master annotation, reverting to legacy format parsing");
        let codec_fmt = tree.format_annotations(codec, "").format;
        fmt = codec_fmt.without_roles() | fmt;
    } else {
        if ann.bitclock_master.as_ref() == Some(codec) {
            fmt |= DaiFormat::CODEC_BITCLOCK_PROVIDER;
        }
        if ann.frame_master.as_ref() == Some(codec) {
            fmt |= DaiFormat::CODEC_FRAME_PROVIDER;
        }
    }

    fmt
}
