//! Pattern descriptor types: the tagged sum type standing in for the
//! source implementation's untyped payload-per-descriptor. Each
//! [`PatternType`] has exactly one matching [`PatternParams`] variant;
//! [`crate::evaluators`] matches on it instead of switching on a type tag
//! and casting a `void*`.

use heapless::Vec;

use crate::color::Color;
use crate::config::MAX_PALETTE_COLORS;
use crate::error::{Error, Result};

/// Which evaluator a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    Static,
    Blink,
    Fade,
    Pulse,
    Shift,
    Gradient,
    Twinkle,
    PaletteCycle,
}

/// Per-type parameter payload. The variant always matches the owning
/// descriptor's [`PatternType`] — constructed together in
/// [`crate::registry::Registry::create`] and never out of sync.
#[derive(Debug, Clone)]
pub enum PatternParams {
    Static {
        color: Color,
    },
    Blink {
        on_color: Color,
        on_time_ms: u32,
        off_time_ms: u32,
        /// `0` means unbounded; `>0` retires the pattern after
        /// `(on_time_ms + off_time_ms) * repeat_count` ms.
        repeat_count: u32,
    },
    Fade {
        start_color: Color,
        end_color: Color,
    },
    Pulse {
        base_color: Color,
        peak_intensity: u8,
        period_ms: u32,
    },
    Shift {
        colors: Vec<Color, MAX_PALETTE_COLORS>,
        period_ms: u32,
        offset: u32,
    },
    Gradient {
        start_color: Color,
        end_color: Color,
    },
    Twinkle {
        color: Color,
        probability: f32,
    },
    PaletteCycle {
        palette: Vec<Color, MAX_PALETTE_COLORS>,
        cycle_period_ms: u32,
        offset: u32,
    },
}

impl PatternParams {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            Self::Static { .. } => PatternType::Static,
            Self::Blink { .. } => PatternType::Blink,
            Self::Fade { .. } => PatternType::Fade,
            Self::Pulse { .. } => PatternType::Pulse,
            Self::Shift { .. } => PatternType::Shift,
            Self::Gradient { .. } => PatternType::Gradient,
            Self::Twinkle { .. } => PatternType::Twinkle,
            Self::PaletteCycle { .. } => PatternType::PaletteCycle,
        }
    }

    /// Per-variant argument checks that don't depend on the owning
    /// descriptor's edge/range/duration (those are checked by
    /// [`crate::registry::Registry::create`] alongside this). Covers the
    /// `InvalidArgument` cases from the error taxonomy: empty SHIFT color
    /// list, empty PALETTE_CYCLE palette, TWINKLE probability outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Shift { colors, .. } if colors.is_empty() => Err(Error::InvalidArgument),
            Self::PaletteCycle { palette, .. } if palette.is_empty() => Err(Error::InvalidArgument),
            Self::Twinkle { probability, .. } if !(0.0..=1.0).contains(probability) => {
                Err(Error::InvalidArgument)
            }
            _ => Ok(()),
        }
    }
}

/// One active (or inactive-but-retained) visual effect.
#[derive(Debug, Clone)]
pub struct PatternDescriptor {
    pub edge: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub start_time_ms: u32,
    /// `0` means unbounded.
    pub duration_ms: u32,
    pub active: bool,
    pub params: PatternParams,
}

impl PatternDescriptor {
    /// Inclusive pixel range length this descriptor covers on its edge.
    pub fn range_len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }
}
