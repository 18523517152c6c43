//! Unified error types for the render engine.
//!
//! A single `Error` enum every subsystem converts into, `Copy` so it can
//! be passed through the render loop without allocation, and a crate-wide
//! `Result` alias.

use core::fmt;

/// Every fallible operation funnels into this type. Most render-path
/// operations (evaluator writes, defensive matrix access) never fail — they
/// clamp or no-op per the contracts in [`crate::matrix`] and
/// [`crate::registry`] — so this enum is small and only reached at
/// construction or control-API boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pattern registry has no free slot.
    CapacityExceeded,
    /// A caller-supplied argument is out of range (edge index, empty pixel
    /// range, zero-length palette, probability outside `[0, 1]`, ...).
    InvalidArgument,
    /// Controller construction failed to reserve its storage.
    OutOfMemory,
    /// A pattern id did not correspond to a live slot.
    InvalidHandle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "pattern registry is full"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::InvalidHandle => write!(f, "invalid pattern handle"),
        }
    }
}

/// Render-engine-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
