//! Render engine tunables.
//!
//! A single struct with a `Default` carrying the production constants,
//! constructed once and handed to the controller at creation. There is no
//! NVS-backed persistence path here — the edge layout and cadence are fixed
//! for the life of the controller.

use serde::{Deserialize, Serialize};

/// Maximum number of edges a single controller can address.
pub const MAX_EDGES: usize = 8;
/// Maximum LED count on any one edge.
pub const MAX_LEDS_PER_EDGE: usize = 256;
/// Maximum concurrently registered patterns.
pub const MAX_PATTERNS: usize = 16;
/// Maximum colors in a SHIFT pattern's color list or a PALETTE_CYCLE palette.
pub const MAX_PALETTE_COLORS: usize = 32;

/// Render/output task cadence and the public API's speed clamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render task period, milliseconds. The render loop composes one frame
    /// and swaps the frame buffer every tick.
    pub render_period_ms: u32,
    /// How long the output task waits for a frame-ready notification before
    /// looping idle again.
    pub output_timeout_ms: u32,
    /// Floor applied to `speed_ms` in [`crate::controller::LedController::set_edge_pattern`].
    /// Callers asking for faster-than-this are clamped up to it.
    pub min_helper_speed_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_period_ms: 50,
            output_timeout_ms: 100,
            min_helper_speed_ms: 1000,
        }
    }
}
