//! Render engine for an addressable RGB LED strip.
//!
//! A fixed-capacity pattern registry plus a per-tick frame composer,
//! handed off between a render task and a pixel-output task through a
//! double-buffered pixel matrix:
//!
//! ```text
//!  set_edge_pattern ──▶ Registry ──▶ render_tick ──▶ FrameBuffer ──▶ output_tick ──▶ PixelSink
//!                          ▲              │(swap + notify)              │
//!                          └── turn_off_* ─┘                    MonotonicClock
//! ```
//!
//! The physical strip driver and the platform timer are injected through
//! the [`ports`] traits; this crate never talks to hardware directly.

#![deny(unused_must_use)]

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluators;
pub mod frame_buffer;
pub mod matrix;
pub mod output_loop;
pub mod patterns;
pub mod ports;
pub mod registry;
pub mod render_loop;
pub mod rng;
