//! The public control API: the thin facade binding the registry, the
//! frame buffer, and the evaluators behind `controller_create`,
//! `set_edge_pattern`, and the `turn_off_*`/`clear_all` helpers.
//!
//! A struct owning the domain state, a handful of `tick`-adjacent methods
//! the task loops drive, and plain query methods for read-back — no
//! hidden global state.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use heapless::Vec;
use log::info;

use crate::color::{self, Color};
use crate::config::{RenderConfig, MAX_EDGES, MAX_LEDS_PER_EDGE};
use crate::error::{Error, Result};
use crate::evaluators::{self, blink_duration_ms};
use crate::frame_buffer::{FrameBuffer, FrameReady};
use crate::patterns::PatternParams;
use crate::ports::MonotonicClock;
use crate::registry::Registry;

/// High-level pattern kinds exposed at the control API, translated into a
/// low-level [`PatternParams`] by [`LedController::set_edge_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Off,
    Static,
    Blink,
    Breath,
    Rainbow,
    FadeIn,
    FadeOut,
    Twinkle,
}

impl PatternKind {
    /// All known kinds, for `show_all_patterns`.
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Off,
        PatternKind::Static,
        PatternKind::Blink,
        PatternKind::Breath,
        PatternKind::Rainbow,
        PatternKind::FadeIn,
        PatternKind::FadeOut,
        PatternKind::Twinkle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Static => "STATIC",
            Self::Blink => "BLINK",
            Self::Breath => "BREATH",
            Self::Rainbow => "RAINBOW",
            Self::FadeIn => "FADE_IN",
            Self::FadeOut => "FADE_OUT",
            Self::Twinkle => "TWINKLE",
        }
    }
}

/// Read-only snapshot of the high-level pattern an edge currently owns.
#[derive(Debug, Clone, Copy)]
pub struct EdgeStatus {
    pub kind: PatternKind,
    pub color: Color,
    pub speed_ms: u32,
    pub active: bool,
}

#[derive(Clone, Copy)]
struct EdgeOwner {
    pattern_id: usize,
    status: EdgeStatus,
}

/// The render engine's public facade: owns the registry, the double
/// frame buffer, and per-edge ownership bookkeeping for the high-level
/// helper API.
pub struct LedController<M: RawMutex, C: MonotonicClock> {
    registry: Mutex<M, Registry>,
    frame_buffer: FrameBuffer<M>,
    frame_ready: FrameReady<M>,
    edge_owners: Mutex<M, [Option<EdgeOwner>; MAX_EDGES]>,
    leds_per_edge: Vec<u16, MAX_EDGES>,
    config: RenderConfig,
    clock: C,
}

impl<M: RawMutex, C: MonotonicClock> LedController<M, C> {
    /// Build a controller for `leds_per_edge.len()` edges. Fails with
    /// [`Error::InvalidArgument`] if the edge count or any edge's LED
    /// count exceeds the fixed capacity constants.
    pub fn create(leds_per_edge: &[u16], config: RenderConfig, clock: C) -> Result<Self> {
        if leds_per_edge.is_empty() || leds_per_edge.len() > MAX_EDGES {
            return Err(Error::InvalidArgument);
        }
        if leds_per_edge.iter().any(|&n| n == 0 || usize::from(n) > MAX_LEDS_PER_EDGE) {
            return Err(Error::InvalidArgument);
        }
        let mut edges = Vec::new();
        for &n in leds_per_edge {
            edges.push(n).map_err(|_| Error::OutOfMemory)?;
        }
        info!(
            "controller: created for {} edges, {} total LEDs",
            edges.len(),
            edges.iter().map(|&n| u32::from(n)).sum::<u32>()
        );
        Ok(Self {
            registry: Mutex::new(Registry::new()),
            frame_buffer: FrameBuffer::new(&edges),
            frame_ready: FrameReady::new(),
            edge_owners: Mutex::new([None; MAX_EDGES]),
            leds_per_edge: edges,
            config,
            clock,
        })
    }

    pub fn num_edges(&self) -> usize {
        self.leds_per_edge.len()
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// The injected clock, e.g. so host tests driving a [`crate::ports::ManualClock`]
    /// can advance it between render ticks without the controller exposing
    /// any other internal state.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Public control API ────────────────────────────────────────

    /// Replace whatever pattern `edge` owns with a new one derived from
    /// `kind`. `speed_ms` is floored to `config.min_helper_speed_ms`.
    pub async fn set_edge_pattern(
        &self,
        edge: usize,
        kind: PatternKind,
        color: Color,
        speed_ms: u32,
    ) -> Result<()> {
        let edge_len = usize::from(*self.leds_per_edge.get(edge).ok_or(Error::InvalidArgument)?);
        let speed_ms = speed_ms.max(self.config.min_helper_speed_ms);

        self.remove_edge_owner(edge).await;

        let black = Color::new(0, 0, 0, 0);
        let (params, duration_ms) = match kind {
            PatternKind::Off => (PatternParams::Static { color: black }, 0),
            PatternKind::Static => (PatternParams::Static { color }, 0),
            PatternKind::Blink => {
                let half = speed_ms / 2;
                (
                    PatternParams::Blink {
                        on_color: color,
                        on_time_ms: half,
                        off_time_ms: half,
                        repeat_count: 0,
                    },
                    blink_duration_ms(half, half, 0).unwrap_or(0),
                )
            }
            PatternKind::Breath => (
                PatternParams::Pulse { base_color: color, peak_intensity: color.intensity, period_ms: speed_ms },
                0,
            ),
            PatternKind::Rainbow => {
                let palette = color::palette_rainbow(12);
                (
                    PatternParams::PaletteCycle { palette, cycle_period_ms: speed_ms, offset: 0 },
                    0,
                )
            }
            PatternKind::FadeIn => {
                (PatternParams::Fade { start_color: black, end_color: color }, speed_ms)
            }
            PatternKind::FadeOut => {
                (PatternParams::Fade { start_color: color, end_color: black }, speed_ms)
            }
            PatternKind::Twinkle => {
                (PatternParams::Twinkle { color, probability: 0.2 }, 0)
            }
        };

        let pattern_id = self.create_pattern(edge, 0, edge_len - 1, duration_ms, params).await?;
        self.start_pattern(pattern_id, self.clock.now_ms()).await;

        let status = EdgeStatus { kind, color, speed_ms, active: kind != PatternKind::Off };
        let mut owners = self.edge_owners.lock().await;
        owners[edge] = Some(EdgeOwner { pattern_id, status });
        Ok(())
    }

    // ── Low-level pattern registry API ──────────────────────────────
    //
    // `set_edge_pattern` above is the high-level helper most callers want;
    // these map directly onto §4.D's registry operations for callers that
    // need a pattern type the helper doesn't expose (SHIFT, GRADIENT, or a
    // PULSE/PALETTE_CYCLE with custom parameters) or want several patterns
    // live on the same edge at once.

    /// Register a new pattern descriptor covering `[start_index, end_index]`
    /// (inclusive) on `edge`. Returns the slot index as the pattern id.
    /// Fails with [`Error::InvalidArgument`] if `edge` or the pixel range is
    /// out of bounds for this controller's edge table, or if `params` fails
    /// its own validation (see [`PatternParams::validate`]); fails with
    /// [`Error::CapacityExceeded`] if the registry is full. The descriptor
    /// starts inactive — call [`Self::start_pattern`] to arm it.
    pub async fn create_pattern(
        &self,
        edge: usize,
        start_index: usize,
        end_index: usize,
        duration_ms: u32,
        params: PatternParams,
    ) -> Result<usize> {
        let edge_len = usize::from(*self.leds_per_edge.get(edge).ok_or(Error::InvalidArgument)?);
        if end_index >= edge_len {
            return Err(Error::InvalidArgument);
        }
        self.registry.lock().await.create(edge, start_index, end_index, duration_ms, params)
    }

    /// Arm a descriptor: set its epoch to `start_time_ms` and mark it
    /// active. No-op on an invalid id.
    pub async fn start_pattern(&self, id: usize, start_time_ms: u32) {
        self.registry.lock().await.start(id, start_time_ms);
    }

    /// Disarm a descriptor without releasing its payload. No-op on an
    /// invalid id.
    pub async fn stop_pattern(&self, id: usize) {
        self.registry.lock().await.stop(id);
    }

    /// Release a descriptor's payload and free its slot for reuse. No-op on
    /// an invalid id.
    pub async fn remove_pattern(&self, id: usize) {
        self.registry.lock().await.remove(id);
    }

    /// Remove whatever pattern `edge` owns; its pixels return to black on
    /// the following render tick.
    pub async fn turn_off_edge(&self, edge: usize) {
        self.remove_edge_owner(edge).await;
    }

    /// `turn_off_edge` for every edge.
    pub async fn turn_off_all(&self) {
        for edge in 0..self.num_edges() {
            self.remove_edge_owner(edge).await;
        }
    }

    /// Remove every pattern and blank both frame buffers immediately,
    /// rather than waiting for the next render tick to clear them.
    pub async fn clear_all(&self) {
        self.turn_off_all().await;
        self.frame_buffer.clear_both().await;
    }

    /// Snapshot of the high-level pattern `edge` currently owns, if any.
    pub async fn edge_status(&self, edge: usize) -> Option<EdgeStatus> {
        self.edge_owners.lock().await.get(edge).copied().flatten().map(|o| o.status)
    }

    /// The known high-level pattern kinds and their API names.
    pub fn show_all_patterns() -> [(&'static str, PatternKind); 8] {
        let mut out = [("", PatternKind::Off); 8];
        for (slot, kind) in out.iter_mut().zip(PatternKind::ALL) {
            *slot = (kind.name(), kind);
        }
        out
    }

    async fn remove_edge_owner(&self, edge: usize) {
        let prior = {
            let mut owners = self.edge_owners.lock().await;
            owners.get_mut(edge).and_then(Option::take)
        };
        if let Some(owner) = prior {
            self.registry.lock().await.remove(owner.pattern_id);
        }
    }

    // ── Task-loop entry points ──────────────────────────────────────

    /// One render tick: evaluate every active pattern into `next`, swap,
    /// and notify the output task. Called every `render_period_ms` by
    /// [`crate::render_loop::render_task`].
    pub async fn render_tick(&self) {
        let now = self.clock.now_ms();
        {
            let mut registry = self.registry.lock().await;
            self.frame_buffer
                .with_next_mut(|next| {
                    next.clear();
                    for (id, descriptor) in registry.iter_mut() {
                        if !descriptor.active {
                            continue;
                        }
                        let pattern_time = now.wrapping_sub(descriptor.start_time_ms);
                        if descriptor.duration_ms > 0 && pattern_time > descriptor.duration_ms {
                            descriptor.active = false;
                            continue;
                        }
                        let _ = id;
                        evaluators::evaluate(next, descriptor, pattern_time);
                    }
                })
                .await;
        }
        self.frame_buffer.swap().await;
        self.frame_ready.notify();
    }

    /// Wait (with the configured timeout) for a render notification, then
    /// drain `current` to `sink` with one refresh call. Returns `true` if
    /// a frame was emitted, `false` on timeout.
    pub async fn output_tick(&self, sink: &mut impl crate::ports::PixelSink) -> bool {
        let timeout = embassy_time::Duration::from_millis(u64::from(self.config.output_timeout_ms));
        match embassy_time::with_timeout(timeout, self.frame_ready.wait()).await {
            Ok(()) => {
                self.drain_to_sink(sink).await;
                true
            }
            Err(_timeout) => false,
        }
    }

    async fn drain_to_sink(&self, sink: &mut impl crate::ports::PixelSink) {
        let leds_per_edge = &self.leds_per_edge;
        self.frame_buffer
            .with_current(|current| {
                let mut base = 0usize;
                for edge in 0..leds_per_edge.len() {
                    let len = current.edge_len(edge);
                    for i in 0..len {
                        let (r, g, b) = current.get(edge, i).emitted_channels();
                        sink.set(base + i, r, g, b);
                    }
                    base += len;
                }
            })
            .await;
        sink.refresh();
    }
}
