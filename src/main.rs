//! Minimal wiring for the render engine: constructs a controller and
//! spawns the render and output tasks against placeholder port
//! implementations.
//!
//! Platform bring-up, the real physical strip driver, and any control
//! channel that would call `set_edge_pattern` at runtime are out of
//! scope here — see the crate-level docs in `lib.rs`. This binary exists
//! to show the two tasks wired together, not to exercise the pattern API.

use std::time::Instant;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use led_render_engine::config::RenderConfig;
use led_render_engine::controller::LedController;
use led_render_engine::ports::{MonotonicClock, PixelSink};
use led_render_engine::{output_loop, render_loop};

/// Monotonic millisecond counter anchored at process start. A real
/// platform clock (e.g. a hardware timer) is out of scope; this is
/// enough to drive the task loops in a standalone binary.
struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl MonotonicClock for SystemClock {
    fn now_ms(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }
}

/// Stand-in for the physical one-wire strip driver, which is out of
/// scope for this crate.
struct StripSink;

impl PixelSink for StripSink {
    fn set(&mut self, _index: usize, _r: u8, _g: u8, _b: u8) {}
    fn refresh(&mut self) {}
}

fn main() {
    let leds_per_edge = [15u16, 15, 15, 15];
    let controller: LedController<CriticalSectionRawMutex, SystemClock> =
        LedController::create(&leds_per_edge, RenderConfig::default(), SystemClock::new())
            .expect("controller_create: edge table within capacity");
    let mut sink = StripSink;

    // Two tasks, one executor: spawn both loops, then block on a pending
    // future while the executor drives them. Neither loop ever returns,
    // so nothing else would complete first.
    let executor: edge_executor::LocalExecutor<'_, 2> = edge_executor::LocalExecutor::new();
    executor.spawn(render_loop::render_task(&controller)).detach();
    executor.spawn(output_loop::output_task(&controller, &mut sink)).detach();

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}
