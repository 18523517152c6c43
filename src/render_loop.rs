//! The render task: the periodic producer half of the render/output split.
//!
//! Runs [`LedController::render_tick`] every `render_period_ms`, using a
//! delay-until style period (anchored to the last wake time, not the last
//! tick's duration) so evaluation jitter doesn't accumulate drift across
//! ticks — the same timing discipline the source engine's `vTaskDelayUntil`
//! period gives it.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Timer};

use crate::controller::LedController;
use crate::ports::MonotonicClock;

/// Run the render loop forever. Spawn this as its own task alongside
/// [`crate::output_loop::output_task`].
pub async fn render_task<M: RawMutex, C: MonotonicClock>(controller: &LedController<M, C>) -> ! {
    let period = Duration::from_millis(u64::from(controller.config().render_period_ms));
    let mut next_wake = Instant::now() + period;
    loop {
        Timer::at(next_wake).await;
        controller.render_tick().await;
        next_wake += period;
    }
}
