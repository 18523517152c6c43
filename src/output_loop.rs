//! The output task: the consumer half of the render/output split.
//!
//! Waits on the frame-ready notification with the configured timeout; on
//! wake, drains `current` to the driver with a single refresh. On timeout
//! it loops idle without emitting — it never polls on its own timer, only
//! reacts to the render task's notify.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::controller::LedController;
use crate::ports::{MonotonicClock, PixelSink};

/// Run the output loop forever against `sink`. Spawn this as its own task
/// alongside [`crate::render_loop::render_task`].
pub async fn output_task<M: RawMutex, C: MonotonicClock>(
    controller: &LedController<M, C>,
    sink: &mut impl PixelSink,
) -> ! {
    loop {
        controller.output_tick(sink).await;
    }
}
