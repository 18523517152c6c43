//! The double frame buffer and the render -> output notification.
//!
//! Two [`PixelMatrix`] values, `current` and `next`, guarded by a single
//! async mutex. The render task composes into `next` and calls [`swap`],
//! which exchanges the two references under the lock — the output task
//! never observes a partially written frame. [`FrameReady`] is the
//! coalescing notify: if the render task swaps twice before the output
//! task wakes, only the most recent frame is signalled, matching the
//! "notification overflow coalesces" rule.
//!
//! [`swap`]: FrameBuffer::swap

use core::mem;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::matrix::PixelMatrix;

struct Buffers {
    current: PixelMatrix,
    next: PixelMatrix,
}

/// Frame buffer pair, generic over the raw mutex kind so the same type
/// runs on-device (a critical-section mutex) and on host tests (a
/// std-backed one).
pub struct FrameBuffer<M: RawMutex> {
    buffers: Mutex<M, Buffers>,
}

impl<M: RawMutex> FrameBuffer<M> {
    pub fn new(leds_per_edge: &[u16]) -> Self {
        Self {
            buffers: Mutex::new(Buffers {
                current: PixelMatrix::new(leds_per_edge),
                next: PixelMatrix::new(leds_per_edge),
            }),
        }
    }

    /// Run `f` against the `next` matrix (the render task's write target).
    pub async fn with_next_mut<R>(&self, f: impl FnOnce(&mut PixelMatrix) -> R) -> R {
        let mut guard = self.buffers.lock().await;
        f(&mut guard.next)
    }

    /// Exchange `current` and `next`. The matrix just composed into `next`
    /// becomes `current`; the old `current` becomes the next write target.
    pub async fn swap(&self) {
        let mut guard = self.buffers.lock().await;
        mem::swap(&mut guard.current, &mut guard.next);
    }

    /// Run `f` against the `current` matrix (the output task's read source).
    pub async fn with_current<R>(&self, f: impl FnOnce(&PixelMatrix) -> R) -> R {
        let guard = self.buffers.lock().await;
        f(&guard.current)
    }

    /// Reset both matrices to all-off immediately, without waiting for the
    /// next render tick. Used by `clear_all`.
    pub async fn clear_both(&self) {
        let mut guard = self.buffers.lock().await;
        guard.current.clear();
        guard.next.clear();
    }
}

/// Single-slot, coalescing "a frame is ready" notification from the render
/// task to the output task.
pub struct FrameReady<M: RawMutex> {
    signal: Signal<M, ()>,
}

impl<M: RawMutex> FrameReady<M> {
    pub const fn new() -> Self {
        Self { signal: Signal::new() }
    }

    /// Called by the render task after every swap.
    pub fn notify(&self) {
        self.signal.signal(());
    }

    /// Called by the output task; resolves immediately if a notification
    /// already arrived since the last wait.
    pub async fn wait(&self) {
        self.signal.wait().await;
    }
}
