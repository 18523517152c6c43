//! Fixed-capacity pattern registry.
//!
//! Shaped directly on the scheduler's slot table: a `[Option<T>; N]` array,
//! lowest-free-slot allocation on create, slot index doubling as the
//! stable id returned to callers. Unlike a monotonic append-only table,
//! `remove` here frees the slot for reuse — see DESIGN.md.

use log::{debug, info, warn};

use crate::config::MAX_PATTERNS;
use crate::error::{Error, Result};
use crate::evaluators::blink_duration_ms;
use crate::patterns::{PatternDescriptor, PatternParams, PatternType};

/// Registry of active/inactive pattern descriptors. Slot index == pattern id.
pub struct Registry {
    slots: [Option<PatternDescriptor>; MAX_PATTERNS],
}

impl Registry {
    pub fn new() -> Self {
        Self { slots: [const { None }; MAX_PATTERNS] }
    }

    /// Register a new descriptor. Picks the lowest unused slot and returns
    /// its index as the pattern id. Fails with [`Error::CapacityExceeded`]
    /// when every slot is occupied; state is left unchanged.
    pub fn create(
        &mut self,
        edge: usize,
        start_index: usize,
        end_index: usize,
        duration_ms: u32,
        params: PatternParams,
    ) -> Result<usize> {
        if start_index > end_index {
            return Err(Error::InvalidArgument);
        }
        if params.pattern_type() == PatternType::Fade && duration_ms == 0 {
            return Err(Error::InvalidArgument);
        }
        params.validate()?;
        // BLINK's repeat_count, when set, derives the descriptor's duration
        // rather than relying on the caller to pass a matching one.
        let duration_ms = match &params {
            PatternParams::Blink { on_time_ms, off_time_ms, repeat_count, .. } if duration_ms == 0 => {
                blink_duration_ms(*on_time_ms, *off_time_ms, *repeat_count).unwrap_or(0)
            }
            _ => duration_ms,
        };
        for (id, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                let kind = params.pattern_type();
                *slot = Some(PatternDescriptor {
                    edge,
                    start_index,
                    end_index,
                    start_time_ms: 0,
                    duration_ms,
                    active: false,
                    params,
                });
                debug!("registry: created {kind:?} at slot {id} (edge {edge})");
                return Ok(id);
            }
        }
        warn!("registry: create failed, all {MAX_PATTERNS} slots occupied");
        Err(Error::CapacityExceeded)
    }

    /// Arm a descriptor: set its epoch and mark it active. No-op on an
    /// invalid id.
    pub fn start(&mut self, id: usize, now_ms: u32) {
        if let Some(Some(d)) = self.slots.get_mut(id) {
            d.start_time_ms = now_ms;
            d.active = true;
        }
    }

    /// Disarm a descriptor without releasing its payload — `start` can
    /// re-arm it later. No-op on an invalid id.
    pub fn stop(&mut self, id: usize) {
        if let Some(Some(d)) = self.slots.get_mut(id) {
            d.active = false;
        }
    }

    /// Release a descriptor's payload and free its slot for reuse. No-op
    /// on an invalid id.
    pub fn remove(&mut self, id: usize) {
        if let Some(slot) = self.slots.get_mut(id) {
            if slot.take().is_some() {
                info!("registry: removed slot {id}");
            }
        }
    }

    /// Mark a descriptor inactive without removing it — used by the render
    /// loop when a bounded-duration pattern's time has elapsed.
    pub fn retire(&mut self, id: usize) {
        self.stop(id);
    }

    pub fn get(&self, id: usize) -> Option<&PatternDescriptor> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Iterate `(id, descriptor)` for every occupied slot, in slot order —
    /// the order the render loop evaluates in, which is also the
    /// last-writer-wins resolution order for overlapping ranges.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PatternDescriptor)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.as_ref().map(|d| (id, d)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut PatternDescriptor)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(id, s)| s.as_mut().map(|d| (id, d)))
    }

    pub fn capacity(&self) -> usize {
        MAX_PATTERNS
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
