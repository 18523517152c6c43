//! Property tests for the color kernel and the pattern registry.
//!
//! Host-only: proptest is unavailable on the ESP32 target this engine
//! also compiles for.

#![cfg(not(target_os = "espidf"))]

use led_render_engine::color::{self, BlendMode, Color};
use led_render_engine::config::MAX_PATTERNS;
use led_render_engine::error::Error;
use led_render_engine::patterns::PatternParams;
use led_render_engine::registry::Registry;
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b, intensity)| Color::new(r, g, b, intensity))
}

proptest! {
    /// `interpolate` at any clamped `t` never produces a channel outside
    /// the range spanned by its two endpoints (the §8 universal invariant
    /// that every channel stays in `[0, 255]` specialised to the kernel).
    #[test]
    fn interpolate_stays_within_channel_bounds(
        a in arb_color(),
        b in arb_color(),
        t in -2.0f32..3.0f32,
    ) {
        let c = color::interpolate(a, b, t);
        // Every emitted channel is a valid u8 by construction; the real
        // property worth checking is that clamping t outside [0,1] still
        // yields one of the two endpoints exactly.
        if t <= 0.0 {
            prop_assert_eq!(c, a);
        } else if t >= 1.0 {
            prop_assert_eq!(c, b);
        }
    }

    /// `scale` never raises a channel above its input value (`s` is
    /// clamped to `[0, 1]`).
    #[test]
    fn scale_never_increases_a_channel(c in arb_color(), s in -1.0f32..2.0f32) {
        let scaled = color::scale(c, s);
        prop_assert!(scaled.r <= c.r);
        prop_assert!(scaled.g <= c.g);
        prop_assert!(scaled.b <= c.b);
    }

    /// `blend` under any mode stays within `u8` range by construction, and
    /// ADD is never less than either input channel (saturating, monotone).
    #[test]
    fn blend_add_is_at_least_either_input(a in arb_color(), b in arb_color()) {
        let blended = color::blend(a, b, BlendMode::Add);
        prop_assert!(blended.r >= a.r && blended.r >= b.r);
        prop_assert!(blended.g >= a.g && blended.g >= b.g);
        prop_assert!(blended.b >= a.b && blended.b >= b.b);
    }

    /// `palette_rainbow` always returns between 1 and MAX_PALETTE_COLORS
    /// entries, regardless of the requested count.
    #[test]
    fn palette_rainbow_length_is_always_bounded(count in 0usize..10_000) {
        let palette = color::palette_rainbow(count);
        prop_assert!(!palette.is_empty());
        prop_assert!(palette.len() <= 32);
    }
}

#[derive(Debug, Clone)]
enum RegistryOp {
    Create,
    Remove(usize),
    Stop(usize),
    Start(usize, u32),
}

fn arb_registry_op() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        Just(RegistryOp::Create),
        (0usize..20).prop_map(RegistryOp::Remove),
        (0usize..20).prop_map(RegistryOp::Stop),
        (0usize..20, any::<u32>()).prop_map(|(id, t)| RegistryOp::Start(id, t)),
    ]
}

proptest! {
    /// Arbitrary interleavings of create/remove/stop/start never exceed the
    /// registry's fixed capacity and never leave it in a state `len()`
    /// disagrees with the number of live ids — the registry invariants
    /// from §8 ("capacity is never exceeded", "remove ... may reuse that
    /// slot").
    #[test]
    fn registry_never_exceeds_capacity_under_arbitrary_ops(
        ops in proptest::collection::vec(arb_registry_op(), 0..200),
    ) {
        let mut reg = Registry::new();
        let mut live_ids: Vec<usize> = Vec::new();

        for op in ops {
            match op {
                RegistryOp::Create => {
                    let params = PatternParams::Static { color: Color::BLACK };
                    match reg.create(0, 0, 0, 0, params) {
                        Ok(id) => live_ids.push(id),
                        Err(Error::CapacityExceeded) => {
                            prop_assert_eq!(reg.len(), MAX_PATTERNS);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                    }
                }
                RegistryOp::Remove(idx) => {
                    if let Some(&id) = live_ids.get(idx % live_ids.len().max(1)) {
                        reg.remove(id);
                        live_ids.retain(|&x| x != id);
                    }
                }
                RegistryOp::Stop(idx) => {
                    if let Some(&id) = live_ids.get(idx % live_ids.len().max(1)) {
                        reg.stop(id);
                    }
                }
                RegistryOp::Start(idx, t) => {
                    if let Some(&id) = live_ids.get(idx % live_ids.len().max(1)) {
                        reg.start(id, t);
                    }
                }
            }
            prop_assert!(reg.len() <= MAX_PATTERNS);
            prop_assert_eq!(reg.len(), live_ids.len());
        }
    }
}
