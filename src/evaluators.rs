//! Time -> pixel generators, one per [`PatternType`](crate::patterns::PatternType).
//!
//! Every evaluator is a pure function of `(matrix, descriptor, pattern_time_ms)`
//! — it writes only inside `descriptor`'s own `[start_index, end_index]`
//! range on `descriptor.edge`, and never touches registry state. Called
//! from [`crate::render_loop`] once per active descriptor per tick.

use crate::color::{self, Color};
use crate::matrix::PixelMatrix;
use crate::patterns::{PatternDescriptor, PatternParams};
use crate::rng::TwinkleRng;

/// Evaluate `descriptor` at `pattern_time_ms` (= now - start_time_ms) into
/// `matrix`. Dispatches on the descriptor's parameter variant.
pub fn evaluate(matrix: &mut PixelMatrix, descriptor: &PatternDescriptor, pattern_time_ms: u32) {
    match &descriptor.params {
        PatternParams::Static { color } => static_pattern(matrix, descriptor, *color),
        PatternParams::Blink { on_color, on_time_ms, off_time_ms, .. } => {
            blink(matrix, descriptor, pattern_time_ms, *on_color, *on_time_ms, *off_time_ms);
        }
        PatternParams::Fade { start_color, end_color } => {
            fade(matrix, descriptor, pattern_time_ms, *start_color, *end_color);
        }
        PatternParams::Pulse { base_color, peak_intensity, period_ms } => {
            pulse(matrix, descriptor, pattern_time_ms, *base_color, *peak_intensity, *period_ms);
        }
        PatternParams::Shift { colors, period_ms, offset } => {
            shift(matrix, descriptor, pattern_time_ms, colors, *period_ms, *offset);
        }
        PatternParams::Gradient { start_color, end_color } => {
            gradient(matrix, descriptor, *start_color, *end_color);
        }
        PatternParams::Twinkle { color, probability } => {
            twinkle(matrix, descriptor, pattern_time_ms, *color, *probability);
        }
        PatternParams::PaletteCycle { palette, cycle_period_ms, offset } => {
            palette_cycle(matrix, descriptor, pattern_time_ms, palette, *cycle_period_ms, *offset);
        }
    }
}

/// Bounded-duration BLINK/FADE-style patterns retire once elapsed; this
/// mirrors the render loop's own `duration_ms` check but also governs
/// BLINK's `repeat_count`-derived duration (see [`blink_duration_ms`]).
pub fn blink_duration_ms(on_time_ms: u32, off_time_ms: u32, repeat_count: u32) -> Option<u32> {
    if repeat_count == 0 {
        None
    } else {
        Some((on_time_ms + off_time_ms) * repeat_count)
    }
}

fn for_range(descriptor: &PatternDescriptor, mut f: impl FnMut(usize, usize)) {
    for local in 0..descriptor.range_len() {
        f(local, descriptor.start_index + local);
    }
}

fn static_pattern(matrix: &mut PixelMatrix, d: &PatternDescriptor, color: Color) {
    for_range(d, |_, i| matrix.set(d.edge, i, color));
}

fn blink(
    matrix: &mut PixelMatrix,
    d: &PatternDescriptor,
    t: u32,
    on_color: Color,
    on_time_ms: u32,
    off_time_ms: u32,
) {
    let cycle = on_time_ms + off_time_ms;
    if cycle == 0 {
        return;
    }
    let phase = t % cycle;
    if phase < on_time_ms {
        for_range(d, |_, i| matrix.set(d.edge, i, on_color));
    }
    // else: leave at zero (matrix was cleared for this tick by the render loop)
}

fn fade(matrix: &mut PixelMatrix, d: &PatternDescriptor, t: u32, start: Color, end: Color) {
    if d.duration_ms == 0 {
        return; // FADE requires duration > 0; a zero-duration descriptor is inert
    }
    let progress = (t as f32 / d.duration_ms as f32).min(1.0);
    let c = color::interpolate(start, end, progress);
    for_range(d, |_, i| matrix.set(d.edge, i, c));
}

fn pulse(
    matrix: &mut PixelMatrix,
    d: &PatternDescriptor,
    t: u32,
    base: Color,
    peak_intensity: u8,
    period_ms: u32,
) {
    if period_ms == 0 {
        return;
    }
    let phase = (t % period_ms) as f32 / period_ms as f32;
    let factor = (libm::sinf(2.0 * core::f32::consts::PI * phase) + 1.0) / 2.0;
    let intensity = (f32::from(peak_intensity) * factor).round() as u8;
    let c = Color { intensity, ..base };
    for_range(d, |_, i| matrix.set(d.edge, i, c));
}

fn shift(
    matrix: &mut PixelMatrix,
    d: &PatternDescriptor,
    t: u32,
    colors: &[Color],
    period_ms: u32,
    offset: u32,
) {
    let length = colors.len();
    if length == 0 || period_ms == 0 {
        return;
    }
    let shift_amount = (t / period_ms) as usize % length;
    let range_len = d.range_len();
    for_range(d, |local, i| {
        let mut idx = (local + shift_amount + offset as usize) % length;
        if idx >= range_len {
            idx %= range_len;
        }
        if let Some(&c) = colors.get(idx % length) {
            matrix.set(d.edge, i, c);
        }
    });
}

fn gradient(matrix: &mut PixelMatrix, d: &PatternDescriptor, start: Color, end: Color) {
    let n = d.range_len();
    for_range(d, |local, i| {
        let t = if n <= 1 { 0.0 } else { local as f32 / (n - 1) as f32 };
        matrix.set(d.edge, i, color::interpolate(start, end, t));
    });
}

fn twinkle(matrix: &mut PixelMatrix, d: &PatternDescriptor, t: u32, color: Color, probability: f32) {
    let probability = probability.clamp(0.0, 1.0);
    let mut rng = TwinkleRng::reseed_for(t);
    for_range(d, |_, i| {
        let u = rng.next_unit();
        if u < probability {
            matrix.set(d.edge, i, color::scale(color, 0.7 + 0.3 * u));
        }
        // else: stays at zero for this frame
    });
}

fn palette_cycle(
    matrix: &mut PixelMatrix,
    d: &PatternDescriptor,
    t: u32,
    palette: &[Color],
    cycle_period_ms: u32,
    offset: u32,
) {
    let k = palette.len();
    if k == 0 || cycle_period_ms == 0 {
        return;
    }
    let c = (t % cycle_period_ms) as f32 / cycle_period_ms as f32;
    for_range(d, |local, i| {
        let raw = c + (local + offset as usize) as f32 / 10.0;
        let p = raw.fract().rem_euclid(1.0);
        let x = p * (k - 1).max(1) as f32;
        let idx = x as usize;
        let frac = x - idx as f32;
        let a = palette[idx % k];
        let b = palette[(idx + 1) % k];
        matrix.set(d.edge, i, color::interpolate(a, b, frac));
    });
}
