//! The pixel matrix: a ragged grid of [`Color`], one row per edge.
//!
//! Out-of-range access is a defensive no-op rather than an error — this
//! keeps evaluator code in [`crate::evaluators`] free of range checks on
//! every single pixel write; evaluators still clamp their own pattern
//! ranges at registration time.

use heapless::Vec;

use crate::color::Color;
use crate::config::{MAX_EDGES, MAX_LEDS_PER_EDGE};

type EdgeRow = Vec<Color, MAX_LEDS_PER_EDGE>;

/// A snapshot of every LED's color across every edge.
#[derive(Clone)]
pub struct PixelMatrix {
    rows: Vec<EdgeRow, MAX_EDGES>,
}

impl PixelMatrix {
    /// Build a matrix shaped by `leds_per_edge`, zero-initialised (all off).
    pub fn new(leds_per_edge: &[u16]) -> Self {
        let mut rows: Vec<EdgeRow, MAX_EDGES> = Vec::new();
        for &n in leds_per_edge {
            let mut row: EdgeRow = Vec::new();
            for _ in 0..n {
                // `n` is bounded by MAX_LEDS_PER_EDGE at controller
                // construction time (see controller::LedController::create).
                let _ = row.push(Color::BLACK);
            }
            let _ = rows.push(row);
        }
        Self { rows }
    }

    /// Number of edges in this matrix.
    pub fn edge_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of LEDs on `edge`, or 0 if out of range.
    pub fn edge_len(&self, edge: usize) -> usize {
        self.rows.get(edge).map_or(0, Vec::len)
    }

    /// Reset every pixel to off.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            for px in row.iter_mut() {
                *px = Color::BLACK;
            }
        }
    }

    /// Write `color` to `(edge, index)`. Silently dropped if out of range.
    pub fn set(&mut self, edge: usize, index: usize, color: Color) {
        if let Some(row) = self.rows.get_mut(edge) {
            if let Some(px) = row.get_mut(index) {
                *px = color;
            }
        }
    }

    /// Read `(edge, index)`, or black if out of range.
    pub fn get(&self, edge: usize, index: usize) -> Color {
        self.rows
            .get(edge)
            .and_then(|row| row.get(index))
            .copied()
            .unwrap_or(Color::BLACK)
    }

    /// Iterate every `(edge, index, color)` triple in edge-major,
    /// LED-minor order — the order the output loop drains in.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(edge, row)| {
            row.iter()
                .enumerate()
                .map(move |(i, &c)| (edge, i, c))
        })
    }
}
