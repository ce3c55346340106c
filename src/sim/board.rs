//! Static board layout: the triangular peg field and the payout slot row

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

/// A payout bucket along the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub multiplier: f64,
}

impl Slot {
    /// Horizontal center, where the label is drawn
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Build the peg field.
///
/// Even rows hold `row + 1` pegs starting two ball radii in from the left
/// edge; odd rows hold `row` pegs starting three radii in. Pegs in a row are
/// four radii apart. No randomness: the same config always yields the same
/// field.
pub fn generate_pegs(config: &Config) -> Vec<Peg> {
    let r = config.ball_radius;
    let mut pegs = Vec::new();
    let mut y = config.peg_row_spacing;

    for row in 0..config.peg_rows {
        let (count, start_x) = if row % 2 == 0 {
            (row + 1, r * 2.0)
        } else {
            (row, r * 3.0)
        };

        for i in 0..count {
            pegs.push(Peg {
                pos: Vec2::new(start_x + i as f32 * r * 4.0, y),
                radius: config.peg_radius,
            });
        }

        y += config.peg_row_spacing;
    }

    pegs
}

/// Build the slot row: equal-width, contiguous, spanning the canvas, one per
/// multiplier in order.
pub fn generate_slots(config: &Config) -> Vec<Slot> {
    let width = config.slot_width();
    config
        .multipliers
        .iter()
        .enumerate()
        .map(|(i, &multiplier)| Slot {
            x: i as f32 * width,
            width,
            multiplier,
        })
        .collect()
}

/// Everything static about a session's playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub config: Config,
    pub pegs: Vec<Peg>,
    pub slots: Vec<Slot>,
}

impl Board {
    pub fn new(config: Config) -> Self {
        let pegs = generate_pegs(&config);
        let slots = generate_slots(&config);
        log::info!("Board generated: {} pegs, {} slots", pegs.len(), slots.len());
        Self { config, pegs, slots }
    }

    /// Slot under horizontal position `x`, clamped to the outermost slots
    pub fn slot_index_at(&self, x: f32) -> usize {
        let last = self.slots.len().saturating_sub(1);
        let raw = (x / self.config.slot_width()).floor();
        if raw <= 0.0 { 0 } else { (raw as usize).min(last) }
    }
}
