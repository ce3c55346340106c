//! Frame rendering
//!
//! Drawing goes through the `Surface` trait so the same frame code runs
//! against the browser canvas and against test doubles.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{Board, SimulationState};

/// Palette
pub mod colors {
    pub const PEG: &str = "#fff";
    pub const SLOT: &str = "#aaa";
    pub const SLOT_LABEL: &str = "red";
    pub const BALL: &str = "#ff0";
}

pub const LABEL_FONT: &str = "20px Arial";

/// Minimal 2D drawing target
pub trait Surface {
    /// Wipe the whole drawing area
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// Draw one complete frame: pegs, slots, then the ball on top
pub fn draw_frame<S: Surface>(surface: &mut S, board: &Board, state: &SimulationState) {
    let config = &board.config;
    surface.clear(config.canvas_width, config.canvas_height);

    for peg in &board.pegs {
        surface.fill_circle(peg.pos, peg.radius, colors::PEG);
    }

    let row_top = config.slot_row_top();
    let label_y = config.canvas_height - config.slot_row_height / 2.0;
    for slot in &board.slots {
        surface.fill_rect(
            Vec2::new(slot.x, row_top),
            Vec2::new(slot.width, config.slot_row_height),
            colors::SLOT,
        );
        surface.fill_text(
            &multiplier_label(slot.multiplier),
            Vec2::new(slot.center_x(), label_y),
            LABEL_FONT,
            colors::SLOT_LABEL,
        );
    }

    surface.fill_circle(state.ball.pos, state.ball.radius, colors::BALL);
}

/// Slot caption, e.g. "0.5x" or "10x"
pub fn multiplier_label(multiplier: f64) -> String {
    format!("{}x", multiplier)
}
