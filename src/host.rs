//! Boundary between the simulation and whatever drives it.
//!
//! The host owns the frame clock, polls its input devices and renders; the
//! core only sees the snapshot types below and draws through [`Canvas`].

use crate::entities::Screen;
use crate::sprites::SpriteRegion;

/// Per-frame clock and screen geometry, passed into every update and draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Monotonic frame counter.  All cadences (shooting, orbits, blinking
    /// text) are keyed off it by modulo.
    pub frame: u64,
    pub screen: Screen,
}

impl FrameContext {
    pub fn new(frame: u64, screen: Screen) -> Self {
        Self { frame, screen }
    }
}

/// Input snapshot for one frame.
///
/// Directions are level-triggered ("is held").  `fire`, `flip` and `confirm`
/// are edge-triggered ("was pressed this frame").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub flip: bool,
    pub confirm: bool,
}

/// Drawing primitives.  Only ever called from `draw` paths.
pub trait Canvas {
    /// Copy `region` from the sprite sheet with its top-left at (x, y).
    fn blit(&mut self, x: f32, y: f32, region: SpriteRegion);

    /// Filled circle with a one-pixel border.
    fn circle(&mut self, x: f32, y: f32, radius: f32, fill: u8, border: u8);

    fn text(&mut self, x: f32, y: f32, text: &str, color: u8);
}
