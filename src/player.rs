//! The player craft: free 8-way movement, the flip maneuver and the
//! double-bullet power-up.

use crate::config::GameConfig;
use crate::entities::{Body, Bullet, Screen};
use crate::host::{Canvas, InputState};
use crate::sprites::{self, SpriteRegion};

pub const PLANE_SIZE: f32 = 32.0;
pub const PLANE_SPEED: f32 = 8.0;
/// Gap between the craft's start position and the bottom edge.
pub const BOTTOM_MARGIN: f32 = 70.0;
/// Muzzle offset from the craft's top-left corner.
pub const HEAD_X: f32 = 15.0;
pub const HEAD_Y: f32 = 15.0;
/// Horizontal offset of each double-bullet shot from the muzzle.
pub const DOUBLE_BULLET_SPREAD: f32 = 5.0;
/// Animation phases per flip.
pub const FLIP_PHASES: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Maneuver {
    /// Controllable and vulnerable.
    Level,
    /// Mid-flip: no steering, no firing, no damage taken.
    Flipping { ticks_left: u32 },
}

/// Flip animation phases, in playback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipPhase {
    BankLeft,
    Underside,
    BankRight,
    Upright,
}

impl FlipPhase {
    pub fn sprite(self) -> SpriteRegion {
        match self {
            FlipPhase::BankLeft => sprites::PLANE_BANK_LEFT,
            FlipPhase::Underside => sprites::PLANE_UNDERSIDE,
            FlipPhase::BankRight => sprites::PLANE_BANK_RIGHT,
            FlipPhase::Upright => sprites::PLANE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    pub body: Body,
    pub speed: f32,
    pub maneuver: Maneuver,
    /// Remaining flip charges.  They do not regenerate.
    pub flips: u32,
    pub total_flips: u32,
    pub flip_frame_rate: u32,
    pub double_bullet: bool,
    /// Double shots left before the power-up runs out.
    pub double_bullet_shots: u32,
    pub double_bullet_shots_default: u32,
}

impl Plane {
    /// Centred horizontally, `BOTTOM_MARGIN` above the lowest position.
    pub fn new(screen: &Screen, config: &GameConfig) -> Self {
        let x = screen.width / 2.0 - PLANE_SIZE / 2.0;
        let y = screen.height - PLANE_SIZE - BOTTOM_MARGIN;
        Self {
            body: Body::new(x, y, PLANE_SIZE, PLANE_SIZE),
            speed: PLANE_SPEED,
            maneuver: Maneuver::Level,
            flips: config.total_flips,
            total_flips: config.total_flips,
            flip_frame_rate: config.flip_frame_rate.max(1),
            double_bullet: false,
            double_bullet_shots: config.double_bullet_shots,
            double_bullet_shots_default: config.double_bullet_shots,
        }
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.maneuver, Maneuver::Flipping { .. })
    }

    pub fn flip_duration(&self) -> u32 {
        FLIP_PHASES * self.flip_frame_rate
    }

    pub fn flip_phase(&self) -> Option<FlipPhase> {
        let Maneuver::Flipping { ticks_left } = self.maneuver else {
            return None;
        };
        let phase = ticks_left.div_ceil(self.flip_frame_rate);
        Some(match phase {
            0 | 1 => FlipPhase::Upright,
            2 => FlipPhase::BankRight,
            3 => FlipPhase::Underside,
            _ => FlipPhase::BankLeft,
        })
    }

    /// Muzzle position for new bullets.
    pub fn head(&self) -> (f32, f32) {
        (self.body.x + HEAD_X, self.body.y + HEAD_Y)
    }

    /// Steer while level, otherwise run the flip clock down.
    pub fn update(&mut self, input: &InputState, screen: &Screen) {
        match self.maneuver {
            Maneuver::Level => self.steer(input, screen),
            Maneuver::Flipping { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left == 0 {
                    self.maneuver = Maneuver::Level;
                    self.flips = self.flips.saturating_sub(1);
                    log::debug!("Flip complete, {} left", self.flips);
                } else {
                    self.maneuver = Maneuver::Flipping { ticks_left };
                }
            }
        }
    }

    // Axes are checked independently so diagonals work.  A step is taken
    // only if it keeps the craft inside its bounds; the top bound lets the
    // craft climb past y = 0.
    fn steer(&mut self, input: &InputState, screen: &Screen) {
        let body = &mut self.body;
        let speed = self.speed;

        if input.left && body.x - speed >= 0.0 {
            body.x -= speed;
        }
        if input.right && body.x + speed <= screen.width - body.width {
            body.x += speed;
        }
        if input.up && body.y - speed >= -body.height + speed {
            body.y -= speed;
        }
        if input.down && body.y + speed <= screen.height - body.height {
            body.y += speed;
        }
    }

    /// Begin a flip if level and a charge remains.
    pub fn start_flip(&mut self) -> bool {
        if self.is_flipping() || self.flips == 0 {
            return false;
        }
        self.maneuver = Maneuver::Flipping {
            ticks_left: self.flip_duration(),
        };
        true
    }

    pub fn grant_double_bullet(&mut self) {
        self.double_bullet = true;
        self.double_bullet_shots = self.double_bullet_shots_default;
    }

    /// Push this trigger pull's bullets.  Spends one double shot when the
    /// power-up is active and switches it off once they run out.
    pub fn fire(&mut self, bullets: &mut Vec<Bullet>) {
        let (hx, hy) = self.head();
        if !self.double_bullet {
            bullets.push(Bullet::player(hx, hy));
            return;
        }

        bullets.push(Bullet::player(hx + DOUBLE_BULLET_SPREAD, hy));
        bullets.push(Bullet::player(hx - DOUBLE_BULLET_SPREAD, hy));
        self.double_bullet_shots = self.double_bullet_shots.saturating_sub(1);
        if self.double_bullet_shots == 0 {
            self.double_bullet = false;
            self.double_bullet_shots = self.double_bullet_shots_default;
            log::debug!("Double bullet power-up used up");
        }
    }

    pub fn sprite(&self) -> SpriteRegion {
        self.flip_phase()
            .map(FlipPhase::sprite)
            .unwrap_or(sprites::PLANE)
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.blit(self.body.x, self.body.y, self.sprite());
    }
}
