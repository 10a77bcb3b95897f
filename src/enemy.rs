//! Enemy craft.
//!
//! Every variant shares the same shell (box, bullets it owns, aim vector) and
//! differs only in its [`Behavior`]: how it moves, how often it fires and
//! whether it soaks up several hits.

use rand::Rng;

use crate::entities::{Body, Bullet, Direction, EnemyKind, Screen};
use crate::host::{Canvas, FrameContext};
use crate::sprites::{self, SpriteRegion};

// ── Variant tables ────────────────────────────────────────────────────────────

/// Radius of the red enemy's orbit.
pub const RED_ORBIT_RADIUS: f32 = 25.0;
/// Phase advance per frame of the red enemy's orbit.
pub const RED_ANGULAR_SPEED: f32 = 0.08;
/// The orbit phase repeats every this many frames.
pub const RED_PHASE_PERIOD: u64 = 240;

pub const BOMBARDIER_SPEED: f32 = 2.0;
pub const SUPER_BOMBARDIER_SPEED: f32 = 1.0;
pub const BOMBARDIER_HEALTH: u32 = 30;
pub const SUPER_BOMBARDIER_HEALTH: u32 = 100;

impl EnemyKind {
    /// Bounding box (width, height).
    pub fn size(self) -> (f32, f32) {
        match self {
            EnemyKind::Regular => (24.0, 24.0),
            EnemyKind::Red => (32.0, 24.0),
            EnemyKind::Bombardier => (32.0, 24.0),
            EnemyKind::SuperBombardier => (32.0, 32.0),
        }
    }

    /// Score awarded when destroyed by a bullet.
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Regular => 5,
            EnemyKind::Red => 10,
            EnemyKind::Bombardier => 20,
            EnemyKind::SuperBombardier => 50,
        }
    }

    /// Fires on every frame divisible by this.
    pub fn shoot_interval(self) -> u64 {
        match self {
            EnemyKind::Regular => 20,
            EnemyKind::Red => 60,
            EnemyKind::Bombardier => 15,
            EnemyKind::SuperBombardier => 30,
        }
    }

    pub fn bullet_speed(self) -> f32 {
        match self {
            EnemyKind::SuperBombardier => 2.0,
            _ => 5.0,
        }
    }

    /// Hit points for the boss variants; `None` dies on the first hit.
    pub fn max_health(self) -> Option<u32> {
        match self {
            EnemyKind::Bombardier => Some(BOMBARDIER_HEALTH),
            EnemyKind::SuperBombardier => Some(SUPER_BOMBARDIER_HEALTH),
            EnemyKind::Regular | EnemyKind::Red => None,
        }
    }

    pub fn sprite(self) -> SpriteRegion {
        match self {
            EnemyKind::Regular => sprites::REGULAR_ENEMY,
            EnemyKind::Red => sprites::RED_ENEMY,
            EnemyKind::Bombardier => sprites::BOMBARDIER,
            EnemyKind::SuperBombardier => sprites::SUPER_BOMBARDIER,
        }
    }
}

// ── Behaviour state ───────────────────────────────────────────────────────────

/// Orbit captured on a red enemy's first update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Horizontal position at capture; the centre drifts right of it with time.
    pub anchor_x: f32,
    pub center_y: f32,
}

impl Orbit {
    pub fn center(&self, frame: u64, screen: &Screen) -> (f32, f32) {
        let drift = (frame % screen.width.max(1.0) as u64) as f32;
        (drift + self.anchor_x, self.center_y)
    }

    pub fn phase(frame: u64) -> f32 {
        (frame % RED_PHASE_PERIOD) as f32 * RED_ANGULAR_SPEED
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    /// Dives diagonally; past mid-screen commits once to keep diving or climb.
    Regular { descending: bool, committed: bool },
    /// Circles a drifting centre.  Never dies from leaving the screen.
    Red { orbit: Option<Orbit> },
    /// Patrols a square in the top half, turning at each edge.
    Bombardier { heading: Direction, health: u32 },
    /// Criss-crosses the top half in eight directions and fires radially.
    SuperBombardier { heading: Direction, health: u32 },
}

impl Behavior {
    fn for_kind(kind: EnemyKind) -> Self {
        let health = kind.max_health().unwrap_or(0);
        match kind {
            EnemyKind::Regular => Behavior::Regular {
                descending: true,
                committed: false,
            },
            EnemyKind::Red => Behavior::Red { orbit: None },
            EnemyKind::Bombardier => Behavior::Bombardier {
                heading: Direction::DOWN,
                health,
            },
            EnemyKind::SuperBombardier => Behavior::SuperBombardier {
                heading: Direction::DOWN,
                health,
            },
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    /// Bullets this craft fired.  They die with it.
    pub bullets: Vec<Bullet>,
    /// Unit step toward the player, refreshed by [`Enemy::aim`] every frame.
    pub player_direction: Direction,
    pub behavior: Behavior,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32) -> Self {
        let (width, height) = kind.size();
        Self {
            body: Body::new(x, y, width, height),
            bullets: Vec::new(),
            player_direction: Direction::NONE,
            behavior: Behavior::for_kind(kind),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            Behavior::Regular { .. } => EnemyKind::Regular,
            Behavior::Red { .. } => EnemyKind::Red,
            Behavior::Bombardier { .. } => EnemyKind::Bombardier,
            Behavior::SuperBombardier { .. } => EnemyKind::SuperBombardier,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind().points()
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Point the next shots at the player.  The super bombardier fires
    /// radially and ignores this.
    pub fn aim(&mut self, player: (f32, f32)) {
        if matches!(self.behavior, Behavior::SuperBombardier { .. }) {
            return;
        }
        self.player_direction = Direction::toward(self.body.position(), player);
    }

    /// Apply one bullet's damage.  Returns `true` if this hit destroyed it.
    pub fn take_hit(&mut self, damage: u32) -> bool {
        match &mut self.behavior {
            Behavior::Bombardier { health, .. } | Behavior::SuperBombardier { health, .. } => {
                *health = health.saturating_sub(damage);
                if *health == 0 {
                    self.body.alive = false;
                }
            }
            Behavior::Regular { .. } | Behavior::Red { .. } => self.body.alive = false,
        }
        !self.body.alive
    }

    /// Fire on cadence, move, then advance and prune owned bullets.
    pub fn update<R: Rng>(&mut self, ctx: &FrameContext, rng: &mut R) {
        self.fire(ctx.frame);

        let screen = &ctx.screen;
        let body = &mut self.body;
        match &mut self.behavior {
            Behavior::Regular {
                descending,
                committed,
            } => {
                if !*committed && body.y > screen.height / 2.0 - body.height {
                    *descending = rng.gen_bool(0.5);
                    *committed = true;
                }
                body.x += 1.0;
                body.y += if *descending { 1.0 } else { -1.0 };
                if body.out_of_bounds(screen) {
                    body.alive = false;
                }
            }

            Behavior::Red { orbit } => {
                let orbit = orbit.get_or_insert(Orbit {
                    anchor_x: body.x,
                    center_y: body.y,
                });
                let (cx, cy) = orbit.center(ctx.frame, screen);
                let t = Orbit::phase(ctx.frame);
                body.x = cx + t.sin() * RED_ORBIT_RADIUS;
                body.y = cy + t.cos() * RED_ORBIT_RADIUS;
            }

            Behavior::Bombardier { heading, .. } => {
                body.step(*heading, BOMBARDIER_SPEED);
                *heading = square_turn(body, *heading, screen);
                if body.out_of_bounds(screen) {
                    body.alive = false;
                }
            }

            Behavior::SuperBombardier { heading, .. } => {
                body.step(*heading, SUPER_BOMBARDIER_SPEED);
                *heading = criss_cross_turn(body, *heading, screen, rng);
                body.x = body.x.max(0.0).min(screen.width - body.width);
                body.y = body.y.max(0.0).min(screen.height - body.height);
            }
        }

        for bullet in self.bullets.iter_mut().filter(|b| b.is_alive()) {
            bullet.update(screen);
        }
        self.bullets.retain(|b| b.is_alive());
    }

    fn fire(&mut self, frame: u64) {
        let kind = self.kind();
        if frame % kind.shoot_interval() != 0 {
            return;
        }
        let speed = kind.bullet_speed();
        match kind {
            EnemyKind::SuperBombardier => {
                let (cx, cy) = self.body.center();
                self.bullets.extend(
                    Direction::COMPASS
                        .iter()
                        .map(|&d| Bullet::enemy(cx, cy, d, speed)),
                );
            }
            _ => self.bullets.push(Bullet::enemy(
                self.body.x,
                self.body.y,
                self.player_direction,
                speed,
            )),
        }
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.blit(self.body.x, self.body.y, self.kind().sprite());
        for bullet in self.bullets.iter().filter(|b| b.is_alive()) {
            bullet.draw(canvas);
        }
    }
}

// ── Inspection ────────────────────────────────────────────────────────────────
//
// Read-only views into behaviour state for logging and tests.

impl Enemy {
    /// Remaining hit points; `None` for variants that die on the first hit.
    pub fn health(&self) -> Option<u32> {
        match self.behavior {
            Behavior::Bombardier { health, .. } | Behavior::SuperBombardier { health, .. } => {
                Some(health)
            }
            Behavior::Regular { .. } | Behavior::Red { .. } => None,
        }
    }

    /// Centre of the current orbit, once a red enemy has captured one.
    pub fn orbit_center(&self, frame: u64, screen: &Screen) -> Option<(f32, f32)> {
        match &self.behavior {
            Behavior::Red { orbit: Some(orbit) } => Some(orbit.center(frame, screen)),
            _ => None,
        }
    }
}

// ── Patrol turns ──────────────────────────────────────────────────────────────
//
// Edges are tested in a fixed order (bottom of the patrol band, right, top,
// left) and the first one matching the current heading wins.

fn square_turn(body: &Body, heading: Direction, screen: &Screen) -> Direction {
    if body.y >= screen.height / 2.0 - body.height && heading == Direction::DOWN {
        Direction::RIGHT
    } else if body.x >= screen.width - body.width && heading == Direction::RIGHT {
        Direction::UP
    } else if body.y <= 0.0 && heading == Direction::UP {
        Direction::LEFT
    } else if body.x <= 0.0 && heading == Direction::LEFT {
        Direction::DOWN
    } else {
        heading
    }
}

const HEADING_DOWNWARD: [Direction; 3] = [Direction::DOWN, Direction::DOWN_LEFT, Direction::LEFT];
const HEADING_RIGHTWARD: [Direction; 3] =
    [Direction::RIGHT, Direction::DOWN_RIGHT, Direction::DOWN];
const HEADING_UPWARD: [Direction; 3] = [Direction::UP, Direction::UP_RIGHT, Direction::RIGHT];
const HEADING_LEFTWARD: [Direction; 3] = [Direction::LEFT, Direction::UP_LEFT, Direction::UP];

fn criss_cross_turn<R: Rng>(
    body: &Body,
    heading: Direction,
    screen: &Screen,
    rng: &mut R,
) -> Direction {
    // Each edge bounces into the heading class of the opposite edge.
    let escape = if body.y >= screen.height / 2.0 - body.height
        && HEADING_DOWNWARD.contains(&heading)
    {
        &HEADING_UPWARD
    } else if body.x >= screen.width - body.width && HEADING_RIGHTWARD.contains(&heading) {
        &HEADING_LEFTWARD
    } else if body.y <= 0.0 && HEADING_UPWARD.contains(&heading) {
        &HEADING_DOWNWARD
    } else if body.x <= 0.0 && HEADING_LEFTWARD.contains(&heading) {
        &HEADING_RIGHTWARD
    } else {
        return heading;
    };
    escape[rng.gen_range(0..escape.len())]
}
