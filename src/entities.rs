//! Shared entity types: screen geometry, the moving-entity box every craft and
//! projectile carries, bullets, blasts and the scene/wave enums.

use crate::host::Canvas;
use crate::sprites::{self, SpriteRegion};

// ── Screen ────────────────────────────────────────────────────────────────────

/// Fixed logical screen size in pixels (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

/// A compass step with each component in {-1, 0, 1}.  Diagonals are not
/// normalised: (1, 1) at speed 5 covers (5, 5) per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const NONE: Direction = Direction::new(0, 0);
    pub const DOWN: Direction = Direction::new(0, 1);
    pub const RIGHT: Direction = Direction::new(1, 0);
    pub const UP: Direction = Direction::new(0, -1);
    pub const LEFT: Direction = Direction::new(-1, 0);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_RIGHT: Direction = Direction::new(1, -1);
    pub const DOWN_LEFT: Direction = Direction::new(-1, 1);

    /// All eight headings, in the order formations and radial volleys use them.
    pub const COMPASS: [Direction; 8] = [
        Direction::DOWN,
        Direction::RIGHT,
        Direction::UP,
        Direction::LEFT,
        Direction::DOWN_RIGHT,
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
        Direction::DOWN_LEFT,
    ];

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Per-axis sign of `to - from`.  `NONE` when the points coincide.
    pub fn toward(from: (f32, f32), to: (f32, f32)) -> Direction {
        Direction::new(sign(to.0 - from.0), sign(to.1 - from.1))
    }

    pub fn x(self) -> f32 {
        self.dx as f32
    }

    pub fn y(self) -> f32 {
        self.dy as f32
    }
}

fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

// ── Moving entity ─────────────────────────────────────────────────────────────

/// Position, axis-aligned bounding box and liveness shared by all craft and
/// projectiles.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            alive: true,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// AABB overlap.  Touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x + self.width > other.x
            && other.x + other.width > self.x
            && self.y + self.height > other.y
            && other.y + other.height > self.y
    }

    /// True once the box crosses any screen edge.
    pub fn out_of_bounds(&self, screen: &Screen) -> bool {
        self.x < 0.0
            || self.y < 0.0
            || self.x > screen.width - self.width
            || self.y > screen.height - self.height
    }

    pub fn step(&mut self, direction: Direction, speed: f32) {
        self.x += direction.x() * speed;
        self.y += direction.y() * speed;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SIZE: f32 = 6.0;
pub const BULLET_DAMAGE: u32 = 10;
pub const PLAYER_BULLET_SPEED: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Straight-line projectile.  Direction is fixed when it is fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub direction: Direction,
    pub speed: f32,
    pub damage: u32,
    pub owner: BulletOwner,
}

impl Bullet {
    /// An upward shot from the player craft's head.
    pub fn player(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, BULLET_SIZE, BULLET_SIZE),
            direction: Direction::UP,
            speed: PLAYER_BULLET_SPEED,
            damage: BULLET_DAMAGE,
            owner: BulletOwner::Player,
        }
    }

    pub fn enemy(x: f32, y: f32, direction: Direction, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, BULLET_SIZE, BULLET_SIZE),
            direction,
            speed,
            damage: BULLET_DAMAGE,
            owner: BulletOwner::Enemy,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Advance by `direction * speed`; dies once it leaves the screen.
    pub fn update(&mut self, screen: &Screen) {
        self.body.step(self.direction, self.speed);
        if self.body.out_of_bounds(screen) {
            self.body.alive = false;
        }
    }

    pub fn sprite(&self) -> SpriteRegion {
        match self.owner {
            BulletOwner::Player => sprites::PLAYER_BULLET,
            BulletOwner::Enemy => sprites::ENEMY_BULLET,
        }
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.blit(self.body.x, self.body.y, self.sprite());
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

pub const BLAST_START_RADIUS: f32 = 4.0;
pub const BLAST_MAX_RADIUS: f32 = 10.0;

/// Expanding impact flash.  Grows one unit per frame and dies the frame after
/// it reaches full size.
#[derive(Clone, Debug, PartialEq)]
pub struct Blast {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alive: bool,
}

impl Blast {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            radius: BLAST_START_RADIUS,
            alive: true,
        }
    }

    pub fn update(&mut self) {
        if self.radius < BLAST_MAX_RADIUS {
            self.radius += 1.0;
        } else {
            self.alive = false;
        }
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        if self.radius >= BLAST_MAX_RADIUS {
            canvas.blit(self.x, self.y, sprites::BLAST_SPARK);
        } else {
            canvas.circle(
                self.x,
                self.y,
                self.radius,
                sprites::palette::WHITE,
                sprites::palette::YELLOW,
            );
        }
    }
}

// ── Game phases ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Title,
    Play,
    GameOver,
    Win,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Regular,
    Red,
    Bombardier,
    SuperBombardier,
}

/// The enemy phase of a run.  Cycles Regular → Red → Bombardier →
/// SuperBombardier → Regular until the run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Regular,
    Red,
    Bombardier,
    SuperBombardier,
}

impl Wave {
    pub fn index(self) -> u8 {
        match self {
            Wave::Regular => 0,
            Wave::Red => 1,
            Wave::Bombardier => 2,
            Wave::SuperBombardier => 3,
        }
    }

    pub fn next(self) -> Wave {
        match self {
            Wave::Regular => Wave::Red,
            Wave::Red => Wave::Bombardier,
            Wave::Bombardier => Wave::SuperBombardier,
            Wave::SuperBombardier => Wave::Regular,
        }
    }

    /// Variant placed by the formation generator during this wave.
    pub fn cluster_kind(self) -> Option<EnemyKind> {
        match self {
            Wave::Regular => Some(EnemyKind::Regular),
            Wave::Red => Some(EnemyKind::Red),
            Wave::Bombardier | Wave::SuperBombardier => None,
        }
    }

    /// Single boss craft fought during this wave.
    pub fn boss_kind(self) -> Option<EnemyKind> {
        match self {
            Wave::Bombardier => Some(EnemyKind::Bombardier),
            Wave::SuperBombardier => Some(EnemyKind::SuperBombardier),
            Wave::Regular | Wave::Red => None,
        }
    }

    pub fn is_boss(self) -> bool {
        self.boss_kind().is_some()
    }
}
