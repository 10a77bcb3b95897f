//! Source regions in the sprite sheet and the palette indices the game draws
//! text and effects with.  Hosts map these to whatever they can display.

/// A rectangle in one of the sprite sheet's image banks.  The destination
/// size of a blit is the region's own size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteRegion {
    pub bank: u8,
    pub u: u16,
    pub v: u16,
    pub w: u16,
    pub h: u16,
}

impl SpriteRegion {
    pub const fn new(bank: u8, u: u16, v: u16, w: u16, h: u16) -> Self {
        Self { bank, u, v, w, h }
    }
}

// ── Player craft ──────────────────────────────────────────────────────────────

pub const PLANE: SpriteRegion = SpriteRegion::new(0, 0, 0, 32, 32);
pub const PLANE_BANK_LEFT: SpriteRegion = SpriteRegion::new(0, 8, 34, 16, 32);
pub const PLANE_UNDERSIDE: SpriteRegion = SpriteRegion::new(0, 0, 96, 32, 32);
pub const PLANE_BANK_RIGHT: SpriteRegion = SpriteRegion::new(0, 8, 64, 16, 32);

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const REGULAR_ENEMY: SpriteRegion = SpriteRegion::new(0, 32, 0, 24, 24);
pub const RED_ENEMY: SpriteRegion = SpriteRegion::new(0, 32, 32, 32, 24);
pub const BOMBARDIER: SpriteRegion = SpriteRegion::new(0, 32, 56, 32, 24);
pub const SUPER_BOMBARDIER: SpriteRegion = SpriteRegion::new(0, 32, 88, 32, 32);

// ── Projectiles & effects ─────────────────────────────────────────────────────

pub const PLAYER_BULLET: SpriteRegion = SpriteRegion::new(0, 69, 85, 6, 6);
pub const ENEMY_BULLET: SpriteRegion = SpriteRegion::new(0, 69, 101, 6, 6);
pub const BLAST_SPARK: SpriteRegion = SpriteRegion::new(1, 0, 0, 8, 8);

/// 16-colour palette indices.
pub mod palette {
    pub const WHITE: u8 = 7;
    pub const YELLOW: u8 = 10;
    pub const GREY: u8 = 13;
    pub const COUNT: u8 = 16;
}
