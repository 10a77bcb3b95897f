//! Formation generator.
//!
//! Places a batch of same-variant enemies with a random relative walk.  The
//! placement is one-shot: after generation every craft flies on its own.

use rand::Rng;

use crate::enemy::Enemy;
use crate::entities::{Direction, EnemyKind, Screen, Wave};
use crate::host::{Canvas, FrameContext};

/// Side of one formation cell.
pub const CELL_SIZE: f32 = 24.0;
pub const MIN_CLUSTER_SIZE: usize = 2;
pub const MAX_CLUSTER_SIZE: usize = 7;
/// Direction draws allowed per requested craft before the walk gives up.
const DRAWS_PER_SLOT: usize = 8;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cluster {
    pub enemies: Vec<Enemy>,
    /// Size drawn for this formation.
    pub size: usize,
}

impl Cluster {
    /// Generate a formation of `kind`.
    ///
    /// The first craft sits at a random anchor such that its cell starts in the
    /// upper-left quadrant.  Each further craft steps from the previous
    /// position: `direction * previous + cell`, clamped to the screen width and
    /// the top half.  A step that lands exactly on an occupied position is
    /// skipped and the walk draws again from there.
    pub fn generate<R: Rng>(kind: EnemyKind, screen: &Screen, rng: &mut R) -> Self {
        let max_x = (screen.width - CELL_SIZE).max(0.0);
        let max_y = (screen.height / 2.0 - CELL_SIZE).max(0.0);
        let anchor_x = rng.gen_range(0..=(screen.width / 2.0 - CELL_SIZE).max(0.0) as u32) as f32;
        let anchor_y = rng.gen_range(0..=max_y as u32) as f32;
        let size = rng.gen_range(MIN_CLUSTER_SIZE..=MAX_CLUSTER_SIZE);

        let mut enemies = vec![Enemy::new(kind, anchor_x, anchor_y)];
        let mut previous = (anchor_x, anchor_y);
        let mut skipped = 0;

        for _ in 0..size * DRAWS_PER_SLOT {
            if enemies.len() == size {
                break;
            }
            let direction = Direction::COMPASS[rng.gen_range(0..Direction::COMPASS.len())];
            let x = (direction.x() * previous.0 + CELL_SIZE).clamp(0.0, max_x);
            let y = (direction.y() * previous.1 + CELL_SIZE).clamp(0.0, max_y);
            previous = (x, y);

            if occupied(&enemies, x, y) {
                skipped += 1;
                continue;
            }
            enemies.push(Enemy::new(kind, x, y));
        }

        log::debug!(
            "Generated {:?} cluster: size {}, placed {}, skipped {} duplicates",
            kind,
            size,
            enemies.len(),
            skipped
        );
        Self { enemies, size }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn live_count(&self, kind: EnemyKind) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.is_alive() && e.kind() == kind)
            .count()
    }

    /// Enemies that belong to `wave`.
    pub fn active_mut(&mut self, wave: Wave) -> impl Iterator<Item = &mut Enemy> {
        let kind = wave.cluster_kind();
        self.enemies
            .iter_mut()
            .filter(move |e| Some(e.kind()) == kind)
    }

    /// Aim and advance the live enemies of `wave`, then drop the dead.
    pub fn update<R: Rng>(
        &mut self,
        wave: Wave,
        ctx: &FrameContext,
        player: (f32, f32),
        rng: &mut R,
    ) {
        for enemy in self.active_mut(wave).filter(|e| e.is_alive()) {
            enemy.aim(player);
            enemy.update(ctx, rng);
        }
        self.enemies.retain(|e| e.is_alive());
    }

    pub fn draw<C: Canvas>(&self, wave: Wave, canvas: &mut C) {
        let kind = wave.cluster_kind();
        for enemy in self
            .enemies
            .iter()
            .filter(|e| e.is_alive() && Some(e.kind()) == kind)
        {
            enemy.draw(canvas);
        }
    }
}

fn occupied(enemies: &[Enemy], x: f32, y: f32) -> bool {
    enemies
        .iter()
        .any(|e| e.body.x.to_bits() == x.to_bits() && e.body.y.to_bits() == y.to_bits())
}
