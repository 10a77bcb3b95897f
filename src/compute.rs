//! Simulation orchestrator.
//!
//! [`GameState`] owns every entity and advances them one frame per
//! [`GameState::update`].  All randomness comes through the injected RNG so
//! callers control determinism (tests use a seeded one).
//!
//! Within a PLAY frame the order is fixed: scene exit, player, trigger inputs,
//! collisions, entity motion, pruning, wave progression, victory.  Collisions
//! only mark entities dead; anything already dead is skipped by later pair
//! checks and removed in the pruning step.

use rand::Rng;

use crate::cluster::Cluster;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::entities::{Blast, Bullet, EnemyKind, Scene, Screen, Wave};
use crate::host::{Canvas, FrameContext, InputState};
use crate::player::Plane;
use crate::sprites::palette;

#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub scene: Scene,
    pub wave: Wave,
    pub score: u32,
    pub lives: u32,
    pub total_lives: u32,
    /// Set once the red-wave double-bullet reward has been handed out.
    pub bonus: bool,
    pub plane: Plane,
    pub cluster: Cluster,
    /// Bombardier or super bombardier.  Present exactly during boss waves.
    pub boss: Option<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub blasts: Vec<Blast>,
}

// ── Construction ─────────────────────────────────────────────────────────────

impl GameState {
    /// A fresh run waiting on the title screen.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let screen = config.screen();
        Self {
            scene: Scene::Title,
            wave: Wave::Regular,
            score: 0,
            lives: config.total_lives,
            total_lives: config.total_lives,
            bonus: false,
            plane: Plane::new(&screen, &config),
            cluster: Cluster::generate(EnemyKind::Regular, &screen, rng),
            boss: None,
            player_bullets: Vec::new(),
            blasts: Vec::new(),
            config,
        }
    }

    /// Throw away every entity and start over at wave 0.  Score is kept.
    fn restart<R: Rng>(&mut self, screen: &Screen, rng: &mut R) {
        self.boss = None;
        self.wave = Wave::Regular;
        self.bonus = false;
        self.lives = self.total_lives;
        self.player_bullets.clear();
        self.blasts.clear();
        self.plane = Plane::new(screen, &self.config);
        self.cluster = Cluster::generate(EnemyKind::Regular, screen, rng);
        self.scene = Scene::Play;
        log::info!("Restarted run, score carried over: {}", self.score);
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

impl GameState {
    /// Advance one frame of simulation and input.
    pub fn update<R: Rng>(&mut self, ctx: &FrameContext, input: &InputState, rng: &mut R) {
        match self.scene {
            Scene::Title => {
                if input.confirm {
                    self.scene = Scene::Play;
                    log::info!("Scene: TITLE -> PLAY");
                }
            }
            Scene::GameOver | Scene::Win => {
                if input.confirm {
                    self.restart(&ctx.screen, rng);
                }
            }
            Scene::Play => self.update_play(ctx, input, rng),
        }
    }

    fn update_play<R: Rng>(&mut self, ctx: &FrameContext, input: &InputState, rng: &mut R) {
        // ── 1. Death ends the run before anything else moves ─────────────────
        if !self.plane.body.alive {
            self.scene = Scene::GameOver;
            log::info!("Scene: PLAY -> GAME_OVER (score {})", self.score);
            return;
        }

        // ── 2. Player motion / flip clock ────────────────────────────────────
        self.plane.update(input, &ctx.screen);

        // ── 3. Trigger inputs ────────────────────────────────────────────────
        if input.fire && !self.plane.is_flipping() {
            let live = self.player_bullets.iter().filter(|b| b.is_alive()).count();
            if live < self.config.player_bullet_limit {
                self.plane.fire(&mut self.player_bullets);
            }
        }
        if input.flip && self.plane.start_flip() {
            log::debug!("Flip started with {} charges", self.plane.flips);
        }

        // ── 4. Collisions ────────────────────────────────────────────────────
        self.collide_cluster();
        self.collide_boss();

        // ── 5. Motion ────────────────────────────────────────────────────────
        for blast in self.blasts.iter_mut().filter(|b| b.alive) {
            blast.update();
        }
        for bullet in self.player_bullets.iter_mut().filter(|b| b.is_alive()) {
            bullet.update(&ctx.screen);
        }
        let player = self.plane.body.position();
        self.cluster.update(self.wave, ctx, player, rng);
        if let Some(boss) = self.boss.as_mut().filter(|b| b.is_alive()) {
            boss.aim(player);
            boss.update(ctx, rng);
        }

        // ── 6. Prune ─────────────────────────────────────────────────────────
        self.blasts.retain(|b| b.alive);
        self.player_bullets.retain(|b| b.is_alive());

        // ── 7. Wave progression ──────────────────────────────────────────────
        self.advance_wave(&ctx.screen, rng);
        debug_assert_eq!(self.wave.is_boss(), self.boss.is_some());

        // ── 8. Reaching the top edge wins ────────────────────────────────────
        if self.plane.body.y <= 0.0 {
            self.scene = Scene::Win;
            log::info!("Scene: PLAY -> WIN (score {})", self.score);
        }
    }

    // (cluster enemy, player bullet), (player, enemy bullet), (player, enemy).
    fn collide_cluster(&mut self) {
        let wave = self.wave;
        let GameState {
            cluster,
            player_bullets,
            blasts,
            plane,
            lives,
            score,
            bonus,
            ..
        } = self;

        let mut red_down = false;
        for enemy in cluster.active_mut(wave).filter(|e| e.is_alive()) {
            for bullet in player_bullets.iter_mut().filter(|b| b.is_alive()) {
                if enemy.body.overlaps(&bullet.body) {
                    bullet.body.alive = false;
                    enemy.take_hit(bullet.damage);
                    *score += enemy.points();
                    blasts.push(Blast::new(bullet.body.x, bullet.body.y));
                    red_down |= enemy.kind() == EnemyKind::Red;
                    break;
                }
            }
        }
        if red_down && !*bonus && cluster.live_count(EnemyKind::Red) == 0 {
            *bonus = true;
            plane.grant_double_bullet();
            log::debug!("Red wave cleared, double bullet granted");
        }

        for enemy in cluster.active_mut(wave) {
            for bullet in enemy.bullets.iter_mut().filter(|b| b.is_alive()) {
                if plane.body.overlaps(&bullet.body) {
                    bullet.body.alive = false;
                    hit_player(plane, lives, blasts);
                }
            }
            if enemy.is_alive() && plane.body.overlaps(&enemy.body) {
                enemy.body.alive = false;
                hit_player(plane, lives, blasts);
            }
        }
    }

    // (boss, player bullet), (player, boss bullet), (player, boss).
    fn collide_boss(&mut self) {
        if !self.wave.is_boss() {
            return;
        }
        let wave = self.wave;
        let GameState {
            boss,
            player_bullets,
            blasts,
            plane,
            lives,
            score,
            ..
        } = self;
        let Some(boss) = boss.as_mut() else {
            panic!("{wave:?} wave is running without its boss");
        };

        for bullet in player_bullets.iter_mut().filter(|b| b.is_alive()) {
            if !boss.is_alive() {
                break;
            }
            if boss.body.overlaps(&bullet.body) {
                bullet.body.alive = false;
                if boss.take_hit(bullet.damage) {
                    *score += boss.points();
                    log::debug!("{:?} destroyed, +{}", boss.kind(), boss.points());
                } else {
                    log::debug!("{:?} hit, health {:?}", boss.kind(), boss.health());
                }
                let (cx, cy) = boss.body.center();
                blasts.push(Blast::new(cx, cy));
            }
        }

        for bullet in boss.bullets.iter_mut().filter(|b| b.is_alive()) {
            if plane.body.overlaps(&bullet.body) {
                bullet.body.alive = false;
                hit_player(plane, lives, blasts);
            }
        }

        if boss.is_alive() && plane.body.overlaps(&boss.body) {
            boss.body.alive = false;
            hit_player(plane, lives, blasts);
        }
    }

    fn advance_wave<R: Rng>(&mut self, screen: &Screen, rng: &mut R) {
        let cleared = match self.wave {
            Wave::Regular | Wave::Red => self.cluster.is_empty(),
            Wave::Bombardier | Wave::SuperBombardier => match &self.boss {
                Some(boss) => !boss.is_alive(),
                None => panic!("{:?} wave is running without its boss", self.wave),
            },
        };
        if cleared {
            self.enter_wave(self.wave.next(), screen, rng);
        }
    }

    fn enter_wave<R: Rng>(&mut self, wave: Wave, screen: &Screen, rng: &mut R) {
        log::info!("Wave {} -> {} ({:?})", self.wave.index(), wave.index(), wave);
        self.wave = wave;
        self.boss = wave.boss_kind().map(|kind| Enemy::new(kind, 0.0, 0.0));
        self.cluster = match wave.cluster_kind() {
            Some(kind) => Cluster::generate(kind, screen, rng),
            None => Cluster::default(),
        };
        if wave == Wave::Regular {
            self.bonus = false;
        }
    }
}

/// Bullet or body contact with the player.  A flip shrugs it off; otherwise a
/// life is spent, and with none left the craft is destroyed.
fn hit_player(plane: &mut Plane, lives: &mut u32, blasts: &mut Vec<Blast>) {
    blasts.push(Blast::new(plane.body.x, plane.body.y));
    if plane.is_flipping() || !plane.body.alive {
        return;
    }
    if *lives > 0 {
        *lives -= 1;
    } else {
        plane.body.alive = false;
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

impl GameState {
    /// Render the current state.  Never mutates.
    pub fn draw<C: Canvas>(&self, ctx: &FrameContext, canvas: &mut C) {
        self.draw_hud(ctx, canvas);

        match self.scene {
            Scene::Title => {
                draw_title(ctx, canvas);
                self.plane.draw(canvas);
            }
            Scene::Play => {
                if self.plane.body.alive {
                    self.plane.draw(canvas);
                }
                for blast in &self.blasts {
                    blast.draw(canvas);
                }
                for bullet in self.player_bullets.iter().filter(|b| b.is_alive()) {
                    bullet.draw(canvas);
                }
                if let Some(boss) = self.boss.as_ref().filter(|b| b.is_alive()) {
                    boss.draw(canvas);
                }
                self.cluster.draw(self.wave, canvas);
            }
            Scene::GameOver => draw_banner(ctx, canvas, "GAME OVER", 18.0, palette::WHITE),
            Scene::Win => draw_banner(
                ctx,
                canvas,
                "CONGRATULATIONS! YOU HAVE WON",
                50.0,
                blink(ctx.frame),
            ),
        }
    }

    fn draw_hud<C: Canvas>(&self, ctx: &FrameContext, canvas: &mut C) {
        let screen = &ctx.screen;
        canvas.text(0.0, 0.0, &format!("SCORE: {}", self.score), palette::WHITE);
        canvas.text(
            screen.width - 40.0,
            0.0,
            &format!("LIVES: {}/{}", self.lives, self.total_lives),
            palette::WHITE,
        );
        canvas.text(
            0.0,
            screen.height - 10.0,
            &format!("FLIPS: {}/{}", self.plane.flips, self.plane.total_flips),
            palette::WHITE,
        );
    }
}

fn blink(frame: u64) -> u8 {
    (frame % palette::COUNT as u64) as u8
}

fn draw_title<C: Canvas>(ctx: &FrameContext, canvas: &mut C) {
    let screen = &ctx.screen;
    canvas.text(
        screen.width / 2.0 - 15.0,
        screen.height / 2.0 - 10.0,
        "WELCOME",
        blink(ctx.frame),
    );
    draw_press_enter(screen, canvas);
}

fn draw_banner<C: Canvas>(ctx: &FrameContext, canvas: &mut C, text: &str, offset: f32, color: u8) {
    let screen = &ctx.screen;
    canvas.text(
        screen.width / 2.0 - offset,
        screen.height / 2.0 - 10.0,
        text,
        color,
    );
    draw_press_enter(screen, canvas);
}

fn draw_press_enter<C: Canvas>(screen: &Screen, canvas: &mut C) {
    canvas.text(
        screen.width - 150.0,
        screen.height - 50.0,
        "PRESS ENTER",
        palette::GREY,
    );
}
