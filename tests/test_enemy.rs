use galaxy_king::enemy::*;
use galaxy_king::entities::*;
use galaxy_king::host::FrameContext;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn screen() -> Screen {
    Screen::new(256.0, 256.0)
}

fn ctx(frame: u64) -> FrameContext {
    FrameContext::new(frame, screen())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn heading(enemy: &Enemy) -> Direction {
    match enemy.behavior {
        Behavior::Bombardier { heading, .. } | Behavior::SuperBombardier { heading, .. } => heading,
        _ => panic!("not a boss"),
    }
}

// ── Variant tables ────────────────────────────────────────────────────────────

#[test]
fn new_enemy_takes_variant_size_and_health() {
    let e = Enemy::new(EnemyKind::SuperBombardier, 10.0, 20.0);
    assert_eq!((e.body.width, e.body.height), (32.0, 32.0));
    assert_eq!(e.health(), Some(100));
    assert_eq!(e.points(), 50);
    assert_eq!(EnemyKind::SuperBombardier.max_health(), e.health());

    let r = Enemy::new(EnemyKind::Regular, 0.0, 0.0);
    assert_eq!((r.body.width, r.body.height), (24.0, 24.0));
    assert_eq!(r.health(), None);
    assert_eq!(r.points(), 5);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn bombardier_dies_on_third_hit() {
    let mut boss = Enemy::new(EnemyKind::Bombardier, 100.0, 20.0);
    assert!(!boss.take_hit(BULLET_DAMAGE));
    assert!(!boss.take_hit(BULLET_DAMAGE));
    assert!(boss.is_alive());
    assert_eq!(boss.health(), Some(10));
    assert!(boss.take_hit(BULLET_DAMAGE));
    assert!(!boss.is_alive());
    assert_eq!(boss.health(), Some(0));
}

#[test]
fn boss_health_saturates_at_zero() {
    let mut boss = Enemy::new(EnemyKind::Bombardier, 100.0, 20.0);
    assert!(boss.take_hit(1000));
    assert_eq!(boss.health(), Some(0));
}

#[test]
fn regular_dies_on_first_hit() {
    let mut e = Enemy::new(EnemyKind::Regular, 0.0, 0.0);
    assert!(e.take_hit(BULLET_DAMAGE));
    assert!(!e.is_alive());
}

// ── Aiming & firing ───────────────────────────────────────────────────────────

#[test]
fn regular_fires_aimed_bullet_on_cadence() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Regular, 10.0, 10.0);
    e.aim((200.0, 200.0));
    assert_eq!(e.player_direction, Direction::DOWN_RIGHT);

    e.update(&ctx(1), &mut rng);
    assert!(e.bullets.is_empty());

    e.update(&ctx(20), &mut rng);
    assert_eq!(e.bullets.len(), 1);
    assert_eq!(e.bullets[0].direction, Direction::DOWN_RIGHT);
    assert_eq!(e.bullets[0].owner, BulletOwner::Enemy);
}

#[test]
fn super_bombardier_fires_radially_and_ignores_aim() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::new(EnemyKind::SuperBombardier, 100.0, 50.0);
    boss.aim((0.0, 0.0));
    assert_eq!(boss.player_direction, Direction::NONE);

    boss.update(&ctx(0), &mut rng);
    assert_eq!(boss.bullets.len(), 8);
    let mut headings: Vec<Direction> = boss.bullets.iter().map(|b| b.direction).collect();
    let mut compass = Direction::COMPASS.to_vec();
    headings.sort_by_key(|d| (d.dx, d.dy));
    compass.sort_by_key(|d| (d.dx, d.dy));
    assert_eq!(headings, compass);
    assert!(boss.bullets.iter().all(|b| b.speed == 2.0));
}

#[test]
fn dead_bullets_are_pruned() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Red, 100.0, 100.0);
    e.bullets.push(Bullet::enemy(100.0, 2.0, Direction::UP, 5.0));
    e.bullets.push(Bullet::enemy(100.0, 100.0, Direction::DOWN, 5.0));
    e.update(&ctx(1), &mut rng);
    assert_eq!(e.bullets.len(), 1);
    assert_eq!(e.bullets[0].body.y, 105.0);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn regular_drifts_right_and_down() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Regular, 10.0, 10.0);
    e.update(&ctx(1), &mut rng);
    assert_eq!(e.body.position(), (11.0, 11.0));
}

#[test]
fn regular_commits_once_past_midpoint() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Regular, 10.0, 110.0);
    e.update(&ctx(1), &mut rng);
    let Behavior::Regular { descending, committed } = e.behavior else {
        panic!("expected a regular enemy");
    };
    assert!(committed);
    let expected_y = if descending { 111.0 } else { 109.0 };
    assert_eq!(e.body.y, expected_y);

    e.update(&ctx(2), &mut rng);
    let Behavior::Regular { descending: again, .. } = e.behavior else {
        panic!("expected a regular enemy");
    };
    assert_eq!(again, descending);
}

#[test]
fn regular_dies_leaving_screen() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Regular, 232.0, 10.0);
    e.update(&ctx(1), &mut rng);
    assert!(!e.is_alive());
}

#[test]
fn red_survives_leaving_screen() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Red, 250.0, 10.0);
    e.update(&ctx(200), &mut rng);
    assert!(e.body.out_of_bounds(&screen()));
    assert!(e.is_alive());
}

#[test]
fn bombardier_turns_right_at_band_bottom() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::new(EnemyKind::Bombardier, 0.0, 103.0);
    assert_eq!(heading(&boss), Direction::DOWN);
    boss.update(&ctx(1), &mut rng);
    assert_eq!(boss.body.y, 105.0);
    assert_eq!(heading(&boss), Direction::RIGHT);

    boss.update(&ctx(2), &mut rng);
    assert_eq!(boss.body.position(), (2.0, 105.0));
}

#[test]
fn bombardier_patrols_full_square() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::new(EnemyKind::Bombardier, 0.0, 0.0);
    let mut seen = vec![heading(&boss)];
    for frame in 1..1000 {
        boss.update(&ctx(frame), &mut rng);
        let h = heading(&boss);
        if seen.last() != Some(&h) {
            seen.push(h);
        }
    }
    assert!(boss.is_alive());
    assert_eq!(
        &seen[..5],
        &[
            Direction::DOWN,
            Direction::RIGHT,
            Direction::UP,
            Direction::LEFT,
            Direction::DOWN
        ]
    );
}

#[test]
fn super_bombardier_stays_on_screen() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::new(EnemyKind::SuperBombardier, 0.0, 0.0);
    for frame in 1..3000 {
        boss.update(&ctx(frame), &mut rng);
        assert!(!boss.body.out_of_bounds(&screen()));
        assert!(boss.is_alive());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn red_enemy_stays_on_its_circle(frame in 0u64..100_000, steps in 1usize..50) {
        let mut rng = seeded_rng();
        let mut e = Enemy::new(EnemyKind::Red, 100.0, 60.0);
        for step in 0..steps as u64 {
            let frame = frame + step;
            e.update(&ctx(frame), &mut rng);
            let (cx, cy) = e.orbit_center(frame, &screen()).unwrap();
            let dx = e.body.x - cx;
            let dy = e.body.y - cy;
            let r2 = dx * dx + dy * dy;
            prop_assert!((r2 - RED_ORBIT_RADIUS * RED_ORBIT_RADIUS).abs() < 0.5);
        }
    }
}
