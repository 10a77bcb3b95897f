use galaxy_king::config::GameConfig;
use galaxy_king::entities::*;
use galaxy_king::host::InputState;
use galaxy_king::player::*;

fn screen() -> Screen {
    Screen::new(256.0, 256.0)
}

fn make_plane() -> Plane {
    Plane::new(&screen(), &GameConfig::default())
}

fn holding(f: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::default();
    f(&mut input);
    input
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn plane_starts_centred_above_bottom_margin() {
    let p = make_plane();
    assert_eq!(p.body.position(), (112.0, 154.0));
    assert_eq!(p.flips, 6);
    assert!(!p.is_flipping());
    assert!(!p.double_bullet);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn diagonal_input_moves_both_axes() {
    let mut p = make_plane();
    let input = holding(|i| {
        i.left = true;
        i.up = true;
    });
    p.update(&input, &screen());
    assert_eq!(p.body.position(), (104.0, 146.0));
}

#[test]
fn move_refused_at_left_edge() {
    let mut p = make_plane();
    p.body.x = 4.0;
    p.update(&holding(|i| i.left = true), &screen());
    assert_eq!(p.body.x, 4.0);
}

#[test]
fn move_refused_at_right_and_bottom_edges() {
    let mut p = make_plane();
    p.body.x = 220.0;
    p.body.y = 220.0;
    let input = holding(|i| {
        i.right = true;
        i.down = true;
    });
    p.update(&input, &screen());
    assert_eq!(p.body.position(), (220.0, 220.0));
}

#[test]
fn craft_can_climb_past_top_edge() {
    let mut p = make_plane();
    p.body.y = 8.0;
    p.update(&holding(|i| i.up = true), &screen());
    assert_eq!(p.body.y, 0.0);
    p.update(&holding(|i| i.up = true), &screen());
    assert_eq!(p.body.y, -8.0);
}

#[test]
fn no_steering_while_flipping() {
    let mut p = make_plane();
    assert!(p.start_flip());
    p.update(&holding(|i| i.left = true), &screen());
    assert_eq!(p.body.x, 112.0);
}

// ── Flip ──────────────────────────────────────────────────────────────────────

#[test]
fn flip_runs_four_phases_then_spends_a_charge() {
    let mut p = make_plane();
    assert!(p.start_flip());
    assert_eq!(p.flip_duration(), 80);
    assert_eq!(p.flip_phase(), Some(FlipPhase::BankLeft));

    let idle = InputState::default();
    let mut phases = Vec::new();
    for _ in 0..79 {
        p.update(&idle, &screen());
        let phase = p.flip_phase().unwrap();
        if phases.last() != Some(&phase) {
            phases.push(phase);
        }
    }
    assert_eq!(
        phases,
        vec![
            FlipPhase::BankLeft,
            FlipPhase::Underside,
            FlipPhase::BankRight,
            FlipPhase::Upright
        ]
    );
    assert!(p.is_flipping());
    assert_eq!(p.flips, 6);

    p.update(&idle, &screen());
    assert!(!p.is_flipping());
    assert_eq!(p.flips, 5);
    assert_eq!(p.sprite(), galaxy_king::sprites::PLANE);
}

#[test]
fn flip_refused_while_flipping_or_without_charges() {
    let mut p = make_plane();
    assert!(p.start_flip());
    assert!(!p.start_flip());

    let mut empty = make_plane();
    empty.flips = 0;
    assert!(!empty.start_flip());
    assert!(!empty.is_flipping());
}

#[test]
fn flip_sprites_follow_phase() {
    let mut p = make_plane();
    p.start_flip();
    assert_eq!(p.sprite(), galaxy_king::sprites::PLANE_BANK_LEFT);
    p.maneuver = Maneuver::Flipping { ticks_left: 50 };
    assert_eq!(p.sprite(), galaxy_king::sprites::PLANE_UNDERSIDE);
    p.maneuver = Maneuver::Flipping { ticks_left: 40 };
    assert_eq!(p.sprite(), galaxy_king::sprites::PLANE_BANK_RIGHT);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn single_shot_leaves_from_head() {
    let mut p = make_plane();
    let mut bullets = Vec::new();
    p.fire(&mut bullets);
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].body.position(), p.head());
    assert_eq!(bullets[0].direction, Direction::UP);
}

#[test]
fn double_bullet_runs_out_and_resets() {
    let mut p = make_plane();
    p.grant_double_bullet();
    let (hx, hy) = p.head();

    let mut bullets = Vec::new();
    p.fire(&mut bullets);
    assert_eq!(bullets.len(), 2);
    assert_eq!(bullets[0].body.position(), (hx + 5.0, hy));
    assert_eq!(bullets[1].body.position(), (hx - 5.0, hy));
    assert_eq!(p.double_bullet_shots, 9);

    for _ in 0..9 {
        p.fire(&mut bullets);
    }
    assert_eq!(bullets.len(), 20);
    assert!(!p.double_bullet);
    assert_eq!(p.double_bullet_shots, 10);

    p.fire(&mut bullets);
    assert_eq!(bullets.len(), 21);
}
