use std::io::ErrorKind;

use galaxy_king::config::GameConfig;

#[test]
fn defaults_match_arcade_tuning() {
    let c = GameConfig::default();
    assert_eq!(c.fps, 30);
    assert_eq!(c.total_lives, 3);
    assert_eq!(c.player_bullet_limit, 5);
    assert_eq!(c.total_flips, 6);
    assert_eq!(c.flip_frame_rate, 20);
    assert_eq!(c.screen().width, 256.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = GameConfig::from_json(r#"{ "fps": 60, "total_lives": 5 }"#).unwrap();
    assert_eq!(c.fps, 60);
    assert_eq!(c.total_lives, 5);
    assert_eq!(c.total_flips, 6);
}

#[test]
fn zero_fps_is_rejected() {
    let err = GameConfig::from_json(r#"{ "fps": 0 }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn tiny_screen_is_rejected() {
    let err = GameConfig::from_json(r#"{ "screen_width": 64.0 }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(GameConfig::from_json("{ fps: ").is_err());
    assert!(GameConfig::from_json(r#"{ "fps": "fast" }"#).is_err());
}

#[test]
fn frame_duration_follows_fps() {
    let c = GameConfig::from_json(r#"{ "fps": 50 }"#).unwrap();
    assert_eq!(c.frame_duration().as_millis(), 20);
}
