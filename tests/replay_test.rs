//! Headless replays of 2048 games.

use strictly_2048::{Direction, EngineConfig};
use strictly_grids::{ReplayError, parse_moves, replay};

#[test]
fn test_parse_mixed_move_names() {
    let moves = parse_moves("up, ArrowLeft,j,,Right").expect("valid moves");
    assert_eq!(
        moves,
        vec![Direction::Up, Direction::Left, Direction::Down, Direction::Right]
    );
    assert!(parse_moves("").expect("empty list").is_empty());
}

#[test]
fn test_unknown_move_is_rejected() {
    match parse_moves("up,diagonal") {
        Err(ReplayError::UnknownMove(name)) => assert_eq!(name, "diagonal"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_same_seed_same_game() {
    let moves = parse_moves("up,left,down,right,up,up,left").expect("valid moves");
    let first = replay(EngineConfig::default(), 42, &moves).expect("replay");
    let second = replay(EngineConfig::default(), 42, &moves).expect("replay");
    assert_eq!(first, second);
}

#[test]
fn test_no_moves_returns_start_position() {
    let snapshot = replay(EngineConfig::default(), 1, &[]).expect("replay");
    assert_eq!(snapshot.cells.iter().flatten().count(), 2);
    assert_eq!(snapshot.move_count, 0);
    assert!(!snapshot.can_undo);
}

#[test]
fn test_invalid_config_is_an_engine_error() {
    let config = EngineConfig::default().with_rows(0);
    assert!(matches!(
        replay(config, 1, &[Direction::Up]),
        Err(ReplayError::Engine(_))
    ));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let snapshot = replay(EngineConfig::default(), 3, &[Direction::Left]).expect("replay");
    let json = serde_json::to_value(&snapshot).expect("serializable");
    assert_eq!(json["cells"].as_array().map(Vec::len), Some(16));
    assert_eq!(json["rows"], 4);
}
