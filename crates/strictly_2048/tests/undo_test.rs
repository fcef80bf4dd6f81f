//! Single-level undo of the 2048 engine.

use strictly_2048::{Direction, EngineConfig, Game2048, UndoOutcome};

#[test]
fn test_undo_restores_merged_sources() {
    let config = EngineConfig::default().with_rows(1).with_cols(4);
    let mut game = Game2048::from_values(config, 8, &[2, 2, 4, 0]).expect("valid grid");

    game.move_tiles(Direction::Left).expect("move");
    assert_eq!(&game.grid().values()[..2], &[4, 4]);
    let score = game.score();

    assert_eq!(game.undo(), UndoOutcome::Restored { tiles: 3 });
    assert_eq!(game.grid().values(), vec![2, 2, 4, 0]);
    // Score and move count are kept.
    assert_eq!(game.score(), score);
    assert_eq!(game.move_count(), 1);
    assert!(!game.can_undo());
}

#[test]
fn test_undo_after_chained_slide() {
    let config = EngineConfig::default().with_rows(1).with_cols(4);
    let mut game = Game2048::from_values(config, 8, &[0, 2, 0, 2]).expect("valid grid");
    game.move_tiles(Direction::Left).expect("move");
    game.undo();
    assert_eq!(game.grid().values(), vec![0, 2, 0, 2]);
}

#[test]
fn test_undo_reconstructs_previous_grid() {
    let mut game = Game2048::with_seed(EngineConfig::default(), 31).expect("valid config");
    for turn in 0..120 {
        let direction = Direction::ALL[(turn * 3) % 4];
        let before = game.grid().values();
        if !game.move_tiles(direction).expect("move").moved {
            continue;
        }
        if game.is_over() {
            break;
        }
        assert!(matches!(game.undo(), UndoOutcome::Restored { .. }));
        assert_eq!(game.grid().values(), before, "turn {turn}");
        game.move_tiles(direction).expect("replay move");
    }
}

#[test]
fn test_second_undo_is_unavailable() {
    let config = EngineConfig::default().with_rows(1).with_cols(4);
    let mut game = Game2048::from_values(config, 8, &[2, 0, 0, 0]).expect("valid grid");
    game.move_tiles(Direction::Right).expect("move");
    game.undo();
    let after_first = game.grid().values();
    assert_eq!(game.undo(), UndoOutcome::Unavailable);
    assert_eq!(game.grid().values(), after_first);
}

#[test]
fn test_undo_before_any_move_is_unavailable() {
    let mut game = Game2048::with_seed(EngineConfig::default(), 5).expect("valid config");
    let before = game.grid().values();
    assert_eq!(game.undo(), UndoOutcome::Unavailable);
    assert_eq!(game.grid().values(), before);
}
