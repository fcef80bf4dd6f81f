//! Move, merge, spawn and end-of-game behaviour of the 2048 engine.

use strictly_2048::{Direction, EngineConfig, Game2048, GameEvent, MoveOutcome, Position};

fn config(rows: usize, cols: usize) -> EngineConfig {
    EngineConfig::default().with_rows(rows).with_cols(cols)
}

fn game(values: &[u32]) -> Game2048 {
    Game2048::from_values(config(4, 4), 17, values).expect("valid 4x4 grid")
}

fn row(game: &Game2048, y: usize) -> Vec<u32> {
    game.grid().values()[y * 4..(y + 1) * 4].to_vec()
}

#[test]
fn test_sum_is_conserved_apart_from_spawn() {
    let mut game = Game2048::with_seed(EngineConfig::default(), 2024).expect("valid config");
    for turn in 0..300 {
        let direction = Direction::ALL[turn % 4];
        let before = game.grid().total_value();
        let outcome = game.move_tiles(direction).expect("move");
        let after = game.grid().total_value();
        match outcome.spawned() {
            Some(spawned) => assert_eq!(after - u64::from(spawned.value), before),
            None => assert_eq!(after, before),
        }
        if game.is_over() {
            break;
        }
    }
}

#[test]
fn test_tile_merges_once_per_move() {
    let mut game = game(&[2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let outcome = game.move_tiles(Direction::Right).expect("move");
    assert_eq!(&row(&game, 0)[2..], &[4, 4]);
    assert_eq!(outcome.merges().count(), 2);
    assert_eq!(outcome.score_gained, 8);
    assert_eq!(game.score(), 8);
}

#[test]
fn test_blocked_move_changes_nothing() {
    // No horizontal pair is equal, but columns 0 and 1 hold vertical pairs.
    let values = [
        2, 4, 8, 16, //
        2, 4, 16, 8, //
        8, 16, 2, 4, //
        16, 8, 4, 2, //
    ];
    let mut game = game(&values);
    let outcome = game.move_tiles(Direction::Left).expect("move");
    assert_eq!(outcome, MoveOutcome::unchanged());
    assert_eq!(game.grid().values(), values.to_vec());
    assert_eq!(game.score(), 0);
    assert_eq!(game.move_count(), 0);
    assert!(!game.can_undo());
    assert!(!game.is_over());

    let vertical = game.move_tiles(Direction::Up).expect("move");
    assert!(vertical.moved);
    assert_eq!(game.move_count(), 1);
}

#[test]
fn test_tiles_stay_in_bounds() {
    let mut game = Game2048::with_seed(config(3, 5), 99).expect("valid config");
    for turn in 0..200 {
        game.move_tiles(Direction::ALL[(turn * 7) % 4]).expect("move");
        for tile in game.grid().tiles() {
            let position = tile.position();
            assert!(position.x < 5 && position.y < 3, "{position} escaped the grid");
        }
        let snapshot = game.snapshot();
        for (index, cell) in snapshot.cells.iter().enumerate() {
            if let Some(tile) = cell {
                assert_eq!(tile.position, Position::new(index % 5, index / 5));
            }
        }
    }
}

#[test]
fn test_reaching_win_value_wins() {
    let mut values = [0; 16];
    values[0] = 1024;
    values[1] = 1024;
    let mut game = game(&values);
    let outcome = game.move_tiles(Direction::Left).expect("move");
    assert!(game.is_won());
    assert!(outcome.events.contains(&GameEvent::Won { value: 2048 }));
}

#[test]
fn test_merging_below_win_value_does_not_win() {
    let mut values = [0; 16];
    values[0] = 512;
    values[1] = 512;
    let mut game = game(&values);
    game.move_tiles(Direction::Left).expect("move");
    assert!(!game.is_won());
    assert_eq!(game.grid().max_value(), 1024);
}

#[test]
fn test_locked_grid_ends_game() {
    let values = [
        2, 4, 2, 4, //
        4, 2, 4, 2, //
        8, 16, 32, 64, //
        4, 8, 4, 0, //
    ];
    let config = config(4, 4).with_two_probability(1.0);
    let mut game = Game2048::from_values(config, 3, &values).expect("valid grid");

    let outcome = game.move_tiles(Direction::Right).expect("move");
    assert!(outcome.moved);
    assert!(outcome.ended_game());
    assert!(game.is_over());
    assert_eq!(row(&game, 3), vec![2, 4, 8, 4]);

    let frozen = game.grid().values();
    for direction in Direction::ALL {
        let again = game.move_tiles(direction).expect("move");
        assert!(!again.moved);
        assert_eq!(game.grid().values(), frozen);
    }
    assert_eq!(game.move_count(), 1);
}

#[test]
fn test_pair_slides_right_and_merges() {
    let mut values = [0; 16];
    values[0] = 2;
    values[1] = 2;
    let mut game = game(&values);

    let outcome = game.move_tiles(Direction::Right).expect("move");
    let merged = game.grid().get(Position::new(3, 0)).expect("merged tile");
    assert_eq!(merged.value(), 4);
    assert_eq!(game.score(), 4);
    assert_eq!(game.best_score(), 4);
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.grid().tiles().count(), 2);

    let spawned = outcome.spawned().expect("spawned tile");
    assert_ne!(spawned.position, Position::new(3, 0));
    assert!(matches!(spawned.value, 2 | 4));
}

#[test]
fn test_unequal_neighbours_do_not_merge() {
    let mut values = [0; 16];
    values[..4].copy_from_slice(&[2, 4, 2, 0]);
    let mut game = game(&values);

    let outcome = game.move_tiles(Direction::Left).expect("move");
    assert!(!outcome.moved);
    assert_eq!(row(&game, 0), vec![2, 4, 2, 0]);
    assert_eq!(game.score(), 0);
    assert_eq!(game.move_count(), 0);
}

#[test]
fn test_best_score_survives_restart() {
    let mut values = [0; 16];
    values[0] = 64;
    values[4] = 64;
    let mut game = game(&values);
    game.move_tiles(Direction::Up).expect("move");
    assert_eq!(game.best_score(), 128);

    game.restart().expect("restart");
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 128);
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.grid().tiles().count(), 2);
}
