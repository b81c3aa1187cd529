//! Exhaustive checks of the minimax solver over the full game tree

use oxo::{
    Board, GameStatus, Move, Player, PolicyTable, Solver,
    agents::{MatchConfig, OptimalAgent, RandomAgent, run_match},
    solver::{analyze, best_move, evaluate, reachable_boards},
};

const REACHABLE_POSITIONS: usize = 5_478;
const TERMINAL_POSITIONS: usize = 958;
const TERMINAL_X_WINS: usize = 626;
const TERMINAL_O_WINS: usize = 316;
const TERMINAL_DRAWS: usize = 16;
const POSITIONS_PER_PLY: [usize; 10] = [1, 9, 72, 252, 756, 1_260, 1_520, 1_140, 390, 78];

#[test]
fn verify_reachable_position_counts() {
    let boards = reachable_boards();
    assert_eq!(boards.len(), REACHABLE_POSITIONS);

    let mut histogram = [0usize; 10];
    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;
    for board in &boards {
        histogram[board.occupied_count()] += 1;
        match board.status() {
            GameStatus::Won(Player::X) => x_wins += 1,
            GameStatus::Won(Player::O) => o_wins += 1,
            GameStatus::Draw => draws += 1,
            GameStatus::InProgress => {}
        }
    }

    assert_eq!(histogram, POSITIONS_PER_PLY);
    assert_eq!(x_wins, TERMINAL_X_WINS);
    assert_eq!(o_wins, TERMINAL_O_WINS);
    assert_eq!(draws, TERMINAL_DRAWS);
    assert_eq!(x_wins + o_wins + draws, TERMINAL_POSITIONS);
}

#[test]
fn verify_policy_table_is_minimax_consistent() {
    let table = PolicyTable::solve();
    let boards = reachable_boards();
    assert_eq!(table.len(), boards.len());

    for board in &boards {
        let entry = table
            .get(board)
            .expect("every reachable position has an entry");

        let Some(player) = board.current_player() else {
            assert_eq!(entry.value, board.utility());
            assert!(
                entry.optimal_moves.is_empty(),
                "terminal positions carry no moves"
            );
            continue;
        };

        // One step of lookahead over the table must reproduce the stored
        // value, and the stored moves must be exactly the ties in row-major
        // order.
        let child_values: Vec<(Move, i32)> = board
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let next = board.apply_move(mv).unwrap();
                let child = table.get(&next).expect("children of reachable are reachable");
                (mv, child.value)
            })
            .collect();

        let best = match player {
            Player::X => child_values.iter().map(|&(_, v)| v).max().unwrap(),
            Player::O => child_values.iter().map(|&(_, v)| v).min().unwrap(),
        };
        assert_eq!(
            entry.value,
            best,
            "value mismatch at '{}'",
            board.encode()
        );

        let expected_moves: Vec<Move> = child_values
            .iter()
            .filter(|&&(_, v)| v == best)
            .map(|&(mv, _)| mv)
            .collect();
        assert_eq!(
            entry.optimal_moves,
            expected_moves,
            "optimal move set mismatch at '{}'",
            board.encode()
        );
    }
}

#[test]
fn verify_solver_agrees_with_policy_table() {
    let table = PolicyTable::solve();
    let mut solver = Solver::new();

    for board in reachable_boards() {
        let entry = table.get(&board).unwrap();
        assert_eq!(solver.evaluate(&board), entry.value);
        assert_eq!(
            solver.best_move(&board),
            entry.optimal_moves.first().copied(),
            "tie-break mismatch at '{}'",
            board.encode()
        );
    }
}

#[test]
fn verify_free_functions_match_cached_solver() {
    let mut solver = Solver::new();

    // Restricting to positions with six or more pieces keeps the uncached
    // recursion cheap
    for board in reachable_boards() {
        if board.occupied_count() < 6 {
            continue;
        }
        assert_eq!(evaluate(&board), solver.evaluate(&board));
        assert_eq!(best_move(&board), solver.best_move(&board));
    }
}

#[test]
fn verify_empty_board_is_drawn() {
    let evaluation = analyze(&Board::new());
    assert_eq!(evaluation.value, 0, "perfect play from the start is a draw");
    assert_eq!(
        evaluation.best,
        Some(Move::new(0, 0)),
        "ties resolve to the first cell in row-major order"
    );
}

#[test]
fn verify_optimal_agent_never_loses() {
    let config = MatchConfig {
        num_games: 200,
        seed: Some(2024),
    };

    // As X against a random opponent
    let mut x = OptimalAgent::new("Optimal".to_string());
    let mut o = RandomAgent::new("Random".to_string());
    let stats = run_match(&config, &mut x, &mut o, |_, _| {}).unwrap();
    assert_eq!(stats.games, 200);
    assert_eq!(stats.o_wins, 0, "perfect X never loses");

    // As O against a random opponent
    let mut x = RandomAgent::new("Random".to_string());
    let mut o = OptimalAgent::new("Optimal".to_string());
    let stats = run_match(&config, &mut x, &mut o, |_, _| {}).unwrap();
    assert_eq!(stats.games, 200);
    assert_eq!(stats.x_wins, 0, "perfect O never loses");
}
