//! Property tests for board state, checked over every reachable position.

use std::collections::HashSet;

use tictac_engine::{
    Board, Cell, LINES, Mark, Outcome, apply_move, is_full, legal_moves, outcome, winner,
};

/// Every position reachable by alternating play from an empty board.
fn reachable_from(first: Mark) -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), first)];
    let mut boards = Vec::new();

    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        if outcome(&board).is_terminal() {
            continue;
        }
        for index in legal_moves(&board) {
            let next = apply_move(&board, index, to_move).expect("legal move");
            stack.push((next, to_move.opponent()));
        }
    }
    boards
}

/// Reachable positions for either first mover.
fn reachable_boards() -> Vec<Board> {
    let mut boards = reachable_from(Mark::X);
    boards.extend(reachable_from(Mark::O));
    boards
}

fn relabel(board: &Board) -> Board {
    let mut cells = *board.cells();
    for cell in &mut cells {
        if let Cell::Occupied(mark) = *cell {
            *cell = Cell::Occupied(mark.opponent());
        }
    }
    Board::from_cells(cells)
}

fn completes_line(board: &Board, index: usize, mark: Mark) -> bool {
    LINES.iter().filter(|line| line.contains(&index)).any(|line| {
        line.iter()
            .all(|&i| i == index || board.get(i) == Some(Cell::Occupied(mark)))
    })
}

#[test]
fn test_reachable_position_count() {
    assert_eq!(reachable_from(Mark::X).len(), 5478);
}

#[test]
fn test_move_is_terminal_iff_it_wins_or_fills() {
    for board in reachable_boards() {
        if outcome(&board).is_terminal() {
            continue;
        }
        let mark = board.next_mark(Mark::X);
        for index in legal_moves(&board) {
            let next = apply_move(&board, index, mark).unwrap();
            let expected = completes_line(&board, index, mark) || legal_moves(&board).len() == 1;
            assert_eq!(
                outcome(&next).is_terminal(),
                expected,
                "board:\n{board}\nmove {index}"
            );
        }
    }
}

#[test]
fn test_winner_symmetric_under_relabeling() {
    for board in reachable_boards() {
        let swapped = relabel(&board);
        assert_eq!(winner(&swapped), winner(&board).map(Mark::opponent));
    }
}

#[test]
fn test_queries_are_idempotent() {
    for board in reachable_boards().into_iter().take(500) {
        let copy = board;
        assert_eq!(outcome(&board), outcome(&board));
        assert_eq!(winner(&board), winner(&board));
        assert_eq!(is_full(&board), is_full(&board));
        assert_eq!(legal_moves(&board), legal_moves(&board));
        assert_eq!(board, copy);
    }
}

#[test]
fn test_reachable_boards_stay_balanced() {
    for board in reachable_boards() {
        assert!(board.is_balanced(Mark::X) || board.is_balanced(Mark::O));
    }
}

#[test]
fn test_failed_move_leaves_board_untouched() {
    let board: Board = "XO. ... ...".parse().unwrap();
    let before = board;
    assert!(apply_move(&board, 1, Mark::X).is_err());
    assert!(apply_move(&board, 42, Mark::X).is_err());
    assert_eq!(board, before);
}

#[test]
fn test_full_board_draw_rejects_every_move() {
    let board: Board = "XOX XOO OXX".parse().unwrap();
    assert_eq!(outcome(&board), Outcome::Draw);
    assert!(legal_moves(&board).is_empty());
    for index in 0..=Board::SIZE {
        for mark in [Mark::X, Mark::O] {
            assert!(apply_move(&board, index, mark).is_err(), "index {index}");
        }
    }
}

#[test]
fn test_win_takes_precedence_over_fullness() {
    // X owns the 0-4-8 diagonal with two cells still open.
    let board: Board = "XOO OX. .OX".parse().unwrap();
    assert!(!is_full(&board));
    assert_eq!(winner(&board), Some(Mark::X));
    assert_eq!(outcome(&board), Outcome::Won(Mark::X));
}
