mod common;

use common::board;
use losgrid::{are_cells_adjacent, are_cells_connected, connected_neighbours, Board, CellPos, Direction, Edge};
use std::collections::{HashSet, VecDeque};

/// Cells reachable from `start` by repeated single steps
fn reachable(board: &Board, start: CellPos) -> HashSet<CellPos> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for next in connected_neighbours(board, cell) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn test_terrain_column_splits_board() {
    let b = board(&["-#-", "-#-", "-#-"]);
    let left = reachable(&b, CellPos::new(0, 0));
    assert_eq!(left.len(), 3);
    assert!(left.iter().all(|c| c.x == 0));
}

#[test]
fn test_gap_in_column_joins_board() {
    let b = board(&["-#-", "-#-", "---"]);
    let all = reachable(&b, CellPos::new(0, 0));
    assert_eq!(all.len(), 7);
    assert!(all.contains(&CellPos::new(2, 0)));
}

#[test]
fn test_walls_only_close_orthogonal_steps() {
    let mut b = Board::empty(2, 2);
    b.set_edge(1, 0, Direction::Down, Edge::Wall).unwrap();

    assert!(!are_cells_connected(&b, CellPos::new(0, 0), CellPos::new(1, 0)));
    assert!(are_cells_connected(&b, CellPos::new(0, 0), CellPos::new(1, 1)));
    assert!(are_cells_connected(&b, CellPos::new(0, 1), CellPos::new(1, 1)));
}

#[test]
fn test_corner_neighbours_in_row_major_order() {
    let b = Board::empty(3, 3);
    assert_eq!(
        connected_neighbours(&b, CellPos::new(0, 0)),
        vec![CellPos::new(1, 0), CellPos::new(0, 1), CellPos::new(1, 1)]
    );
    assert_eq!(connected_neighbours(&b, CellPos::new(1, 1)).len(), 8);
}

#[test]
fn test_single_corner_cut_allowed() {
    let b = board(&["--", "X-"]);
    assert!(are_cells_adjacent(&b, CellPos::new(0, 0), CellPos::new(1, 1)));
    assert!(!are_cells_adjacent(&b, CellPos::new(0, 0), CellPos::new(0, 1)));
    assert!(!are_cells_adjacent(&b, CellPos::new(0, 0), CellPos::new(0, 0)));
    assert!(!are_cells_adjacent(&b, CellPos::new(0, 0), CellPos::new(2, 0)));
}
