mod common;

use common::board;
use losgrid::{board_from_map_file, Board, BoardError, Cell, Direction, Edge};
use proptest::prelude::*;

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        3 => Just(Cell::Empty),
        1 => Just(Cell::Blocking),
        1 => Just(Cell::OutOfBounds),
        1 => Just(Cell::Source),
    ]
}

fn board_strategy() -> impl Strategy<Value = Board> {
    (1i32..6, 1i32..6).prop_flat_map(|(w, h)| {
        proptest::collection::vec(cell_strategy(), (w * h) as usize)
            .prop_map(move |cells| Board::new(w, h, cells).unwrap())
    })
}

#[test]
fn test_small_board_edges() {
    let b = Board::empty(2, 2);
    assert_eq!(b.get_edge(0, 0, Direction::Down).unwrap(), Edge::Blocked);
    assert_eq!(b.get_edge(1, 1, Direction::Right).unwrap(), Edge::Clear);
    assert_eq!(b.get_edge(1, 2, Direction::Right).unwrap(), Edge::Blocked);
    assert_eq!(b.get_edge(1, 0, Direction::Down).unwrap(), Edge::Clear);
}

#[test]
fn test_derived_edges_follow_cell_edits() {
    let mut b = board(&["---", "---"]);
    assert_eq!(b.get_edge(1, 1, Direction::Right).unwrap(), Edge::Clear);

    b.set_cell(1, 1, Cell::OutOfBounds).unwrap();
    assert_eq!(b.get_edge(1, 1, Direction::Right).unwrap(), Edge::Blocked);
    assert_eq!(b.get_edge(2, 1, Direction::Down).unwrap(), Edge::Blocked);

    b.set_cell(1, 1, Cell::Empty).unwrap();
    assert_eq!(b.get_edge(2, 1, Direction::Down).unwrap(), Edge::Clear);
}

#[test]
fn test_override_survives_cell_edits_until_cleared() {
    let mut b = board(&["-X", "--"]);
    b.set_edge(1, 0, Direction::Down, Edge::Clear).unwrap();
    b.set_cell(1, 0, Cell::OutOfBounds).unwrap();
    assert_eq!(b.get_edge(1, 0, Direction::Down).unwrap(), Edge::Clear);

    assert!(b.clear_edge(1, 0, Direction::Down).unwrap());
    assert_eq!(b.get_edge(1, 0, Direction::Down).unwrap(), Edge::Blocked);
    assert!(!b.clear_edge(1, 0, Direction::Down).unwrap());
}

#[test]
fn test_clear_blocking_keeps_terrain() {
    let mut b = board(&["X#", "aX"]);
    b.clear_blocking();
    assert_eq!(b.to_string(), "-#\na-");
}

#[test]
fn test_ragged_map_reports_row() {
    let err = board_from_map_file("---\n--\n---\n").unwrap_err();
    assert!(matches!(err, BoardError::MapParse { row: 1, column: None, .. }));
}

#[test]
fn test_unknown_code_reports_row_and_column() {
    let err = board_from_map_file("---\n-?-\n").unwrap_err();
    assert!(matches!(err, BoardError::MapParse { row: 1, column: Some(1), .. }));
    assert!(err.to_string().contains("'?'"));
}

#[test]
fn test_out_of_range_edge_is_an_error() {
    let mut b = Board::empty(3, 2);
    assert!(b.get_edge(3, 0, Direction::Right).is_err());
    assert!(b.get_edge(0, 2, Direction::Down).is_err());
    assert!(matches!(
        b.set_edge(-1, 0, Direction::Down, Edge::Wall),
        Err(BoardError::OutOfBounds { what: "Down edge", .. })
    ));
    assert!(b.set_edge(3, 1, Direction::Down, Edge::Wall).is_ok());
}

proptest! {
    #[test]
    fn prop_perimeter_is_blocked(b in board_strategy()) {
        let (w, h) = (b.width(), b.height());
        for x in 0..w {
            prop_assert_eq!(b.get_edge(x, 0, Direction::Right).unwrap(), Edge::Blocked);
            prop_assert_eq!(b.get_edge(x, h, Direction::Right).unwrap(), Edge::Blocked);
        }
        for y in 0..h {
            prop_assert_eq!(b.get_edge(0, y, Direction::Down).unwrap(), Edge::Blocked);
            prop_assert_eq!(b.get_edge(w, y, Direction::Down).unwrap(), Edge::Blocked);
        }
    }

    #[test]
    fn prop_interior_edges_follow_opacity(b in board_strategy()) {
        let opaque = |x: i32, y: i32| b.get_cell(x, y).unwrap().is_opaque();
        for y in 0..b.height() {
            for x in 1..b.width() {
                let expected = if opaque(x - 1, y) || opaque(x, y) { Edge::Blocked } else { Edge::Clear };
                prop_assert_eq!(b.get_edge(x, y, Direction::Down).unwrap(), expected);
            }
        }
        for y in 1..b.height() {
            for x in 0..b.width() {
                let expected = if opaque(x, y - 1) || opaque(x, y) { Edge::Blocked } else { Edge::Clear };
                prop_assert_eq!(b.get_edge(x, y, Direction::Right).unwrap(), expected);
            }
        }
    }

    #[test]
    fn prop_resize_round_trip_keeps_retained_cells(b in board_strategy(), w in 1i32..6, h in 1i32..6) {
        let original = b.clone();
        let mut resized = b;
        resized.resize(w, h);
        resized.resize(original.width(), original.height());

        for y in 0..h.min(original.height()) {
            for x in 0..w.min(original.width()) {
                prop_assert_eq!(resized.get_cell(x, y).unwrap(), original.get_cell(x, y).unwrap());
            }
        }
    }
}
