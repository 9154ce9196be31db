//! Text map format: newline-separated rows of one-character cell codes.
//!
//! ```text
//! --X-
//! -#--
//! a--b
//! ```

use crate::error::BoardError;
use crate::grid::{Board, Cell};

/// Map a single character code to a cell
pub fn cell_from_code(code: char) -> Option<Cell> {
    match code {
        '-' => Some(Cell::Empty),
        'X' => Some(Cell::Blocking),
        '#' => Some(Cell::OutOfBounds),
        'a' => Some(Cell::Source),
        'b' => Some(Cell::Target),
        _ => None,
    }
}

/// Inverse of [`cell_from_code`]
pub fn code_for_cell(cell: Cell) -> char {
    match cell {
        Cell::Empty => '-',
        Cell::Blocking => 'X',
        Cell::OutOfBounds => '#',
        Cell::Source => 'a',
        Cell::Target => 'b',
    }
}

/// Build a board from rows of character codes
pub fn board_from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board, BoardError> {
    let first = rows.first().ok_or_else(|| BoardError::MapParse {
        row: 0,
        column: None,
        reason: "map has no rows".to_string(),
    })?;
    let width = first.as_ref().chars().count();
    if width == 0 {
        return Err(BoardError::MapParse {
            row: 0,
            column: None,
            reason: "row 0 is empty".to_string(),
        });
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let len = row.chars().count();
        if len != width {
            return Err(BoardError::MapParse {
                row: y,
                column: None,
                reason: format!("row has invalid length {}; expected {}", len, width),
            });
        }
        for (x, code) in row.chars().enumerate() {
            let cell = cell_from_code(code).ok_or_else(|| BoardError::MapParse {
                row: y,
                column: Some(x),
                reason: format!("unknown cell code '{}'", code),
            })?;
            cells.push(cell);
        }
    }

    Board::new(width as i32, rows.len() as i32, cells)
}

/// Parse a whole map file. Trailing blank lines and `\r` line endings are ignored.
pub fn board_from_map_file(text: &str) -> Result<Board, BoardError> {
    let mut rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }
    board_from_rows(&rows)
}

/// Print the cells of a board as map text (no trailing newline)
pub fn to_map_text(board: &Board) -> String {
    board
        .cells()
        .chunks(board.width() as usize)
        .map(|row| row.iter().map(|&cell| code_for_cell(cell)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_print() {
        let text = "--X-\n-#--\na--b\n";
        let board = board_from_map_file(text).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get_cell(2, 0).unwrap(), Cell::Blocking);
        assert_eq!(board.get_cell(1, 1).unwrap(), Cell::OutOfBounds);
        assert_eq!(board.get_cell(0, 2).unwrap(), Cell::Source);
        assert_eq!(board.get_cell(3, 2).unwrap(), Cell::Target);
        assert_eq!(to_map_text(&board), "--X-\n-#--\na--b");
    }

    #[test]
    fn test_ragged_rows_report_row() {
        let err = board_from_rows(&["---", "--", "---"]).unwrap_err();
        assert!(matches!(err, BoardError::MapParse { row: 1, column: None, .. }));
    }

    #[test]
    fn test_unknown_code_reports_row_and_column() {
        let err = board_from_map_file("---\n-q-").unwrap_err();
        assert!(matches!(err, BoardError::MapParse { row: 1, column: Some(1), .. }));
    }

    #[test]
    fn test_windows_line_endings() {
        let board = board_from_map_file("-X\r\nX-\r\n\r\n").unwrap();
        assert_eq!(board.height(), 2);
        assert_eq!(board.get_cell(0, 1).unwrap(), Cell::Blocking);
    }

    #[test]
    fn test_empty_map_is_an_error() {
        assert!(board_from_map_file("").is_err());
        assert!(board_from_map_file("\n\n").is_err());
    }
}
