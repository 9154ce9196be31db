//! Error types for board construction and grid queries.

use std::fmt;

/// Errors arising from map parsing, coordinate validation, or bad arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Map text could not be turned into a board.
    MapParse {
        /// 0-based row of the offending character or line.
        row: usize,
        /// 0-based column, when the problem is a single character.
        column: Option<usize>,
        /// What went wrong.
        reason: String,
    },
    /// A coordinate lies outside the valid range for its space.
    OutOfBounds {
        /// Which space was addressed ("cell", "corner", "Right edge", ...).
        what: &'static str,
        x: i32,
        y: i32,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// An argument is unusable (empty figure, wrong cell count, ...).
    InvalidArgument {
        reason: String,
    },
}

impl BoardError {
    pub(crate) fn out_of_bounds(what: &'static str, x: i32, y: i32, max_x: i32, max_y: i32) -> Self {
        BoardError::OutOfBounds {
            what,
            x,
            y,
            bounds: format!("[0, {}) x [0, {})", max_x, max_y),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BoardError::InvalidArgument { reason: reason.into() }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapParse { row, column: Some(column), reason } => {
                write!(f, "map parse error at row {row}, column {column}: {reason}")
            }
            Self::MapParse { row, column: None, reason } => {
                write!(f, "map parse error at row {row}: {reason}")
            }
            Self::OutOfBounds { what, x, y, bounds } => {
                write!(f, "{what} ({x}, {y}) out of bounds: {bounds}")
            }
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_location() {
        let err = BoardError::MapParse {
            row: 2,
            column: Some(5),
            reason: "unknown cell code 'q'".to_string(),
        };
        assert_eq!(err.to_string(), "map parse error at row 2, column 5: unknown cell code 'q'");

        let err = BoardError::out_of_bounds("cell", 4, -1, 3, 3);
        assert_eq!(err.to_string(), "cell (4, -1) out of bounds: [0, 3) x [0, 3)");
    }
}
