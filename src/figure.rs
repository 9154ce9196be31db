use crate::corners::CellPos;
use crate::error::BoardError;
use crate::grid::{Board, Cell};
use crate::visibility::{check_line_of_sight_figures, FigureLineOfSight, LosOptions};
use serde::{Deserialize, Serialize};

/// Role a figure plays in line-of-sight queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    Source,
    Target,
    /// Bystander piece; its cells are marked `Blocking`
    Neutral,
}

/// Game piece occupying one or more cells. Owned by the UI layer, never by the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub id: String,
    pub kind: FigureKind,
    /// Occupied cells; the first one is the anchor used when moving
    pub cells: Vec<CellPos>,
}

impl Figure {
    pub fn new(id: impl Into<String>, kind: FigureKind, cells: Vec<CellPos>) -> Self {
        Figure {
            id: id.into(),
            kind,
            cells,
        }
    }

    /// Single-cell figure
    pub fn single(id: impl Into<String>, kind: FigureKind, x: i32, y: i32) -> Self {
        Self::new(id, kind, vec![CellPos::new(x, y)])
    }

    pub fn anchor(&self) -> Option<CellPos> {
        self.cells.first().copied()
    }

    pub fn occupies(&self, cell: CellPos) -> bool {
        self.cells.contains(&cell)
    }

    /// Translate every cell so the anchor lands on `anchor`
    pub fn move_to(&mut self, anchor: CellPos) {
        let Some(current) = self.anchor() else {
            return;
        };
        let dx = anchor.x - current.x;
        let dy = anchor.y - current.y;
        for cell in self.cells.iter_mut() {
            cell.x += dx;
            cell.y += dy;
        }
    }
}

/// First figure of the given kind
pub fn find_kind(figures: &[Figure], kind: FigureKind) -> Option<&Figure> {
    figures.iter().find(|figure| figure.kind == kind)
}

/// Turn `Source`/`Target` marker cells of a freshly parsed map into
/// single-cell figures, resetting those cells to `Empty`
pub fn take_marker_figures(board: &mut Board) -> Result<Vec<Figure>, BoardError> {
    let mut figures = Vec::new();
    for y in 0..board.height() {
        for x in 0..board.width() {
            let kind = match board.get_cell(x, y)? {
                Cell::Source => FigureKind::Source,
                Cell::Target => FigureKind::Target,
                _ => continue,
            };
            let id = format!("{:?}-{}", kind, figures.len()).to_lowercase();
            figures.push(Figure::single(id, kind, x, y));
            board.set_cell(x, y, Cell::Empty)?;
        }
    }
    Ok(figures)
}

/// Re-derive figure occupancy: clear every `Blocking` cell, then mark the
/// cells of neutral figures `Blocking`. Call before each query batch.
///
/// All cells are validated first so a bad figure leaves the board untouched.
pub fn occupy_board(board: &mut Board, figures: &[Figure]) -> Result<(), BoardError> {
    for figure in figures {
        for cell in &figure.cells {
            if !board.is_valid_cell(cell.x, cell.y) {
                return Err(BoardError::out_of_bounds("cell", cell.x, cell.y, board.width(), board.height()));
            }
        }
    }

    board.clear_blocking();
    for figure in figures.iter().filter(|figure| figure.kind == FigureKind::Neutral) {
        for cell in &figure.cells {
            board.set_cell(cell.x, cell.y, Cell::Blocking)?;
        }
    }
    Ok(())
}

/// Line of sight from the source figure to the target figure.
/// Returns `None` when either figure is missing.
pub fn source_target_sight(
    board: &Board,
    figures: &[Figure],
    options: &LosOptions,
) -> Result<Option<FigureLineOfSight>, BoardError> {
    let (Some(source), Some(target)) = (
        find_kind(figures, FigureKind::Source),
        find_kind(figures, FigureKind::Target),
    ) else {
        return Ok(None);
    };
    check_line_of_sight_figures(board, &source.cells, &target.cells, options).map(Some)
}
