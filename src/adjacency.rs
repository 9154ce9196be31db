//! Single-step connectivity between neighbouring cells.
//!
//! Cells connect across a Chebyshev distance of exactly one. Orthogonal moves
//! need the shared edge to be open; diagonal moves may cut past one opaque
//! corner cell but not squeeze between two.

use crate::corners::CellPos;
use crate::grid::{Board, Direction, EdgePos};

fn open_cell(board: &Board, cell: CellPos) -> bool {
    board.is_valid_cell(cell.x, cell.y) && board.cell_or_oob(cell.x, cell.y).is_transparent()
}

/// Edge shared by two orthogonally adjacent cells
fn shared_edge(a: CellPos, b: CellPos) -> EdgePos {
    if a.x == b.x {
        EdgePos::new(a.x, a.y.max(b.y), Direction::Right)
    } else {
        EdgePos::new(a.x.max(b.x), a.y, Direction::Down)
    }
}

pub fn are_cells_connected(board: &Board, a: CellPos, b: CellPos) -> bool {
    if !open_cell(board, a) || !open_cell(board, b) {
        return false;
    }
    if a.chebyshev(&b) != 1 {
        return false;
    }

    if a.x == b.x || a.y == b.y {
        let edge = shared_edge(a, b);
        let opaque = |cell: CellPos| board.cell_or_oob(cell.x, cell.y).is_opaque();
        return !board.edge_with(edge, opaque).blocks();
    }

    // Corner cut: both flanking cells opaque closes the diagonal
    let flank_a = CellPos::new(a.x, b.y);
    let flank_b = CellPos::new(b.x, a.y);
    open_cell(board, flank_a) || open_cell(board, flank_b)
}

/// Alias kept for callers that think in terms of adjacency
pub fn are_cells_adjacent(board: &Board, a: CellPos, b: CellPos) -> bool {
    are_cells_connected(board, a, b)
}

/// Every cell reachable in one step from `cell`, in row-major order
pub fn connected_neighbours(board: &Board, cell: CellPos) -> Vec<CellPos> {
    let mut out = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            let other = CellPos::new(cell.x + dx, cell.y + dy);
            if are_cells_connected(board, cell, other) {
                out.push(other);
            }
        }
    }
    out
}
