use crate::corners::CellPos;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// Occupied by a figure; cleared by `Board::clear_blocking`
    Blocking,
    Source,
    Target,
    /// Painted terrain; survives `clear_blocking`
    OutOfBounds,
}

impl Cell {
    /// Opaque cells stop a ray that enters them
    pub fn is_opaque(self) -> bool {
        match self {
            Cell::Blocking | Cell::OutOfBounds => true,
            Cell::Empty | Cell::Source | Cell::Target => false,
        }
    }

    pub fn is_transparent(self) -> bool {
        !self.is_opaque()
    }
}

/// State of a cell boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Clear,
    Blocked,
    /// User-painted wall
    Wall,
}

impl Edge {
    pub fn blocks(self) -> bool {
        match self {
            Edge::Clear => false,
            Edge::Blocked | Edge::Wall => true,
        }
    }
}

/// Orientation of an edge anchored at a corner-space point.
///
/// `Right` at (x, y) runs from corner (x, y) to (x+1, y), between cells
/// (x, y-1) and (x, y). `Down` at (x, y) runs from corner (x, y) to (x, y+1),
/// between cells (x-1, y) and (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
}

/// Directed edge position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgePos {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl EdgePos {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        EdgePos { x, y, direction }
    }

    /// The two cells sharing this edge, in (before, after) order
    pub fn flanking_cells(&self) -> (CellPos, CellPos) {
        match self.direction {
            Direction::Right => (CellPos::new(self.x, self.y - 1), CellPos::new(self.x, self.y)),
            Direction::Down => (CellPos::new(self.x - 1, self.y), CellPos::new(self.x, self.y)),
        }
    }
}

/// Rectangular board: cell contents plus sparse explicit edge overrides.
///
/// Edge values without an override are derived from the perimeter and the
/// current opacity of the two flanking cells, so they follow cell edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    overrides: HashMap<EdgePos, Edge>,
    /// Revision number - incremented whenever cells or overrides change
    revision: u64,
}

impl Board {
    /// Create a board from explicit dimensions and row-major cells
    pub fn new(width: i32, height: i32, cells: Vec<Cell>) -> Result<Self, BoardError> {
        if width < 1 || height < 1 {
            return Err(BoardError::invalid(format!(
                "board dimensions must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(BoardError::invalid(format!(
                "expected {} cells for a {}x{} board, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Board {
            width,
            height,
            cells,
            overrides: HashMap::new(),
            revision: 0,
        })
    }

    /// Create an all-empty board; dimensions are clamped to at least 1x1
    pub fn empty(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Board {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
            overrides: HashMap::new(),
            revision: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get current board revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn is_valid_corner(&self, x: i32, y: i32) -> bool {
        x >= 0 && x <= self.width && y >= 0 && y <= self.height
    }

    /// Edge coordinates must lie inside corner space along their own run
    pub fn is_valid_edge(&self, x: i32, y: i32, direction: Direction) -> bool {
        match direction {
            Direction::Right => x >= 0 && x < self.width && y >= 0 && y <= self.height,
            Direction::Down => x >= 0 && x <= self.width && y >= 0 && y < self.height,
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.width) as usize
    }

    fn check_cell(&self, x: i32, y: i32) -> Result<usize, BoardError> {
        if !self.is_valid_cell(x, y) {
            return Err(BoardError::out_of_bounds("cell", x, y, self.width, self.height));
        }
        Ok(self.index(x, y))
    }

    fn check_edge(&self, x: i32, y: i32, direction: Direction) -> Result<EdgePos, BoardError> {
        if !self.is_valid_edge(x, y, direction) {
            let (what, max_x, max_y) = match direction {
                Direction::Right => ("Right edge", self.width, self.height + 1),
                Direction::Down => ("Down edge", self.width + 1, self.height),
            };
            return Err(BoardError::out_of_bounds(what, x, y, max_x, max_y));
        }
        Ok(EdgePos::new(x, y, direction))
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Result<Cell, BoardError> {
        let id = self.check_cell(x, y)?;
        Ok(self.cells[id])
    }

    /// Cell lookup that treats anything off the board as `OutOfBounds`
    pub fn cell_or_oob(&self, x: i32, y: i32) -> Cell {
        if !self.is_valid_cell(x, y) {
            return Cell::OutOfBounds;
        }
        self.cells[self.index(x, y)]
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), BoardError> {
        let id = self.check_cell(x, y)?;
        if self.cells[id] != cell {
            self.cells[id] = cell;
            self.revision += 1;
        }
        Ok(())
    }

    /// Explicit override if present, else the derived value
    pub fn get_edge(&self, x: i32, y: i32, direction: Direction) -> Result<Edge, BoardError> {
        let pos = self.check_edge(x, y, direction)?;
        Ok(self.edge_with(pos, |cell| self.cell_or_oob(cell.x, cell.y).is_opaque()))
    }

    /// Always records an explicit override, even when it equals the derived value
    pub fn set_edge(&mut self, x: i32, y: i32, direction: Direction, edge: Edge) -> Result<(), BoardError> {
        let pos = self.check_edge(x, y, direction)?;
        self.overrides.insert(pos, edge);
        self.revision += 1;
        Ok(())
    }

    /// Drop an explicit override so the edge is derived again
    pub fn clear_edge(&mut self, x: i32, y: i32, direction: Direction) -> Result<bool, BoardError> {
        let pos = self.check_edge(x, y, direction)?;
        let removed = self.overrides.remove(&pos).is_some();
        if removed {
            self.revision += 1;
        }
        Ok(removed)
    }

    pub fn edge_override(&self, pos: EdgePos) -> Option<Edge> {
        self.overrides.get(&pos).copied()
    }

    /// All explicit overrides, sorted by position
    pub fn edge_overrides(&self) -> Vec<(EdgePos, Edge)> {
        let mut all: Vec<(EdgePos, Edge)> = self.overrides.iter().map(|(&p, &e)| (p, e)).collect();
        all.sort_by_key(|(p, _)| *p);
        all
    }

    /// Resolve an edge against a caller-supplied opacity view.
    ///
    /// Overrides and the perimeter win over the view; `opaque` is only asked
    /// about on-board flanking cells.
    pub(crate) fn edge_with(&self, pos: EdgePos, opaque: impl Fn(CellPos) -> bool) -> Edge {
        if let Some(&edge) = self.overrides.get(&pos) {
            return edge;
        }
        let (a, b) = pos.flanking_cells();
        if !self.is_valid_cell(a.x, a.y) || !self.is_valid_cell(b.x, b.y) {
            return Edge::Blocked;
        }
        if opaque(a) || opaque(b) {
            Edge::Blocked
        } else {
            Edge::Clear
        }
    }

    /// Reset every `Blocking` cell to `Empty`, leaving terrain and overrides alone
    pub fn clear_blocking(&mut self) {
        let mut changed = false;
        for cell in self.cells.iter_mut() {
            if *cell == Cell::Blocking {
                *cell = Cell::Empty;
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
    }

    /// Resize in place, keeping the retained sub-rectangle and any override that
    /// is still a valid edge. New cells are `Empty`; dimensions clamp to 1x1.
    pub fn resize(&mut self, width: i32, height: i32) {
        let width = width.max(1);
        let height = height.max(1);

        let mut cells = vec![Cell::Empty; (width * height) as usize];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[(x + y * width) as usize] = self.cells[self.index(x, y)];
            }
        }

        self.width = width;
        self.height = height;
        self.cells = cells;

        let overrides = std::mem::take(&mut self.overrides);
        self.overrides = overrides
            .into_iter()
            .filter(|(pos, _)| self.is_valid_edge(pos.x, pos.y, pos.direction))
            .collect();
        self.revision += 1;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::map_text::to_map_text(self))
    }
}
