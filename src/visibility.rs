use crate::corners::{cell_to_corner, CellPos, Corner, CornerPoint, CORNERS};
use crate::error::BoardError;
use crate::grid::{Board, Cell, EdgePos};
use crate::ray::{traverse, RayVisitor};
use log::{debug, trace};
use std::collections::HashSet;

/// Per-call adjustments to what counts as opaque
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LosOptions {
    /// Treat figure-occupied (`Blocking`) cells as transparent
    pub ignore_figures: bool,
    /// Additional cells forced transparent for this call
    pub cells_to_ignore: Vec<CellPos>,
}

impl LosOptions {
    pub fn ignoring_figures() -> Self {
        LosOptions {
            ignore_figures: true,
            cells_to_ignore: Vec::new(),
        }
    }
}

/// Result of a cell-to-cell line-of-sight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOfSight {
    pub has_line_of_sight: bool,
    /// First source corner (in `CORNERS` order) with any unblocked ray
    pub source_corner: Option<Corner>,
    /// Target corners unblocked from `source_corner`, in `CORNERS` order
    pub target_corners: Vec<Corner>,
}

impl LineOfSight {
    pub fn blocked() -> Self {
        LineOfSight {
            has_line_of_sight: false,
            source_corner: None,
            target_corners: Vec::new(),
        }
    }

    /// The two target corners bounding the visible silhouette.
    /// Both are the same tag when only one corner is visible.
    pub fn silhouette(&self) -> Option<(Corner, Corner)> {
        let first = *self.target_corners.first()?;
        let last = *self.target_corners.last()?;
        Some((first, last))
    }
}

/// Result of a figure-to-figure search: the winning cell pair, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureLineOfSight {
    pub has_line_of_sight: bool,
    pub source_cell: Option<CellPos>,
    pub target_cell: Option<CellPos>,
    pub sight: LineOfSight,
}

/// Opacity of the board as seen by one query
struct OpacityView<'a> {
    board: &'a Board,
    ignore_figures: bool,
    transparent: HashSet<CellPos>,
}

impl<'a> OpacityView<'a> {
    fn new(board: &'a Board, options: &LosOptions, own_cells: &[CellPos]) -> Self {
        let transparent = options
            .cells_to_ignore
            .iter()
            .chain(own_cells.iter())
            .copied()
            .collect();
        OpacityView {
            board,
            ignore_figures: options.ignore_figures,
            transparent,
        }
    }

    fn is_opaque(&self, cell: CellPos) -> bool {
        if !self.board.is_valid_cell(cell.x, cell.y) {
            return true;
        }
        if self.transparent.contains(&cell) {
            return false;
        }
        match self.board.cell_or_oob(cell.x, cell.y) {
            Cell::Blocking if self.ignore_figures => false,
            other => other.is_opaque(),
        }
    }

    fn edge_blocks(&self, edge: EdgePos) -> bool {
        self.board.edge_with(edge, |cell| self.is_opaque(cell)).blocks()
    }
}

impl RayVisitor for &OpacityView<'_> {
    type Output = ();

    fn on_cell(&mut self, cell: CellPos) -> Option<()> {
        self.is_opaque(cell).then_some(())
    }

    fn on_edge(&mut self, edge: EdgePos) -> Option<()> {
        self.edge_blocks(edge).then_some(())
    }

    // Grazing a lattice point never blocks by itself; the cells and edges
    // around it are tested when the ray enters them.
}

fn ray_blocked_in(view: &OpacityView<'_>, from: CornerPoint, to: CornerPoint) -> bool {
    let mut visitor = view;
    let blocked = traverse(from.x, from.y, to.x, to.y, &mut visitor).is_some();
    trace!("ray ({}, {}) -> ({}, {}) blocked={}", from.x, from.y, to.x, to.y, blocked);
    blocked
}

fn check_corner(board: &Board, point: CornerPoint) -> Result<(), BoardError> {
    if !board.is_valid_corner(point.x, point.y) {
        return Err(BoardError::out_of_bounds(
            "corner",
            point.x,
            point.y,
            board.width() + 1,
            board.height() + 1,
        ));
    }
    Ok(())
}

fn check_cells(board: &Board, cells: &[CellPos]) -> Result<(), BoardError> {
    for cell in cells {
        if !board.is_valid_cell(cell.x, cell.y) {
            return Err(BoardError::out_of_bounds("cell", cell.x, cell.y, board.width(), board.height()));
        }
    }
    Ok(())
}

/// Is the segment between two corner-space points blocked by an opaque cell
/// or a blocking edge?
pub fn ray_blocked(board: &Board, source: CornerPoint, dest: CornerPoint) -> Result<bool, BoardError> {
    check_corner(board, source)?;
    check_corner(board, dest)?;
    let view = OpacityView::new(board, &LosOptions::default(), &[]);
    Ok(ray_blocked_in(&view, source, dest))
}

fn search_corners(view: &OpacityView<'_>, source: CellPos, target: CellPos) -> LineOfSight {
    for source_corner in CORNERS {
        let from = cell_to_corner(source, source_corner);
        let target_corners: Vec<Corner> = CORNERS
            .into_iter()
            .filter(|&target_corner| !ray_blocked_in(view, from, cell_to_corner(target, target_corner)))
            .collect();

        if !target_corners.is_empty() {
            return LineOfSight {
                has_line_of_sight: true,
                source_corner: Some(source_corner),
                target_corners,
            };
        }
    }
    LineOfSight::blocked()
}

/// Search all 16 corner pairs between two cells.
///
/// The source and target cells never block their own rays.
pub fn check_line_of_sight(
    board: &Board,
    source: CellPos,
    target: CellPos,
    options: &LosOptions,
) -> Result<LineOfSight, BoardError> {
    check_cells(board, &[source, target])?;
    check_cells(board, &options.cells_to_ignore)?;

    let view = OpacityView::new(board, options, &[source, target]);
    let sight = search_corners(&view, source, target);
    debug!(
        "line of sight ({}, {}) -> ({}, {}): {} via {:?} to {:?}",
        source.x, source.y, target.x, target.y, sight.has_line_of_sight, sight.source_corner, sight.target_corners
    );
    Ok(sight)
}

/// Line of sight between multi-cell figures: true if any source cell sees any
/// target cell. Source cells are the outer loop; the first success wins.
pub fn check_line_of_sight_figures(
    board: &Board,
    source_cells: &[CellPos],
    target_cells: &[CellPos],
    options: &LosOptions,
) -> Result<FigureLineOfSight, BoardError> {
    if source_cells.is_empty() {
        return Err(BoardError::invalid("source figure has no cells"));
    }
    if target_cells.is_empty() {
        return Err(BoardError::invalid("target figure has no cells"));
    }
    check_cells(board, source_cells)?;
    check_cells(board, target_cells)?;
    check_cells(board, &options.cells_to_ignore)?;

    let own: Vec<CellPos> = source_cells.iter().chain(target_cells.iter()).copied().collect();
    let view = OpacityView::new(board, options, &own);

    for &source in source_cells {
        for &target in target_cells {
            let sight = search_corners(&view, source, target);
            if sight.has_line_of_sight {
                debug!(
                    "figure line of sight found via ({}, {}) -> ({}, {})",
                    source.x, source.y, target.x, target.y
                );
                return Ok(FigureLineOfSight {
                    has_line_of_sight: true,
                    source_cell: Some(source),
                    target_cell: Some(target),
                    sight,
                });
            }
        }
    }

    debug!(
        "no figure line of sight between {} and {} cells",
        source_cells.len(),
        target_cells.len()
    );
    Ok(FigureLineOfSight {
        has_line_of_sight: false,
        source_cell: None,
        target_cell: None,
        sight: LineOfSight::blocked(),
    })
}
