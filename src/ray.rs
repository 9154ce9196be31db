//! Grid ray traversal between two corner-space points.
//!
//! A segment between lattice points crosses three kinds of grid geometry:
//! cell interiors, edges (a grid line crossed away from any lattice point),
//! and lattice points it passes exactly through. All three are reported in
//! order from source to destination, endpoints excluded.
//!
//! Crossing `i` of the vertical grid lines happens at parameter `i / |dx|`
//! and crossing `j` of the horizontal ones at `j / |dy|`. Comparing
//! `i * |dy|` against `j * |dx|` orders them exactly; equality means the
//! segment passes through a lattice point.

use crate::corners::{CellPos, CornerPoint};
use crate::grid::{Direction, EdgePos};

/// One piece of geometry visited by a ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayStep {
    Cell(CellPos),
    Edge(EdgePos),
    Point(CornerPoint),
}

/// Receives the geometry crossed by a ray. Returning `Some` stops the traversal.
pub trait RayVisitor {
    type Output;

    fn on_cell(&mut self, _cell: CellPos) -> Option<Self::Output> {
        None
    }

    fn on_edge(&mut self, _edge: EdgePos) -> Option<Self::Output> {
        None
    }

    fn on_point(&mut self, _point: CornerPoint) -> Option<Self::Output> {
        None
    }
}

/// Ordered iterator over everything a segment crosses
#[derive(Debug, Clone)]
pub struct RaySteps {
    origin: (i32, i32),
    step: (i32, i32),
    extent: (i32, i32),
    /// Next crossing index per sweep (x, y); unit index for axis-aligned rays
    next: (i32, i32),
    cell: (i32, i32),
    pending: Option<RayStep>,
    started: bool,
}

/// Iterate the steps of the segment (x0, y0) -> (x1, y1)
pub fn steps(x0: i32, y0: i32, x1: i32, y1: i32) -> RaySteps {
    let sx = (x1 - x0).signum();
    let sy = (y1 - y0).signum();
    let extent = ((x1 - x0).abs(), (y1 - y0).abs());
    let axis_aligned = extent.0 == 0 || extent.1 == 0;

    RaySteps {
        origin: (x0, y0),
        step: (sx, sy),
        extent,
        next: if axis_aligned { (0, 0) } else { (1, 1) },
        // Cell just past the start corner in the direction of travel
        cell: (if sx > 0 { x0 } else { x0 - 1 }, if sy > 0 { y0 } else { y0 - 1 }),
        pending: None,
        started: false,
    }
}

impl RaySteps {
    /// Rays running along a grid line only touch edges and lattice points
    fn next_axis_aligned(&mut self) -> Option<RayStep> {
        let (adx, ady) = self.extent;
        let (x0, y0) = self.origin;
        let (sx, sy) = self.step;
        let len = adx + ady;
        let k = self.next.0;
        if k >= len {
            return None;
        }
        self.next.0 += 1;

        let ax = x0 + sx * k;
        let ay = y0 + sy * k;
        let edge = if adx == 0 {
            EdgePos::new(x0, ay.min(ay + sy), Direction::Down)
        } else {
            EdgePos::new(ax.min(ax + sx), y0, Direction::Right)
        };

        if k + 1 < len {
            self.pending = Some(RayStep::Point(CornerPoint::new(ax + sx, ay + sy)));
        }
        Some(RayStep::Edge(edge))
    }
}

impl Iterator for RaySteps {
    type Item = RayStep;

    fn next(&mut self) -> Option<RayStep> {
        if let Some(step) = self.pending.take() {
            return Some(step);
        }

        let (adx, ady) = self.extent;
        if adx == 0 || ady == 0 {
            return self.next_axis_aligned();
        }

        if !self.started {
            self.started = true;
            return Some(RayStep::Cell(CellPos::new(self.cell.0, self.cell.1)));
        }

        let (x0, y0) = self.origin;
        let (sx, sy) = self.step;
        let (i, j) = self.next;

        // Common denominator: both keys are parameters scaled by adx * ady
        let far = adx * ady;
        let key_x = if i < adx { i * ady } else { far };
        let key_y = if j < ady { j * adx } else { far };
        if key_x == far && key_y == far {
            return None;
        }

        let event = if key_x == key_y {
            self.next = (i + 1, j + 1);
            self.cell.0 += sx;
            self.cell.1 += sy;
            RayStep::Point(CornerPoint::new(x0 + sx * i, y0 + sy * j))
        } else if key_x < key_y {
            self.next.0 += 1;
            self.cell.0 += sx;
            let y = (y0 * adx + sy * i * ady).div_euclid(adx);
            RayStep::Edge(EdgePos::new(x0 + sx * i, y, Direction::Down))
        } else {
            self.next.1 += 1;
            self.cell.1 += sy;
            let x = (x0 * ady + sx * j * adx).div_euclid(ady);
            RayStep::Edge(EdgePos::new(x, y0 + sy * j, Direction::Right))
        };

        self.pending = Some(RayStep::Cell(CellPos::new(self.cell.0, self.cell.1)));
        Some(event)
    }
}

/// Walk the segment, handing each step to `visitor`; the first `Some` wins
pub fn traverse<V: RayVisitor>(x0: i32, y0: i32, x1: i32, y1: i32, visitor: &mut V) -> Option<V::Output> {
    for step in steps(x0, y0, x1, y1) {
        let found = match step {
            RayStep::Cell(cell) => visitor.on_cell(cell),
            RayStep::Edge(edge) => visitor.on_edge(edge),
            RayStep::Point(point) => visitor.on_point(point),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

struct FnVisitor<C, E, P> {
    on_cell: C,
    on_edge: E,
    on_point: P,
}

impl<T, C, E, P> RayVisitor for FnVisitor<C, E, P>
where
    C: FnMut(CellPos) -> Option<T>,
    E: FnMut(EdgePos) -> Option<T>,
    P: FnMut(CornerPoint) -> Option<T>,
{
    type Output = T;

    fn on_cell(&mut self, cell: CellPos) -> Option<T> {
        (self.on_cell)(cell)
    }

    fn on_edge(&mut self, edge: EdgePos) -> Option<T> {
        (self.on_edge)(edge)
    }

    fn on_point(&mut self, point: CornerPoint) -> Option<T> {
        (self.on_point)(point)
    }
}

/// Closure form of [`traverse`]
pub fn traverse_with<T>(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    on_cell: impl FnMut(CellPos) -> Option<T>,
    on_edge: impl FnMut(EdgePos) -> Option<T>,
    on_point: impl FnMut(CornerPoint) -> Option<T>,
) -> Option<T> {
    let mut visitor = FnVisitor { on_cell, on_edge, on_point };
    traverse(x0, y0, x1, y1, &mut visitor)
}

/// Everything a ray crosses, collected instead of short-circuited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RayTrace {
    pub cells: Vec<CellPos>,
    pub edges: Vec<EdgePos>,
    pub points: Vec<CornerPoint>,
    /// Merged sequence in traversal order
    pub steps: Vec<RayStep>,
}

pub fn trace(x0: i32, y0: i32, x1: i32, y1: i32) -> RayTrace {
    let mut out = RayTrace::default();
    for step in steps(x0, y0, x1, y1) {
        match step {
            RayStep::Cell(cell) => out.cells.push(cell),
            RayStep::Edge(edge) => out.edges.push(edge),
            RayStep::Point(point) => out.points.push(point),
        }
        out.steps.push(step);
    }
    out
}
