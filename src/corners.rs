use serde::{Deserialize, Serialize};

/// A cell in cell space: `0 <= x < width`, `0 <= y < height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub fn new(x: i32, y: i32) -> Self {
        CellPos { x, y }
    }

    /// Chebyshev distance to another cell
    pub fn chebyshev(&self, other: &CellPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// A lattice point in corner space: `0 <= x <= width`, `0 <= y <= height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerPoint {
    pub x: i32,
    pub y: i32,
}

impl CornerPoint {
    pub fn new(x: i32, y: i32) -> Self {
        CornerPoint { x, y }
    }
}

/// One of the four bounding corners of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Fixed iteration order used by every corner search
pub const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

impl Corner {
    /// Offset from the cell coordinate to this corner, each component 0 or 1
    pub fn offset(self) -> (i32, i32) {
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (1, 0),
            Corner::BottomLeft => (0, 1),
            Corner::BottomRight => (1, 1),
        }
    }
}

/// Map a cell and one of its corner tags to the corner-space lattice point
pub fn cell_to_corner(cell: CellPos, corner: Corner) -> CornerPoint {
    let (dx, dy) = corner.offset();
    CornerPoint::new(cell.x + dx, cell.y + dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_corner_offsets() {
        let cell = CellPos::new(3, 5);
        assert_eq!(cell_to_corner(cell, Corner::TopLeft), CornerPoint::new(3, 5));
        assert_eq!(cell_to_corner(cell, Corner::TopRight), CornerPoint::new(4, 5));
        assert_eq!(cell_to_corner(cell, Corner::BottomLeft), CornerPoint::new(3, 6));
        assert_eq!(cell_to_corner(cell, Corner::BottomRight), CornerPoint::new(4, 6));
    }

    #[test]
    fn test_corner_order_is_fixed() {
        assert_eq!(CORNERS[0], Corner::TopLeft);
        assert_eq!(CORNERS[3], Corner::BottomRight);
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(CellPos::new(0, 0).chebyshev(&CellPos::new(1, 1)), 1);
        assert_eq!(CellPos::new(0, 0).chebyshev(&CellPos::new(3, -1)), 3);
    }
}
