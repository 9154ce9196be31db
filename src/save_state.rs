use crate::error::BoardError;
use crate::figure::Figure;
use crate::grid::{Board, Cell, Edge, EdgePos};
use serde::{Deserialize, Serialize};
use std::fs;

/// Save state containing the board and figure positions
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    /// Board revision number at save time
    pub revision: u64,
    /// Board dimensions
    pub width: i32,
    pub height: i32,
    /// Row-major cells
    pub cells: Vec<Cell>,
    /// Explicit edge overrides only; derived edges are rebuilt on load
    pub edges: Vec<EdgeOverride>,
    pub figures: Vec<Figure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeOverride {
    pub position: EdgePos,
    pub edge: Edge,
}

impl SaveState {
    /// Create a save state from the current board and figures
    pub fn from_board_and_figures(board: &Board, figures: &[Figure]) -> Self {
        let edges = board
            .edge_overrides()
            .into_iter()
            .map(|(position, edge)| EdgeOverride { position, edge })
            .collect();

        SaveState {
            revision: board.revision(),
            width: board.width(),
            height: board.height(),
            cells: board.cells().to_vec(),
            edges,
            figures: figures.to_vec(),
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize save state: {}", e))?;

        fs::write(path, json)
            .map_err(|e| format!("Failed to write save file: {}", e))?;

        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read save file: {}", e))?;

        let save_state: SaveState = serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse save file: {}", e))?;

        Ok(save_state)
    }

    /// Restore the board, including explicit edge overrides
    pub fn restore_board(&self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.width, self.height, self.cells.clone())?;
        for EdgeOverride { position, edge } in &self.edges {
            board.set_edge(position.x, position.y, position.direction, *edge)?;
        }
        Ok(board)
    }

    pub fn restore_figures(&self) -> Vec<Figure> {
        self.figures.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureKind;
    use crate::grid::Direction;

    #[test]
    fn test_json_restores_board_and_overrides() {
        let mut board = Board::empty(3, 2);
        board.set_cell(1, 0, Cell::OutOfBounds).unwrap();
        board.set_edge(2, 1, Direction::Down, Edge::Wall).unwrap();
        let figures = vec![Figure::single("s", FigureKind::Source, 0, 1)];

        let state = SaveState::from_board_and_figures(&board, &figures);
        let json = serde_json::to_string(&state).unwrap();
        let loaded: SaveState = serde_json::from_str(&json).unwrap();

        let restored = loaded.restore_board().unwrap();
        assert_eq!(restored.cells(), board.cells());
        assert_eq!(restored.edge_overrides(), board.edge_overrides());
        assert_eq!(loaded.restore_figures(), figures);
    }

    #[test]
    fn test_restore_rejects_inconsistent_dimensions() {
        let state = SaveState {
            revision: 0,
            width: 2,
            height: 2,
            cells: vec![Cell::Empty; 3],
            edges: Vec::new(),
            figures: Vec::new(),
        };
        assert!(state.restore_board().is_err());
    }
}
