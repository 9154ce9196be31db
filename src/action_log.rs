use crate::corners::CellPos;
use crate::grid::{Cell, Direction, Edge};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Edits and queries a user performs on the board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Paint a cell (x, y)
    SetCell { x: i32, y: i32, cell: Cell },
    /// Paint an explicit edge override
    SetEdge { x: i32, y: i32, direction: Direction, edge: Edge },
    /// Remove an explicit edge override
    ClearEdge { x: i32, y: i32, direction: Direction },
    /// Move a figure so its anchor lands on (x, y)
    MoveFigure { id: String, x: i32, y: i32 },
    /// Resize the board
    Resize { width: i32, height: i32 },
    /// Replace the board from clipboard map text
    PasteBoard { width: i32, height: i32 },
    /// Line-of-sight query and its outcome
    CheckLineOfSight { source: Vec<CellPos>, target: Vec<CellPos>, visible: bool },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Session journal
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        log::debug!("action {:?}", action);
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut cell_edits = 0;
        let mut edge_edits = 0;
        let mut figure_moves = 0;
        let mut queries = 0;
        let mut visible = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SetCell { .. } => cell_edits += 1,
                Action::SetEdge { .. } | Action::ClearEdge { .. } => edge_edits += 1,
                Action::MoveFigure { .. } => figure_moves += 1,
                Action::CheckLineOfSight { visible: v, .. } => {
                    queries += 1;
                    if *v {
                        visible += 1;
                    }
                }
                Action::Resize { .. } | Action::PasteBoard { .. } => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Board Edits: {} cells, {} edges\n\
             Figures: {} moves, {} line-of-sight queries ({} visible)",
            duration,
            self.actions.len(),
            cell_edits,
            edge_edits,
            figure_moves,
            queries,
            visible
        )
    }
}
