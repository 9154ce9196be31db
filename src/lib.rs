pub mod action_log;
pub mod adjacency;
pub mod config;
pub mod corners;
pub mod error;
pub mod figure;
pub mod grid;
pub mod logging;
pub mod map_text;
pub mod ray;
pub mod save_state;
pub mod visibility;

pub use adjacency::{are_cells_adjacent, are_cells_connected, connected_neighbours};
pub use corners::{cell_to_corner, CellPos, Corner, CornerPoint, CORNERS};
pub use error::BoardError;
pub use figure::{occupy_board, source_target_sight, take_marker_figures, Figure, FigureKind};
pub use grid::{Board, Cell, Direction, Edge, EdgePos};
pub use map_text::{board_from_map_file, board_from_rows, to_map_text};
pub use ray::{trace, traverse, traverse_with, RayStep, RayTrace, RayVisitor};
pub use visibility::{
    check_line_of_sight, check_line_of_sight_figures, ray_blocked, FigureLineOfSight, LineOfSight, LosOptions,
};
