use arboard::Clipboard;
use log::{error, info, warn};
use losgrid::action_log::{Action, ActionLog};
use losgrid::config::Config;
use losgrid::corners::{cell_to_corner, CellPos};
use losgrid::figure::{occupy_board, source_target_sight, take_marker_figures, Figure, FigureKind};
use losgrid::grid::{Board, Cell, Direction, Edge, EdgePos};
use losgrid::logging::init_logging;
use losgrid::map_text::{board_from_map_file, to_map_text};
use losgrid::save_state::SaveState;
use losgrid::visibility::{FigureLineOfSight, LosOptions};
use macroquad::prelude::*;
use std::fs;

/// Pointer distance (in cells) within which an edge can be toggled
const EDGE_THRESHOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Pointer,
    Terrain,
}

/// Visualization state
struct VisState {
    config: Config,
    board: Board,
    figures: Vec<Figure>,
    options: LosOptions,
    tool: Tool,
    /// Figure being dragged in pointer mode
    dragging: Option<usize>,
    /// Cell value painted while a mouse button is held in terrain mode
    fill: Option<Cell>,
    sight: Option<FigureLineOfSight>,
    action_log: ActionLog,
    cell_size: f32,
}

impl VisState {
    fn new(config: Config) -> Self {
        let mut board = load_board(&config);
        let mut figures = match take_marker_figures(&mut board) {
            Ok(figures) => figures,
            Err(e) => {
                warn!("Ignoring map markers: {}", e);
                Vec::new()
            }
        };
        if figures.is_empty() {
            figures = default_figures(&board);
        }

        let options = LosOptions {
            ignore_figures: config.visibility.ignore_figures,
            cells_to_ignore: Vec::new(),
        };
        let cell_size = config.view.cell_size;

        let mut state = VisState {
            config,
            board,
            figures,
            options,
            tool: Tool::Pointer,
            dragging: None,
            fill: None,
            sight: None,
            action_log: ActionLog::new(),
            cell_size,
        };
        state.update_sight();
        state
    }

    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<CellPos> {
        let x = (mouse_x / self.cell_size).floor() as i32;
        let y = (mouse_y / self.cell_size).floor() as i32;
        self.board.is_valid_cell(x, y).then(|| CellPos::new(x, y))
    }

    /// Nearest grid line segment under the pointer, if close enough
    fn edge_at(&self, mouse_x: f32, mouse_y: f32) -> Option<EdgePos> {
        let fx = mouse_x / self.cell_size;
        let fy = mouse_y / self.cell_size;
        let dist_x = (fx - fx.round()).abs();
        let dist_y = (fy - fy.round()).abs();

        let edge = if dist_x <= dist_y {
            if dist_x > EDGE_THRESHOLD {
                return None;
            }
            EdgePos::new(fx.round() as i32, fy.floor() as i32, Direction::Down)
        } else {
            if dist_y > EDGE_THRESHOLD {
                return None;
            }
            EdgePos::new(fx.floor() as i32, fy.round() as i32, Direction::Right)
        };

        self.board
            .is_valid_edge(edge.x, edge.y, edge.direction)
            .then_some(edge)
    }

    fn handle_pointer(&mut self, mouse_x: f32, mouse_y: f32) {
        if is_mouse_button_pressed(MouseButton::Left) {
            self.dragging = self
                .cell_at(mouse_x, mouse_y)
                .and_then(|cell| self.figures.iter().position(|f| f.occupies(cell)));
        }

        if is_mouse_button_released(MouseButton::Left) {
            let Some(index) = self.dragging.take() else {
                return;
            };
            let Some(cell) = self.cell_at(mouse_x, mouse_y) else {
                return;
            };

            let mut moved = self.figures[index].clone();
            moved.move_to(cell);
            if moved.cells.iter().any(|c| !self.board.is_valid_cell(c.x, c.y)) {
                warn!("Figure {} does not fit at ({}, {})", moved.id, cell.x, cell.y);
                return;
            }

            self.action_log.log(Action::MoveFigure {
                id: moved.id.clone(),
                x: cell.x,
                y: cell.y,
            });
            self.figures[index] = moved;
            self.update_sight();
        }
    }

    fn handle_terrain(&mut self, mouse_x: f32, mouse_y: f32) {
        if is_mouse_button_pressed(MouseButton::Left) {
            self.fill = Some(Cell::OutOfBounds);
        } else if is_mouse_button_pressed(MouseButton::Right) {
            self.fill = Some(Cell::Empty);
        }
        if is_mouse_button_released(MouseButton::Left) || is_mouse_button_released(MouseButton::Right) {
            self.fill = None;
        }

        if let (Some(fill), Some(cell)) = (self.fill, self.cell_at(mouse_x, mouse_y)) {
            let occupied = self.figures.iter().any(|f| f.occupies(cell));
            if !occupied && self.board.cell_or_oob(cell.x, cell.y) != fill && self.paint_cell(cell, fill) {
                self.update_sight();
            }
        }

        if is_key_pressed(KeyCode::W) {
            if let Some(edge) = self.edge_at(mouse_x, mouse_y) {
                self.toggle_wall(edge);
                self.update_sight();
            }
        }
    }

    fn paint_cell(&mut self, cell: CellPos, fill: Cell) -> bool {
        match self.board.set_cell(cell.x, cell.y, fill) {
            Ok(()) => {
                self.action_log.log(Action::SetCell { x: cell.x, y: cell.y, cell: fill });
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    fn toggle_wall(&mut self, edge: EdgePos) {
        let result = if self.board.edge_override(edge) == Some(Edge::Wall) {
            self.board.clear_edge(edge.x, edge.y, edge.direction).map(|_| Action::ClearEdge {
                x: edge.x,
                y: edge.y,
                direction: edge.direction,
            })
        } else {
            self.board
                .set_edge(edge.x, edge.y, edge.direction, Edge::Wall)
                .map(|()| Action::SetEdge {
                    x: edge.x,
                    y: edge.y,
                    direction: edge.direction,
                    edge: Edge::Wall,
                })
        };

        match result {
            Ok(action) => self.action_log.log(action),
            Err(e) => warn!("{}", e),
        }
    }

    fn update_sight(&mut self) {
        if let Err(e) = occupy_board(&mut self.board, &self.figures) {
            warn!("Figures do not fit the board: {}", e);
            self.sight = None;
            return;
        }

        self.sight = match source_target_sight(&self.board, &self.figures, &self.options) {
            Ok(sight) => sight,
            Err(e) => {
                warn!("Line of sight query failed: {}", e);
                None
            }
        };

        if let Some(sight) = &self.sight {
            let cells_of = |kind: FigureKind| {
                self.figures
                    .iter()
                    .find(|f| f.kind == kind)
                    .map(|f| f.cells.clone())
                    .unwrap_or_default()
            };
            self.action_log.log(Action::CheckLineOfSight {
                source: cells_of(FigureKind::Source),
                target: cells_of(FigureKind::Target),
                visible: sight.has_line_of_sight,
            });
        }
    }

    fn copy_to_clipboard(&self) {
        let map_text = to_map_text(&self.board);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(map_text) {
                    error!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Board copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => error!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read clipboard: {}", e);
                return;
            }
        };

        let mut board = match board_from_map_file(&text) {
            Ok(board) => board,
            Err(e) => {
                warn!("Clipboard does not hold a board: {}", e);
                return;
            }
        };

        let mut figures = take_marker_figures(&mut board).unwrap_or_default();
        if figures.is_empty() {
            figures = default_figures(&board);
        }

        self.action_log.log(Action::PasteBoard {
            width: board.width(),
            height: board.height(),
        });
        self.board = board;
        self.figures = figures;
        self.dragging = None;
        self.update_sight();
    }

    fn save_snapshot(&self) {
        let state = SaveState::from_board_and_figures(&self.board, &self.figures);
        match state.save_to_file(&self.config.board.save_path) {
            Ok(()) => info!("Saved board to {}", self.config.board.save_path),
            Err(e) => error!("{}", e),
        }
    }

    fn switch_tool(&mut self) {
        self.tool = match self.tool {
            Tool::Pointer => Tool::Terrain,
            Tool::Terrain => Tool::Pointer,
        };
        self.dragging = None;
        self.fill = None;
    }

    fn finish(&self) {
        let logging = &self.config.logging;
        if !logging.enable_action_log {
            return;
        }
        match self.action_log.save_to_file(&logging.action_log_path) {
            Ok(()) => info!("Action log written to {}\n{}", logging.action_log_path, self.action_log.summary()),
            Err(e) => error!("Failed to write action log: {}", e),
        }
    }

    fn draw(&self) {
        let view = &self.config.view;
        clear_background(Color::from_rgba(view.background_r, view.background_g, view.background_b, 255));

        let size = self.cell_size;
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                let color = match self.board.cell_or_oob(x, y) {
                    Cell::OutOfBounds => Color::from_rgba(40, 40, 40, 255),
                    Cell::Blocking => Color::from_rgba(150, 90, 60, 255),
                    _ => Color::from_rgba(220, 220, 210, 255),
                };
                draw_rectangle(x as f32 * size, y as f32 * size, size - 1.0, size - 1.0, color);
            }
        }

        if view.show_edges {
            self.draw_edges();
        }

        for (index, figure) in self.figures.iter().enumerate() {
            let color = match figure.kind {
                FigureKind::Source => BLUE,
                FigureKind::Target => RED,
                FigureKind::Neutral => DARKGRAY,
            };
            let alpha = if self.dragging == Some(index) { 0.5 } else { 1.0 };
            for cell in &figure.cells {
                draw_circle(
                    (cell.x as f32 + 0.5) * size,
                    (cell.y as f32 + 0.5) * size,
                    size * 0.35,
                    Color { a: alpha, ..color },
                );
            }
        }

        self.draw_sight();

        if self.tool == Tool::Terrain {
            let (mouse_x, mouse_y) = mouse_position();
            if let Some(edge) = self.edge_at(mouse_x, mouse_y) {
                let ((x1, y1), (x2, y2)) = edge_segment(edge, size);
                draw_line(x1, y1, x2, y2, 3.0, YELLOW);
            }
        }

        let visible = match &self.sight {
            Some(sight) if sight.has_line_of_sight => "visible",
            Some(_) => "blocked",
            None => "n/a",
        };
        let lines = [
            format!("Tool: {:?} (Tab to switch)", self.tool),
            format!("Line of sight: {}", visible),
            "Pointer: drag figures".to_string(),
            "Terrain: left paint, right erase, W toggle wall".to_string(),
            "C copy, V paste, S save, Esc quit".to_string(),
        ];
        let text_y = self.board.height() as f32 * size + 20.0;
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, text_y + i as f32 * 20.0, 20.0, WHITE);
        }
    }

    fn draw_edges(&self) {
        for (edge, value) in self.board.edge_overrides() {
            let color = match value {
                Edge::Wall => BLACK,
                Edge::Blocked => MAROON,
                Edge::Clear => LIGHTGRAY,
            };
            let ((x1, y1), (x2, y2)) = edge_segment(edge, self.cell_size);
            draw_line(x1, y1, x2, y2, 4.0, color);
        }
    }

    fn draw_sight(&self) {
        let Some(sight) = &self.sight else {
            return;
        };
        let (Some(source_cell), Some(target_cell), Some(source_corner)) =
            (sight.source_cell, sight.target_cell, sight.sight.source_corner)
        else {
            return;
        };
        let Some((first, last)) = sight.sight.silhouette() else {
            return;
        };

        let size = self.cell_size;
        let from = cell_to_corner(source_cell, source_corner);
        for corner in [first, last] {
            let to = cell_to_corner(target_cell, corner);
            draw_line(
                from.x as f32 * size,
                from.y as f32 * size,
                to.x as f32 * size,
                to.y as f32 * size,
                2.0,
                GREEN,
            );
        }
    }
}

fn load_board(config: &Config) -> Board {
    let path = &config.board.map_path;
    match fs::read_to_string(path) {
        Ok(text) => match board_from_map_file(&text) {
            Ok(board) => {
                info!("Loaded {}x{} board from {}", board.width(), board.height(), path);
                return board;
            }
            Err(e) => warn!("Failed to parse {}: {}", path, e),
        },
        Err(e) => info!("No map at {} ({}), starting with an empty board", path, e),
    }
    Board::empty(config.board.width, config.board.height)
}

fn default_figures(board: &Board) -> Vec<Figure> {
    let (w, h) = (board.width(), board.height());
    vec![
        Figure::single("source", FigureKind::Source, 0, 0),
        Figure::single("target", FigureKind::Target, w - 1, h - 1),
        Figure::single("neutral", FigureKind::Neutral, w / 2, h / 2),
    ]
}

/// Screen-space endpoints of an edge
fn edge_segment(edge: EdgePos, size: f32) -> ((f32, f32), (f32, f32)) {
    let x = edge.x as f32 * size;
    let y = edge.y as f32 * size;
    match edge.direction {
        Direction::Right => ((x, y), (x + size, y)),
        Direction::Down => ((x, y), (x, y + size)),
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    let size = config.view.cell_size;
    Conf {
        window_title: config.view.window_title.clone(),
        window_width: ((config.board.width as f32 * size) as i32).max(640),
        window_height: ((config.board.height as f32 * size) as i32 + 120).max(480),
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let mut state = VisState::new(config);

    loop {
        let (mouse_x, mouse_y) = mouse_position();
        match state.tool {
            Tool::Pointer => state.handle_pointer(mouse_x, mouse_y),
            Tool::Terrain => state.handle_terrain(mouse_x, mouse_y),
        }

        if is_key_pressed(KeyCode::Tab) {
            state.switch_tool();
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            state.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            state.save_snapshot();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    state.finish();
}
