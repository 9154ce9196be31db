use losgrid::save_state::SaveState;
use losgrid::{
    board_from_map_file, occupy_board, source_target_sight, take_marker_figures, to_map_text, CellPos, Direction,
    Edge, Figure, FigureKind, LosOptions,
};

#[test]
fn snapshot_round_trip_keeps_line_of_sight() {
    let mut board = board_from_map_file("a----\n-----\n--#--\n----b\n").unwrap();
    let mut figures = take_marker_figures(&mut board).unwrap();
    figures.push(Figure::single("ogre", FigureKind::Neutral, 2, 1));
    board.set_edge(3, 3, Direction::Down, Edge::Wall).unwrap();
    occupy_board(&mut board, &figures).unwrap();

    let before = source_target_sight(&board, &figures, &LosOptions::default()).unwrap();

    let path = std::env::temp_dir().join(format!("losgrid_snapshot_{}.json", std::process::id()));
    let path = path.to_str().unwrap();
    SaveState::from_board_and_figures(&board, &figures).save_to_file(path).unwrap();
    let loaded = SaveState::load_from_file(path).unwrap();
    std::fs::remove_file(path).ok();

    let restored_board = loaded.restore_board().unwrap();
    let restored_figures = loaded.restore_figures();
    assert_eq!(to_map_text(&restored_board), to_map_text(&board));
    assert_eq!(restored_board.edge_overrides(), board.edge_overrides());
    assert_eq!(restored_figures, figures);

    let after = source_target_sight(&restored_board, &restored_figures, &LosOptions::default()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn moving_a_neutral_figure_frees_its_old_cell() {
    let mut board = board_from_map_file("a---b\n").unwrap();
    let mut figures = take_marker_figures(&mut board).unwrap();
    figures.push(Figure::single("ogre", FigureKind::Neutral, 2, 0));

    occupy_board(&mut board, &figures).unwrap();
    let sight = source_target_sight(&board, &figures, &LosOptions::default()).unwrap().unwrap();
    assert!(!sight.has_line_of_sight);

    figures[2].move_to(CellPos::new(3, 0));
    occupy_board(&mut board, &figures).unwrap();
    assert_eq!(to_map_text(&board), "---X-");

    let sight = source_target_sight(&board, &figures, &LosOptions::default()).unwrap().unwrap();
    // The target's neighbour blocks every corner ray on a one-row board
    assert!(!sight.has_line_of_sight);

    figures.truncate(2);
    occupy_board(&mut board, &figures).unwrap();
    let sight = source_target_sight(&board, &figures, &LosOptions::default()).unwrap().unwrap();
    assert!(sight.has_line_of_sight);
}

#[test]
fn missing_source_figure_means_no_query() {
    let board = board_from_map_file("----\n").unwrap();
    let figures = vec![Figure::single("t", FigureKind::Target, 3, 0)];
    assert_eq!(source_target_sight(&board, &figures, &LosOptions::default()).unwrap(), None);
}
