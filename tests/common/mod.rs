#![allow(dead_code)]

use losgrid::{board_from_rows, take_marker_figures, Board, CellPos, FigureKind};
use std::fs;
use std::path::Path;

/// Board from ASCII rows; panics on malformed input
pub fn board(rows: &[&str]) -> Board {
    board_from_rows(rows).expect("test board should parse")
}

/// A map with one `a` (source) and one `b` (target) marker
pub struct Scenario {
    pub board: Board,
    pub source: CellPos,
    pub target: CellPos,
}

pub fn parse_scenario(text: &str) -> Result<Scenario, Box<dyn std::error::Error>> {
    let mut board = losgrid::board_from_map_file(text)?;
    let figures = take_marker_figures(&mut board)?;

    let find = |kind| {
        figures
            .iter()
            .find(|f| f.kind == kind)
            .and_then(|f| f.anchor())
            .ok_or_else(|| format!("missing {:?} marker", kind))
    };
    let source = find(FigureKind::Source)?;
    let target = find(FigureKind::Target)?;

    Ok(Scenario { board, source, target })
}

pub fn parse_scenario_file(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    parse_scenario(&contents)
}

/// Flip map text horizontally (mirror left-right)
pub fn flip_horizontal(text: &str) -> String {
    text.lines()
        .map(|line| line.chars().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flip map text vertically (mirror top-bottom)
pub fn flip_vertical(text: &str) -> String {
    text.lines().rev().collect::<Vec<_>>().join("\n")
}

/// The map and its three mirror images, labelled
pub fn mirrored_variants(text: &str) -> Vec<(&'static str, String)> {
    let text = text.trim_end().to_string();
    vec![
        ("original", text.clone()),
        ("h_flip", flip_horizontal(&text)),
        ("v_flip", flip_vertical(&text)),
        ("hv_flip", flip_vertical(&flip_horizontal(&text))),
    ]
}

/// Scenario files in `dir`, sorted by name
pub fn scenario_files(dir: &str) -> Vec<std::path::PathBuf> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).map(|e| e.path()).collect())
        .unwrap_or_default();
    paths.retain(|p| p.extension().and_then(|s| s.to_str()) == Some("map"));
    paths.sort();
    paths
}
