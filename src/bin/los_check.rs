/// Line-of-sight query against a map file
///
/// Prints `visible` with the winning corners, or `blocked`.
/// Exit status: 0 visible, 1 blocked, 2 usage or input error.

use losgrid::config::Config;
use losgrid::corners::CellPos;
use losgrid::logging::init_logging;
use losgrid::map_text::board_from_map_file;
use losgrid::visibility::{check_line_of_sight, LosOptions};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let ignore_figures = args.iter().any(|a| a == "--ignore-figures");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    if positional.len() != 5 {
        eprintln!("Usage: {} <map-file> <sx> <sy> <tx> <ty> [--ignore-figures]", args[0]);
        eprintln!("Checks line of sight between two cells of a map");
        process::exit(2);
    }

    let config = Config::load();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let options = LosOptions {
        ignore_figures: ignore_figures || config.visibility.ignore_figures,
        cells_to_ignore: Vec::new(),
    };

    match run(&positional, &options) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn run(positional: &[&String], options: &LosOptions) -> Result<bool, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(positional[0])?;
    let board = board_from_map_file(&text)?;

    let coords = positional[1..]
        .iter()
        .map(|s| s.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()?;
    let source = CellPos::new(coords[0], coords[1]);
    let target = CellPos::new(coords[2], coords[3]);

    let sight = check_line_of_sight(&board, source, target, options)?;
    match sight.source_corner {
        Some(corner) if sight.has_line_of_sight => {
            println!("visible");
            println!("source corner: {:?}", corner);
            println!("target corners: {:?}", sight.target_corners);
        }
        _ => println!("blocked"),
    }

    Ok(sight.has_line_of_sight)
}
