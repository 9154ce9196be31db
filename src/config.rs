use serde::Deserialize;
use std::fs;

pub const DEFAULT_CONFIG_PATH: &str = "losgrid.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct BoardConfig {
    /// Map file to open at startup; an empty board is used when missing
    #[serde(default = "default_map_path")]
    pub map_path: String,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Snapshot written by the save key
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_edges")]
    pub show_edges: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default)]
    pub ignore_figures: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    #[serde(default = "default_level")]
    pub level: String,
    /// Optional file receiving a copy of the log output
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_map_path() -> String { "maps/default.map".to_string() }
fn default_width() -> i32 { 12 }
fn default_height() -> i32 { 9 }
fn default_save_path() -> String { "board_state.json".to_string() }
fn default_cell_size() -> f32 { 50.0 }
fn default_window_title() -> String { "losgrid - Line of Sight".to_string() }
fn default_bg_r() -> u8 { 0x77 }
fn default_bg_g() -> u8 { 0x77 }
fn default_bg_b() -> u8 { 0x77 }
fn default_show_edges() -> bool { true }
fn default_level() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            map_path: default_map_path(),
            width: default_width(),
            height: default_height(),
            save_path: default_save_path(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_edges: default_show_edges(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_file: None,
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            view: ViewConfig::default(),
            visibility: VisibilityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `Info`
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from `losgrid.toml`, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Runs before logging is set up, so problems go straight to stderr
    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path, e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }
}
