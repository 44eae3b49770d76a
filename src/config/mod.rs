pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::app::layout::DEFAULT_TREE_WIDTH_PERCENT;

/// User-tunable startup settings.
///
/// Missing fields fall back to their defaults, so an old or hand-written
/// config file keeps working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
    pub min_window_size: (f64, f64),
    /// Initial width of the tree panel in percent of the window.
    pub tree_width_percent: f64,
    pub dark_mode: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: (1100.0, 750.0),
            window_position: (100.0, 100.0),
            min_window_size: (640.0, 400.0),
            tree_width_percent: DEFAULT_TREE_WIDTH_PERCENT,
            dark_mode: false,
        }
    }
}
