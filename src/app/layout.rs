//! Width of the tree panel and the drag state of its resizer.
//!
//! Resizing is a two-state machine: a press on the resizer enters
//! `Resizing`, pointer moves only change the width while in that state, and a
//! release returns to `Idle`.

use serde::Serialize;

pub const MIN_TREE_WIDTH_PERCENT: f64 = 7.5;
pub const MAX_TREE_WIDTH_PERCENT: f64 = 75.0;
pub const DEFAULT_TREE_WIDTH_PERCENT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeState {
    Idle,
    Resizing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    pub resize_state: ResizeState,
    pub tree_width_percent: f64,
}

impl PanelLayout {
    pub fn new(tree_width_percent: f64) -> Self {
        Self {
            resize_state: ResizeState::Idle,
            tree_width_percent: clamp_tree_width(tree_width_percent),
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize_state == ResizeState::Resizing
    }

    pub fn press(&mut self) {
        self.resize_state = ResizeState::Resizing;
    }

    /// Moves the divider to `pointer_x` within a container `total_width` wide.
    ///
    /// Returns `true` if the width changed.
    pub fn drag(&mut self, pointer_x: f64, total_width: f64) -> bool {
        let usable = total_width > 0.0 && pointer_x.is_finite();
        if !self.is_resizing() || !usable {
            return false;
        }
        let width = clamp_tree_width(pointer_x * 100.0 / total_width);
        if width == self.tree_width_percent {
            return false;
        }
        self.tree_width_percent = width;
        true
    }

    /// Ends a drag. Returns `true` if a drag was in progress.
    pub fn release(&mut self) -> bool {
        let was_resizing = self.is_resizing();
        self.resize_state = ResizeState::Idle;
        was_resizing
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(DEFAULT_TREE_WIDTH_PERCENT)
    }
}

fn clamp_tree_width(percent: f64) -> f64 {
    if percent.is_nan() {
        return DEFAULT_TREE_WIDTH_PERCENT;
    }
    percent.clamp(MIN_TREE_WIDTH_PERCENT, MAX_TREE_WIDTH_PERCENT)
}
