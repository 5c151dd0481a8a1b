use complexwonder_core::ColorSettings;
use serde::{Deserialize, Serialize};

/// Events sent from the input side (pointer, wheel, text box) to the session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Drag by (dx, dy) pixels, y up
    Pan { dx: f64, dy: f64 },

    /// Multiply the scale around the canvas center
    Zoom { factor: f64 },

    /// Multiply the scale keeping the point under the pointer fixed.
    /// (x, y) is the pointer in canvas pixels, origin top-left.
    ZoomAt { factor: f64, x: f64, y: f64 },

    /// Canvas resized
    Resize { width: u32, height: u32 },

    /// Expression text submitted
    Commit { expression: String },

    /// Switch color mode or constants
    SetColorSettings { settings: ColorSettings },

    /// Back to the preset view and colors
    Reset,
}
