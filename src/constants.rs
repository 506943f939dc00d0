//! Sizing, color, and styling constants for the picker.

/// Popup menu width
pub const MENU_WIDTH: f64 = 232.0;

/// Popup menu height
pub const MENU_HEIGHT: f64 = 268.0;

/// Distance between the anchor rectangle and the menu edge
pub const ANCHOR_GAP: f64 = 4.0;

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Thumb radius on 1D sliders
pub const THUMB_RADIUS: f64 = 7.0;

/// Border radius for slider tracks and the swatch
pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Input field width
pub const INPUT_WIDTH: f32 = 32.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 64.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Swatch edge length
pub const SWATCH_SIZE: f32 = 32.0;
