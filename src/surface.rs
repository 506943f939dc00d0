//! The rendering surface the menu is drawn into.

use crate::color::HslColor;
use crate::placement::Point;
use crate::style::StyleConfig;

/// Host-provided drawing target for the menu.
///
/// Called while the picker updates its own state, so implementations must
/// not call back into the picker synchronously.
pub trait MenuSurface {
    /// Make the menu visible at `position` with the given style and color.
    fn show(&self, position: Point, style: &StyleConfig, color: HslColor);

    /// Move an already visible menu.
    fn move_to(&self, position: Point);

    /// Re-render with a new style.
    fn restyle(&self, style: &StyleConfig);

    /// Reflect the current color.
    fn show_color(&self, color: HslColor);

    fn hide(&self);
}

/// Surface that draws nothing, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl MenuSurface for NullSurface {
    fn show(&self, _position: Point, _style: &StyleConfig, _color: HslColor) {}
    fn move_to(&self, _position: Point) {}
    fn restyle(&self, _style: &StyleConfig) {}
    fn show_color(&self, _color: HslColor) {}
    fn hide(&self) {}
}
