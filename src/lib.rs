//! # floem-popup-picker
//!
//! A popup color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! The host opens the menu next to an anchor rectangle, listens for
//! lifecycle and value events, and can sample the color rendered at a page
//! coordinate. The interaction state machine ([`ColorPicker`]) is headless;
//! [`picker_menu`] renders it with Floem.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_popup_picker::{ColorPicker, EventKind, Listener, MenuSignals, Rect, picker_menu};
//!
//! let menu = MenuSignals::new();
//! let picker = ColorPicker::with_surface(menu);
//! picker.add_event_listener(
//!     EventKind::Confirmed,
//!     &Listener::new(|e| println!("picked {:?}", e.color())),
//! );
//! picker.open_menu(Rect::new(40.0, 40.0, 80.0, 24.0));
//! // Place `picker_menu(picker.clone(), menu)` on top of your Floem view tree.
//! ```

mod channel_slider;
mod color;
pub mod config;
mod constants;
mod error;
mod events;
mod inputs;
mod math;
mod menu;
mod menu_view;
mod picker;
mod placement;
mod sampler;
mod style;
mod surface;

pub use color::{HslColor, Rgba8};
pub use config::PickerConfig;
pub use error::{PickerError, Result};
pub use events::{EventHub, EventKind, Listener, PickerEvent};
pub use menu::MenuState;
pub use menu_view::MenuSignals;
pub use picker::ColorPicker;
pub use placement::{Horizontal, Placement, Point, Rect, Vertical};
pub use sampler::{PixelBuffer, PixelSource};
pub use style::{PartStyle, StyleConfig, StylePart};
pub use surface::{MenuSurface, NullSurface};

use std::sync::Once;

use floem::prelude::*;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the popup view for `picker`.
///
/// `menu` must be the surface the picker was built with; the view shows and
/// hides itself as the picker opens and closes.
pub fn picker_menu(picker: ColorPicker, menu: MenuSignals) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    menu_view::menu_view(picker, menu)
}
