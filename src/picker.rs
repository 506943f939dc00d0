//! `ColorPicker`, the widget handle the host drives.
//!
//! All state lives behind one `Rc<RefCell<_>>`. No borrow is held while
//! listeners run, so listeners may call back into the picker.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::color::HslColor;
use crate::config::PickerConfig;
use crate::error::Result;
use crate::events::{self, EventHub, EventKind, Listener, PickerEvent};
use crate::menu::{MenuController, MenuState, OpenRequest};
use crate::placement::{Horizontal, Placement, Point, Rect, Vertical};
use crate::sampler::{self, PixelSource};
use crate::style::StyleConfig;
use crate::surface::{MenuSurface, NullSurface};

struct Inner {
    menu: MenuController,
    style: StyleConfig,
    color: HslColor,
    /// Last value announced through `changed`.
    last_changed: HslColor,
    /// Color to restore if the current session is canceled.
    session_start: Option<HslColor>,
    hub: EventHub,
    surface: Box<dyn MenuSurface>,
    pixels: Option<Rc<dyn PixelSource>>,
}

/// A popup color picker.
///
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct ColorPicker {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ColorPicker")
            .field("state", &inner.menu.state())
            .field("color", &inner.color)
            .field("placement", &inner.menu.placement())
            .finish_non_exhaustive()
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPicker {
    /// A headless picker with the base style.
    pub fn new() -> Self {
        Self::with_surface(NullSurface)
    }

    /// A picker that draws its menu into `surface`.
    pub fn with_surface(surface: impl MenuSurface + 'static) -> Self {
        let color = HslColor::default();
        Self {
            inner: Rc::new(RefCell::new(Inner {
                menu: MenuController::default(),
                style: StyleConfig::base(),
                color,
                last_changed: color,
                session_start: None,
                hub: EventHub::new(),
                surface: Box::new(surface),
                pixels: None,
            })),
        }
    }

    /// A picker configured from `config`. The initial color is set without
    /// emitting `changed`.
    pub fn from_config(config: &PickerConfig, surface: impl MenuSurface + 'static) -> Self {
        let picker = Self::with_surface(surface);
        {
            let mut inner = picker.inner.borrow_mut();
            inner.menu.set_placement(config.placement);
            inner.style.merge(&config.style);
            if let Some(color) = config.color {
                inner.color = color;
                inner.last_changed = color;
            }
        }
        picker
    }

    /// The complete default style; pass it to [`set_style`](Self::set_style)
    /// to reset.
    pub fn base_style() -> StyleConfig {
        StyleConfig::base()
    }

    /// Install the pixel-read primitive used by
    /// [`pick_on_coordinates`](Self::pick_on_coordinates).
    pub fn set_pixel_source(&self, source: impl PixelSource + 'static) {
        self.inner.borrow_mut().pixels = Some(Rc::new(source));
    }

    pub fn color(&self) -> HslColor {
        self.inner.borrow().color
    }

    pub fn menu_state(&self) -> MenuState {
        self.inner.borrow().menu.state()
    }

    pub fn menu_position(&self) -> Point {
        self.inner.borrow().menu.position()
    }

    pub fn placement(&self) -> Placement {
        self.inner.borrow().menu.placement()
    }

    pub fn style(&self) -> StyleConfig {
        self.inner.borrow().style.clone()
    }

    // ── events ──────────────────────────────────────────────────────────────

    pub fn add_event_listener(&self, kind: EventKind, listener: &Listener) {
        self.inner.borrow_mut().hub.add(kind, listener);
    }

    /// Removes one registration; a no-op when `listener` is not registered.
    pub fn remove_event_listener(&self, kind: EventKind, listener: &Listener) {
        if !self.inner.borrow_mut().hub.remove(kind, listener) {
            debug!(event = %kind, "remove_event_listener: not registered");
        }
    }

    fn emit(&self, event: PickerEvent) {
        let listeners = self.inner.borrow().hub.snapshot(event.kind());
        events::deliver(&listeners, &event);
    }

    // ── menu ────────────────────────────────────────────────────────────────

    /// Open the menu anchored to `rect`, or re-anchor it if already open.
    /// While a close is in progress the request is replayed once the menu
    /// has closed.
    pub fn open_menu(&self, rect: Rect) {
        let request = {
            let mut inner = self.inner.borrow_mut();
            let request = inner.menu.request_open(rect);
            match request {
                OpenRequest::Open(at) => {
                    let color = inner.color;
                    inner.session_start = Some(color);
                    inner.surface.show(at, &inner.style, color);
                    inner.menu.finish_open();
                }
                OpenRequest::Reopen(at) => inner.surface.move_to(at),
                OpenRequest::Deferred => {}
            }
            request
        };
        match request {
            OpenRequest::Open(at) => self.emit(PickerEvent::Opened(at)),
            OpenRequest::Reopen(at) => self.emit(PickerEvent::Reopened(at)),
            OpenRequest::Deferred => {}
        }
    }

    pub fn set_placement(&self, vertical: Vertical, horizontal: Horizontal) {
        self.inner
            .borrow_mut()
            .menu
            .set_placement(Placement::new(vertical, horizontal));
    }

    /// Commit the edited color and close: `changed` (if the value is new),
    /// `confirmed`, `closed`.
    pub fn confirm(&self) {
        let closing = {
            let mut inner = self.inner.borrow_mut();
            inner.menu.begin_close().map(|at| {
                inner.session_start = None;
                inner.surface.hide();
                let color = inner.color;
                let changed = color != inner.last_changed;
                if changed {
                    inner.last_changed = color;
                }
                (at, color, changed)
            })
        };
        let Some((at, color, changed)) = closing else {
            debug!("confirm ignored: menu not open");
            return;
        };
        if changed {
            self.emit(PickerEvent::Changed(color));
        }
        self.emit(PickerEvent::Confirmed(color));
        self.finish_close(at);
    }

    /// Dismiss without committing: the color reverts to its value when the
    /// menu opened, then `canceled` and `closed` are emitted.
    ///
    /// A [`set_color_hsl`](Self::set_color_hsl) call during the session
    /// replaces that value, so cancel restores the programmatic color rather
    /// than the one from before the open.
    pub fn cancel(&self) {
        let closing = {
            let mut inner = self.inner.borrow_mut();
            inner.menu.begin_close().map(|at| {
                if let Some(start) = inner.session_start.take() {
                    inner.color = start;
                }
                inner.surface.hide();
                (at, inner.color)
            })
        };
        let Some((at, restored)) = closing else {
            debug!("cancel ignored: menu not open");
            return;
        };
        self.emit(PickerEvent::Canceled(restored));
        self.finish_close(at);
    }

    fn finish_close(&self, at: Point) {
        let deferred = self.inner.borrow_mut().menu.finish_close();
        self.emit(PickerEvent::Closed(at));
        if let Some(rect) = deferred {
            self.open_menu(rect);
        }
    }

    // ── style ───────────────────────────────────────────────────────────────

    /// Deep-merge `partial` into the current style. An open menu is
    /// re-rendered immediately.
    pub fn set_style(&self, partial: &StyleConfig) {
        let mut inner = self.inner.borrow_mut();
        inner.style.merge(partial);
        if inner.menu.is_open() {
            inner.surface.restyle(&inner.style);
        }
    }

    // ── color ───────────────────────────────────────────────────────────────

    /// Set the color programmatically. Emits `changed` when the normalized
    /// value differs from the last announced one. During an open session
    /// the new value also becomes the one a cancel restores.
    pub fn set_color_hsl(&self, h: f64, s: f64, l: f64) {
        let color = HslColor::new(h, s, l);
        let changed = {
            let mut inner = self.inner.borrow_mut();
            inner.color = color;
            if inner.session_start.is_some() {
                inner.session_start = Some(color);
            }
            inner.surface.show_color(color);
            let changed = color != inner.last_changed;
            if changed {
                inner.last_changed = color;
            }
            changed
        };
        if changed {
            self.emit(PickerEvent::Changed(color));
        }
    }

    /// A user edit inside the open menu (slider drag step, typed value).
    /// Emits `input`; ignored when the menu is not open or nothing changed.
    pub fn edit_color(&self, color: HslColor) {
        let edited = {
            let mut inner = self.inner.borrow_mut();
            if !inner.menu.is_open() {
                warn!("edit ignored: menu not open");
                false
            } else if inner.color == color {
                false
            } else {
                inner.color = color;
                inner.surface.show_color(color);
                true
            }
        };
        if edited {
            self.emit(PickerEvent::Input(color));
        }
    }

    // ── sampling ────────────────────────────────────────────────────────────

    /// Sample the color rendered at page coordinate `(x, y)`.
    ///
    /// The returned future borrows nothing from the picker, so other calls
    /// proceed while it is pending. Overlapping calls each resolve to their
    /// own result; a caller that wants only the latest must discard stale
    /// ones itself. Sampling changes no picker state and emits no event.
    pub fn pick_on_coordinates(
        &self,
        x: f64,
        y: f64,
    ) -> impl Future<Output = Result<Option<HslColor>>> + 'static {
        let source = self.inner.borrow().pixels.clone();
        async move {
            match source {
                Some(source) => sampler::sample(source.as_ref(), x, y).await,
                None => {
                    debug!("no pixel source installed");
                    Ok(None)
                }
            }
        }
    }
}
