//! Menu lifecycle state machine.
//!
//! `MenuController` only tracks state and geometry. The picker drives it and
//! emits the events each transition calls for.

use tracing::debug;

use crate::constants;
use crate::placement::{Placement, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// What a call to [`MenuController::request_open`] turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenRequest {
    /// `Closed → Opening`; finish with [`MenuController::finish_open`].
    Open(Point),
    /// Already open: re-anchored in place.
    Reopen(Point),
    /// A close is in progress; the request replays after it finishes.
    Deferred,
}

#[derive(Debug, Clone)]
pub struct MenuController {
    state: MenuState,
    placement: Placement,
    position: Point,
    pending_open: Option<Rect>,
    menu_width: f64,
    menu_height: f64,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new(constants::MENU_WIDTH, constants::MENU_HEIGHT)
    }
}

impl MenuController {
    pub fn new(menu_width: f64, menu_height: f64) -> Self {
        Self {
            state: MenuState::Closed,
            placement: Placement::default(),
            position: Point::default(),
            pending_open: None,
            menu_width,
            menu_height,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Applies to the next open or reopen; an open menu stays where it is.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Top-left corner of the menu as last anchored.
    pub fn position(&self) -> Point {
        self.position
    }

    fn place(&mut self, rect: Rect) -> Point {
        let rect = rect.sanitized();
        self.position = self.placement.anchor(&rect, self.menu_width, self.menu_height);
        self.position
    }

    pub fn request_open(&mut self, rect: Rect) -> OpenRequest {
        match self.state {
            MenuState::Closed => {
                self.state = MenuState::Opening;
                let at = self.place(rect);
                debug!(x = at.x, y = at.y, "menu opening");
                OpenRequest::Open(at)
            }
            MenuState::Opening | MenuState::Open => {
                let at = self.place(rect);
                debug!(x = at.x, y = at.y, "menu re-anchored");
                OpenRequest::Reopen(at)
            }
            MenuState::Closing => {
                debug!("menu closing, open deferred");
                self.pending_open = Some(rect);
                OpenRequest::Deferred
            }
        }
    }

    pub fn finish_open(&mut self) {
        if self.state == MenuState::Opening {
            self.state = MenuState::Open;
            debug!("menu open");
        }
    }

    /// `Open → Closing`. Returns `None` when there is no open menu to close.
    pub fn begin_close(&mut self) -> Option<Point> {
        if self.state != MenuState::Open {
            return None;
        }
        self.state = MenuState::Closing;
        debug!("menu closing");
        Some(self.position)
    }

    /// `Closing → Closed`. Hands back an open deferred during the close.
    pub fn finish_close(&mut self) -> Option<Rect> {
        if self.state != MenuState::Closing {
            return None;
        }
        self.state = MenuState::Closed;
        debug!("menu closed");
        self.pending_open.take()
    }
}
