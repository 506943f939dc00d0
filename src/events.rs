//! Event hub: typed lifecycle and value events with per-listener isolation.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::str::FromStr;

use tracing::error;

use crate::color::HslColor;
use crate::error::PickerError;
use crate::placement::Point;

/// Prefix of the DOM-style event names (`colorPicker-opened`, …).
const DOM_PREFIX: &str = "colorPicker-";

/// The kinds of event a picker emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Opened,
    Reopened,
    Closed,
    Input,
    Changed,
    Canceled,
    Confirmed,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::Opened,
        EventKind::Reopened,
        EventKind::Closed,
        EventKind::Input,
        EventKind::Changed,
        EventKind::Canceled,
        EventKind::Confirmed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Reopened => "reopened",
            Self::Closed => "closed",
            Self::Input => "input",
            Self::Changed => "changed",
            Self::Canceled => "canceled",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = PickerError;

    /// Accepts both `opened` and `colorPicker-opened`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix(DOM_PREFIX).unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|k| k.name() == bare)
            .ok_or_else(|| PickerError::Config(format!("unknown event kind `{s}`")))
    }
}

/// An emitted event. Lifecycle events carry the menu's top-left corner,
/// value events carry a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerEvent {
    Opened(Point),
    Reopened(Point),
    Closed(Point),
    Input(HslColor),
    Changed(HslColor),
    /// Carries the color restored by the cancel.
    Canceled(HslColor),
    Confirmed(HslColor),
}

impl PickerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Opened(_) => EventKind::Opened,
            Self::Reopened(_) => EventKind::Reopened,
            Self::Closed(_) => EventKind::Closed,
            Self::Input(_) => EventKind::Input,
            Self::Changed(_) => EventKind::Changed,
            Self::Canceled(_) => EventKind::Canceled,
            Self::Confirmed(_) => EventKind::Confirmed,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Opened(p) | Self::Reopened(p) | Self::Closed(p) => Some(p),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<HslColor> {
        match *self {
            Self::Input(c) | Self::Changed(c) | Self::Canceled(c) | Self::Confirmed(c) => Some(c),
            _ => None,
        }
    }
}

type Handler = dyn Fn(&PickerEvent) -> anyhow::Result<()>;

/// A registered event handler.
///
/// Identity is the allocation: clones of one `Listener` are the same handler,
/// two `Listener::new` calls on equal closures are not.
#[derive(Clone)]
pub struct Listener(Rc<Handler>);

impl Listener {
    pub fn new(f: impl Fn(&PickerEvent) + 'static) -> Self {
        Self(Rc::new(move |event: &PickerEvent| {
            f(event);
            Ok(())
        }))
    }

    /// A handler that may fail. Errors are logged and do not reach other
    /// listeners or the picker.
    pub fn fallible(f: impl Fn(&PickerEvent) -> anyhow::Result<()> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn same(&self, other: &Listener) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Ordered listener lists per event kind.
#[derive(Debug, Default)]
pub struct EventHub {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. The same listener may be registered more than
    /// once and then runs once per registration.
    pub fn add(&mut self, kind: EventKind, listener: &Listener) {
        self.listeners.entry(kind).or_default().push(listener.clone());
    }

    /// Remove the earliest registration of `listener` for `kind`. Returns
    /// `false` when there was none.
    pub fn remove(&mut self, kind: EventKind, listener: &Listener) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        match list.iter().position(|l| l.same(listener)) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Snapshot of the listeners for `kind`, in registration order.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    /// Deliver `event` to the current listeners of its kind.
    pub fn dispatch(&self, event: &PickerEvent) -> usize {
        deliver(&self.snapshot(event.kind()), event)
    }
}

/// Run every listener in order, each inside its own failure boundary.
/// Returns the number of listeners that failed.
pub fn deliver(listeners: &[Listener], event: &PickerEvent) -> usize {
    let mut failures = 0;
    for listener in listeners {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (listener.0)(event)));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                failures += 1;
                error!(event = %event.kind(), "listener failed: {err:#}");
            }
            Err(payload) => {
                failures += 1;
                error!(event = %event.kind(), "listener panicked: {}", panic_message(&*payload));
            }
        }
    }
    failures
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Listener {
        let log = log.clone();
        Listener::new(move |_| log.borrow_mut().push(tag))
    }

    #[test]
    fn parses_plain_and_prefixed_names() {
        assert_eq!("changed".parse::<EventKind>().unwrap(), EventKind::Changed);
        assert_eq!("colorPicker-opened".parse::<EventKind>().unwrap(), EventKind::Opened);
        assert!("colorPicker-".parse::<EventKind>().is_err());
        assert!("blur".parse::<EventKind>().is_err());
    }

    #[test]
    fn payload_matches_kind() {
        let opened = PickerEvent::Opened(Point::new(1.0, 2.0));
        assert_eq!(opened.position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(opened.color(), None);
        let changed = PickerEvent::Changed(HslColor::new(1.0, 2.0, 3.0));
        assert_eq!(changed.kind(), EventKind::Changed);
        assert!(changed.position().is_none());
    }

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        hub.add(EventKind::Input, &recorder(&log, "a"));
        hub.add(EventKind::Input, &recorder(&log, "b"));
        hub.add(EventKind::Changed, &recorder(&log, "other"));

        hub.dispatch(&PickerEvent::Input(HslColor::default()));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn removal_takes_one_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        let l = recorder(&log, "x");
        hub.add(EventKind::Changed, &l);
        hub.add(EventKind::Changed, &l);
        assert!(hub.remove(EventKind::Changed, &l));
        assert_eq!(hub.count(EventKind::Changed), 1);

        hub.dispatch(&PickerEvent::Changed(HslColor::default()));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn removing_unknown_listener_is_a_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        let registered = recorder(&log, "kept");
        hub.add(EventKind::Closed, &registered);

        assert!(!hub.remove(EventKind::Closed, &recorder(&log, "kept")));
        assert!(!hub.remove(EventKind::Opened, &registered));
        assert_eq!(hub.count(EventKind::Closed), 1);
    }

    #[test]
    fn failing_listeners_are_isolated() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        hub.add(EventKind::Opened, &Listener::new(|_| panic!("boom")));
        hub.add(
            EventKind::Opened,
            &Listener::fallible(|_| Err(anyhow::anyhow!("refused"))),
        );
        hub.add(EventKind::Opened, &recorder(&log, "survivor"));

        let failures = hub.dispatch(&PickerEvent::Opened(Point::default()));
        assert_eq!(failures, 2);
        assert_eq!(*log.borrow(), vec!["survivor"]);
    }
}
