//! Text inputs for HSL channels and hex, plus the copy button.
//!
//! Inputs never write the color themselves: a committed value is handed to
//! the caller, which routes it through the picker as a user edit.

use std::rc::Rc;

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::HslColor;
use crate::constants;
use crate::math;
use crate::menu_view::apply_part;
use crate::style::{StyleConfig, StylePart};

fn is_enter(event: &Event) -> bool {
    match event {
        Event::KeyDown(ke) => ke.key.logical_key == Key::Named(NamedKey::Enter),
        _ => false,
    }
}

fn input_style(s: floem::style::Style, style: &StyleConfig, width: f32) -> floem::style::Style {
    let s = s
        .width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .font_family("monospace".to_string())
        .border_radius(3.0);
    apply_part(s, style, StylePart::Inputs)
}

/// What a numeric input commits for `raw` while it shows `shown`.
///
/// Values are rounded to whole units and clamped to `0..=max` when a bound
/// is given; unbounded values pass through (hue wraps downstream). Text
/// that still denotes the shown value commits nothing.
fn committed_value(raw: &str, shown: &str, max: Option<f64>) -> Option<f64> {
    let raw = raw.trim();
    if raw == shown {
        return None;
    }
    let num = raw.parse::<f64>().ok().filter(|n| n.is_finite())?.round();
    let value = match max {
        Some(max) => num.clamp(0.0, max),
        None => num,
    };
    (format_value(value) != shown).then_some(value)
}

/// A numeric input showing `value` rounded to whole units.
///
/// On Enter or focus loss the text is parsed and handed to `on_commit` if
/// it names a different value. `max` bounds the value; `None` leaves it
/// unbounded.
pub(crate) fn number_input(
    lbl: &'static str,
    value: impl Fn() -> f64 + 'static,
    max: Option<f64>,
    style: RwSignal<StyleConfig>,
    on_commit: impl Fn(f64) + 'static,
) -> impl IntoView {
    let value = Rc::new(value);
    let text = RwSignal::new(format_value(value()));

    // Value → text (external updates)
    let tracked = value.clone();
    create_effect(move |_| {
        let expected = format_value(tracked());
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let commit = Rc::new(move || {
        let raw = text.get_untracked();
        if let Some(v) = committed_value(&raw, &format_value(value()), max) {
            on_commit(v);
        }
        // Show what the color holds now, whether or not the edit landed
        let shown = format_value(value());
        if raw != shown {
            text.set(shown);
        }
    });
    let commit_on_enter = commit.clone();

    v_stack((
        text_input(text)
            .style(move |s| input_style(s, &style.get(), constants::INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| commit())
            .on_event(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    commit_on_enter();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || lbl).style(move |s| {
            let s = s.font_size(constants::LABEL_FONT);
            match style.get().window.and_then(|w| w.text) {
                Some(text) => match crate::menu_view::css_color(&text) {
                    Some(c) => s.color(c),
                    None => s,
                },
                None => s,
            }
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

fn format_value(v: f64) -> String {
    (v.round() as i64).to_string()
}

/// A hex input bound to `color`. Committed on Enter or focus loss.
pub(crate) fn hex_input(
    color: RwSignal<HslColor>,
    style: RwSignal<StyleConfig>,
    on_commit: impl Fn(HslColor) + 'static,
) -> impl IntoView {
    let text = RwSignal::new(color.get_untracked().to_hex());

    // Color → text, unless the text already denotes the same color
    create_effect(move |_| {
        let hex = color.get().to_hex();
        if math::normalize_hex(&text.get_untracked()) != hex {
            text.set(hex);
        }
    });

    let commit = Rc::new(move || {
        let raw = text.get_untracked();
        let normalized = math::normalize_hex(&raw);
        if let Some(c) = HslColor::from_hex(&normalized) {
            if normalized != color.get_untracked().to_hex() {
                on_commit(c);
            }
        }
        if raw != normalized {
            text.set(normalized);
        }
    });
    let commit_on_enter = commit.clone();

    h_stack((
        label(|| "#").style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .color(Color::rgb8(120, 120, 120))
        }),
        text_input(text)
            .style(move |s| input_style(s, &style.get(), constants::HEX_INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| commit())
            .on_event(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    commit_on_enter();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// A small button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

fn copy_to_clipboard(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    if let Err(e) = result {
        tracing::warn!("clipboard unavailable: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_values_pass_through_for_wrapping() {
        assert_eq!(committed_value("370", "10", None), Some(370.0));
        assert_eq!(committed_value("-10", "10", None), Some(-10.0));
        assert_eq!(HslColor::new(0.0, 50.0, 50.0).with_h(370.0).h(), 10.0);
        assert_eq!(HslColor::new(0.0, 50.0, 50.0).with_h(-10.0).h(), 350.0);
    }

    #[test]
    fn unchanged_text_commits_nothing() {
        // A hue of 359.6 is shown as "360"; blurring must not re-commit it.
        let shown = format_value(359.6);
        assert_eq!(shown, "360");
        assert_eq!(committed_value(&shown, &shown, None), None);
        assert_eq!(committed_value(" 360 ", &shown, None), None);
        assert_eq!(committed_value("50.4", "50", Some(100.0)), None);
    }

    #[test]
    fn bounded_values_clamp() {
        assert_eq!(committed_value("150", "50", Some(100.0)), Some(100.0));
        assert_eq!(committed_value("-3", "50", Some(100.0)), Some(0.0));
        assert_eq!(committed_value("150", "100", Some(100.0)), None);
        assert_eq!(committed_value("abc", "50", Some(100.0)), None);
    }
}
