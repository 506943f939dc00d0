//! Floem rendering of the popup menu.
//!
//! [`MenuSignals`] is the [`MenuSurface`] the picker drives; the view built
//! by [`menu_view`] reads those signals and routes user interaction back
//! through the picker (`edit_color`, `confirm`, `cancel`).

use floem::event::{Event, EventListener};
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith};
use floem::style::Style;
use tracing::debug;

use crate::channel_slider::{channel_slider, Channel};
use crate::color::HslColor;
use crate::constants;
use crate::inputs::{copy_button, hex_input, number_input};
use crate::picker::ColorPicker;
use crate::placement::{Point, Rect};
use crate::style::{StyleConfig, StylePart};
use crate::surface::MenuSurface;

/// Reactive state of the popup, written by the picker.
#[derive(Clone, Copy)]
pub struct MenuSignals {
    visible: RwSignal<bool>,
    position: RwSignal<Point>,
    style: RwSignal<StyleConfig>,
    color: RwSignal<HslColor>,
    anchors: RwSignal<Vec<Rect>>,
}

impl Default for MenuSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuSignals {
    pub fn new() -> Self {
        Self {
            visible: RwSignal::new(false),
            position: RwSignal::new(Point::default()),
            style: RwSignal::new(StyleConfig::base()),
            color: RwSignal::new(HslColor::default()),
            anchors: RwSignal::new(Vec::new()),
        }
    }

    /// Host regions that open the picker. A press on one of them while the
    /// menu is open re-anchors the menu there instead of canceling.
    pub fn set_anchor_regions(&self, regions: impl IntoIterator<Item = Rect>) {
        self.anchors.set(regions.into_iter().collect());
    }

    fn anchor_at(&self, at: Point) -> Option<Rect> {
        self.anchors
            .with_untracked(|regions| regions.iter().copied().find(|r| r.contains(at)))
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get_untracked()
    }

    pub fn position(&self) -> Point {
        self.position.get_untracked()
    }

    pub fn color(&self) -> HslColor {
        self.color.get_untracked()
    }

    pub fn style(&self) -> StyleConfig {
        self.style.get_untracked()
    }
}

impl MenuSurface for MenuSignals {
    fn show(&self, position: Point, style: &StyleConfig, color: HslColor) {
        self.position.set(position);
        self.style.set(style.clone());
        self.color.set(color);
        self.visible.set(true);
    }

    fn move_to(&self, position: Point) {
        self.position.set(position);
    }

    fn restyle(&self, style: &StyleConfig) {
        self.style.set(style.clone());
    }

    fn show_color(&self, color: HslColor) {
        self.color.set(color);
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}

/// Resolve a style color string for rendering.
pub(crate) fn css_color(value: &str) -> Option<Color> {
    let parsed = HslColor::parse_css(value);
    if parsed.is_none() {
        debug!("unrenderable style color `{value}`");
    }
    parsed.map(|c| {
        let (r, g, b) = c.to_rgb8();
        Color::rgb8(r, g, b)
    })
}

/// Apply the properties of `part` that are set and renderable.
pub(crate) fn apply_part(s: Style, style: &StyleConfig, part: StylePart) -> Style {
    let Some(p) = style.part(part) else {
        return s;
    };
    let mut s = s;
    if let Some(c) = p.background.as_deref().and_then(css_color) {
        s = s.background(c);
    }
    if let Some(c) = p.text.as_deref().and_then(css_color) {
        s = s.color(c);
    }
    if let Some(c) = p.border_color.as_deref().and_then(css_color) {
        s = s.border_color(c);
    }
    if let Some(w) = p.border_width {
        s = s.border(w as f32);
    }
    s
}

fn menu_button(
    text: &'static str,
    part: StylePart,
    style: RwSignal<StyleConfig>,
    on_press: impl Fn() + 'static,
) -> impl IntoView {
    label(move || text)
        .style(move |s| {
            let s = s
                .padding_horiz(12.0)
                .padding_top(3.0)
                .padding_bottom(3.0)
                .border_radius(3.0)
                .cursor(floem::style::CursorStyle::Pointer);
            apply_part(s, &style.get(), part)
        })
        .on_event_stop(EventListener::PointerUp, move |_| on_press())
}

fn swatch(color: RwSignal<HslColor>, style: RwSignal<StyleConfig>) -> impl IntoView {
    empty().style(move |st| {
        let (r, g, b) = color.get().to_rgb8();
        let st = st
            .width(constants::SWATCH_SIZE)
            .height(constants::SWATCH_SIZE)
            .border_radius(constants::RADIUS)
            .background(Color::rgb8(r, g, b));
        let current = style.get();
        if current.picked_color_border == Some(true) {
            let border = current
                .window
                .and_then(|w| w.border_color)
                .and_then(|c| css_color(&c))
                .unwrap_or(Color::rgb8(180, 180, 180));
            st.border(1.0).border_color(border)
        } else {
            st
        }
    })
}

/// A press on the backdrop, in window coordinates: reopen at a host anchor
/// under the pointer, otherwise cancel.
pub(crate) fn backdrop_press(picker: &ColorPicker, menu: &MenuSignals, at: Point) {
    match menu.anchor_at(at) {
        Some(rect) => picker.open_menu(rect),
        None => picker.cancel(),
    }
}

/// Builds the popup: a full-window backdrop (see [`backdrop_press`]) holding
/// the positioned menu panel.
pub(crate) fn menu_view(picker: ColorPicker, menu: MenuSignals) -> impl IntoView {
    let MenuSignals {
        visible,
        position,
        style,
        color,
        ..
    } = menu;

    let edit = |picker: &ColorPicker| {
        let picker = picker.clone();
        move |c: HslColor| picker.edit_color(c)
    };
    let edit_channel = |picker: &ColorPicker, channel: Channel| {
        let picker = picker.clone();
        move |v: f64| {
            let current = picker.color();
            let next = match channel {
                Channel::Hue => current.with_h(v),
                Channel::Saturation => current.with_s(v),
                Channel::Lightness => current.with_l(v),
            };
            picker.edit_color(next);
        }
    };
    let confirm = {
        let picker = picker.clone();
        move || picker.confirm()
    };
    let cancel_button = {
        let picker = picker.clone();
        move || picker.cancel()
    };
    let press_outside = {
        let picker = picker.clone();
        move |at: Point| backdrop_press(&picker, &menu, at)
    };

    let panel = v_stack((
        h_stack((
            swatch(color, style),
            label(move || color.get().to_css()).style(|s| {
                s.font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
            }),
            empty().style(|s| s.flex_grow(1.0)),
            copy_button(move || color.get_untracked().to_css()),
        ))
        .style(|s| s.items_center().gap(constants::GAP)),
        channel_slider(Channel::Hue, color, edit(&picker)),
        channel_slider(Channel::Saturation, color, edit(&picker)),
        channel_slider(Channel::Lightness, color, edit(&picker)),
        h_stack((
            number_input(
                "H",
                move || color.get().h(),
                None,
                style,
                edit_channel(&picker, Channel::Hue),
            ),
            number_input(
                "S",
                move || color.get().s(),
                Some(100.0),
                style,
                edit_channel(&picker, Channel::Saturation),
            ),
            number_input(
                "L",
                move || color.get().l(),
                Some(100.0),
                style,
                edit_channel(&picker, Channel::Lightness),
            ),
            hex_input(color, style, edit(&picker)),
        ))
        .style(|s| s.gap(constants::GAP / 2.0).items_center().justify_center()),
        h_stack((
            empty().style(|s| s.flex_grow(1.0)),
            menu_button("Cancel", StylePart::ButtonCancel, style, cancel_button),
            menu_button("OK", StylePart::ButtonOk, style, confirm),
        ))
        .style(|s| s.gap(constants::GAP).items_center()),
    ))
    .style(move |s| {
        let at = position.get();
        let s = s
            .absolute()
            .inset_left(at.x as f32)
            .inset_top(at.y as f32)
            .width(constants::MENU_WIDTH as f32)
            .gap(constants::GAP)
            .padding(constants::PADDING)
            .border_radius(constants::RADIUS);
        apply_part(s, &style.get(), StylePart::Window)
    })
    // Clicks inside the panel must not reach the backdrop
    .on_event_stop(EventListener::PointerDown, |_| {});

    container(panel)
        .style(move |s| {
            s.absolute()
                .inset_left(0.0)
                .inset_top(0.0)
                .size_full()
                .apply_if(!visible.get(), |s| s.hide())
        })
        .on_event_stop(EventListener::PointerDown, move |e| {
            if let Event::PointerDown(pe) = e {
                press_outside(Point::new(pe.pos.x, pe.pos.y));
            }
        })
}
