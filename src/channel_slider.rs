//! Single-channel HSL slider (hue, saturation or lightness).
//!
//! Renders the channel's gradient for the current color as a rasterized
//! image, avoiding vger's broken linear gradient coordinate handling.

use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::HslColor;
use crate::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Hue,
    Saturation,
    Lightness,
}

impl Channel {
    /// Largest value the slider produces. Hue stops short of 360 so the
    /// right end does not wrap back to red at the left.
    fn max(self) -> f64 {
        match self {
            Channel::Hue => 359.0,
            Channel::Saturation | Channel::Lightness => 100.0,
        }
    }

    fn get(self, c: HslColor) -> f64 {
        match self {
            Channel::Hue => c.h(),
            Channel::Saturation => c.s(),
            Channel::Lightness => c.l(),
        }
    }

    fn set(self, c: HslColor, v: f64) -> HslColor {
        match self {
            Channel::Hue => c.with_h(v),
            Channel::Saturation => c.with_s(v),
            Channel::Lightness => c.with_l(v),
        }
    }

    /// Whole-unit value at fraction `t` of the track.
    fn at(self, t: f64) -> f64 {
        (t.clamp(0.0, 1.0) * self.max()).round()
    }
}

/// Rasterize the gradient of `channel` over `base`, minimum at the left.
fn rasterize_channel_gradient(width: u32, height: u32, channel: Channel, base: HslColor) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let t = px as f64 / (width - 1).max(1) as f64;
        let (r, g, b) = channel.set(base, t * channel.max()).to_rgb8();
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = r;
            buf[offset + 1] = g;
            buf[offset + 2] = b;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct ChannelSlider {
    id: ViewId,
    held: bool,
    channel: Channel,
    color: HslColor,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Box<dyn Fn(HslColor)>,
    /// Cached gradient image.
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_key: String,
    cached_dims: (u32, u32),
}

/// Creates a horizontal slider for one channel of `color`.
///
/// The slider never writes `color`; each whole-unit step is handed to
/// `on_change`, which routes it through the picker.
pub(crate) fn channel_slider(
    channel: Channel,
    color: RwSignal<HslColor>,
    on_change: impl Fn(HslColor) + 'static,
) -> ChannelSlider {
    let id = ViewId::new();

    create_effect(move |_| {
        let c = color.get();
        id.update_state(c);
    });

    ChannelSlider {
        id,
        held: false,
        channel,
        color: color.get_untracked(),
        size: Default::default(),
        on_change: Box::new(on_change),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_key: String::new(),
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ChannelSlider {
    fn update_from_pointer(&mut self, x: f64) {
        let w = self.size.width as f64;
        let r = constants::THUMB_RADIUS;
        let usable = w - 2.0 * r;
        if usable <= 0.0 {
            return;
        }
        let value = self.channel.at((x - r) / usable);
        if value != self.channel.get(self.color) {
            self.color = self.channel.set(self.color, value);
            (self.on_change)(self.color);
        }
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        // The gradient only depends on the other two channels
        let key = self.channel.set(self.color, 0.0).to_css();
        let dims = (pw, ph);
        if self.cached_dims == dims && self.cached_key == key {
            return;
        }

        let pixels = rasterize_channel_gradient(pw, ph, self.channel, self.color);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        let id = blob.id();
        self.grad_hash = id.to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_key = key;
        self.cached_dims = dims;
    }
}

impl View for ChannelSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(color) = state.downcast::<HslColor>() {
            self.color = *color;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.update_from_pointer(e.pos.x);
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.update_from_pointer(e.pos.x);
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb: white ring between two dark hairlines
        let radius = constants::THUMB_RADIUS;
        let t = self.channel.get(self.color) / self.channel.max();
        let thumb_x = radius + t.clamp(0.0, 1.0) * (w - 2.0 * radius);
        let center = (thumb_x, h / 2.0);
        cx.stroke(
            &floem::kurbo::Circle::new(center, radius),
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        cx.stroke(
            &floem::kurbo::Circle::new(center, radius - 1.5),
            Color::WHITE,
            &floem::kurbo::Stroke::new(2.0),
        );
        cx.stroke(
            &floem::kurbo::Circle::new(center, radius - 3.0),
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_maps_to_whole_units() {
        assert_eq!(Channel::Hue.at(1.0), 359.0);
        assert_eq!(Channel::Saturation.at(0.504), 50.0);
        assert_eq!(Channel::Lightness.at(-0.2), 0.0);
    }

    #[test]
    fn gradient_runs_from_min_to_max() {
        let base = HslColor::new(0.0, 100.0, 50.0);
        let buf = rasterize_channel_gradient(3, 1, Channel::Lightness, base);
        assert_eq!(&buf[0..4], &[0, 0, 0, 255]);
        assert_eq!(&buf[4..8], &[255, 0, 0, 255]);
        assert_eq!(&buf[8..12], &[255, 255, 255, 255]);
    }
}
