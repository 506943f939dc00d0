//! Standalone demo: buttons open the picker next to themselves; clicking a
//! swatch in the strip samples its color onto the target box.

use floem::event::EventListener;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_popup_picker::{
    config, picker_menu, ColorPicker, EventKind, HslColor, Listener, MenuSignals, PickerConfig,
    PixelBuffer, Point, Rect, Rgba8,
};
use tracing_subscriber::EnvFilter;

const BUTTON_W: f64 = 96.0;
const BUTTON_H: f64 = 28.0;
const STRIP_Y: f64 = 120.0;
const SWATCH: f64 = 40.0;

const STRIP: [(u8, u8, u8); 5] = [
    (230, 57, 70),
    (244, 162, 97),
    (42, 157, 143),
    (38, 70, 83),
    (233, 196, 106),
];

fn button_rect(index: usize) -> Rect {
    Rect::new(16.0 + index as f64 * (BUTTON_W + 12.0), 16.0, BUTTON_W, BUTTON_H)
}

fn open_button(picker: ColorPicker, index: usize) -> impl IntoView {
    let rect = button_rect(index);
    label(move || format!("Pick #{}", index + 1))
        .style(move |s| {
            s.absolute()
                .inset_left(rect.x as f32)
                .inset_top(rect.y as f32)
                .width(rect.width as f32)
                .height(rect.height as f32)
                .items_center()
                .justify_center()
                .border(1.0)
                .border_radius(4.0)
                .border_color(Color::rgb8(180, 180, 180))
                .cursor(floem::style::CursorStyle::Pointer)
        })
        .on_event_stop(EventListener::PointerUp, move |_| picker.open_menu(rect))
}

fn strip_page() -> PixelBuffer {
    let mut page = PixelBuffer::new(Point::new(0.0, 0.0), 640, 480);
    for (i, (r, g, b)) in STRIP.iter().enumerate() {
        let rect = Rect::new(16.0 + i as f64 * SWATCH, STRIP_Y, SWATCH, SWATCH);
        page.fill_rect(rect, Rgba8::opaque(*r, *g, *b));
    }
    page
}

fn color_strip() -> impl IntoView {
    stack_from_iter(STRIP.iter().enumerate().map(|(i, (r, g, b))| {
        let color = Color::rgb8(*r, *g, *b);
        empty().style(move |s| {
            s.absolute()
                .inset_left((16.0 + i as f64 * SWATCH) as f32)
                .inset_top(STRIP_Y as f32)
                .width(SWATCH as f32)
                .height(SWATCH as f32)
                .background(color)
        })
    }))
}

/// Transparent layer over the strip; a click samples the page under it.
fn sampling_layer(picker: ColorPicker, target: RwSignal<HslColor>) -> impl IntoView {
    empty()
        .style(|s| {
            s.absolute()
                .inset_left(16.0)
                .inset_top(STRIP_Y as f32)
                .width((SWATCH * STRIP.len() as f64) as f32)
                .height(SWATCH as f32)
        })
        .on_event_stop(EventListener::PointerDown, move |e| {
            if let floem::event::Event::PointerDown(pe) = e {
                let x = 16.0 + pe.pos.x;
                let y = STRIP_Y + pe.pos.y;
                // The in-memory page resolves immediately.
                match futures::executor::block_on(picker.pick_on_coordinates(x, y)) {
                    Ok(Some(color)) => target.set(color),
                    Ok(None) => {}
                    Err(err) => tracing::error!("{err}"),
                }
            }
        })
}

fn target_box(target: RwSignal<HslColor>) -> impl IntoView {
    empty().style(move |s| {
        let (r, g, b) = target.get().to_rgb8();
        s.absolute()
            .inset_left(16.0)
            .inset_top((STRIP_Y + SWATCH + 24.0) as f32)
            .width(240.0)
            .height(80.0)
            .border_radius(4.0)
            .background(Color::rgb8(r, g, b))
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let menu = MenuSignals::new();
    menu.set_anchor_regions((0..3).map(button_rect));
    let config = config::load(config::default_path()).unwrap_or_else(|err| {
        tracing::warn!("{err}; using defaults");
        PickerConfig::default()
    });
    let picker = ColorPicker::from_config(&config, menu);
    picker.set_pixel_source(strip_page());
    picker.add_event_listener(
        EventKind::Confirmed,
        &Listener::new(|e| tracing::info!("confirmed {:?}", e.color().map(|c| c.to_css()))),
    );

    let target = RwSignal::new(HslColor::new(0.0, 0.0, 85.0));

    floem::Application::new()
        .window(
            move |_| {
                stack((
                    stack_from_iter((0..3).map(|i| open_button(picker.clone(), i))),
                    color_strip(),
                    sampling_layer(picker.clone(), target),
                    target_box(target),
                    picker_menu(picker.clone(), menu),
                ))
                .style(|s| s.size_full().background(Color::WHITE))
                .on_event_stop(EventListener::WindowClosed, |_| floem::quit_app())
            },
            Some(
                WindowConfig::default()
                    .size((640.0, 480.0))
                    .title("floem-popup-picker"),
            ),
        )
        .run();
}
