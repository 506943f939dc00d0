//! Coordinate sampling: read the color already rendered at a page point.
//!
//! The pixel-read primitive is abstract ([`PixelSource`]). [`PixelBuffer`] is
//! an in-memory raster implementation, the kind a host fills from its own
//! render output.

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::trace;

use crate::color::{HslColor, Rgba8};
use crate::error::{PickerError, Result};
use crate::placement::{Point, Rect};

/// Reads one rendered pixel at a page coordinate.
///
/// Resolves `Ok(None)` when nothing readable is there; `Err` is reserved
/// for a failing or denied primitive.
pub trait PixelSource {
    fn read_pixel(&self, x: f64, y: f64) -> LocalBoxFuture<'_, Result<Option<Rgba8>>>;
}

/// Sample `(x, y)` from `source`.
///
/// Non-finite coordinates and fully transparent pixels are inconclusive and
/// resolve `Ok(None)`.
pub async fn sample(source: &dyn PixelSource, x: f64, y: f64) -> Result<Option<HslColor>> {
    if !x.is_finite() || !y.is_finite() {
        trace!(x, y, "non-finite sample coordinate");
        return Ok(None);
    }
    let pixel = source.read_pixel(x, y).await?;
    Ok(pixel.filter(|px| px.a > 0).map(HslColor::from))
}

/// An RGBA8 raster placed at `origin` in page coordinates.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    origin: Point,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(origin: Point, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap existing row-major RGBA8 bytes.
    pub fn from_rgba(origin: Point, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(PickerError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            origin,
            width,
            height,
            data,
        })
    }

    fn offset(&self, px: u32, py: u32) -> usize {
        ((py as usize) * (self.width as usize) + px as usize) * 4
    }

    /// Fill the page-space `rect` (clipped to the buffer) with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let rect = rect.sanitized();
        let x0 = (rect.x - self.origin.x).floor().max(0.0) as u32;
        let y0 = (rect.y - self.origin.y).floor().max(0.0) as u32;
        let x1 = ((rect.x + rect.width - self.origin.x).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((rect.y + rect.height - self.origin.y).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let offset = self.offset(px, py);
                self.data[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }
    }

    /// The pixel covering page point `(x, y)`, if inside the buffer.
    pub fn pixel_at(&self, x: f64, y: f64) -> Option<Rgba8> {
        let lx = (x - self.origin.x).floor();
        let ly = (y - self.origin.y).floor();
        if !(lx >= 0.0 && ly >= 0.0 && lx < self.width as f64 && ly < self.height as f64) {
            return None;
        }
        let offset = self.offset(lx as u32, ly as u32);
        let px = &self.data[offset..offset + 4];
        Some(Rgba8::new(px[0], px[1], px[2], px[3]))
    }
}

impl PixelSource for PixelBuffer {
    fn read_pixel(&self, x: f64, y: f64) -> LocalBoxFuture<'_, Result<Option<Rgba8>>> {
        future::ready(Ok(self.pixel_at(x, y))).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Denied;

    impl PixelSource for Denied {
        fn read_pixel(&self, _x: f64, _y: f64) -> LocalBoxFuture<'_, Result<Option<Rgba8>>> {
            future::ready(Err(PickerError::Sampling("permission denied".into()))).boxed_local()
        }
    }

    fn page() -> PixelBuffer {
        let mut buf = PixelBuffer::new(Point::new(100.0, 100.0), 50, 20);
        buf.fill_rect(Rect::new(100.0, 100.0, 25.0, 20.0), Rgba8::opaque(255, 0, 0));
        buf
    }

    #[test]
    fn samples_painted_pixels() {
        let buf = page();
        let c = block_on(sample(&buf, 110.5, 105.0)).unwrap().unwrap();
        assert_eq!(c.to_hex(), "FF0000");
    }

    #[test]
    fn transparent_and_outside_are_inconclusive() {
        let buf = page();
        assert_eq!(block_on(sample(&buf, 140.0, 105.0)).unwrap(), None);
        assert_eq!(block_on(sample(&buf, 99.9, 105.0)).unwrap(), None);
        assert_eq!(block_on(sample(&buf, 150.0, 105.0)).unwrap(), None);
        assert_eq!(block_on(sample(&buf, f64::NAN, 105.0)).unwrap(), None);
    }

    #[test]
    fn primitive_failure_is_an_error() {
        let err = block_on(sample(&Denied, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, PickerError::Sampling(_)));
    }

    #[test]
    fn fill_is_clipped() {
        let mut buf = PixelBuffer::new(Point::new(0.0, 0.0), 4, 4);
        buf.fill_rect(Rect::new(-10.0, 2.0, 100.0, 100.0), Rgba8::opaque(1, 2, 3));
        assert_eq!(buf.pixel_at(0.0, 1.0), Some(Rgba8::TRANSPARENT));
        assert_eq!(buf.pixel_at(3.0, 3.0), Some(Rgba8::opaque(1, 2, 3)));
    }

    #[test]
    fn rejects_short_buffers() {
        let err = PixelBuffer::from_rgba(Point::default(), 2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, PickerError::InvalidPixelBuffer { expected: 16, actual: 15, .. }));
        assert!(PixelBuffer::from_rgba(Point::default(), 2, 2, vec![0; 16]).is_ok());
    }
}
