/*
 *  display/drivers/target.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Adapter exposing any embedded-graphics RGB565 DrawTarget as a
 *  write-only spectrum surface
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::display::error::DisplayError;
use crate::display::traits::{SpectrumSurface, SurfaceCapabilities};

/// Wraps a `DrawTarget<Color = Rgb565>` (a panel driver from the
/// embedded-graphics ecosystem, a frame buffer, a simulator window).
///
/// No readback: pair it with the buffered waterfall.
pub struct DrawTargetSurface<D> {
    target: D,
    capabilities: SurfaceCapabilities,
    window: Rectangle,
    cursor: Point,
}

impl<D> DrawTargetSurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    D::Error: core::fmt::Debug,
{
    pub fn new(target: D) -> Self {
        let size = target.size();
        let capabilities = SurfaceCapabilities {
            width: size.width.min(u32::from(u16::MAX)) as u16,
            height: size.height.min(u32::from(u16::MAX)) as u16,
            supports_readback: false,
        };
        let window = Rectangle::new(Point::zero(), size);
        Self { target, capabilities, window, cursor: Point::zero() }
    }

    pub fn inner(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw_err(e: D::Error) -> DisplayError {
        DisplayError::DrawingError(format!("{:?}", e))
    }
}

impl<D> SpectrumSurface for DrawTargetSurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    D::Error: core::fmt::Debug,
{
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        if x1 < x0 || y1 < y0 || x1 >= self.capabilities.width || y1 >= self.capabilities.height {
            return Err(DisplayError::WindowOutOfBounds { x0, y0, x1, y1 });
        }
        self.window = Rectangle::with_corners(
            Point::new(i32::from(x0), i32::from(y0)),
            Point::new(i32::from(x1), i32::from(y1)),
        );
        self.cursor = self.window.top_left;
        Ok(())
    }

    fn reset_window(&mut self) -> Result<(), DisplayError> {
        self.window = Rectangle::new(Point::zero(), self.target.size());
        self.cursor = Point::zero();
        Ok(())
    }

    fn send_pixel(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        let p = self.cursor;
        Pixel(p, color).draw(&mut self.target).map_err(Self::draw_err)?;

        let Some(br) = self.window.bottom_right() else {
            return Ok(());
        };
        self.cursor = if p.x >= br.x {
            let y = if p.y >= br.y { self.window.top_left.y } else { p.y + 1 };
            Point::new(self.window.top_left.x, y)
        } else {
            Point::new(p.x + 1, p.y)
        };
        Ok(())
    }

    // one primitive draw instead of a pixel stream
    fn fill_rect(&mut self, x0: u16, x1: u16, y0: u16, y1: u16, color: Rgb565) -> Result<(), DisplayError> {
        if x1 < x0 || y1 < y0 {
            return Ok(());
        }
        Rectangle::with_corners(
            Point::new(i32::from(x0), i32::from(y0)),
            Point::new(i32::from(x1), i32::from(y1)),
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(&mut self.target)
        .map_err(Self::draw_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::VarFrameBuf;

    #[test]
    fn test_stream_into_window() {
        let fb = VarFrameBuf::new(6, 4, Rgb565::BLACK);
        let mut s = DrawTargetSurface::new(fb);
        s.set_window(4, 2, 5, 3).unwrap();
        for _ in 0..3 {
            s.send_pixel(Rgb565::RED).unwrap();
        }
        let fb = s.inner();
        assert_eq!(fb.get(4, 2), Some(Rgb565::RED));
        assert_eq!(fb.get(5, 2), Some(Rgb565::RED));
        assert_eq!(fb.get(4, 3), Some(Rgb565::RED));
        assert_eq!(fb.get(5, 3), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_fill_rect_and_no_readback() {
        let fb = VarFrameBuf::new(6, 4, Rgb565::BLACK);
        let mut s = DrawTargetSurface::new(fb);
        s.fill_rect(1, 2, 0, 3, Rgb565::GREEN).unwrap();
        assert_eq!(s.inner().row(3)[1..3], [Rgb565::GREEN; 2]);
        let mut buf = [Rgb565::BLACK; 6];
        assert!(s.read_pixels(0, 0, &mut buf, 1).is_err());
        assert!(!s.capabilities().supports_readback);
        assert!(s.set_window(0, 0, 6, 0).is_err());
    }
}
