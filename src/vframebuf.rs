/*
 *  vframebuf.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized pixel buffer shared by the memory surface and the
 *  buffered waterfall
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;

/// A runtime-sized framebuffer for embedded-graphics.
#[derive(Debug, Clone)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    pub fn fill(&mut self, color: C) {
        self.buf.fill(color);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<C> {
        if x < self.w && y < self.h {
            Some(self.buf[y * self.w + x])
        } else {
            None
        }
    }

    /// Store a pixel; returns true when the stored value actually changed.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: C) -> bool {
        if x >= self.w || y >= self.h {
            return false;
        }
        let slot = &mut self.buf[y * self.w + x];
        let changed = *slot != color;
        *slot = color;
        changed
    }

    pub fn row(&self, y: usize) -> &[C] {
        &self.buf[y * self.w..(y + 1) * self.w]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [C] {
        &mut self.buf[y * self.w..(y + 1) * self.w]
    }

    /// Shift every row up by one; the bottom row keeps its old content.
    pub fn scroll_up(&mut self) {
        if self.h > 1 {
            self.buf.copy_within(self.w.., 0);
        }
    }
}

impl<C: PixelColor> OriginDimensions for VarFrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x >= 0 && p.y >= 0 {
                self.set(p.x as usize, p.y as usize, c);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb565;

    #[test]
    fn test_set_reports_change() {
        let mut fb = VarFrameBuf::new(4, 3, Rgb565::BLACK);
        assert!(fb.set(1, 1, Rgb565::RED));
        assert!(!fb.set(1, 1, Rgb565::RED));
        assert!(!fb.set(9, 9, Rgb565::RED));
        assert_eq!(fb.get(1, 1), Some(Rgb565::RED));
        assert_eq!(fb.get(4, 0), None);
    }

    #[test]
    fn test_scroll_up() {
        let mut fb = VarFrameBuf::new(2, 3, Rgb565::BLACK);
        fb.row_mut(1).fill(Rgb565::GREEN);
        fb.row_mut(2).fill(Rgb565::BLUE);
        fb.scroll_up();
        assert_eq!(fb.row(0), &[Rgb565::GREEN; 2]);
        assert_eq!(fb.row(1), &[Rgb565::BLUE; 2]);
        assert_eq!(fb.row(2), &[Rgb565::BLUE; 2]);
    }
}
