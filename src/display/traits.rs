/*
 *  display/traits.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing surface abstraction consumed by the spectrum renderers
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

use embedded_graphics::pixelcolor::Rgb565;
use crate::display::error::DisplayError;

/// Surface capabilities and metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// Surface width in pixels
    pub width: u16,

    /// Surface height in pixels
    pub height: u16,

    /// Whether pixels can be read back from the panel RAM
    pub supports_readback: bool,
}

/// Window-addressed pixel surface, the way ST77xx style controllers work.
///
/// A window is declared with [`set_window`](Self::set_window) and pixels are
/// streamed into it row by row with [`send_pixel`](Self::send_pixel). The
/// rectangle and line helpers are built on those two calls; drivers with a
/// faster path may override them.
pub trait SpectrumSurface {
    /// Returns the capabilities of this surface
    fn capabilities(&self) -> &SurfaceCapabilities;

    /// Returns the surface dimensions as (width, height)
    fn dimensions(&self) -> (u16, u16) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Address the inclusive rectangle `(x0, y0)..=(x1, y1)`
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError>;

    /// Address the whole surface again
    fn reset_window(&mut self) -> Result<(), DisplayError>;

    /// Stream one pixel into the current window
    fn send_pixel(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Read `rows` runs of `buf.len() / rows` pixels starting at `(x, y)`
    ///
    /// Returns an error if the surface can't read back.
    fn read_pixels(&mut self, x: u16, y: u16, buf: &mut [Rgb565], rows: u16) -> Result<(), DisplayError> {
        let _ = (x, y, buf, rows);
        Err(DisplayError::UnsupportedOperation)
    }

    /// Fill the inclusive rectangle `x0..=x1`, `y0..=y1`
    fn fill_rect(&mut self, x0: u16, x1: u16, y0: u16, y1: u16, color: Rgb565) -> Result<(), DisplayError> {
        if x1 < x0 || y1 < y0 {
            return Ok(());
        }
        self.set_window(x0, y0, x1, y1)?;
        let count = u32::from(x1 - x0 + 1) * u32::from(y1 - y0 + 1);
        for _ in 0..count {
            self.send_pixel(color)?;
        }
        Ok(())
    }

    /// Filled `w` x `h` rectangle with its top-left corner at `(x, y)`
    fn draw_rect(&mut self, x: u16, y: u16, h: u16, w: u16, color: Rgb565) -> Result<(), DisplayError> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.fill_rect(x, x + w - 1, y, y + h - 1, color)
    }

    fn draw_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> Result<(), DisplayError> {
        self.draw_rect(x, y, 1, w, color)
    }

    fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: Rgb565) -> Result<(), DisplayError> {
        self.draw_rect(x, y, h, 1, color)
    }
}
