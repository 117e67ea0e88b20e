/*
 *  display/drivers/memory.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory RGB565 surface for headless runs and tests
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
use embedded_graphics::geometry::Size;

use crate::display::error::DisplayError;
use crate::display::traits::{SpectrumSurface, SurfaceCapabilities};
use crate::vframebuf::VarFrameBuf;

use std::io::Write;
use std::path::Path;

/// Memory-backed surface that behaves like a window-addressed panel
///
/// Useful for:
/// - Unit and integration tests
/// - Headless demo runs with PPM snapshots
/// - Development without hardware
///
/// Every write is counted so tests can assert how much a frame redrew.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    framebuffer: VarFrameBuf<Rgb565>,
    capabilities: SurfaceCapabilities,
    window: Window,
    stats: SurfaceStats,
}

/// Write statistics, reset with [`MemorySurface::reset_stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Number of set_window() calls
    pub windows: usize,

    /// Pixels streamed via send_pixel()
    pub pixels_sent: usize,

    /// Pixels whose stored color actually changed
    pub pixels_changed: usize,

    /// Pixel runs read back via read_pixels()
    pub rows_read: usize,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    cx: u16,
    cy: u16,
}

impl Window {
    fn full(width: u16, height: u16) -> Self {
        Self { x0: 0, y0: 0, x1: width - 1, y1: height - 1, cx: 0, cy: 0 }
    }
}

impl MemorySurface {
    /// Create a surface of the given size, cleared to black
    pub fn new(width: u16, height: u16, supports_readback: bool) -> Self {
        Self {
            framebuffer: VarFrameBuf::new(u32::from(width), u32::from(height), Rgb565::BLACK),
            capabilities: SurfaceCapabilities { width, height, supports_readback },
            window: Window::full(width, height),
            stats: SurfaceStats::default(),
        }
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SurfaceStats::default();
    }

    /// Get pixel at position for testing
    pub fn get_pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        self.framebuffer.get(usize::from(x), usize::from(y))
    }

    /// Count pixels in a row that match a color
    pub fn count_in_row(&self, y: u16, color: Rgb565) -> usize {
        self.framebuffer
            .row(usize::from(y))
            .iter()
            .filter(|&&p| p == color)
            .count()
    }

    /// Count pixels in a column span `y0..y1` that differ from a color
    pub fn count_not_in_column(&self, x: u16, y0: u16, y1: u16, color: Rgb565) -> usize {
        (y0..y1)
            .filter_map(|y| self.get_pixel(x, y))
            .filter(|&p| p != color)
            .count()
    }

    pub fn framebuffer(&self) -> &VarFrameBuf<Rgb565> {
        &self.framebuffer
    }

    /// Save the surface as a binary PPM (P6) for visual inspection
    pub fn save_to_ppm(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        writeln!(file, "P6")?;
        writeln!(file, "{} {}", self.capabilities.width, self.capabilities.height)?;
        writeln!(file, "255")?;
        for p in self.framebuffer.as_slice() {
            // expand 5/6/5 to 8 bits per channel
            let r = (p.r() << 3) | (p.r() >> 2);
            let g = (p.g() << 2) | (p.g() >> 4);
            let b = (p.b() << 3) | (p.b() >> 2);
            file.write_all(&[r, g, b])?;
        }
        file.flush()
    }

    fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.capabilities.width && y < self.capabilities.height
    }
}

impl SpectrumSurface for MemorySurface {
    fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        if x1 < x0 || y1 < y0 || !self.in_bounds(x1, y1) {
            return Err(DisplayError::WindowOutOfBounds { x0, y0, x1, y1 });
        }
        self.stats.windows += 1;
        self.window = Window { x0, y0, x1, y1, cx: x0, cy: y0 };
        Ok(())
    }

    fn reset_window(&mut self) -> Result<(), DisplayError> {
        self.window = Window::full(self.capabilities.width, self.capabilities.height);
        Ok(())
    }

    fn send_pixel(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        let w = &mut self.window;
        let (x, y) = (w.cx, w.cy);
        // controller RAM pointer wraps inside the window
        if w.cx >= w.x1 {
            w.cx = w.x0;
            w.cy = if w.cy >= w.y1 { w.y0 } else { w.cy + 1 };
        } else {
            w.cx += 1;
        }
        self.stats.pixels_sent += 1;
        if self.framebuffer.set(usize::from(x), usize::from(y), color) {
            self.stats.pixels_changed += 1;
        }
        Ok(())
    }

    fn read_pixels(&mut self, x: u16, y: u16, buf: &mut [Rgb565], rows: u16) -> Result<(), DisplayError> {
        if !self.capabilities.supports_readback {
            return Err(DisplayError::UnsupportedOperation);
        }
        let rows = usize::from(rows.max(1));
        if buf.len() % rows != 0 {
            return Err(DisplayError::BufferSizeMismatch {
                expected: (buf.len() / rows + 1) * rows,
                actual: buf.len(),
            });
        }
        let count = buf.len() / rows;
        for (r, chunk) in buf.chunks_mut(count).enumerate() {
            let yy = usize::from(y) + r;
            for (i, px) in chunk.iter_mut().enumerate() {
                *px = self
                    .framebuffer
                    .get(usize::from(x) + i, yy)
                    .ok_or_else(|| DisplayError::Other(format!("readback past edge at row {}", yy)))?;
            }
            self.stats.rows_read += 1;
        }
        Ok(())
    }
}

impl DrawTarget for MemorySurface {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }
}

impl OriginDimensions for MemorySurface {
    fn size(&self) -> Size {
        Size::new(u32::from(self.capabilities.width), u32::from(self.capabilities.height))
    }
}
