/*
 *  display/components/waterfall.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Scrolling palette history of the sweep
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

use clap::ValueEnum;
use embedded_graphics::pixelcolor::Rgb565;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bins::Bin;
use crate::constants::WATERFALL_TICK_EVERY;
use crate::display::color::{palette_color, Color, PALETTE_SIZE};
use crate::display::components::spectrum::BarLayout;
use crate::display::error::DisplayError;
use crate::display::traits::SpectrumSurface;
use crate::range::DisplayRange;
use crate::vframebuf::VarFrameBuf;

/// How the history moves up one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Copy rows through panel readback; the panel RAM is the history.
    Readback,
    /// Keep the history in memory and blit it; works on write-only panels.
    #[default]
    Buffered,
}

/// Waterfall over rows `y..y + height`, newest row at the bottom, with a
/// static tick row right underneath.
#[derive(Debug, Clone)]
pub struct WaterfallRenderer {
    width: u16,
    y: u16,
    height: u16,
    mode: ScrollMode,
    history: Option<VarFrameBuf<Rgb565>>,
    newest: Vec<Rgb565>,
    scratch: Vec<Rgb565>,
    ticks_rendered: bool,
    needs_blit: bool,
}

impl WaterfallRenderer {
    pub fn new(width: u16, y: u16, height: u16, mode: ScrollMode) -> Self {
        let bg: Rgb565 = Color::Background.into();
        let history = match mode {
            ScrollMode::Buffered => Some(VarFrameBuf::new(u32::from(width), u32::from(height), bg)),
            ScrollMode::Readback => None,
        };
        debug!("waterfall {}x{} at y={} using {:?} scroll", width, height, y, mode);
        Self {
            width,
            y,
            height,
            mode,
            history,
            newest: vec![bg; usize::from(width)],
            scratch: vec![bg; usize::from(width)],
            ticks_rendered: false,
            needs_blit: true,
        }
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Redraw the tick row and the whole history on the next frame.
    pub fn invalidate(&mut self) {
        self.ticks_rendered = false;
        self.needs_blit = true;
    }

    /// Forget the history (new sweep geometry).
    pub fn clear(&mut self) {
        if let Some(h) = self.history.as_mut() {
            h.fill(Color::Background.into());
        }
        self.invalidate();
    }

    /// Row the newest line is painted on
    pub fn newest_row(&self) -> u16 {
        self.y + self.height - 1
    }

    pub fn ticks_row(&self) -> u16 {
        self.y + self.height
    }

    /// Scroll (unless paused) and paint the newest line for this frame.
    pub fn render<S: SpectrumSurface>(
        &mut self,
        surface: &mut S,
        layout: &BarLayout,
        bins: &[Bin],
        range: &DisplayRange,
        scroll: bool,
    ) -> Result<(), DisplayError> {
        if self.height == 0 {
            return Ok(());
        }
        self.compose_newest(layout, bins, range);
        let newest_row = self.newest_row();

        match self.mode {
            ScrollMode::Readback => {
                // panel RAM no longer holds our history
                if self.needs_blit {
                    surface.fill_rect(0, self.width - 1, self.y, newest_row, Color::Background.into())?;
                    self.needs_blit = false;
                }
                if scroll {
                    self.scroll_readback(surface)?;
                }
                Self::paint_runs(surface, &self.newest, newest_row)?;
            }
            ScrollMode::Buffered => {
                let Some(history) = self.history.as_mut() else {
                    return Err(DisplayError::Other("waterfall history buffer missing".into()));
                };
                if scroll {
                    history.scroll_up();
                }
                let last = usize::from(self.height - 1);
                history.row_mut(last).copy_from_slice(&self.newest);

                if scroll || self.needs_blit {
                    surface.set_window(0, self.y, self.width - 1, newest_row)?;
                    for &px in history.as_slice() {
                        surface.send_pixel(px)?;
                    }
                    self.needs_blit = false;
                } else {
                    Self::paint_runs(surface, &self.newest, newest_row)?;
                }
            }
        }

        if !self.ticks_rendered {
            self.render_ticks(surface)?;
            self.ticks_rendered = true;
        }
        surface.reset_window()
    }

    fn compose_newest(&mut self, layout: &BarLayout, bins: &[Bin], range: &DisplayRange) {
        self.newest.fill(Color::Background.into());
        for span in layout.spans() {
            let Some(bin) = bins.get(usize::from(span.column)) else { continue };
            let color = palette_color(range.palette_index(bin.peak_signal, PALETTE_SIZE));
            let x0 = usize::from(span.x);
            let x1 = usize::from(span.end()).min(self.newest.len());
            self.newest[x0..x1].fill(color);
        }
    }

    // every history row takes the content of the row below it
    fn scroll_readback<S: SpectrumSurface>(&mut self, surface: &mut S) -> Result<(), DisplayError> {
        for yy in self.y..self.newest_row() {
            surface.read_pixels(0, yy + 1, &mut self.scratch, 1)?;
            surface.set_window(0, yy, self.width - 1, yy)?;
            for &px in &self.scratch {
                surface.send_pixel(px)?;
            }
        }
        Ok(())
    }

    /// One hline per run of equal color.
    fn paint_runs<S: SpectrumSurface>(surface: &mut S, row: &[Rgb565], y: u16) -> Result<(), DisplayError> {
        let mut start = 0usize;
        while start < row.len() {
            let color = row[start];
            let mut end = start + 1;
            while end < row.len() && row[end] == color {
                end += 1;
            }
            surface.draw_hline(start as u16, y, (end - start) as u16, color)?;
            start = end;
        }
        Ok(())
    }

    fn render_ticks<S: SpectrumSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        let (_, surface_h) = surface.dimensions();
        if self.ticks_row() >= surface_h {
            return Ok(());
        }
        let fg = Color::Foreground.into();
        let bg = Color::Background.into();
        surface.set_window(0, self.ticks_row(), self.width - 1, self.ticks_row())?;
        for x in 0..self.width {
            surface.send_pixel(if x % WATERFALL_TICK_EVERY == 0 { fg } else { bg })?;
        }
        Ok(())
    }
}
