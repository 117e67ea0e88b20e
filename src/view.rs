/*
 *  view.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  The single active sweep view: bins, renderers and cursor together
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

use log::{debug, warn};

use crate::bins::{Bin, BinAggregator, Measurement, ScanProgress, SweepConfig};
use crate::constants::{DEFAULT_CURSOR_HALF_WIDTH, MAX_WIDTH};
use crate::display::color::Color;
use crate::display::components::cursor::CursorController;
use crate::display::components::spectrum::{self, BarLayout, SpectrumRenderer};
use crate::display::components::waterfall::{ScrollMode, WaterfallRenderer};
use crate::display::error::DisplayError;
use crate::display::layout::ViewLayout;
use crate::display::traits::{SpectrumSurface, SurfaceCapabilities};
use crate::domain::FrequencyRange;
use crate::range::{self, DisplayRange};

/// Construction options for [`SpectrumView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub scroll_mode: ScrollMode,
    pub cursor_half_width: u16,
    pub waterfall: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            scroll_mode: ScrollMode::default(),
            cursor_half_width: DEFAULT_CURSOR_HALF_WIDTH,
            waterfall: true,
        }
    }
}

/// Owns everything for the sweep currently on screen.
///
/// The scan loop feeds it with [`add_point`](Self::add_point); the frame
/// loop calls [`render_frame`](Self::render_frame) (or the individual
/// `render_*` calls). Input handling drives the cursor independently.
#[derive(Debug, Clone)]
pub struct SpectrumView {
    width: u16,
    layout: ViewLayout,
    aggregator: BinAggregator,
    bars: BarLayout,
    spectrum: SpectrumRenderer,
    waterfall: Option<WaterfallRenderer>,
    cursor: CursorController,
    range: DisplayRange,
    ruler_dirty: bool,
    cursor_dirty: bool,
}

impl SpectrumView {
    /// Size all per-column state for the surface. Panels wider than
    /// `MAX_WIDTH` only use their leftmost `MAX_WIDTH` columns.
    ///
    /// # Panics
    ///
    /// If the surface is narrower than `MIN_WIDTH`.
    pub fn new(caps: &SurfaceCapabilities, config: SweepConfig, options: ViewOptions) -> Self {
        let width = caps.width.min(MAX_WIDTH as u16);
        if width < caps.width {
            warn!("panel is {} px wide, using the first {}", caps.width, width);
        }
        let layout = ViewLayout::for_display(&SurfaceCapabilities { width, ..*caps });

        let mut mode = options.scroll_mode;
        if mode == ScrollMode::Readback && !caps.supports_readback {
            warn!("surface has no readback, waterfall falls back to buffered scrolling");
            mode = ScrollMode::Buffered;
        }
        let waterfall = options
            .waterfall
            .then(|| WaterfallRenderer::new(width, layout.waterfall_y, layout.waterfall_height, mode));

        debug!(
            "view {}x{} sweep {}..{} step {} bw {}",
            width, layout.height, config.range.start, config.range.end, config.step, config.bandwidth
        );

        Self {
            width,
            layout,
            aggregator: BinAggregator::new(width, config),
            bars: BarLayout::new(&config, width),
            spectrum: SpectrumRenderer::new(width),
            waterfall,
            cursor: CursorController::new(width, options.cursor_half_width),
            range: DisplayRange::default(),
            ruler_dirty: true,
            cursor_dirty: true,
        }
    }

    /// Start a new sweep geometry; all bins and history are dropped.
    pub fn configure(&mut self, config: SweepConfig) {
        debug!(
            "configure sweep {}..{} step {} bw {}",
            config.range.start, config.range.end, config.step, config.bandwidth
        );
        self.aggregator.reset(config.range, config.step, config.bandwidth);
        self.bars.rebuild(&config, self.width);
        self.spectrum.invalidate();
        if let Some(wf) = self.waterfall.as_mut() {
            wf.clear();
        }
        self.range = DisplayRange::default();
        self.ruler_dirty = true;
    }

    /// Rewind progress for the next pass over the same geometry.
    pub fn begin(&mut self) {
        self.aggregator.begin();
    }

    pub fn next_step(&mut self) {
        self.aggregator.advance_step();
    }

    #[inline]
    pub fn add_point(&mut self, m: &Measurement) {
        self.aggregator.add_point(m);
    }

    pub fn progress(&self) -> ScanProgress {
        self.aggregator.progress()
    }

    /// Repaint every region on the next frame.
    pub fn invalidate(&mut self) {
        debug!("view invalidated");
        self.spectrum.invalidate();
        if let Some(wf) = self.waterfall.as_mut() {
            wf.invalidate();
        }
        self.ruler_dirty = true;
        self.cursor_dirty = true;
    }

    fn refresh_range(&mut self) -> DisplayRange {
        self.range = range::normalize(self.aggregator.filled());
        self.range
    }

    /// Bars into rows `y..y + height`. Returns rectangles drawn.
    pub fn render_spectrum<S: SpectrumSurface>(
        &mut self,
        surface: &mut S,
        y: u16,
        height: u16,
    ) -> Result<usize, DisplayError> {
        let range = self.refresh_range();
        self.draw_spectrum(surface, &range, y, height)
    }

    pub fn render_waterfall<S: SpectrumSurface>(&mut self, surface: &mut S, scroll: bool) -> Result<(), DisplayError> {
        let range = self.refresh_range();
        self.draw_waterfall(surface, &range, scroll)
    }

    fn draw_spectrum<S: SpectrumSurface>(
        &mut self,
        surface: &mut S,
        range: &DisplayRange,
        y: u16,
        height: u16,
    ) -> Result<usize, DisplayError> {
        self.spectrum
            .render(surface, &self.bars, self.aggregator.bins(), range, y, height)
    }

    fn draw_waterfall<S: SpectrumSurface>(
        &mut self,
        surface: &mut S,
        range: &DisplayRange,
        scroll: bool,
    ) -> Result<(), DisplayError> {
        match self.waterfall.as_mut() {
            Some(wf) => wf.render(surface, &self.bars, self.aggregator.bins(), range, scroll),
            None => Ok(()),
        }
    }

    pub fn render_cursor<S: SpectrumSurface>(&mut self, surface: &mut S, y: u16) -> Result<(), DisplayError> {
        self.cursor.render(surface, y)?;
        self.cursor_dirty = false;
        Ok(())
    }

    /// Clear the ruler strip and draw the frequency ticks for the sweep.
    pub fn render_ticks<S: SpectrumSurface>(&mut self, surface: &mut S, y: u16, height: u16) -> Result<(), DisplayError> {
        if height == 0 {
            return Ok(());
        }
        surface.fill_rect(0, self.width - 1, y, y + height - 1, Color::Background.into())?;
        spectrum::render_ticks(surface, &self.aggregator.config().range, self.width, y, height)?;
        self.ruler_dirty = false;
        Ok(())
    }

    /// Arrow at `f` over the sweep range drawn on a `width` wide axis at `x`.
    pub fn render_arrow<S: SpectrumSurface>(
        &self,
        surface: &mut S,
        f: u32,
        x: u16,
        y: u16,
        width: u16,
    ) -> Result<(), DisplayError> {
        spectrum::render_arrow(surface, &self.aggregator.config().range, f, x, y, width)
    }

    /// Everything that changed since the last frame, top to bottom.
    pub fn render_frame<S: SpectrumSurface>(&mut self, surface: &mut S, scroll: bool) -> Result<(), DisplayError> {
        let layout = self.layout;
        if self.cursor_dirty {
            self.render_cursor(surface, layout.cursor_y)?;
        }
        if self.ruler_dirty {
            self.render_ticks(surface, layout.ruler_y, layout.ruler_height)?;
        }
        // one normalize pass shared by both regions
        let range = self.refresh_range();
        self.draw_waterfall(surface, &range, scroll)?;
        self.draw_spectrum(surface, &range, layout.spectrum_y, layout.spectrum_height)?;
        Ok(())
    }

    pub fn noise_floor(&self) -> u16 {
        range::noise_floor(self.aggregator.filled())
    }

    pub fn noise_max(&self) -> u16 {
        range::noise_max(self.aggregator.filled())
    }

    /// Range used by the most recent render.
    pub fn display_range(&self) -> DisplayRange {
        self.range
    }

    /// `(min, max)` of the palette gradient in dBm
    pub fn gradient_range_dbm(&self) -> (i16, i16) {
        self.range.to_dbm()
    }

    pub fn cursor_move(&mut self, up: bool) -> bool {
        let moved = self.cursor.move_by(up);
        self.cursor_dirty |= moved;
        moved
    }

    pub fn cursor_resize(&mut self, grow: bool) -> bool {
        let resized = self.cursor.resize(grow);
        self.cursor_dirty |= resized;
        resized
    }

    pub fn cursor_reset(&mut self) {
        self.cursor.reset();
        self.cursor_dirty = true;
    }

    pub fn cursor_range(&self, step: u32) -> FrequencyRange {
        self.cursor.to_frequency_range(&self.aggregator.config().range, step)
    }

    pub fn cursor_center(&self, step: u32) -> u32 {
        self.cursor.to_center_frequency(&self.aggregator.config().range, step)
    }

    pub fn cursor(&self) -> &CursorController {
        &self.cursor
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    pub fn config(&self) -> &SweepConfig {
        self.aggregator.config()
    }

    pub fn bins(&self) -> &[Bin] {
        self.aggregator.bins()
    }

    pub fn filled_points(&self) -> u16 {
        self.aggregator.filled_points()
    }

    /// `None` when the waterfall is disabled
    pub fn scroll_mode(&self) -> Option<ScrollMode> {
        self.waterfall.as_ref().map(|wf| wf.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::memory::MemorySurface;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    fn config() -> SweepConfig {
        SweepConfig {
            range: FrequencyRange::new(50_000, 52_000),
            step: 25,
            bandwidth: 25,
        }
    }

    fn sweep(view: &mut SpectrumView, carrier: u32) {
        view.begin();
        let cfg = *view.config();
        let mut f = cfg.range.start;
        while f <= cfg.range.end {
            let signal = if f.abs_diff(carrier) <= 50 { 200 } else { 60 + (f / 25 % 7) as u16 };
            view.add_point(&Measurement { frequency: f, signal, noise: 30, marker: false });
            view.next_step();
            f += cfg.step;
        }
    }

    fn view_on(surface: &MemorySurface, options: ViewOptions) -> SpectrumView {
        SpectrumView::new(&surface.capabilities(), config(), options)
    }

    #[test]
    fn test_full_sweep_progress() {
        let s = MemorySurface::new(160, 128, true);
        let mut view = view_on(&s, ViewOptions::default());
        assert_eq!(view.progress().total_steps, 81);
        sweep(&mut view, 51_000);
        assert_eq!(view.progress().current_step, 80);
        assert_eq!(view.filled_points(), 160);
    }

    #[test]
    fn test_frame_is_idempotent() {
        let mut s = MemorySurface::new(160, 128, true);
        let mut view = view_on(&s, ViewOptions::default());
        sweep(&mut view, 51_000);
        view.render_frame(&mut s, true).unwrap();

        s.reset_stats();
        view.render_frame(&mut s, false).unwrap();
        assert_eq!(s.stats().pixels_changed, 0);
    }

    #[test]
    fn test_carrier_bar_is_tallest() {
        let mut s = MemorySurface::new(160, 128, false);
        let mut view = view_on(&s, ViewOptions::default());
        sweep(&mut view, 51_000);
        view.render_frame(&mut s, true).unwrap();

        let layout = *view.layout();
        let bottom = layout.spectrum_y + layout.spectrum_height - 1;
        let x = view.bins().len() as u16 / 2;
        let carrier = s.count_not_in_column(x, layout.spectrum_y, bottom, Rgb565::BLACK);
        let side = s.count_not_in_column(10, layout.spectrum_y, bottom, Rgb565::BLACK);
        assert!(carrier > side, "carrier {} side {}", carrier, side);
        let range = view.display_range();
        assert!(range.max > 200 && range.min < 60);
    }

    #[test]
    fn test_readback_falls_back_without_support() {
        let s = MemorySurface::new(160, 128, false);
        let options = ViewOptions { scroll_mode: ScrollMode::Readback, ..ViewOptions::default() };
        let view = view_on(&s, options);
        assert_eq!(view.scroll_mode(), Some(ScrollMode::Buffered));

        let s = MemorySurface::new(160, 128, true);
        let view = view_on(&s, options);
        assert_eq!(view.scroll_mode(), Some(ScrollMode::Readback));
    }

    #[test]
    fn test_waterfall_disabled() {
        let mut s = MemorySurface::new(160, 128, false);
        let options = ViewOptions { waterfall: false, ..ViewOptions::default() };
        let mut view = view_on(&s, options);
        sweep(&mut view, 51_000);
        view.render_frame(&mut s, true).unwrap();
        assert_eq!(view.scroll_mode(), None);
        let l = *view.layout();
        assert_eq!(s.count_in_row(l.waterfall_ticks_y(), Rgb565::WHITE), 0);
    }

    #[test]
    fn test_wide_panel_is_capped() {
        let s = MemorySurface::new(400, 128, false);
        let view = view_on(&s, ViewOptions::default());
        assert_eq!(view.width(), MAX_WIDTH as u16);
        assert_eq!(view.bins().len(), MAX_WIDTH);
    }

    #[test]
    fn test_configure_resets_bins() {
        let s = MemorySurface::new(160, 128, false);
        let mut view = view_on(&s, ViewOptions::default());
        sweep(&mut view, 51_000);
        view.configure(SweepConfig {
            range: FrequencyRange::new(100_000, 110_000),
            step: 100,
            bandwidth: 50,
        });
        assert_eq!(view.filled_points(), 0);
        assert!(view.bins().iter().all(|b| *b == Bin::EMPTY));
        assert_eq!(view.progress().total_steps, 101);
        assert_eq!(view.display_range(), DisplayRange::default());
    }

    #[test]
    fn test_cursor_redraw_only_when_moved() {
        let mut s = MemorySurface::new(160, 128, false);
        let mut view = view_on(&s, ViewOptions::default());
        sweep(&mut view, 51_000);
        view.render_frame(&mut s, true).unwrap();
        let yellow = Color::Yellow.to_rgb565();
        assert_eq!(s.get_pixel(64, 1), Some(yellow));

        assert!(view.cursor_move(true));
        view.render_frame(&mut s, false).unwrap();
        assert_eq!(s.get_pixel(64, 1), Some(Rgb565::BLACK));
        assert_eq!(s.get_pixel(65, 1), Some(yellow));
        assert_eq!(s.get_pixel(66, 1), Some(Color::CursorFill.to_rgb565()));
        assert_eq!(view.cursor_center(1), view.config().range.x2f(81, 160));

        view.cursor_reset();
        assert_eq!(view.cursor().center(), 80);
    }

    #[test]
    fn test_frame_matches_region_calls() {
        let mut framed = MemorySurface::new(160, 128, false);
        let mut split = MemorySurface::new(160, 128, false);
        let mut a = view_on(&framed, ViewOptions::default());
        let mut b = view_on(&split, ViewOptions::default());
        for carrier in [50_500, 51_000, 51_500] {
            sweep(&mut a, carrier);
            sweep(&mut b, carrier);
            a.render_frame(&mut framed, true).unwrap();

            let l = *b.layout();
            b.render_cursor(&mut split, l.cursor_y).unwrap();
            b.render_ticks(&mut split, l.ruler_y, l.ruler_height).unwrap();
            b.render_waterfall(&mut split, true).unwrap();
            b.render_spectrum(&mut split, l.spectrum_y, l.spectrum_height).unwrap();
        }
        assert_eq!(a.display_range(), b.display_range());
        assert_eq!(a.display_range(), range::normalize(&a.bins()[..usize::from(a.filled_points())]));
        assert_eq!(framed.framebuffer().as_slice(), split.framebuffer().as_slice());
    }

    #[test]
    fn test_noise_queries() {
        let s = MemorySurface::new(160, 128, false);
        let mut view = view_on(&s, ViewOptions::default());
        sweep(&mut view, 51_000);
        assert_eq!(view.noise_max(), 30);
        assert!(view.noise_floor() > 0);
        let (lo, hi) = view.gradient_range_dbm();
        assert!(lo < hi);
    }
}
