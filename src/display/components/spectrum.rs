/*
 *  display/components/spectrum.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bar chart of the sweep with diff based redraw
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

use arrayvec::ArrayVec;
use log::debug;

use crate::bins::{Bin, SweepConfig};
use crate::constants::{
    ARROW_HEAD_HEIGHT, ARROW_HEAD_WIDTH, ARROW_HEIGHT, MAX_WIDTH, TICK_DECADE_MAX, TICK_DECADE_MIN,
};
use crate::display::color::Color;
use crate::display::error::DisplayError;
use crate::display::traits::SpectrumSurface;
use crate::domain::{map_linear, FrequencyRange};
use crate::range::DisplayRange;

/// Horizontal pixel span drawn for one step column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSpan {
    /// Bin the bar reads from
    pub column: u16,
    pub x: u16,
    pub w: u16,
}

impl BarSpan {
    #[inline]
    pub fn end(&self) -> u16 {
        self.x + self.w
    }
}

/// The distinct bars of a sweep, left to right, non-overlapping.
///
/// Depends only on the sweep geometry, so it is rebuilt on configure and
/// shared by the bar chart and the waterfall.
#[derive(Debug, Clone, Default)]
pub struct BarLayout {
    spans: ArrayVec<BarSpan, MAX_WIDTH>,
}

impl BarLayout {
    pub fn new(config: &SweepConfig, width: u16) -> Self {
        let mut layout = Self::default();
        layout.rebuild(config, width);
        layout
    }

    pub fn rebuild(&mut self, config: &SweepConfig, width: u16) {
        self.spans.clear();
        let range = config.range;

        // pixels per step, capped by pixels per receiver bandwidth
        let sz_step = range.f2x(range.start.saturating_add(config.step), width);
        let sz_bw = range.f2x(range.start.saturating_add(config.bandwidth), width);
        let sz = sz_step.min(sz_bw);

        let total_steps = range.span() / config.step + 1;
        let mut last_column = None;
        let mut prev_end = 0u16;

        for k in 0..total_steps {
            let f = range.start + k * config.step;
            let column = range.f2x(f, width);
            if last_column == Some(column) {
                continue;
            }
            last_column = Some(column);

            let (sx, ex) = if sz < 2 {
                (column, column + 1)
            } else {
                let w = if sz % 2 == 0 { sz + 1 } else { sz };
                let half = w / 2;
                (column.saturating_sub(half), (column + half + 1).min(width))
            };
            // neighbours tile, so an erase never eats the next bar
            let sx = sx.max(prev_end);
            if ex <= sx {
                continue;
            }
            if self.spans.try_push(BarSpan { column, x: sx, w: ex - sx }).is_err() {
                break;
            }
            prev_end = ex;
        }
    }

    pub fn spans(&self) -> &[BarSpan] {
        &self.spans
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarOp {
    Draw { height: u16 },
    Erase { from: u16, to: u16 },
}

#[derive(Debug, Clone, Copy)]
struct Run {
    start: u16,
    end: u16,
    op: BarOp,
}

/// Incremental bar chart renderer.
///
/// Keeps the height it last drew for every column and only touches the
/// pixels whose state changed: shrinking bars erase the uncovered strip,
/// growing bars are painted over, unchanged bars are skipped. Neighbouring
/// bars with the same pending operation go out as one rectangle.
#[derive(Debug, Clone)]
pub struct SpectrumRenderer {
    width: u16,
    heights: Vec<u16>,
    placement: Option<(u16, u16)>,
    dirty: bool,
}

impl SpectrumRenderer {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            heights: vec![0; usize::from(width)],
            placement: None,
            dirty: true,
        }
    }

    /// Clear the area and redraw every bar on the next frame.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn last_height(&self, column: u16) -> u16 {
        self.heights.get(usize::from(column)).copied().unwrap_or(0)
    }

    /// Draw one frame into rows `y..y + height`, bars growing up from the
    /// bottom row. Returns the number of rectangles sent to the surface.
    pub fn render<S: SpectrumSurface>(
        &mut self,
        surface: &mut S,
        layout: &BarLayout,
        bins: &[Bin],
        range: &DisplayRange,
        y: u16,
        height: u16,
    ) -> Result<usize, DisplayError> {
        let mut rects = 0;

        if self.dirty || self.placement != Some((y, height)) {
            debug!("spectrum full redraw at y={} h={}", y, height);
            if let Some((oy, oh)) = self.placement {
                if (oy, oh) != (y, height) && oh > 0 {
                    surface.fill_rect(0, self.width - 1, oy, oy + oh - 1, Color::Background.into())?;
                    rects += 1;
                }
            }
            if height > 0 {
                surface.fill_rect(0, self.width - 1, y, y + height - 1, Color::Background.into())?;
                rects += 1;
            }
            self.heights.fill(0);
            self.placement = Some((y, height));
            self.dirty = false;
        }

        let base = y + height;
        let mut pending: Option<Run> = None;

        for span in layout.spans() {
            let col = usize::from(span.column);
            let Some(bin) = bins.get(col) else { continue };
            let new_h = range.scale(bin.peak_signal, height);
            let old_h = self.heights[col];
            if new_h == old_h {
                continue;
            }
            self.heights[col] = new_h;

            let op = if new_h < old_h {
                BarOp::Erase { from: new_h, to: old_h }
            } else {
                BarOp::Draw { height: new_h }
            };

            match pending.as_mut() {
                Some(run) if run.op == op && run.end == span.x => run.end = span.end(),
                _ => {
                    if let Some(run) = pending.take() {
                        Self::flush(surface, run, base)?;
                        rects += 1;
                    }
                    pending = Some(Run { start: span.x, end: span.end(), op });
                }
            }
        }
        if let Some(run) = pending {
            Self::flush(surface, run, base)?;
            rects += 1;
        }

        surface.reset_window()?;
        Ok(rects)
    }

    fn flush<S: SpectrumSurface>(surface: &mut S, run: Run, base: u16) -> Result<(), DisplayError> {
        match run.op {
            BarOp::Draw { height } => surface.fill_rect(
                run.start,
                run.end - 1,
                base - height,
                base - 1,
                Color::Foreground.into(),
            ),
            BarOp::Erase { from, to } => surface.fill_rect(
                run.start,
                run.end - 1,
                base - to,
                base - from - 1,
                Color::Background.into(),
            ),
        }
    }
}

/// Dashed frequency ticks on the largest decade that fits in the span.
pub fn render_ticks<S: SpectrumSurface>(
    surface: &mut S,
    range: &FrequencyRange,
    width: u16,
    y: u16,
    height: u16,
) -> Result<(), DisplayError> {
    if height == 0 {
        return Ok(());
    }
    let span = range.span();
    let mut div = TICK_DECADE_MAX;
    while div >= TICK_DECADE_MIN {
        if div < span {
            break;
        }
        div /= 10;
    }
    if div < TICK_DECADE_MIN {
        return Ok(());
    }

    let grey = Color::Grey.into();
    let bg = Color::Background.into();
    let mut f = range.start - range.start % div + div;
    while f < range.end {
        let x = range.f2x(f, width);
        surface.set_window(x, y, x, y + height - 1)?;
        for yp in y..y + height {
            surface.send_pixel(if (yp / 2) % 2 == 1 { grey } else { bg })?;
        }
        f += div;
    }
    surface.reset_window()
}

/// Small arrow marking frequency `f` on an axis starting at pixel `x`.
pub fn render_arrow<S: SpectrumSurface>(
    surface: &mut S,
    range: &FrequencyRange,
    f: u32,
    x: u16,
    y: u16,
    width: u16,
) -> Result<(), DisplayError> {
    if width == 0 {
        return Ok(());
    }
    let cx = map_linear(
        f,
        range.start,
        range.end,
        u32::from(x),
        u32::from(x) + u32::from(width) - 1,
    ) as u16;
    let grey = Color::Grey.into();
    surface.draw_vline(cx, y, ARROW_HEIGHT, grey)?;

    let hx = cx.saturating_sub(ARROW_HEAD_WIDTH / 2);
    let hw = ARROW_HEAD_WIDTH.min(x + width - hx);
    surface.draw_rect(hx, y, ARROW_HEAD_HEIGHT, hw, grey)?;
    surface.reset_window()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::memory::MemorySurface;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    fn config(step: u32, bandwidth: u32) -> SweepConfig {
        SweepConfig {
            range: FrequencyRange::new(50_000, 52_000),
            step,
            bandwidth,
        }
    }

    fn flat_bins(width: u16, value: u16) -> Vec<Bin> {
        vec![Bin { peak_signal: value, min_noise: 0, marker: false }; usize::from(width)]
    }

    #[test]
    fn test_narrow_steps_give_single_pixel_bars() {
        // 2001 steps over 160 px: every column is its own 1 px bar
        let layout = BarLayout::new(&config(1, 1), 160);
        assert_eq!(layout.spans().len(), 160);
        assert!(layout.spans().iter().all(|s| s.w == 1 && s.x == s.column));
    }

    #[test]
    fn test_wide_steps_tile_without_overlap() {
        // 5 steps of 500: ~40 px per step
        let layout = BarLayout::new(&config(500, 500), 160);
        let spans = layout.spans();
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].x, 0);
        for pair in spans.windows(2) {
            assert!(pair[0].end() <= pair[1].x);
        }
        assert!(spans.last().unwrap().end() <= 160);
        // 41 px wide, clipped on the left by its neighbour
        assert_eq!(spans[1].x, 21);
        assert_eq!(spans[1].w, 40);
    }

    #[test]
    fn test_bandwidth_caps_bar_width() {
        let wide = BarLayout::new(&config(500, 500), 160);
        let narrow = BarLayout::new(&config(500, 25), 160);
        assert!(narrow.spans()[2].w < wide.spans()[2].w);
        assert_eq!(narrow.spans()[2].w, 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut s = MemorySurface::new(160, 64, false);
        let layout = BarLayout::new(&config(25, 25), 160);
        let mut r = SpectrumRenderer::new(160);
        let mut bins = flat_bins(160, 100);
        bins[40].peak_signal = 180;
        let range = DisplayRange { min: 50, max: 200 };

        r.render(&mut s, &layout, &bins, &range, 10, 50).unwrap();
        s.reset_stats();
        let rects = r.render(&mut s, &layout, &bins, &range, 10, 50).unwrap();
        assert_eq!(rects, 0);
        assert_eq!(s.stats().pixels_sent, 0);
        assert_eq!(s.stats().pixels_changed, 0);
    }

    #[test]
    fn test_equal_bars_merge_into_one_rect() {
        let mut s = MemorySurface::new(160, 64, false);
        let layout = BarLayout::new(&config(25, 25), 160);
        let mut r = SpectrumRenderer::new(160);
        let bins = flat_bins(160, 120);
        let range = DisplayRange { min: 100, max: 200 };

        // background clear + one merged run across the whole width
        let rects = r.render(&mut s, &layout, &bins, &range, 0, 50).unwrap();
        assert_eq!(rects, 2);
        let h = range.scale(120, 50);
        assert_eq!(s.count_in_row(49, Rgb565::WHITE), 160);
        assert_eq!(s.count_in_row(50 - h, Rgb565::WHITE), 160);
        assert_eq!(s.count_in_row(50 - h - 1, Rgb565::WHITE), 0);
    }

    #[test]
    fn test_shrink_erases_only_the_difference() {
        let mut s = MemorySurface::new(160, 64, false);
        let layout = BarLayout::new(&config(500, 500), 160);
        let mut r = SpectrumRenderer::new(160);
        let mut bins = flat_bins(160, 100);
        let range = DisplayRange { min: 0, max: 200 };
        r.render(&mut s, &layout, &bins, &range, 0, 40).unwrap();

        let span = layout.spans()[2];
        let col = span.column;
        assert_eq!(r.last_height(col), 20);

        bins[usize::from(col)].peak_signal = 50;
        s.reset_stats();
        let rects = r.render(&mut s, &layout, &bins, &range, 0, 40).unwrap();
        assert_eq!(rects, 1);
        assert_eq!(r.last_height(col), 10);
        // 10 rows freed across the bar width
        assert_eq!(s.stats().pixels_sent, usize::from(span.w) * 10);
        assert_eq!(s.count_not_in_column(span.x, 0, 40, Rgb565::BLACK), 10);
        // neighbour untouched
        let next = layout.spans()[3];
        assert_eq!(s.count_not_in_column(next.x, 0, 40, Rgb565::BLACK), 20);
    }

    #[test]
    fn test_moving_the_area_forces_redraw() {
        let mut s = MemorySurface::new(160, 64, false);
        let layout = BarLayout::new(&config(25, 25), 160);
        let mut r = SpectrumRenderer::new(160);
        let bins = flat_bins(160, 150);
        let range = DisplayRange { min: 100, max: 200 };
        r.render(&mut s, &layout, &bins, &range, 0, 30).unwrap();
        s.reset_stats();
        let rects = r.render(&mut s, &layout, &bins, &range, 30, 30).unwrap();
        assert!(rects > 0);

        r.invalidate();
        s.reset_stats();
        assert!(r.render(&mut s, &layout, &bins, &range, 30, 30).unwrap() > 0);
    }

    #[test]
    fn test_ticks_use_largest_decade_below_span() {
        let mut s = MemorySurface::new(160, 16, false);
        let range = FrequencyRange::new(50_000, 52_000);
        render_ticks(&mut s, &range, 160, 0, 4).unwrap();
        // span 2000 -> ticks every 1000 -> only 51000 is strictly inside
        assert_eq!(s.stats().windows, 1);
        let x = range.f2x(51_000, 160);
        assert_eq!(s.get_pixel(x, 2), Some(Color::Grey.to_rgb565()));
        assert_eq!(s.get_pixel(x, 0), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_arrow_stays_on_panel() {
        let mut s = MemorySurface::new(160, 16, false);
        let range = FrequencyRange::new(50_000, 52_000);
        render_arrow(&mut s, &range, 52_000, 0, 0, 160).unwrap();
        render_arrow(&mut s, &range, 50_000, 0, 8, 160).unwrap();
        assert_eq!(s.get_pixel(159, 3), Some(Color::Grey.to_rgb565()));
        assert_eq!(s.get_pixel(0, 11), Some(Color::Grey.to_rgb565()));
    }

    #[test]
    fn test_arrow_on_empty_axis_draws_nothing() {
        let mut s = MemorySurface::new(160, 16, false);
        let range = FrequencyRange::new(50_000, 52_000);
        render_arrow(&mut s, &range, 51_000, 0, 0, 0).unwrap();
        render_arrow(&mut s, &range, 51_000, 40, 0, 0).unwrap();
        assert_eq!(s.stats().pixels_sent, 0);
    }
}
