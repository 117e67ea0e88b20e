/*
 *  display/components/cursor.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Selection cursor: a pixel-space sub-band window
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

use crate::constants::{CURSOR_MARK_HEIGHT, CURSOR_STRIP_HEIGHT, MIN_WIDTH};
use crate::display::color::Color;
use crate::display::error::DisplayError;
use crate::display::traits::SpectrumSurface;
use crate::domain::{round_to_step, FrequencyRange};

/// Window `[center - half_width, center + half_width]` on a `width` pixel axis.
///
/// Every mutation either keeps the window on the axis or is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorController {
    width: u16,
    center: u16,
    half_width: u16,
    default_half_width: u16,
}

impl CursorController {
    /// # Panics
    ///
    /// If `width` is below `MIN_WIDTH`: narrower axes cannot hold a window
    /// of half width 1.
    pub fn new(width: u16, default_half_width: u16) -> Self {
        assert!(width >= MIN_WIDTH, "cursor axis of {} px is narrower than {}", width, MIN_WIDTH);
        let center = width / 2;
        // narrow panels: shrink the default until it fits, never below 1
        let fit = center.min(width.saturating_sub(1).saturating_sub(center));
        let default_half_width = default_half_width.min(fit).max(1);
        Self { width, center, half_width: default_half_width, default_half_width }
    }

    pub fn center(&self) -> u16 {
        self.center
    }

    pub fn half_width(&self) -> u16 {
        self.half_width
    }

    pub fn left(&self) -> u16 {
        self.center - self.half_width
    }

    pub fn right(&self) -> u16 {
        self.center + self.half_width
    }

    /// One pixel right (`up`) or left. False at the panel edge.
    pub fn move_by(&mut self, up: bool) -> bool {
        if up {
            if self.right() < self.width - 1 {
                self.center += 1;
                return true;
            }
        } else if self.left() > 0 {
            self.center -= 1;
            return true;
        }
        false
    }

    /// Widen or narrow by one pixel on each side.
    pub fn resize(&mut self, grow: bool) -> bool {
        if grow {
            if self.right() < self.width - 1 && self.left() > 0 {
                self.half_width += 1;
                return true;
            }
        } else if self.half_width > 1 {
            self.half_width -= 1;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.center = self.width / 2;
        self.half_width = self.default_half_width;
    }

    /// Window edges as frequencies on `range`, snapped to `step`.
    pub fn to_frequency_range(&self, range: &FrequencyRange, step: u32) -> FrequencyRange {
        FrequencyRange {
            start: round_to_step(range.x2f(self.left(), self.width), step),
            end: round_to_step(range.x2f(self.right(), self.width), step),
        }
    }

    pub fn to_center_frequency(&self, range: &FrequencyRange, step: u32) -> u32 {
        round_to_step(range.x2f(self.center, self.width), step)
    }

    /// Draw the overlay strip at row `y`: dim window fill, yellow edge marks
    /// and a yellow arrow on the center.
    pub fn render<S: SpectrumSurface>(&self, surface: &mut S, y: u16) -> Result<(), DisplayError> {
        surface.fill_rect(0, self.width - 1, y, y + CURSOR_STRIP_HEIGHT - 1, Color::Background.into())?;

        let y = y + 1;
        let (left, right) = (self.left(), self.right());
        if right - left >= 2 {
            surface.fill_rect(left + 1, right - 1, y, y + CURSOR_MARK_HEIGHT - 1, Color::CursorFill.into())?;
        }

        let yellow = Color::Yellow.into();
        surface.draw_vline(left, y, CURSOR_MARK_HEIGHT, yellow)?;
        surface.draw_vline(right, y, CURSOR_MARK_HEIGHT, yellow)?;

        surface.draw_vline(self.center, y, CURSOR_MARK_HEIGHT, yellow)?;
        for d in 1..CURSOR_MARK_HEIGHT {
            let h = CURSOR_MARK_HEIGHT - d;
            if let Some(x) = self.center.checked_sub(d) {
                surface.draw_vline(x, y + d, h, yellow)?;
            }
            if self.center + d < self.width {
                surface.draw_vline(self.center + d, y + d, h, yellow)?;
            }
        }
        surface.reset_window()
    }
}
