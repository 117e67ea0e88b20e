/*
 *  display/layout.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Vertical placement of the view regions for a given panel
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

use crate::constants::{CURSOR_STRIP_HEIGHT, RULER_HEIGHT, WATERFALL_TOP};
use crate::display::traits::SurfaceCapabilities;

/// Rows used by each part of the view, top to bottom:
/// cursor strip, frequency ruler, waterfall history + tick row, bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub width: u16,
    pub height: u16,
    pub cursor_y: u16,
    pub ruler_y: u16,
    pub ruler_height: u16,
    pub waterfall_y: u16,
    pub waterfall_height: u16,
    pub spectrum_y: u16,
    pub spectrum_height: u16,
}

impl ViewLayout {
    /// Scale the 160x128 arrangement to the panel height.
    /// Needs at least `MIN_HEIGHT` rows.
    pub fn for_display(caps: &SurfaceCapabilities) -> Self {
        let height = caps.height;
        // 45 of 128 rows on the reference panel
        let waterfall_height = ((u32::from(height) * 45) / 128).max(1) as u16;
        // history, tick row, one blank row
        let spectrum_y = WATERFALL_TOP + waterfall_height + 2;

        Self {
            width: caps.width,
            height,
            cursor_y: 0,
            ruler_y: CURSOR_STRIP_HEIGHT,
            ruler_height: RULER_HEIGHT,
            waterfall_y: WATERFALL_TOP,
            waterfall_height,
            spectrum_y,
            spectrum_height: height.saturating_sub(spectrum_y),
        }
    }

    /// Row of the static tick axis under the waterfall
    pub fn waterfall_ticks_y(&self) -> u16 {
        self.waterfall_y + self.waterfall_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(width: u16, height: u16) -> SurfaceCapabilities {
        SurfaceCapabilities { width, height, supports_readback: false }
    }

    #[test]
    fn test_layout_160x128() {
        let l = ViewLayout::for_display(&caps(160, 128));
        assert_eq!(l.waterfall_y, 11);
        assert_eq!(l.waterfall_height, 45);
        assert_eq!(l.waterfall_ticks_y(), 56);
        assert_eq!(l.spectrum_y, 58);
        assert_eq!(l.spectrum_height, 70);
        assert!(l.ruler_y + l.ruler_height <= l.waterfall_y);
    }

    #[test]
    fn test_layout_small_panel() {
        let l = ViewLayout::for_display(&caps(128, 32));
        assert_eq!(l.waterfall_height, 11);
        assert!(l.spectrum_height > 0);
        assert_eq!(l.spectrum_y + l.spectrum_height, 32);
    }
}
