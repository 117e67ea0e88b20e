/*
 *  display/color.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Named colors and the waterfall gradient palette
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
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;

/// Colors the view paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Panel background
    Background,

    /// Bars and tick marks
    Foreground,

    /// Secondary markings (frequency arrow, ruler ticks)
    Grey,

    /// Cursor edges and center arrow
    Yellow,

    /// Cursor window fill
    CursorFill,

    /// Raw packed RGB565 value
    Raw(u16),
}

impl Color {
    pub fn to_rgb565(&self) -> Rgb565 {
        match self {
            Color::Background => Rgb565::BLACK,
            Color::Foreground => Rgb565::WHITE,
            Color::Grey => Rgb565::new(16, 32, 16),
            Color::Yellow => Rgb565::YELLOW,
            Color::CursorFill => Rgb565::new(8, 16, 0),
            Color::Raw(v) => Rgb565::from(RawU16::new(*v)),
        }
    }
}

impl From<Color> for Rgb565 {
    fn from(c: Color) -> Self {
        c.to_rgb565()
    }
}

/// Waterfall gradient, weakest to strongest, packed RGB565
pub const GRADIENT_PALETTE: [u16; 15] = [
    0x2000, 0x3000, 0x5000, 0x9000, 0xfc44, 0xffbf, 0x07bf, 0x1b5f,
    0x1b5f, 0x001f, 0x001f, 0x0018, 0x0013, 0x000e, 0x0009,
];

pub const PALETTE_SIZE: usize = GRADIENT_PALETTE.len();

/// Palette lookup, clamped to the last entry
#[inline]
pub fn palette_color(index: usize) -> Rgb565 {
    let raw = GRADIENT_PALETTE[index.min(PALETTE_SIZE - 1)];
    Rgb565::from(RawU16::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        let c = Color::Raw(0xfc44).to_rgb565();
        assert_eq!(c.into_storage(), 0xfc44);
    }

    #[test]
    fn test_palette_clamps() {
        assert_eq!(palette_color(0).into_storage(), 0x2000);
        assert_eq!(palette_color(PALETTE_SIZE - 1).into_storage(), 0x0009);
        assert_eq!(palette_color(99), palette_color(PALETTE_SIZE - 1));
    }

    #[test]
    fn test_named_colors_differ() {
        assert_ne!(Color::Background.to_rgb565(), Color::Foreground.to_rgb565());
        assert_ne!(Color::Yellow.to_rgb565(), Color::CursorFill.to_rgb565());
    }
}
