/*
 *  constants.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
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

pub const MAX_WIDTH: usize = 320;              // widest supported panel, sizes the span tables
pub const MIN_WIDTH: u16 = 3;                  // room for a half width 1 cursor window
pub const DEFAULT_WIDTH: u16 = 160;            // ST7735S landscape
pub const DEFAULT_HEIGHT: u16 = 128;
pub const MIN_HEIGHT: u16 = 32;                // cursor + ruler + waterfall + bars

pub const CURSOR_STRIP_HEIGHT: u16 = 6;
pub const CURSOR_MARK_HEIGHT: u16 = 4;
pub const DEFAULT_CURSOR_HALF_WIDTH: u16 = 16;

pub const RULER_HEIGHT: u16 = 4;
pub const WATERFALL_TOP: u16 = 11;
pub const WATERFALL_TICK_EVERY: u16 = 10;      // static axis row under the history

pub const ARROW_HEIGHT: u16 = 4;
pub const ARROW_HEAD_WIDTH: u16 = 5;
pub const ARROW_HEAD_HEIGHT: u16 = 2;

// decades tried for ruler ticks, widest first
pub const TICK_DECADE_MAX: u32 = 100_000_000;
pub const TICK_DECADE_MIN: u32 = 10;
