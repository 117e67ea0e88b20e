/*
 *  domain.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Linear domain mapping between frequency, pixel and value spaces
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

use serde::{Deserialize, Serialize};

/// Inclusive bounds of a swept band, in device frequency units.
///
/// Callers guarantee `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub start: u32,
    pub end: u32,
}

impl FrequencyRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn span(&self) -> u32 {
        self.end - self.start
    }

    /// Frequency to pixel column on an axis `width` pixels wide.
    #[inline]
    pub fn f2x(&self, f: u32, width: u16) -> u16 {
        map_linear(f, self.start, self.end, 0, u32::from(width) - 1) as u16
    }

    /// Pixel column back to frequency.
    #[inline]
    pub fn x2f(&self, x: u16, width: u16) -> u32 {
        map_linear(u32::from(x), 0, u32::from(width) - 1, self.start, self.end)
    }
}

#[inline]
pub fn clamp(v: u32, min: u32, max: u32) -> u32 {
    if v <= min {
        min
    } else if v >= max {
        max
    } else {
        v
    }
}

/// Rescale `value` from `[src_min, src_max]` into `[dst_min, dst_max]`.
///
/// The input is clamped into the source range first. The result is rounded
/// to nearest with halves going up, since the half-range bias is added before
/// the integer division.
///
/// # Panics
///
/// `src_max` must be greater than `src_min`; an empty source range divides
/// by zero. Configuration is trusted here and is validated upstream.
#[inline]
pub fn map_linear(value: u32, src_min: u32, src_max: u32, dst_min: u32, dst_max: u32) -> u32 {
    let a_range = u64::from(src_max - src_min);
    let b_range = u64::from(dst_max.saturating_sub(dst_min));
    let v = u64::from(clamp(value, src_min, src_max) - src_min);
    ((v * b_range + a_range / 2) / a_range) as u32 + dst_min
}

/// Round to the nearest multiple of `step`. A remainder of exactly `step / 2`
/// rounds down, unlike [`map_linear`].
#[inline]
pub fn round_to_step(value: u32, step: u32) -> u32 {
    let sd = value % step;
    if sd > step / 2 {
        value + (step - sd)
    } else {
        value - sd
    }
}

/// Device RSSI units (half dB steps, offset 160) to dBm.
#[inline]
pub fn rssi_to_dbm(rssi: u16) -> i16 {
    (rssi / 2) as i16 - 160
}
