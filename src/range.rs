/*
 *  range.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dynamic value window for bar scaling and palette lookup
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

use crate::bins::Bin;
use crate::domain::{map_linear, rssi_to_dbm};

/// Margin below the weakest bin
pub const MIN_MARGIN: u16 = 1;
/// Minimum headroom above the strongest bin
pub const HEADROOM_MARGIN: u16 = 40;

// -150 dBm .. -40 dBm in device RSSI units
const DEFAULT_MIN: u16 = 20;
const DEFAULT_MAX: u16 = 240;

/// Signal window used to scale one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub min: u16,
    pub max: u16,
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self { min: DEFAULT_MIN, max: DEFAULT_MAX }
    }
}

impl DisplayRange {
    /// Bar height in pixels for a signal value.
    #[inline]
    pub fn scale(&self, value: u16, height: u16) -> u16 {
        map_linear(
            u32::from(value),
            u32::from(self.min),
            u32::from(self.max),
            0,
            u32::from(height),
        ) as u16
    }

    /// Palette ordinal for a signal value.
    #[inline]
    pub fn palette_index(&self, value: u16, palette_len: usize) -> usize {
        map_linear(
            u32::from(value),
            u32::from(self.min),
            u32::from(self.max),
            0,
            palette_len.saturating_sub(1) as u32,
        ) as usize
    }

    /// The window expressed in dBm.
    pub fn to_dbm(&self) -> (i16, i16) {
        (rssi_to_dbm(self.min), rssi_to_dbm(self.max))
    }
}

/// Population standard deviation of the peak trace, truncated.
///
/// Stands in for the noise floor: the spread of the trace tracks the floor
/// better than the per-bin minimum under sweep conditions.
pub fn noise_floor(bins: &[Bin]) -> u16 {
    if bins.is_empty() {
        return 0;
    }
    let n = bins.len() as f64;
    let mean = bins.iter().map(|b| f64::from(b.peak_signal)).sum::<f64>() / n;
    let var = bins
        .iter()
        .map(|b| {
            let d = f64::from(b.peak_signal) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    var.sqrt() as u16
}

/// Highest per-column noise minimum.
pub fn noise_max(bins: &[Bin]) -> u16 {
    bins.iter().map(|b| b.min_noise).max().unwrap_or(0)
}

/// Derive this frame's window from the filled bins.
pub fn normalize(bins: &[Bin]) -> DisplayRange {
    let Some(rssi_min) = bins.iter().map(|b| b.peak_signal).min() else {
        return DisplayRange::default();
    };
    let rssi_max = bins.iter().map(|b| b.peak_signal).max().unwrap_or(rssi_min);
    let floor = noise_floor(bins);

    let spread = rssi_max.saturating_sub(floor);
    let headroom = if spread <= HEADROOM_MARGIN { HEADROOM_MARGIN } else { spread };

    DisplayRange {
        min: rssi_min.saturating_sub(MIN_MARGIN),
        max: rssi_max.saturating_add(headroom),
    }
}
