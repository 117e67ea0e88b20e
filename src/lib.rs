/*
 *  lib.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Live RF sweep view for small colour panels: per-column bins, auto
 *  ranged bars, a scrolling waterfall and a selection cursor
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

pub mod bins;
pub mod config;
pub mod constants;
pub mod display;
pub mod domain;
pub mod range;
pub mod sim;
pub mod vframebuf;
pub mod view;

pub use bins::{Bin, BinAggregator, Measurement, ScanProgress, SweepConfig};
pub use display::components::{CursorController, ScrollMode};
pub use display::{DisplayError, MemorySurface, SpectrumSurface, SurfaceCapabilities, ViewLayout};
pub use domain::FrequencyRange;
pub use range::DisplayRange;
pub use view::{SpectrumView, ViewOptions};
