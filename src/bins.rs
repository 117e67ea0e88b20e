/*
 *  bins.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-column aggregation of sweep measurements
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

use crate::domain::FrequencyRange;

/// One sample from the scan source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub frequency: u32,
    pub signal: u16,
    pub noise: u16,
    /// Squelch open / marked channel
    pub marker: bool,
}

/// Aggregate of every measurement that landed on one pixel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub peak_signal: u16,
    pub min_noise: u16,
    pub marker: bool,
}

impl Bin {
    pub const EMPTY: Bin = Bin {
        peak_signal: 0,
        min_noise: u16::MAX,
        marker: false,
    };
}

impl Default for Bin {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Sweep geometry as configured by the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub range: FrequencyRange,
    pub step: u32,
    pub bandwidth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanProgress {
    pub current_step: u32,
    pub total_steps: u32,
}

/// Folds the measurement stream into one [`Bin`] per pixel column.
#[derive(Debug, Clone)]
pub struct BinAggregator {
    width: u16,
    bins: Vec<Bin>,
    config: SweepConfig,
    progress: ScanProgress,
    last_x: Option<u16>,
    filled: u16,
}

impl BinAggregator {
    /// Columns are allocated once here and reused for every sweep.
    pub fn new(width: u16, config: SweepConfig) -> Self {
        let mut agg = Self {
            width,
            bins: vec![Bin::EMPTY; usize::from(width)],
            config,
            progress: ScanProgress::default(),
            last_x: None,
            filled: 0,
        };
        agg.reset(config.range, config.step, config.bandwidth);
        agg
    }

    /// Start a new sweep: store geometry, clear every bin, rewind progress.
    pub fn reset(&mut self, range: FrequencyRange, step: u32, bandwidth: u32) {
        self.config = SweepConfig { range, step, bandwidth };
        self.progress = ScanProgress {
            current_step: 0,
            total_steps: range.span() / step + 1,
        };
        self.clear();
    }

    /// Clear the bins but keep the sweep geometry.
    pub fn clear(&mut self) {
        self.bins.fill(Bin::EMPTY);
        self.last_x = None;
        self.filled = 0;
        self.progress.current_step = 0;
    }

    pub fn begin(&mut self) {
        self.progress.current_step = 0;
    }

    /// Saturates on the last step.
    pub fn advance_step(&mut self) {
        if self.progress.current_step + 1 < self.progress.total_steps {
            self.progress.current_step += 1;
        }
    }

    pub fn add_point(&mut self, m: &Measurement) {
        let x = self.f2x(m.frequency);
        let xi = usize::from(x);

        // a fresh column may still hold data from a previous pass
        if self.last_x != Some(x) {
            self.last_x = Some(x);
            self.bins[xi] = Bin::EMPTY;
        }

        let bin = &mut self.bins[xi];
        bin.peak_signal = bin.peak_signal.max(m.signal);
        bin.min_noise = bin.min_noise.min(m.noise);
        bin.marker |= m.marker;
        let agg = *bin;

        // steps wider than a pixel: copy forward so the trace has no gaps
        let x_end = self.f2x(m.frequency.saturating_add(self.config.step));
        let mut highest = x;
        for nx in (x + 1)..x_end {
            self.bins[usize::from(nx)] = agg;
            highest = nx;
        }

        self.filled = self.filled.max(highest + 1);
    }

    #[inline]
    pub fn f2x(&self, f: u32) -> u16 {
        self.config.range.f2x(f, self.width)
    }

    #[inline]
    pub fn x2f(&self, x: u16) -> u32 {
        self.config.range.x2f(x, self.width)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin(&self, x: u16) -> Option<&Bin> {
        self.bins.get(usize::from(x))
    }

    /// Populated prefix of the bin array.
    pub fn filled(&self) -> &[Bin] {
        &self.bins[..usize::from(self.filled)]
    }

    pub fn filled_points(&self) -> u16 {
        self.filled
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn progress(&self) -> ScanProgress {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress.current_step + 1 >= self.progress.total_steps
    }
}
