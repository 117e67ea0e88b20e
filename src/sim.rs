/*
 *  sim.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Simulated band for the demo loop: a noise floor with a few carriers
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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bins::{Measurement, SweepConfig};

// RSSI units, see domain::rssi_to_dbm
const FLOOR: u16 = 50;
const FLOOR_JITTER: u16 = 12;
const NOISE_BELOW_FLOOR: u16 = 10;
const CARRIERS: usize = 3;
const CARRIER_PEAK_MIN: u16 = 120;
const CARRIER_PEAK_MAX: u16 = 210;

#[derive(Debug, Clone, Copy)]
struct Carrier {
    frequency: u32,
    peak: u16,
    /// half width of the skirt in frequency units
    skirt: u32,
    keyed: bool,
}

/// Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SimulatedBand {
    config: SweepConfig,
    carriers: Vec<Carrier>,
    rng: StdRng,
}

impl SimulatedBand {
    pub fn new(config: SweepConfig, seed: u64) -> Self {
        let mut band = Self {
            config,
            carriers: Vec::with_capacity(CARRIERS),
            rng: StdRng::seed_from_u64(seed),
        };
        band.retune(config);
        band
    }

    /// New sweep geometry; carriers are placed again.
    pub fn retune(&mut self, config: SweepConfig) {
        self.config = config;
        self.carriers.clear();
        let range = config.range;
        for _ in 0..CARRIERS {
            // on the sweep grid so the carrier peak is actually measured
            let k = self.rng.random_range(0..=range.span() / config.step);
            self.carriers.push(Carrier {
                frequency: range.start + k * config.step,
                peak: self.rng.random_range(CARRIER_PEAK_MIN..=CARRIER_PEAK_MAX),
                skirt: config.step.max(config.bandwidth) * 2,
                keyed: true,
            });
        }
    }

    /// Advance one frame: carriers fade, drift a little and key on or off.
    pub fn tick(&mut self) {
        let step = self.config.step;
        let range = self.config.range;
        for c in self.carriers.iter_mut() {
            if self.rng.random_bool(0.1) {
                c.keyed = !c.keyed;
            }
            let fade: i32 = self.rng.random_range(-6..=6);
            c.peak = (i32::from(c.peak) + fade)
                .clamp(i32::from(CARRIER_PEAK_MIN), i32::from(CARRIER_PEAK_MAX)) as u16;
            if self.rng.random_bool(0.05) {
                c.frequency = if self.rng.random_bool(0.5) {
                    c.frequency.saturating_add(step).min(range.end)
                } else {
                    c.frequency.saturating_sub(step).max(range.start)
                };
            }
        }
    }

    /// One measurement at `frequency`.
    pub fn measure(&mut self, frequency: u32) -> Measurement {
        let floor = FLOOR + self.rng.random_range(0..=FLOOR_JITTER);
        let mut signal = floor;
        let mut marker = false;
        for c in self.carriers.iter().filter(|c| c.keyed) {
            let d = frequency.abs_diff(c.frequency);
            if d >= c.skirt {
                continue;
            }
            // linear skirt down to the floor
            let level = u32::from(c.peak) - (u32::from(c.peak - FLOOR) * d) / c.skirt;
            signal = signal.max(level as u16);
            marker |= d == 0;
        }
        Measurement {
            frequency,
            signal,
            noise: floor - NOISE_BELOW_FLOOR,
            marker,
        }
    }

    /// Walk the whole sweep, handing every measurement to `sink`.
    pub fn sweep<F: FnMut(&Measurement)>(&mut self, mut sink: F) {
        let SweepConfig { range, step, .. } = self.config;
        let mut f = range.start;
        while f <= range.end {
            let m = self.measure(f);
            sink(&m);
            match f.checked_add(step) {
                Some(next) => f = next,
                None => break,
            }
        }
    }
}
