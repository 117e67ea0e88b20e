/*
 *  main.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Demo: simulated sweeps rendered into an in-memory panel
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

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use rand::Rng;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;

use rfscope::config::{self, Cli, Config};
use rfscope::sim::SimulatedBand;
use rfscope::{MemorySurface, SpectrumSurface, SpectrumView};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

async fn signal_handler() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// One simulated sweep per tick, rendered with scrolling.
async fn frame_loop(
    view: &mut SpectrumView,
    surface: &mut MemorySurface,
    band: &mut SimulatedBand,
    cfg: &Config,
) -> Result<u64> {
    let fps = cfg.demo_fps();
    let frames = cfg.demo_frames();
    let step = view.config().step;

    let mut ticker = tokio::time::interval(Duration::from_millis(1_000 / u64::from(fps)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    while frames.is_none_or(|max| frame < max) {
        ticker.tick().await;

        band.tick();
        view.begin();
        band.sweep(|m| {
            view.add_point(m);
            view.next_step();
        });
        view.render_frame(surface, true)?;
        frame += 1;

        if frame % u64::from(fps) == 0 {
            let (lo, hi) = view.gradient_range_dbm();
            let sub = view.cursor_range(step);
            debug!(
                "frame {} range {}..{} dBm floor {} noise max {} cursor {}..{}",
                frame,
                lo,
                hi,
                view.noise_floor(),
                view.noise_max(),
                sub.start,
                sub.end
            );
            // let the cursor wander so its redraw path gets exercised
            if !view.cursor_move(frame / u64::from(fps) % 20 < 10) {
                view.cursor_reset();
            }
        }
    }
    Ok(frame)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli).context("loading configuration")?;

    if cli.dump_config {
        println!("{}", config::dump_config(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} - spectrum at a glance", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let (width, height) = cfg.display_size();
    let mut surface = MemorySurface::new(width, height, cfg.display_readback());
    let sweep = cfg.sweep_config();
    let mut view = SpectrumView::new(surface.capabilities(), sweep, cfg.view_options());

    let seed = cfg.demo_seed().unwrap_or_else(|| rand::rng().random());
    info!(
        "sweeping {}..{} step {} on a {}x{} panel, seed {}",
        sweep.range.start, sweep.range.end, sweep.step, width, height, seed
    );
    let mut band = SimulatedBand::new(sweep, seed);

    let rendered = tokio::select! {
        _ = signal_handler() => None,
        r = frame_loop(&mut view, &mut surface, &mut band, &cfg) => Some(r?),
    };
    match rendered {
        Some(n) => info!("rendered {} frames", n),
        None => info!("stopped by signal"),
    }

    let stats = surface.stats();
    info!(
        "surface: {} windows, {} pixels sent, {} changed",
        stats.windows, stats.pixels_sent, stats.pixels_changed
    );

    if let Some(path) = cfg.demo_snapshot() {
        surface
            .save_to_ppm(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!("snapshot written to {}", path.display());
    }

    Ok(())
}
