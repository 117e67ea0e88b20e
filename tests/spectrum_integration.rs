/*
 *  tests/spectrum_integration.rs
 *
 *  Integration tests for the sweep view
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 */

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use clap::Parser;

use rfscope::config::{self, Cli, ConfigError};
use rfscope::display::DrawTargetSurface;
use rfscope::display::components::{BarLayout, SpectrumRenderer};
use rfscope::domain::{map_linear, round_to_step};
use rfscope::range::normalize;
use rfscope::sim::SimulatedBand;
use rfscope::vframebuf::VarFrameBuf;
use rfscope::{
    BinAggregator, CursorController, FrequencyRange, MemorySurface, ScrollMode,
    SpectrumSurface, SpectrumView, SweepConfig, ViewOptions,
};

fn sweep_config() -> SweepConfig {
    SweepConfig {
        range: FrequencyRange::new(50_000, 52_000),
        step: 25,
        bandwidth: 25,
    }
}

fn run_frames(view: &mut SpectrumView, surface: &mut impl SpectrumSurface, seed: u64, frames: usize) {
    let mut band = SimulatedBand::new(*view.config(), seed);
    for _ in 0..frames {
        band.tick();
        view.begin();
        band.sweep(|m| {
            view.add_point(m);
            view.next_step();
        });
        view.render_frame(surface, true).unwrap();
    }
}

#[test]
fn test_reference_sweep_geometry() {
    let agg = BinAggregator::new(160, sweep_config());
    assert_eq!(agg.progress().total_steps, 81);
    assert_eq!(agg.f2x(50_000), 0);
    assert_eq!(agg.f2x(52_000), 159);
}

#[test]
fn test_narrowest_configured_panel_renders() {
    let parse = |width: &str| Cli::try_parse_from(["rfscope", "--display-width", width, "--display-height", "64"]).unwrap();
    assert!(matches!(config::load(&parse("2")), Err(ConfigError::Validation(_))));

    let cfg = config::load(&parse("3")).unwrap();
    let (width, height) = cfg.display_size();
    assert_eq!(width, 3);

    let mut surface = MemorySurface::new(width, height, cfg.display_readback());
    let mut view = SpectrumView::new(surface.capabilities(), cfg.sweep_config(), cfg.view_options());
    assert_eq!((view.cursor().left(), view.cursor().right()), (0, 2));
    assert!(!view.cursor_move(true));
    assert!(!view.cursor_resize(true));

    run_frames(&mut view, &mut surface, 17, 4);
    assert_eq!(view.filled_points(), 3);
    let sweep = cfg.sweep_config();
    assert_eq!(view.cursor_range(sweep.step), sweep.range);
}

#[test]
fn test_domain_helpers() {
    assert_eq!(map_linear(5, 0, 10, 0, 100), 50);
    assert_eq!(round_to_step(12_345, 25), 12_350);
    assert_eq!(round_to_step(12_337, 25), 12_325);
}

#[test]
fn test_second_identical_render_writes_nothing() {
    let cfg = sweep_config();
    let mut agg = BinAggregator::new(160, cfg);
    let mut band = SimulatedBand::new(cfg, 11);
    band.sweep(|m| agg.add_point(m));

    let layout = BarLayout::new(&cfg, 160);
    let range = normalize(agg.filled());
    let mut renderer = SpectrumRenderer::new(160);
    let mut surface = MemorySurface::new(160, 128, false);

    let first = renderer.render(&mut surface, &layout, agg.bins(), &range, 58, 70).unwrap();
    assert!(first > 0);

    surface.reset_stats();
    let second = renderer.render(&mut surface, &layout, agg.bins(), &range, 58, 70).unwrap();
    assert_eq!(second, 0);
    assert_eq!(surface.stats().pixels_sent, 0);
}

#[test]
fn test_scroll_modes_produce_the_same_picture() {
    let mut readback = MemorySurface::new(160, 128, true);
    let mut buffered = MemorySurface::new(160, 128, true);

    let opts = ViewOptions { scroll_mode: ScrollMode::Readback, ..ViewOptions::default() };
    let mut a = SpectrumView::new(readback.capabilities(), sweep_config(), opts);
    let mut b = SpectrumView::new(buffered.capabilities(), sweep_config(), ViewOptions::default());
    assert_eq!(a.scroll_mode(), Some(ScrollMode::Readback));
    assert_eq!(b.scroll_mode(), Some(ScrollMode::Buffered));

    run_frames(&mut a, &mut readback, 5, 12);
    run_frames(&mut b, &mut buffered, 5, 12);
    assert_eq!(readback.framebuffer().as_slice(), buffered.framebuffer().as_slice());
    assert!(readback.stats().rows_read > 0);
    assert_eq!(buffered.stats().rows_read, 0);
}

#[test]
fn test_draw_target_matches_memory_surface() {
    let mut memory = MemorySurface::new(160, 128, false);
    let mut target = DrawTargetSurface::new(VarFrameBuf::new(160, 128, Rgb565::BLACK));

    let mut a = SpectrumView::new(memory.capabilities(), sweep_config(), ViewOptions::default());
    let mut b = SpectrumView::new(target.capabilities(), sweep_config(), ViewOptions::default());
    run_frames(&mut a, &mut memory, 9, 6);
    run_frames(&mut b, &mut target, 9, 6);

    assert_eq!(memory.framebuffer().as_slice(), target.inner().as_slice());
}

#[test]
fn test_reconfigure_clears_waterfall() {
    let mut surface = MemorySurface::new(160, 128, false);
    let mut view = SpectrumView::new(surface.capabilities(), sweep_config(), ViewOptions::default());
    run_frames(&mut view, &mut surface, 2, 8);

    let layout = *view.layout();
    let oldest = layout.waterfall_y + layout.waterfall_height - 8;
    assert!(surface.count_in_row(oldest, Rgb565::BLACK) < 160);

    view.configure(SweepConfig {
        range: FrequencyRange::new(100_000, 104_000),
        step: 50,
        bandwidth: 25,
    });
    run_frames(&mut view, &mut surface, 2, 1);
    // only the newest row carries data after the reset
    for y in layout.waterfall_y..layout.waterfall_y + layout.waterfall_height - 1 {
        assert_eq!(surface.count_in_row(y, Rgb565::BLACK), 160, "row {}", y);
    }
}

#[test]
fn test_cursor_never_leaves_panel() {
    let mut cursor = CursorController::new(160, 16);
    for _ in 0..200 {
        cursor.move_by(true);
        cursor.resize(true);
    }
    assert_eq!(cursor.right(), 159);
    for _ in 0..400 {
        cursor.move_by(false);
    }
    assert_eq!(cursor.left(), 0);
    assert!(cursor.half_width() >= 1);
}

#[test]
fn test_snapshot_export() {
    let mut surface = MemorySurface::new(160, 128, false);
    let mut view = SpectrumView::new(surface.capabilities(), sweep_config(), ViewOptions::default());
    run_frames(&mut view, &mut surface, 4, 3);

    let path = std::env::temp_dir().join(format!("rfscope-snapshot-{}.ppm", std::process::id()));
    surface.save_to_ppm(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let header = b"P6\n160 128\n255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(bytes.len(), header.len() + 160 * 128 * 3);
}
