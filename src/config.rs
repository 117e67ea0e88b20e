/*
 *  config.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  YAML configuration with CLI overrides
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

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::bins::SweepConfig;
use crate::constants::{
    DEFAULT_CURSOR_HALF_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH,
};
use crate::display::components::waterfall::ScrollMode;
use crate::domain::FrequencyRange;
use crate::view::ViewOptions;

// 144..146 MHz in 10 Hz units, 25 kHz channels
const DEFAULT_SWEEP_START: u32 = 14_400_000;
const DEFAULT_SWEEP_END: u32 = 14_600_000;
const DEFAULT_SWEEP_STEP: u32 = 2_500;
const DEFAULT_SWEEP_BANDWIDTH: u32 = 1_250;
const DEFAULT_FPS: u32 = 10;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. Every field is optional so files and CLI
/// flags can be layered; the accessors below fill in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,
    pub display: Option<DisplayConfig>,
    pub sweep: Option<SweepSection>,
    pub waterfall: Option<WaterfallConfig>,
    pub cursor: Option<CursorConfig>,
    pub demo: Option<DemoConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    /// panel supports reading pixels back
    pub readback: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepSection {
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub step: Option<u32>,
    pub bandwidth: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WaterfallConfig {
    pub enabled: Option<bool>,
    pub scroll_mode: Option<ScrollMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CursorConfig {
    pub half_width: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    /// stop after this many frames, run until signalled when unset
    pub frames: Option<u64>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub snapshot: Option<PathBuf>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "rfscope", about = "rfscope - spectrum at a glance", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub display_width: Option<u16>,
    #[arg(long)]
    pub display_height: Option<u16>,
    #[arg(long, action = ArgAction::Set)]
    pub display_readback: Option<bool>,
    #[arg(long)]
    pub sweep_start: Option<u32>,
    #[arg(long)]
    pub sweep_end: Option<u32>,
    #[arg(long)]
    pub sweep_step: Option<u32>,
    #[arg(long)]
    pub sweep_bandwidth: Option<u32>,
    #[arg(long, value_enum)]
    pub scroll_mode: Option<ScrollMode>,
    /// disable the waterfall history
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_waterfall: bool,
    #[arg(long)]
    pub cursor_half_width: Option<u16>,
    #[arg(long)]
    pub frames: Option<u64>,
    #[arg(long)]
    pub fps: Option<u32>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// write a PPM of the last frame on exit
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML (explicit path or search), merge CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config
pub fn dump_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/rfscope/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/rfscope/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/rfscope.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["rfscope.yaml", "config.yaml", "config/rfscope.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => {
            if s.width.is_some()    { d.width = s.width; }
            if s.height.is_some()   { d.height = s.height; }
            if s.readback.is_some() { d.readback = s.readback; }
        }
        _ => {}
    }
    match (&mut dst.sweep, src.sweep) {
        (None, Some(c)) => dst.sweep = Some(c),
        (Some(d), Some(s)) => {
            if s.start.is_some()     { d.start = s.start; }
            if s.end.is_some()       { d.end = s.end; }
            if s.step.is_some()      { d.step = s.step; }
            if s.bandwidth.is_some() { d.bandwidth = s.bandwidth; }
        }
        _ => {}
    }
    match (&mut dst.waterfall, src.waterfall) {
        (None, Some(c)) => dst.waterfall = Some(c),
        (Some(d), Some(s)) => {
            if s.enabled.is_some()     { d.enabled = s.enabled; }
            if s.scroll_mode.is_some() { d.scroll_mode = s.scroll_mode; }
        }
        _ => {}
    }
    match (&mut dst.cursor, src.cursor) {
        (None, Some(c)) => dst.cursor = Some(c),
        (Some(d), Some(s)) => {
            if s.half_width.is_some() { d.half_width = s.half_width; }
        }
        _ => {}
    }
    match (&mut dst.demo, src.demo) {
        (None, Some(c)) => dst.demo = Some(c),
        (Some(d), Some(s)) => {
            if s.frames.is_some()   { d.frames = s.frames; }
            if s.fps.is_some()      { d.fps = s.fps; }
            if s.seed.is_some()     { d.seed = s.seed; }
            if s.snapshot.is_some() { d.snapshot = s.snapshot; }
        }
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    if cli.display_width.is_some() || cli.display_height.is_some() || cli.display_readback.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()    { display.width = cli.display_width; }
        if cli.display_height.is_some()   { display.height = cli.display_height; }
        if cli.display_readback.is_some() { display.readback = cli.display_readback; }
    }

    if cli.sweep_start.is_some()
        || cli.sweep_end.is_some()
        || cli.sweep_step.is_some()
        || cli.sweep_bandwidth.is_some()
    {
        let sweep = cfg.sweep.get_or_insert_with(SweepSection::default);
        if cli.sweep_start.is_some()     { sweep.start = cli.sweep_start; }
        if cli.sweep_end.is_some()       { sweep.end = cli.sweep_end; }
        if cli.sweep_step.is_some()      { sweep.step = cli.sweep_step; }
        if cli.sweep_bandwidth.is_some() { sweep.bandwidth = cli.sweep_bandwidth; }
    }

    if cli.scroll_mode.is_some() || cli.no_waterfall {
        let waterfall = cfg.waterfall.get_or_insert_with(WaterfallConfig::default);
        if cli.scroll_mode.is_some() { waterfall.scroll_mode = cli.scroll_mode; }
        if cli.no_waterfall          { waterfall.enabled = Some(false); }
    }

    if cli.cursor_half_width.is_some() {
        cfg.cursor.get_or_insert_with(CursorConfig::default).half_width = cli.cursor_half_width;
    }

    if cli.frames.is_some() || cli.fps.is_some() || cli.seed.is_some() || cli.snapshot.is_some() {
        let demo = cfg.demo.get_or_insert_with(DemoConfig::default);
        if cli.frames.is_some()   { demo.frames = cli.frames; }
        if cli.fps.is_some()      { demo.fps = cli.fps; }
        if cli.seed.is_some()     { demo.seed = cli.seed; }
        if cli.snapshot.is_some() { demo.snapshot = cli.snapshot.clone(); }
    }
}

/// Reject anything the view would have to treat as a broken precondition.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let (w, h) = cfg.display_size();
    if w < MIN_WIDTH || usize::from(w) > MAX_WIDTH {
        return Err(ConfigError::Validation(format!("display width must be {}..={}", MIN_WIDTH, MAX_WIDTH)));
    }
    if h < MIN_HEIGHT {
        return Err(ConfigError::Validation(format!("display height must be at least {}", MIN_HEIGHT)));
    }

    let sweep = cfg.sweep_config();
    if sweep.range.start >= sweep.range.end {
        return Err(ConfigError::Validation("sweep start must be below sweep end".into()));
    }
    if sweep.step == 0 {
        return Err(ConfigError::Validation("sweep step must be > 0".into()));
    }
    if sweep.bandwidth == 0 {
        return Err(ConfigError::Validation("sweep bandwidth must be > 0".into()));
    }

    if cfg.view_options().cursor_half_width == 0 {
        return Err(ConfigError::Validation("cursor half_width must be >= 1".into()));
    }
    if cfg.demo_fps() == 0 {
        return Err(ConfigError::Validation("demo fps must be > 0".into()));
    }
    Ok(())
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn display_size(&self) -> (u16, u16) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(DEFAULT_WIDTH),
            d.and_then(|d| d.height).unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn display_readback(&self) -> bool {
        self.display.as_ref().and_then(|d| d.readback).unwrap_or(true)
    }

    pub fn sweep_config(&self) -> SweepConfig {
        let s = self.sweep.clone().unwrap_or_default();
        let step = s.step.unwrap_or(DEFAULT_SWEEP_STEP);
        SweepConfig {
            range: FrequencyRange::new(
                s.start.unwrap_or(DEFAULT_SWEEP_START),
                s.end.unwrap_or(DEFAULT_SWEEP_END),
            ),
            step,
            bandwidth: s.bandwidth.unwrap_or(DEFAULT_SWEEP_BANDWIDTH),
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        let wf = self.waterfall.clone().unwrap_or_default();
        ViewOptions {
            scroll_mode: wf.scroll_mode.unwrap_or_default(),
            cursor_half_width: self
                .cursor
                .as_ref()
                .and_then(|c| c.half_width)
                .unwrap_or(DEFAULT_CURSOR_HALF_WIDTH),
            waterfall: wf.enabled.unwrap_or(true),
        }
    }

    pub fn demo_frames(&self) -> Option<u64> {
        self.demo.as_ref().and_then(|d| d.frames)
    }

    pub fn demo_fps(&self) -> u32 {
        self.demo.as_ref().and_then(|d| d.fps).unwrap_or(DEFAULT_FPS)
    }

    pub fn demo_seed(&self) -> Option<u64> {
        self.demo.as_ref().and_then(|d| d.seed)
    }

    pub fn demo_snapshot(&self) -> Option<&Path> {
        self.demo.as_ref().and_then(|d| d.snapshot.as_deref())
    }
}
