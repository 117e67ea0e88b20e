/*
 *  display/mod.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - surface abstraction, layout and renderers
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// Surface implementations
pub mod drivers;

// Region placement for a given panel
pub mod layout;

// Renderers
pub mod components;

// Re-exports for convenience
pub use traits::{SpectrumSurface, SurfaceCapabilities};
pub use error::DisplayError;
pub use color::{Color, GRADIENT_PALETTE, PALETTE_SIZE};
pub use layout::ViewLayout;
pub use drivers::{DrawTargetSurface, MemorySurface, SurfaceStats};
