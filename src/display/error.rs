/*
 *  display/error.rs
 *
 *  rfscope - spectrum at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error type for drawing surface operations
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

use std::fmt;
use std::error::Error;

/// Unified error type for all surface operations
#[derive(Debug)]
pub enum DisplayError {
    /// Unsupported operation for this surface (e.g. pixel readback)
    UnsupportedOperation,

    /// Addressed window falls outside the panel
    WindowOutOfBounds { x0: u16, y0: u16, x1: u16, y1: u16 },

    /// Readback buffer does not match the requested run
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Drawing operation failed in an underlying target
    DrawingError(String),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::UnsupportedOperation =>
                write!(f, "Operation not supported by this surface"),
            DisplayError::WindowOutOfBounds { x0, y0, x1, y1 } =>
                write!(f, "Window ({}, {})..({}, {}) is outside the surface", x0, y0, x1, y1),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} pixels, got {}", expected, actual),
            DisplayError::DrawingError(msg) =>
                write!(f, "Drawing error: {}", msg),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = DisplayError::WindowOutOfBounds { x0: 0, y0: 1, x1: 200, y1: 1 };
        assert_eq!(e.to_string(), "Window (0, 1)..(200, 1) is outside the surface");
        let e = DisplayError::BufferSizeMismatch { expected: 160, actual: 80 };
        assert!(e.to_string().contains("expected 160"));
    }
}
