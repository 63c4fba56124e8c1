// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for room configuration and assembly
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or assembling a room
///
/// Geometry generation itself never fails: degenerate input produces
/// degenerate (or omitted) geometry instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid rotation for wall {wall}: {radians} rad (expected 0 or π/2)")]
    InvalidRotation { wall: usize, radians: f64 },

    #[error("Invalid dimension: {what} = {value}")]
    InvalidDimension { what: &'static str, value: f64 },

    #[error("Invalid opening: {0}")]
    InvalidOpening(String),
}

impl Error {
    /// Create an invalid dimension error
    pub fn dimension(what: &'static str, value: f64) -> Self {
        Error::InvalidDimension { what, value }
    }
}
