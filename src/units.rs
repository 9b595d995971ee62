//! # Unit Conversion
//!
//! Millimeters to printer dots. ZPL addresses content at integer dot
//! offsets, so the rounding rule matters: any systematic bias accumulates
//! across the fields of a label. We round half **away from zero**
//! (`f64::round` semantics), which keeps `dots(25.4) == dpi` exact for every
//! supported resolution.

use crate::error::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MM_PER_INCH: f64 = 25.4;

/// A supported thermal printer resolution.
///
/// This is a closed set: anything else is an authoring mistake
/// ([`LabelError::InvalidResolution`]), not a value to silently fall back
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dpi {
    D150,
    D200,
    D300,
    D600,
}

impl Dpi {
    /// All supported resolutions, in ascending order.
    pub const ALL: [Dpi; 4] = [Dpi::D150, Dpi::D200, Dpi::D300, Dpi::D600];

    /// Validate an arbitrary integer resolution.
    pub fn from_u32(value: u32) -> Result<Self, LabelError> {
        match value {
            150 => Ok(Dpi::D150),
            200 => Ok(Dpi::D200),
            300 => Ok(Dpi::D300),
            600 => Ok(Dpi::D600),
            other => Err(LabelError::InvalidResolution(other)),
        }
    }

    /// Dots per inch as a plain number.
    pub fn dots_per_inch(self) -> u32 {
        match self {
            Dpi::D150 => 150,
            Dpi::D200 => 200,
            Dpi::D300 => 300,
            Dpi::D600 => 600,
        }
    }

    /// Convert a millimeter length to integer dots at this resolution.
    ///
    /// Rounds half away from zero. `mm` may be zero but not negative;
    /// negative inputs are an authoring error.
    pub fn dots(self, mm: f64) -> u32 {
        debug_assert!(mm >= 0.0, "negative length: {mm} mm");
        (mm.max(0.0) / MM_PER_INCH * self.dots_per_inch() as f64).round() as u32
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi", self.dots_per_inch())
    }
}
