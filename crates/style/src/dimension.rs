//! Unit conversions and page-level spacing primitives.
//!
//! Word-processing formats measure indentation, spacing and margins in twips
//! (1/20 pt); configuration is expressed in centimetres.
use serde::{Deserialize, Serialize};

const TWIPS_PER_CM: f32 = 567.0;

/// Converts a length in centimetres to twips, rounding to the nearest twip.
pub fn twips_from_cm(cm: f32) -> u32 {
    if cm <= 0.0 || !cm.is_finite() {
        return 0;
    }
    (cm * TWIPS_PER_CM).round() as u32
}

/// Left and right page margins of a section, in twips.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PageMargins {
    pub left: u32,
    pub right: u32,
}

impl PageMargins {
    pub fn from_cm(left: f32, right: f32) -> Self {
        Self {
            left: twips_from_cm(left),
            right: twips_from_cm(right),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}
