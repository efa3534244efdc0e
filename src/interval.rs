/*

    Closed range [min, max] along one axis.

    Extents in the placement documents are built
    from three of these, one per axis, so the
    min <= max check lives in a single place.

    @date: Oct, 2026

*/

use crate::numeric::{Float};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {

    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    /// Interval covering both values regardless of their order
    pub fn spanning(a: Float, b: Float) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn validate(&self) -> bool {
        self.max >= self.min
    }

    /// Shift both ends by `offset`
    pub fn translated(&self, offset: Float) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Grow by `pad` on both ends
    pub fn padded(&self, pad: Float) -> Self {
        Self::new(self.min - pad, self.max + pad)
    }

}
