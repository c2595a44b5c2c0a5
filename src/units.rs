//! Length units used throughout the crate.
//!
//! All layout happens in PDF points ([`Pt`], 1/72 of an inch). [`Mm`] and [`In`]
//! exist so that page furniture can be described in the units people actually
//! measure paper with, and convert into points with `.into()`.

use derive_more::{Add, AddAssign, Display, From, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

const POINTS_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// PDF points
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Sum, From, Display,
)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, From, Display)]
pub struct Mm(pub f32);

/// Inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, From, Display)]
pub struct In(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * POINTS_PER_INCH / MM_PER_INCH)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * POINTS_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * MM_PER_INCH / POINTS_PER_INCH)
    }
}

impl From<Pt> for f32 {
    fn from(pt: Pt) -> f32 {
        pt.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn millimetres_convert_to_points() {
        let pt: Pt = Mm(25.4).into();
        assert!(close(pt.0, 72.0));

        let mm: Mm = Pt(72.0).into();
        assert!(close(mm.0, 25.4));
    }

    #[test]
    fn inches_convert_to_points() {
        let pt: Pt = In(0.5).into();
        assert!(close(pt.0, 36.0));
    }

    #[test]
    fn points_sum_and_scale() {
        let total: Pt = [Pt(1.0), Pt(2.5), Pt(3.5)].into_iter().sum();
        assert_eq!(total, Pt(7.0));
        assert_eq!(total * 2.0, Pt(14.0));
        assert_eq!(total / 2.0, Pt(3.5));
        assert_eq!(-total, Pt(-7.0));
        assert_eq!(Pt(3.0).max(Pt(4.0)), Pt(4.0));
    }
}
