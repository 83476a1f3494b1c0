use super::field::FieldElement;
use super::point::Point;
use super::projective_point::ProjectivePoint;
use crate::curve::Curve;
use crate::encoding::{TAG_EVEN, TAG_ODD};

use num_bigint::BigInt;

use std::fmt;

/// Curve point in affine coordinates `(x, y)`.
///
/// Never represents the identity; operations that would land there return
/// [`Point::Identity`] instead.
#[derive(Clone, Debug)]
pub struct AffinePoint {
    curve: Curve,
    x: FieldElement,
    y: FieldElement,
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint {}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "affine point on elliptic curve ({})", self.curve.name())?;
        writeln!(f, "x: {}", self.x)?;
        writeln!(f, "y: {}", self.y)
    }
}

impl AffinePoint {
    pub(crate) fn new(curve: Curve, x: FieldElement, y: FieldElement) -> Self {
        Self { curve, x, y }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn is_on_curve(&self) -> bool {
        let rhs = (self.x.square() + self.curve.coeff_a()) * &self.x + self.curve.coeff_b();
        self.y.square() == rhs
    }

    pub fn negate(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: -&self.y,
        }
    }

    /// Tangent-line doubling. A point with `y = 0` has order two.
    pub fn double(&self) -> Point {
        if self.y.is_zero() {
            return Point::Identity;
        }
        let numerator = self.x.constant(3) * self.x.square() + self.curve.coeff_a();
        let lambda = numerator / (self.y.constant(2) * &self.y);
        let x = lambda.square() - &self.x - &self.x;
        let y = lambda * (&self.x - &x) - &self.y;
        Point::Affine(Self::new(self.curve.clone(), x, y))
    }

    /// Chord-line addition.
    ///
    /// Equal abscissae route to [`Self::double`] when the ordinates match and
    /// to the identity otherwise, so the slope denominator is never zero.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` lives on a different curve.
    pub fn geometric_add(&self, rhs: &Self) -> Point {
        assert!(self.curve == rhs.curve, "points live on different curves");
        if self.x == rhs.x {
            return if self.y == rhs.y {
                self.double()
            } else {
                Point::Identity
            };
        }
        let lambda = (&self.y - &rhs.y) / (&self.x - &rhs.x);
        let x = lambda.square() - &self.x - &rhs.x;
        let y = lambda * (&self.x - &x) - &self.y;
        Point::Affine(Self::new(self.curve.clone(), x, y))
    }

    pub fn scalar_mul(&self, scalar: &BigInt) -> Point {
        Point::Affine(self.clone()).scalar_mul(scalar)
    }

    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint::new(
            self.curve.clone(),
            self.x.clone(),
            self.y.clone(),
            self.x.one_like(),
        )
    }

    /// `x || y` uncompressed, `(0x02 | 0x03) || x` compressed.
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let width = self.curve.bytes();
        if compressed {
            let tag = if self.y.is_even() { TAG_EVEN } else { TAG_ODD };
            let mut bytes = Vec::with_capacity(width + 1);
            bytes.push(tag);
            bytes.extend(self.x.to_bytes(width));
            bytes
        } else {
            let mut bytes = self.x.to_bytes(width);
            bytes.extend(self.y.to_bytes(width));
            bytes
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test_curve;
    use num_bigint::BigUint;

    fn affine(point: Point) -> AffinePoint {
        match point {
            Point::Affine(p) => p,
            other => panic!("expected an affine point, got {:?}", other),
        }
    }

    #[test]
    fn on_curve_check() {
        let curve = test_curve();
        assert!(affine(curve.ap(3, 10)).is_on_curve());
        assert!(affine(curve.ap(7, 12)).is_on_curve());
        assert!(affine(curve.ap(19, 5)).is_on_curve());
        assert!(!affine(curve.ap(3, 11)).is_on_curve());
        assert!(!affine(curve.ap(0, 0)).is_on_curve());
    }

    #[test]
    fn point_doubling() {
        let curve = test_curve();
        let p = affine(curve.ap(3, 10));
        let doubled = affine(p.double());
        assert_eq!(doubled.x().value(), &BigUint::from(7u32));
        assert_eq!(doubled.y().value(), &BigUint::from(12u32));
        assert!(doubled.is_on_curve());

        // (4, 0) has order two
        assert_eq!(affine(curve.ap(4, 0)).double(), Point::Identity);
    }

    #[test]
    fn point_addition() {
        let curve = test_curve();
        let p = affine(curve.ap(3, 10));
        let q = affine(curve.ap(7, 12));
        let sum = affine(p.geometric_add(&q));
        assert_eq!(sum, affine(curve.ap(19, 5)));
        assert_eq!(q.geometric_add(&p), Point::Affine(sum));

        assert_eq!(p.geometric_add(&p), p.double());
        assert_eq!(p.geometric_add(&p.negate()), Point::Identity);
        assert_eq!(p.geometric_add(&affine(curve.ap(3, -10))), Point::Identity);
    }

    #[test]
    fn negation_mirrors_y() {
        let curve = test_curve();
        let p = affine(curve.ap(3, 10));
        assert_eq!(p.negate(), affine(curve.ap(3, 13)));
        assert_eq!(p.negate().negate(), p);
    }

    #[test]
    fn encoding() {
        let curve = test_curve();
        let p = affine(curve.ap(3, 10));
        assert_eq!(p.encode(false), vec![3, 10]);
        assert_eq!(p.encode(true), vec![0x02, 3]);
        assert_eq!(p.negate().encode(true), vec![0x03, 3]);
    }

    #[test]
    fn secp256k1_generator_double() {
        let curve = Curve::secp256k1();
        let g2 = affine(affine(curve.generator()).double());
        assert_eq!(
            g2.x().to_string(),
            "0xc6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
        assert_eq!(
            g2.y().to_string(),
            "0x1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"
        );
        assert!(g2.is_on_curve());
    }

    #[test]
    #[should_panic(expected = "points live on different curves")]
    fn addition_across_curves() {
        let toy = affine(test_curve().generator());
        let secp = affine(Curve::secp256k1().generator());
        let _ = toy.geometric_add(&secp);
    }
}
