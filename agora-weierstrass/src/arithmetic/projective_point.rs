use super::affine_point::AffinePoint;
use super::field::FieldElement;
use super::modular::Modular;
use super::point::Point;
use crate::curve::Curve;
use crate::CurveError;

use num_bigint::BigInt;

use std::fmt;

/// Curve point in Jacobian coordinates, `(X, Y, Z)` standing for
/// `(X / Z^2, Y / Z^3)`.
///
/// Values with `Z = 0` and `X^3 = Y^2` are never handed out: every
/// constructor path goes through [`ProjectivePoint::into_point`], which turns
/// them into [`Point::Identity`]. Any other `Z = 0` triple normalizes to the
/// identity in [`ProjectivePoint::to_affine`], and the group operations treat
/// it the same way.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    curve: Curve,
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }
        if self.z.is_zero() || other.z.is_zero() {
            return self.z.is_zero() && other.z.is_zero();
        }
        let z0z0 = self.z.square();
        let z1z1 = other.z.square();
        let x0z1 = &self.x * &z1z1;
        let x1z0 = &other.x * &z0z0;
        let y0z1 = &self.y * &(z1z1 * &other.z);
        let y1z0 = &other.y * &(z0z0 * &self.z);

        x0z1 == x1z0 && y0z1 == y1z0
    }
}

impl Eq for ProjectivePoint {}

impl fmt::Display for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "jacobian point on elliptic curve ({})", self.curve.name())?;
        writeln!(f, "x: {}", self.x)?;
        writeln!(f, "y: {}", self.y)?;
        writeln!(f, "z: {}", self.z)
    }
}

impl ProjectivePoint {
    pub(crate) fn new(curve: Curve, x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        Self { curve, x, y, z }
    }

    pub(crate) fn into_point(self) -> Point {
        if self.is_identity() {
            Point::Identity
        } else {
            Point::Projective(self)
        }
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

    pub fn z(&self) -> &FieldElement {
        &self.z
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero() && self.x.square() * &self.x == self.y.square()
    }

    pub fn is_on_curve(&self) -> bool {
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = &z4 * &z2;
        let rhs = (self.x.square() + self.curve.coeff_a() * &z4) * &self.x
            + self.curve.coeff_b() * &z6;
        self.y.square() == rhs
    }

    pub fn negate(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            x: self.x.clone(),
            y: -&self.y,
            z: self.z.clone(),
        }
    }

    pub fn double(&self) -> Point {
        if self.y.is_zero() || self.z.is_zero() {
            return Point::Identity;
        }
        let xx = self.x.square();
        let yy = self.y.square();
        let zz = self.z.square();

        let s = self.x.constant(4) * &self.x * &yy;
        let m = self.x.constant(3) * xx + self.curve.coeff_a() * &zz.square();
        let x = m.square() - &s - &s;
        let y = m * (s - &x) - self.x.constant(8) * yy.square();
        let z = self.x.constant(2) * &self.y * &self.z;

        Self::new(self.curve.clone(), x, y, z).into_point()
    }

    /// # Panics
    ///
    /// Panics if `rhs` lives on a different curve.
    pub fn geometric_add(&self, rhs: &Self) -> Point {
        assert!(self.curve == rhs.curve, "points live on different curves");
        if self.z.is_zero() {
            return if rhs.z.is_zero() {
                Point::Identity
            } else {
                Point::Projective(rhs.clone())
            };
        } else if rhs.z.is_zero() {
            return Point::Projective(self.clone());
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = &self.x * &z2z2;
        let u2 = &rhs.x * &z1z1;
        let s1 = &self.y * &rhs.z * &z2z2;
        let s2 = &rhs.y * &self.z * &z1z1;

        let h = u2 - &u1;
        let r = s2 - &s1;
        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Point::Identity
            };
        }

        let hh = h.square();
        let hhh = &h * &hh;
        let v = u1 * &hh;
        let x = r.square() - &hhh - &v - &v;
        let y = r * (v - &x) - s1 * &hhh;
        let z = &self.z * &rhs.z * &h;

        Self::new(self.curve.clone(), x, y, z).into_point()
    }

    pub fn scalar_mul(&self, scalar: &BigInt) -> Point {
        Point::Projective(self.clone()).scalar_mul(scalar)
    }

    pub fn to_affine(&self) -> Point {
        match self.z.invert() {
            None => Point::Identity,
            Some(z_inv) => {
                let z_inv2 = z_inv.square();
                let z_inv3 = &z_inv2 * &z_inv;
                Point::Affine(AffinePoint::new(
                    self.curve.clone(),
                    &self.x * &z_inv2,
                    &self.y * &z_inv3,
                ))
            }
        }
    }

    pub fn encode(&self, compressed: bool) -> Result<Vec<u8>, CurveError> {
        self.to_affine().encode(compressed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test_curve;

    fn projective(point: Point) -> ProjectivePoint {
        match point {
            Point::Projective(p) => p,
            other => panic!("expected a jacobian point, got {:?}", other),
        }
    }

    #[test]
    fn identity_collapses_on_construction() {
        let curve = test_curve();
        assert_eq!(curve.jp(1, 1, 0), Point::Identity);
        assert_eq!(curve.jp(4, 8, 0), Point::Identity);
        assert!(matches!(curve.jp(3, 10, 1), Point::Projective(_)));
    }

    #[test]
    fn on_curve_check() {
        let curve = test_curve();
        // (3, 10) scaled by z = 2: (3 * 4, 10 * 8, 2)
        let p = projective(curve.jp(12, 80, 2));
        assert!(p.is_on_curve());
        assert!(!projective(curve.jp(12, 79, 2)).is_on_curve());
        assert_eq!(p.to_affine(), curve.ap(3, 10));
    }

    #[test]
    fn equality_across_scaling() {
        let curve = test_curve();
        let p = projective(curve.jp(3, 10, 1));
        let q = projective(curve.jp(12, 80, 2));
        assert_eq!(p, q);
        assert_ne!(p, p.negate());
    }

    #[test]
    fn jacobian_formulas_match_affine() {
        let curve = test_curve();
        let p = projective(curve.jp(12, 80, 2));
        let q = projective(curve.ap(7, 12).to_projective());

        let doubled = projective(p.double());
        assert_eq!(doubled.to_affine(), curve.ap(7, 12));

        let sum = projective(p.geometric_add(&q));
        assert_eq!(sum.to_affine(), curve.ap(19, 5));

        assert_eq!(p.geometric_add(&p), p.double());
        assert_eq!(p.geometric_add(&p.negate()), Point::Identity);
        assert_eq!(projective(curve.jp(4, 0, 1)).double(), Point::Identity);
    }

    #[test]
    fn encoding_goes_through_affine() {
        let curve = test_curve();
        let p = projective(curve.jp(12, 80, 2));
        assert_eq!(p.encode(false), Ok(vec![3, 10]));
        assert_eq!(p.encode(true), Ok(vec![0x02, 3]));
    }

    #[test]
    fn zero_z_acts_as_identity() {
        let curve = test_curve();
        // 1^3 != 2^2, so construction keeps the jacobian form
        let degenerate = curve.jp(1, 2, 0);
        let p = curve.ap(3, 10);
        assert!(matches!(degenerate, Point::Projective(_)));
        assert_eq!(degenerate.to_affine(), Point::Identity);
        assert_eq!(degenerate, Point::Identity);
        assert_eq!(Point::Identity, degenerate);
        assert_ne!(degenerate, p);
        assert_ne!(p, degenerate);

        let sum = degenerate.geometric_add(&p);
        assert!(matches!(sum, Point::Projective(_)));
        assert_eq!(sum, p);
        assert_eq!(p.geometric_add(&degenerate), p);
        assert_eq!(degenerate.geometric_add(&degenerate), Point::Identity);
        assert_eq!(degenerate.double(), Point::Identity);
        assert_eq!(degenerate.negate(), Point::Identity);
        assert_eq!(degenerate.scalar_mul(&BigInt::from(5)), Point::Identity);
        assert_eq!(degenerate.encode(true), Err(CurveError::IdentityEncoding));
    }

    #[test]
    #[should_panic(expected = "points live on different curves")]
    fn jacobian_addition_across_curves() {
        let toy = test_curve().generator().to_projective();
        let secp = Curve::secp256k1().generator().to_projective();
        let _ = toy.geometric_add(&secp);
    }
}
