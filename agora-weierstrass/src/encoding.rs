use crate::arithmetic::{AffinePoint, FieldElement, Point};
use crate::curve::Curve;
use crate::CurveError;

use num_bigint::BigUint;

pub(crate) const TAG_EVEN: u8 = 0x02;
pub(crate) const TAG_ODD: u8 = 0x03;

impl Curve {
    /// Inverse of [`Point::encode`].
    ///
    /// The caller states which form to expect since both forms have the same
    /// length on curves whose coordinates fit into a single byte.
    pub fn decode_point(&self, bytes: &[u8], compressed: bool) -> Result<Point, CurveError> {
        let width = self.bytes();
        if compressed {
            if bytes.len() != width + 1 {
                return Err(CurveError::InvalidLength {
                    expected: width + 1,
                    actual: bytes.len(),
                });
            }
            let tag = bytes[0];
            if tag != TAG_EVEN && tag != TAG_ODD {
                return Err(CurveError::InvalidPrefix(tag));
            }
            let x = self.read_coordinate(&bytes[1..])?;
            let rhs = (x.square() + self.coeff_a()) * &x + self.coeff_b();
            let y = rhs.sqrt().ok_or(CurveError::NotOnCurve)?;
            let y = if y.is_even() == (tag == TAG_EVEN) {
                y
            } else {
                -y
            };
            if y.is_even() != (tag == TAG_EVEN) {
                // only y = 0 has no root of the other parity
                return Err(CurveError::NotOnCurve);
            }
            Ok(Point::Affine(AffinePoint::new(self.clone(), x, y)))
        } else {
            if bytes.len() != 2 * width {
                return Err(CurveError::InvalidLength {
                    expected: 2 * width,
                    actual: bytes.len(),
                });
            }
            let (x, y) = bytes.split_at(width);
            let point = AffinePoint::new(
                self.clone(),
                self.read_coordinate(x)?,
                self.read_coordinate(y)?,
            );
            if !point.is_on_curve() {
                return Err(CurveError::NotOnCurve);
            }
            Ok(Point::Affine(point))
        }
    }

    fn read_coordinate(&self, bytes: &[u8]) -> Result<FieldElement, CurveError> {
        let number = BigUint::from_bytes_be(bytes);
        if &number >= self.p() {
            return Err(CurveError::CoordinateOutOfRange);
        }
        Ok(self.field_element(number))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test_curve;
    use num_bigint::BigInt;

    #[test]
    fn toy_curve_encodings() {
        let curve = test_curve();
        let p = curve.ap(3, 10);
        assert_eq!(p.encode(false).unwrap(), vec![3, 10]);
        assert_eq!(p.encode(true).unwrap(), vec![0x02, 3]);

        assert_eq!(curve.decode_point(&[3, 10], false), Ok(p.clone()));
        assert_eq!(curve.decode_point(&[0x02, 3], true), Ok(p.clone()));
        assert_eq!(curve.decode_point(&[0x03, 3], true), Ok(p.negate()));
    }

    #[test]
    fn every_toy_point_decodes() {
        let curve = test_curve();
        let g = curve.generator();
        for k in 1..28 {
            let point = g.scalar_mul(&BigInt::from(k));
            for compressed in [false, true] {
                let bytes = point.encode(compressed).unwrap();
                assert_eq!(curve.decode_point(&bytes, compressed), Ok(point.clone()));
            }
        }
    }

    #[test]
    fn decompression_with_tonelli_shanks() {
        // tom256k1 has p = 1 mod 4
        let curve = Curve::tom256k1();
        let g = curve.generator();
        for k in [1, 2, 3, 1000, -77] {
            let point = g.scalar_mul(&BigInt::from(k));
            let bytes = point.encode(true).unwrap();
            assert_eq!(bytes.len(), 33);
            assert_eq!(curve.decode_point(&bytes, true), Ok(point));
        }
    }

    #[test]
    fn secp256k1_generator_encoding() {
        let curve = Curve::secp256k1();
        let bytes = curve.generator().encode(true).unwrap();
        assert_eq!(bytes[0], TAG_EVEN);
        assert_eq!(bytes[1..], curve.gx().to_bytes_be()[..]);
        let uncompressed = curve.generator().encode(false).unwrap();
        assert_eq!(uncompressed.len(), 64);
        assert_eq!(
            curve.decode_point(&uncompressed, false),
            Ok(curve.generator())
        );
    }

    #[test]
    fn decoding_errors() {
        let curve = test_curve();
        assert_eq!(
            curve.decode_point(&[3, 10, 0], false),
            Err(CurveError::InvalidLength {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            curve.decode_point(&[0x02], true),
            Err(CurveError::InvalidLength {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            curve.decode_point(&[0x04, 3], true),
            Err(CurveError::InvalidPrefix(0x04))
        );
        assert_eq!(
            curve.decode_point(&[3, 11], false),
            Err(CurveError::NotOnCurve)
        );
        assert_eq!(
            curve.decode_point(&[30, 10], false),
            Err(CurveError::CoordinateOutOfRange)
        );
        // 2^3 + 2 + 1 = 11 is a non-residue mod 23
        assert_eq!(
            curve.decode_point(&[0x02, 2], true),
            Err(CurveError::NotOnCurve)
        );
        // (4, 0) has no odd ordinate
        assert_eq!(
            curve.decode_point(&[0x03, 4], true),
            Err(CurveError::NotOnCurve)
        );
        assert_eq!(curve.decode_point(&[0x02, 4], true), Ok(curve.ap(4, 0)));
    }
}
