use crate::arithmetic::{AffinePoint, FieldElement, Point, ProjectivePoint};
use crate::rng::random_below;
use crate::CurveError;

use bigint::{Encoding, U256};
use log::{debug, trace};
use num_bigint::{BigInt, BigUint, Sign};
use rand_core::{CryptoRng, OsRng, RngCore};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::Arc;

/// Domain parameters of `y^2 = x^3 + a * x + b` over `GF(p)`.
///
/// Integers are (de)serialized as `0x`-prefixed hex strings. Non-singularity
/// (`4a^3 + 27b^2 != 0 mod p`) and primality of `p` are assumed, not checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParameters {
    #[serde(with = "biguint_hex")]
    pub p: BigUint,
    #[serde(with = "biguint_hex")]
    pub a: BigUint,
    #[serde(with = "biguint_hex")]
    pub b: BigUint,
    #[serde(with = "biguint_hex")]
    pub gx: BigUint,
    #[serde(with = "biguint_hex")]
    pub gy: BigUint,
    #[serde(with = "biguint_hex")]
    pub n: BigUint,
    #[serde(with = "biguint_hex")]
    pub h: BigUint,
}

#[derive(Debug)]
struct CurveInner {
    name: String,
    params: CurveParameters,
    modulus: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
}

/// Short Weierstrass curve and factory for its points.
///
/// Cloning is cheap; every point keeps a clone as its curve reference.
#[derive(Clone, Debug)]
pub struct Curve {
    inner: Arc<CurveInner>,
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.params == other.inner.params
    }
}

impl Eq for Curve {}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params = &self.inner.params;
        writeln!(f, "elliptic curve ({})", self.inner.name)?;
        writeln!(f, "p: {:#x}", params.p)?;
        writeln!(f, "a: {:#x}", params.a)?;
        writeln!(f, "b: {:#x}", params.b)?;
        writeln!(f, "gx: {:#x}", params.gx)?;
        writeln!(f, "gy: {:#x}", params.gy)?;
        writeln!(f, "n: {:#x}", params.n)?;
        writeln!(f, "h: {:#x}", params.h)
    }
}

impl Curve {
    pub fn new(name: impl Into<String>, params: CurveParameters) -> Self {
        let name = name.into();
        let modulus = Arc::new(params.p.clone());
        let a = FieldElement::new(params.a.clone(), &modulus);
        let b = FieldElement::new(params.b.clone(), &modulus);
        debug!("constructed {}-bit curve {}", params.p.bits(), name);
        Self {
            inner: Arc::new(CurveInner {
                name,
                params,
                modulus,
                a,
                b,
            }),
        }
    }

    /// Builds the curve and immediately returns `k * G` on it.
    pub fn with_scalar(name: impl Into<String>, params: CurveParameters, k: &BigInt) -> Point {
        Self::new(name, params).kg(Some(k))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn params(&self) -> &CurveParameters {
        &self.inner.params
    }

    pub fn p(&self) -> &BigUint {
        &self.inner.params.p
    }

    pub fn a(&self) -> &BigUint {
        &self.inner.params.a
    }

    pub fn b(&self) -> &BigUint {
        &self.inner.params.b
    }

    pub fn gx(&self) -> &BigUint {
        &self.inner.params.gx
    }

    pub fn gy(&self) -> &BigUint {
        &self.inner.params.gy
    }

    pub fn n(&self) -> &BigUint {
        &self.inner.params.n
    }

    pub fn h(&self) -> &BigUint {
        &self.inner.params.h
    }

    pub fn coeff_a(&self) -> &FieldElement {
        &self.inner.a
    }

    pub fn coeff_b(&self) -> &FieldElement {
        &self.inner.b
    }

    pub fn bits(&self) -> usize {
        self.inner.params.p.bits() as usize
    }

    /// Width of a single encoded coordinate.
    pub fn bytes(&self) -> usize {
        (self.bits() + 7) / 8
    }

    pub fn field_element(&self, number: BigUint) -> FieldElement {
        FieldElement::new(number, &self.inner.modulus)
    }

    fn coordinate<T: Into<BigInt>>(&self, number: T) -> FieldElement {
        FieldElement::from_bigint(&number.into(), &self.inner.modulus)
    }

    pub fn generator(&self) -> Point {
        Point::Affine(AffinePoint::new(
            self.clone(),
            self.field_element(self.gx().clone()),
            self.field_element(self.gy().clone()),
        ))
    }

    /// `k * G`, or a random multiple of `G` when `k` is `None`.
    pub fn kg(&self, k: Option<&BigInt>) -> Point {
        match k {
            Some(k) => self.generator().scalar_mul(k),
            None => self.random_point(&mut OsRng),
        }
    }

    /// `k * G` with `k` read as an unsigned big-endian integer.
    pub fn kg_from_bytes(&self, k: &[u8]) -> Point {
        self.kg(Some(&BigInt::from_bytes_be(Sign::Plus, k)))
    }

    /// Multiplies `G` by a secret drawn uniformly from `[0, p)`.
    pub fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Point {
        debug!("drawing random point on {}", self.name());
        let secret = random_below(rng, self.p());
        self.generator().scalar_mul(&BigInt::from(secret))
    }

    /// Affine point from raw coordinates, reduced modulo `p` but not
    /// validated; see [`Self::ap_checked`].
    pub fn ap<X: Into<BigInt>, Y: Into<BigInt>>(&self, x: X, y: Y) -> Point {
        Point::Affine(AffinePoint::new(
            self.clone(),
            self.coordinate(x),
            self.coordinate(y),
        ))
    }

    /// Jacobian point from raw coordinates. `Z = 0` with `X^3 = Y^2` yields
    /// [`Point::Identity`].
    pub fn jp<X: Into<BigInt>, Y: Into<BigInt>, Z: Into<BigInt>>(&self, x: X, y: Y, z: Z) -> Point {
        let point = ProjectivePoint::new(
            self.clone(),
            self.coordinate(x),
            self.coordinate(y),
            self.coordinate(z),
        )
        .into_point();
        if point.is_identity() {
            trace!("jacobian coordinates collapsed to the identity on {}", self.name());
        }
        point
    }

    pub fn ap_checked<X: Into<BigInt>, Y: Into<BigInt>>(
        &self,
        x: X,
        y: Y,
    ) -> Result<Point, CurveError> {
        ensure_on_curve(self.ap(x, y))
    }

    pub fn jp_checked<X: Into<BigInt>, Y: Into<BigInt>, Z: Into<BigInt>>(
        &self,
        x: X,
        y: Y,
        z: Z,
    ) -> Result<Point, CurveError> {
        ensure_on_curve(self.jp(x, y, z))
    }

    pub fn secp256k1() -> Self {
        Self::new("secp256k1", CurveParameters::from(&SECP256K1))
    }

    pub fn tom256k1() -> Self {
        Self::new("tom256k1", CurveParameters::from(&TOM256K1))
    }

    pub fn p256() -> Self {
        Self::new("p256", CurveParameters::from(&P256))
    }
}

fn ensure_on_curve(point: Point) -> Result<Point, CurveError> {
    if point.is_on_curve() {
        Ok(point)
    } else {
        Err(CurveError::NotOnCurve)
    }
}

struct NamedCurve {
    p: U256,
    a: U256,
    b: U256,
    gx: U256,
    gy: U256,
    n: U256,
    h: U256,
}

impl From<&NamedCurve> for CurveParameters {
    fn from(named: &NamedCurve) -> Self {
        let uint = |number: &U256| BigUint::from_bytes_be(&number.to_be_bytes());
        Self {
            p: uint(&named.p),
            a: uint(&named.a),
            b: uint(&named.b),
            gx: uint(&named.gx),
            gy: uint(&named.gy),
            n: uint(&named.n),
            h: uint(&named.h),
        }
    }
}

const SECP256K1: NamedCurve = NamedCurve {
    p: U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
    a: U256::ZERO,
    b: U256::from_u8(7),
    gx: U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
    gy: U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    n: U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
    h: U256::ONE,
};

// Base field is the secp256k1 scalar field, so the two curves form a cycle.
const TOM256K1: NamedCurve = NamedCurve {
    p: U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
    a: U256::ZERO,
    b: U256::from_u8(7),
    gx: U256::from_be_hex("ac81a9587b8da43a9519bd50d96191fd8f2c4f66b8f1550e366e3c7f9ed18897"),
    gy: U256::from_be_hex("6ad7d16db13c428e5dce61c8bfe2b3860a306d201f059826120e7ac684ee209f"),
    n: U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
    h: U256::ONE,
};

const P256: NamedCurve = NamedCurve {
    p: U256::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
    a: U256::from_be_hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
    b: U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    gx: U256::from_be_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    gy: U256::from_be_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
    n: U256::from_be_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    h: U256::ONE,
};

mod biguint_hex {
    use num_bigint::BigUint;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(number: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", number))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let digits = encoded.trim_start_matches("0x");
        BigUint::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| D::Error::custom(format!("invalid hex integer: {}", encoded)))
    }
}

/// `y^2 = x^3 + x + 1` over `GF(23)`, generated by `(3, 10)` of order 28.
#[cfg(test)]
pub(crate) fn test_curve() -> Curve {
    Curve::new(
        "toy23",
        CurveParameters {
            p: 23u32.into(),
            a: 1u32.into(),
            b: 1u32.into(),
            gx: 3u32.into(),
            gy: 10u32.into(),
            n: 28u32.into(),
            h: 1u32.into(),
        },
    )
}
