use super::modular::Modular;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use std::fmt;
use std::sync::Arc;

/// Element of the prime field `GF(p)` where `p` is only known at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl Modular for FieldElement {
    fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    fn inner(&self) -> &BigUint {
        &self.value
    }

    fn with_inner(&self, number: BigUint) -> Self {
        Self {
            value: number,
            modulus: Arc::clone(&self.modulus),
        }
    }
}

impl FieldElement {
    pub fn new(number: BigUint, modulus: &Arc<BigUint>) -> Self {
        let value = if &number < modulus.as_ref() {
            number
        } else {
            number % modulus.as_ref()
        };
        Self {
            value,
            modulus: Arc::clone(modulus),
        }
    }

    /// Reduces a signed integer, so `-1` maps to `p - 1`.
    pub fn from_bigint(number: &BigInt, modulus: &Arc<BigUint>) -> Self {
        let signed_modulus = BigInt::from(modulus.as_ref().clone());
        let reduced = number.mod_floor(&signed_modulus);
        Self::new(reduced.magnitude().clone(), modulus)
    }

    pub fn zero(modulus: &Arc<BigUint>) -> Self {
        Self::new(BigUint::zero(), modulus)
    }

    pub fn one(modulus: &Arc<BigUint>) -> Self {
        Self::new(BigUint::one(), modulus)
    }

    pub fn zero_like(&self) -> Self {
        self.with_inner(BigUint::zero())
    }

    pub fn one_like(&self) -> Self {
        Self::new(BigUint::one(), &self.modulus)
    }

    /// Small integer constant living in the same field as `self`.
    pub fn constant(&self, number: u64) -> Self {
        Self::new(BigUint::from(number), &self.modulus)
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_even(&self) -> bool {
        self.value.is_even()
    }

    pub fn square(&self) -> Self {
        Modular::mul(self, self)
    }

    /// Big-endian encoding, left padded with zeros to `len` bytes.
    pub fn to_bytes(&self, len: usize) -> Vec<u8> {
        let raw = self.value.to_bytes_be();
        let mut bytes = vec![0u8; len.saturating_sub(raw.len())];
        bytes.extend_from_slice(&raw);
        bytes
    }

    /// Returns a square root of `self` if it is a quadratic residue.
    ///
    /// Uses the `(p + 1) / 4` exponent when `p = 3 mod 4` and falls back to
    /// Tonelli-Shanks for every other odd prime.
    pub fn sqrt(&self) -> Option<Self> {
        let p = self.modulus.as_ref();
        if self.is_zero() || p == &BigUint::from(2u32) {
            return Some(self.clone());
        }

        let one = self.one_like();
        let minus_one = -&one;
        let p_minus_one = p - 1u32;
        let euler_exp = &p_minus_one >> 1u32;
        if self.pow(&euler_exp) != one {
            return None;
        }

        if p % 4u32 == BigUint::from(3u32) {
            return Some(self.pow(&((p + 1u32) >> 2u32)));
        }

        // p - 1 = q * 2^s with q odd
        let s = p_minus_one.trailing_zeros().unwrap_or(0);
        let q = &p_minus_one >> s;

        let mut z = self.constant(2);
        while z.pow(&euler_exp) != minus_one {
            z = &z + &one;
        }

        let mut m = s;
        let mut c = z.pow(&q);
        let mut t = self.pow(&q);
        let mut r = self.pow(&((&q + 1u32) >> 1u32));
        while t != one {
            let mut i = 0;
            let mut t_pow = t.clone();
            while t_pow != one {
                t_pow = t_pow.square();
                i += 1;
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t = &t * &c;
            r = &r * &b;
        }
        Some(r)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.value)
    }
}

impl<'a, 'b> std::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        Modular::add(self, rhs)
    }
}

impl std::ops::Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Modular::add(&self, &rhs)
    }
}

impl std::ops::Add<&FieldElement> for FieldElement {
    type Output = Self;
    fn add(self, rhs: &Self) -> Self::Output {
        Modular::add(&self, rhs)
    }
}

impl std::ops::AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &Self) {
        *self = Modular::add(&*self, rhs);
    }
}

impl<'a, 'b> std::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        Modular::sub(self, rhs)
    }
}

impl std::ops::Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Modular::sub(&self, &rhs)
    }
}

impl std::ops::Sub<&FieldElement> for FieldElement {
    type Output = Self;
    fn sub(self, rhs: &Self) -> Self::Output {
        Modular::sub(&self, rhs)
    }
}

impl std::ops::SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = Modular::sub(&*self, rhs);
    }
}

impl std::ops::Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Modular::neg(&self)
    }
}

impl std::ops::Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        Modular::neg(self)
    }
}

impl<'a, 'b> std::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        Modular::mul(self, rhs)
    }
}

impl std::ops::Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Modular::mul(&self, &rhs)
    }
}

impl std::ops::Mul<&FieldElement> for FieldElement {
    type Output = Self;
    fn mul(self, rhs: &Self) -> Self::Output {
        Modular::mul(&self, rhs)
    }
}

impl std::ops::MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &Self) {
        *self = Modular::mul(&*self, rhs);
    }
}

// Dividing by zero yields zero; the group law never reaches that branch
// with valid points.
impl<'a, 'b> std::ops::Div<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn div(self, rhs: &'b FieldElement) -> Self::Output {
        match rhs.invert() {
            Some(inverse) => Modular::mul(self, &inverse),
            None => self.zero_like(),
        }
    }
}

impl std::ops::Div for FieldElement {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}
