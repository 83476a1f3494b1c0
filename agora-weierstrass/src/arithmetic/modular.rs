use num_bigint::BigUint;
use num_traits::Zero;

/// Residue arithmetic over a modulus carried by the value itself.
///
/// Implementors only expose their canonical residue and modulus; every
/// operation below assumes both operands live in the same residue ring.
pub trait Modular: Sized {
    fn modulus(&self) -> &BigUint;

    fn inner(&self) -> &BigUint;

    /// Wraps an already reduced residue into the ring of `self`.
    fn with_inner(&self, number: BigUint) -> Self;

    fn add(&self, other: &Self) -> Self {
        let sum = self.inner() + other.inner();
        if &sum >= self.modulus() {
            self.with_inner(sum - self.modulus())
        } else {
            self.with_inner(sum)
        }
    }

    fn neg(&self) -> Self {
        if self.inner().is_zero() {
            self.with_inner(BigUint::zero())
        } else {
            self.with_inner(self.modulus() - self.inner())
        }
    }

    fn sub(&self, other: &Self) -> Self {
        if self.inner() >= other.inner() {
            self.with_inner(self.inner() - other.inner())
        } else {
            self.with_inner(self.modulus() - other.inner() + self.inner())
        }
    }

    fn mul(&self, other: &Self) -> Self {
        self.with_inner((self.inner() * other.inner()) % self.modulus())
    }

    fn pow(&self, exponent: &BigUint) -> Self {
        self.with_inner(self.inner().modpow(exponent, self.modulus()))
    }

    /// Fermat inverse, valid for prime moduli only.
    fn invert(&self) -> Option<Self> {
        if self.inner().is_zero() {
            None
        } else {
            Some(self.pow(&(self.modulus() - 2u32)))
        }
    }
}
