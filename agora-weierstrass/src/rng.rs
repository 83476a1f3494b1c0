use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

/// Uniform integer in `[0, bound)` by rejection sampling over the bit length
/// of `bound`. Returns zero for a zero bound.
pub fn random_below<R: RngCore + CryptoRng>(rng: &mut R, bound: &BigUint) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let bits = bound.bits();
    let len = ((bits + 7) / 8) as usize;
    let excess = (len as u64 * 8 - bits) as u32;
    let mut buf = vec![0u8; len];
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= 0xffu8 >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return candidate;
        }
    }
}
