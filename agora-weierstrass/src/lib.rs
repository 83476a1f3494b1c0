#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
pub mod curve;
mod encoding;
mod rng;

pub use arithmetic::{AffinePoint, FieldElement, Modular, Point, ProjectivePoint};
pub use curve::{Curve, CurveParameters};
pub use num_bigint::{BigInt, BigUint};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CurveError {
    #[error("cannot encode the identity element")]
    IdentityEncoding,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid compressed point prefix: {0:#04x}")]
    InvalidPrefix(u8),
    #[error("coordinate is not reduced modulo the field characteristic")]
    CoordinateOutOfRange,
}
