mod impl_macro;

use super::affine_point::AffinePoint;
use super::projective_point::ProjectivePoint;
use crate::curve::Curve;
use crate::CurveError;

use num_bigint::BigInt;
use num_traits::Signed;

use std::fmt;

/// Element of the elliptic-curve group.
///
/// The identity is a unit variant shared by every curve. Results of the group
/// operations keep the representation of the left operand, so affine points
/// stay affine and Jacobian points stay Jacobian.
#[derive(Clone, Debug)]
pub enum Point {
    Identity,
    Affine(AffinePoint),
    Projective(ProjectivePoint),
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Identity, Self::Identity) => true,
            (Self::Identity, Self::Affine(_)) | (Self::Affine(_), Self::Identity) => false,
            (Self::Identity, Self::Projective(jacobian))
            | (Self::Projective(jacobian), Self::Identity) => jacobian.z().is_zero(),
            (Self::Affine(lhs), Self::Affine(rhs)) => lhs == rhs,
            (Self::Projective(lhs), Self::Projective(rhs)) => lhs == rhs,
            (Self::Affine(affine), Self::Projective(jacobian))
            | (Self::Projective(jacobian), Self::Affine(affine)) => {
                &affine.to_projective() == jacobian
            }
        }
    }
}

impl Eq for Point {}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Identity => writeln!(f, "O (point at infinity)"),
            Self::Affine(point) => fmt::Display::fmt(point, f),
            Self::Projective(point) => fmt::Display::fmt(point, f),
        }
    }
}

impl From<AffinePoint> for Point {
    fn from(point: AffinePoint) -> Self {
        Self::Affine(point)
    }
}

impl From<ProjectivePoint> for Point {
    fn from(point: ProjectivePoint) -> Self {
        point.into_point()
    }
}

impl Point {
    pub const IDENTITY: Self = Self::Identity;

    /// The curve this point lives on, `None` for the identity.
    pub fn curve(&self) -> Option<&Curve> {
        match self {
            Self::Identity => None,
            Self::Affine(point) => Some(point.curve()),
            Self::Projective(point) => Some(point.curve()),
        }
    }

    pub fn is_on_curve(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Affine(point) => point.is_on_curve(),
            Self::Projective(point) => point.is_on_curve(),
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Affine(_) => false,
            Self::Projective(point) => point.is_identity(),
        }
    }

    pub fn negate(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Affine(point) => Self::Affine(point.negate()),
            Self::Projective(point) => Self::Projective(point.negate()),
        }
    }

    pub fn double(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Affine(point) => point.double(),
            Self::Projective(point) => point.double(),
        }
    }

    pub fn geometric_add(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Identity, _) => rhs.clone(),
            (_, Self::Identity) => self.clone(),
            (Self::Affine(lhs), Self::Affine(rhs)) => lhs.geometric_add(rhs),
            (Self::Affine(_), Self::Projective(jacobian)) => {
                self.geometric_add(&jacobian.to_affine())
            }
            (Self::Projective(lhs), Self::Affine(rhs)) => lhs.geometric_add(&rhs.to_projective()),
            (Self::Projective(lhs), Self::Projective(rhs)) => lhs.geometric_add(rhs),
        }
    }

    pub fn geometric_sub(&self, rhs: &Self) -> Self {
        self.geometric_add(&rhs.negate())
    }

    /// Left-to-right double-and-add over the bits of `|scalar|`.
    ///
    /// The loop runs in Jacobian coordinates and converts back to affine when
    /// `self` is affine. The running time depends on the scalar, so this must
    /// not be fed secret scalars where timing is observable.
    pub fn scalar_mul(&self, scalar: &BigInt) -> Self {
        let base = match self {
            Self::Identity => return Self::Identity,
            Self::Affine(point) => Self::Projective(point.to_projective()),
            Self::Projective(_) => self.clone(),
        };

        let magnitude = scalar.magnitude();
        let mut q = Self::Identity;
        for i in (0..magnitude.bits()).rev() {
            q = q.double();
            if magnitude.bit(i) {
                q = q.geometric_add(&base);
            }
        }

        if scalar.is_negative() {
            q = q.negate();
        }

        match self {
            Self::Affine(_) => q.to_affine(),
            _ => q,
        }
    }

    pub fn to_affine(&self) -> Self {
        match self {
            Self::Identity | Self::Affine(_) => self.clone(),
            Self::Projective(point) => point.to_affine(),
        }
    }

    pub fn to_projective(&self) -> Self {
        match self {
            Self::Identity | Self::Projective(_) => self.clone(),
            Self::Affine(point) => Self::Projective(point.to_projective()),
        }
    }

    pub fn encode(&self, compressed: bool) -> Result<Vec<u8>, CurveError> {
        match self {
            Self::Identity => Err(CurveError::IdentityEncoding),
            Self::Affine(point) => Ok(point.encode(compressed)),
            Self::Projective(point) => point.encode(compressed),
        }
    }
}
