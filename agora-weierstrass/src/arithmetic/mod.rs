mod affine_point;
mod field;
mod modular;
mod point;
mod projective_point;

pub use affine_point::AffinePoint;
pub use field::FieldElement;
pub use modular::Modular;
pub use point::Point;
pub use projective_point::ProjectivePoint;
