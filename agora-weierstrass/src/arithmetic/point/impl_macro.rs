use super::*;

macro_rules! impl_point_arithmetic {
    ($this:ty) => {
        impl std::ops::Neg for $this {
            type Output = $this;
            fn neg(self) -> Self::Output {
                self.negate()
            }
        }

        impl std::ops::Neg for &$this {
            type Output = $this;
            fn neg(self) -> Self::Output {
                self.negate()
            }
        }

        impl std::ops::Add for $this {
            type Output = Point;
            fn add(self, rhs: Self) -> Self::Output {
                self.geometric_add(&rhs)
            }
        }

        impl<'a, 'b> std::ops::Add<&'b $this> for &'a $this {
            type Output = Point;
            fn add(self, rhs: &'b $this) -> Self::Output {
                self.geometric_add(rhs)
            }
        }

        impl std::ops::Sub for $this {
            type Output = Point;
            fn sub(self, rhs: Self) -> Self::Output {
                self.geometric_add(&rhs.negate())
            }
        }

        impl<'a, 'b> std::ops::Sub<&'b $this> for &'a $this {
            type Output = Point;
            fn sub(self, rhs: &'b $this) -> Self::Output {
                self.geometric_add(&rhs.negate())
            }
        }

        impl std::ops::Mul<BigInt> for $this {
            type Output = Point;
            fn mul(self, rhs: BigInt) -> Self::Output {
                self.scalar_mul(&rhs)
            }
        }

        impl std::ops::Mul<BigInt> for &$this {
            type Output = Point;
            fn mul(self, rhs: BigInt) -> Self::Output {
                self.scalar_mul(&rhs)
            }
        }

        impl<'a, 'b> std::ops::Mul<&'b BigInt> for &'a $this {
            type Output = Point;
            fn mul(self, rhs: &'b BigInt) -> Self::Output {
                self.scalar_mul(rhs)
            }
        }
    };
}

impl_point_arithmetic!(Point);
impl_point_arithmetic!(AffinePoint);
impl_point_arithmetic!(ProjectivePoint);

impl std::ops::AddAssign<&Point> for Point {
    fn add_assign(&mut self, rhs: &Point) {
        *self = self.geometric_add(rhs)
    }
}

impl std::ops::SubAssign<&Point> for Point {
    fn sub_assign(&mut self, rhs: &Point) {
        *self = self.geometric_sub(rhs)
    }
}
