/// 2D and 3D vector values
///
/// Both types are `Copy` values: every operation returns a new vector and
/// leaves its operands untouched, so a vector can be shared freely.
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector2D {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// |x| + |y|
    #[inline]
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }
}

impl Vector3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// |x| + |y| + |z|
    #[inline]
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Single precision copy for GPU-side math
    pub fn to_nalgebra(&self) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    pub fn to_point(&self) -> Point3<f32> {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    pub fn from_nalgebra(v: &Vector3<f32>) -> Self {
        Self::new(v.x as f64, v.y as f64, v.z as f64)
    }
}

macro_rules! impl_vector {
    ($V:ident { $($c:ident),+ }) => {
        impl $V {
            /// Euclidean length
            #[inline]
            pub fn abs(&self) -> f64 {
                self.dot(self).sqrt()
            }

            /// Unit vector in the same direction.
            ///
            /// Fails with [`Error::DegenerateVector`] when the length is zero or
            /// not finite, instead of producing NaN coordinates.
            pub fn normalize(&self) -> Result<Self> {
                let length = self.abs();
                if length == 0.0 || !length.is_finite() {
                    return Err(Error::DegenerateVector);
                }
                Ok(*self / length)
            }

            #[inline]
            pub fn is_finite(&self) -> bool {
                true $(&& self.$c.is_finite())+
            }
        }

        impl Add for $V {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($c: self.$c + rhs.$c),+ }
            }
        }

        impl Sub for $V {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($c: self.$c - rhs.$c),+ }
            }
        }

        impl Mul<f64> for $V {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f64) -> Self {
                Self { $($c: self.$c * rhs),+ }
            }
        }

        impl Div<f64> for $V {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f64) -> Self {
                Self { $($c: self.$c / rhs),+ }
            }
        }

        impl Neg for $V {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($c: -self.$c),+ }
            }
        }

        impl AddAssign for $V {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $V {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f64> for $V {
            #[inline]
            fn mul_assign(&mut self, rhs: f64) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f64> for $V {
            #[inline]
            fn div_assign(&mut self, rhs: f64) {
                *self = *self / rhs;
            }
        }
    };
}

impl_vector!(Vector2D { x, y });
impl_vector!(Vector3D { x, y, z });

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64, f64)> for Vector3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clone_is_independent() {
        let v = Vector2D::new(3.0, -4.0);
        let mut copy = v;
        copy += Vector2D::new(1.0, 1.0);
        copy *= 2.0;
        assert_eq!(v, Vector2D::new(3.0, -4.0));
        assert_eq!(copy, Vector2D::new(8.0, -6.0));
        assert!(v.clone() == v);
    }

    #[test]
    fn test_lengths() {
        let v = Vector2D::new(3.0, -4.0);
        assert_eq!(v.abs(), 5.0);
        assert_eq!(v.manhattan_length(), 7.0);

        let w = Vector3D::new(-1.0, 2.0, -2.0);
        assert_eq!(w.abs(), 3.0);
        assert_eq!(w.manhattan_length(), 5.0);
    }

    #[test]
    fn test_arithmetic_chain() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(0.5, 0.5, 0.5);
        let c = (a - b) * 2.0 / 4.0 + b;
        assert_eq!(c, Vector3D::new(0.75, 1.25, 1.75));
        assert_eq!(-a, Vector3D::new(-1.0, -2.0, -3.0));
        assert_eq!(a, Vector3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_dot_and_cross() {
        let x = Vector3D::new(1.0, 0.0, 0.0);
        let y = Vector3D::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3D::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3D::new(0.0, 0.0, -1.0));
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(Vector2D::new(2.0, 3.0).dot(&Vector2D::new(4.0, -1.0)), 5.0);
    }

    #[test]
    fn test_normalize_has_unit_length() {
        let samples = [
            Vector3D::new(1.0, 2.0, 3.0),
            Vector3D::new(-1e-3, 4e-4, 0.0),
            Vector3D::new(1e6, -2e6, 3.5e5),
        ];
        for v in samples {
            let n = v.normalize().unwrap();
            assert_relative_eq!(n.abs(), 1.0, epsilon = 1e-12);
        }
        let n = Vector2D::new(-7.0, 24.0).normalize().unwrap();
        assert_relative_eq!(n.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_an_error() {
        assert_eq!(Vector2D::ZERO.normalize(), Err(Error::DegenerateVector));
        assert_eq!(Vector3D::ZERO.normalize(), Err(Error::DegenerateVector));
        let inf = Vector3D::new(f64::INFINITY, 0.0, 0.0);
        assert_eq!(inf.normalize(), Err(Error::DegenerateVector));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Vector2D::from([1.0, 2.0]), Vector2D::new(1.0, 2.0));
        assert_eq!(Vector3D::from((1.0, 2.0, 3.0)), Vector3D::new(1.0, 2.0, 3.0));
        let v = Vector3D::new(1.5, -2.0, 0.25);
        assert_eq!(Vector3D::from_nalgebra(&v.to_nalgebra()), v);
        assert_eq!(v.to_string(), "(1.5, -2, 0.25)");
    }
}
