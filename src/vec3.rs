//! A minimal single-precision 3-vector, used throughout `bc1` to carry
//! importance-weighted RGB colors and their gradients.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// Three single-precision floats. Used both as a weighted RGB color and as
/// a gradient in the same space.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
	/// First (red) component.
	pub x: f32,
	/// Second (green) component.
	pub y: f32,
	/// Third (blue) component.
	pub z: f32,
}

impl Vec3 {
	/// Builds a vector with all three components equal.
	pub fn splat(c: f32) -> Vec3 {
		Vec3 { x: c, y: c, z: c }
	}

	/// Builds a vector from its three components.
	pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
		Vec3 { x, y, z }
	}

	/// Squared length of the vector.
	pub fn length2(self) -> f32 {
		self.x * self.x + self.y * self.y + self.z * self.z
	}

	/// Length of the vector.
	pub fn length(self) -> f32 {
		self.length2().sqrt()
	}

	/// True if all three components are finite (not NaN or infinite).
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
	}

	/// Component-wise minimum.
	pub fn min(a: Vec3, b: Vec3) -> Vec3 {
		Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
	}

	/// Component-wise maximum.
	pub fn max(a: Vec3, b: Vec3) -> Vec3 {
		Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
	}

	/// Clamps each component to the range given by the matching components
	/// of `min` and `max`.
	pub fn clamp(self, min: Vec3, max: Vec3) -> Vec3 {
		Vec3::new(
			self.x.max(min.x).min(max.x),
			self.y.max(min.y).min(max.y),
			self.z.max(min.z).min(max.z),
		)
	}

	/// Dot product.
	pub fn dot(a: Vec3, b: Vec3) -> f32 {
		a.x * b.x + a.y * b.y + a.z * b.z
	}

	/// Linear interpolation. Returns `a` at `t = 0`, `b` at `t = 1`.
	pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
		a * (1.0 - t) + b * t
	}
}

impl Add for Vec3 {
	type Output = Vec3;
	fn add(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
	}
}

impl AddAssign for Vec3 {
	fn add_assign(&mut self, rhs: Vec3) {
		*self = *self + rhs;
	}
}

impl Sub for Vec3 {
	type Output = Vec3;
	fn sub(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
	}
}

impl SubAssign for Vec3 {
	fn sub_assign(&mut self, rhs: Vec3) {
		*self = *self - rhs;
	}
}

impl Mul<Vec3> for Vec3 {
	type Output = Vec3;
	fn mul(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
	}
}

impl Mul<f32> for Vec3 {
	type Output = Vec3;
	fn mul(self, rhs: f32) -> Vec3 {
		Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
	}
}

impl MulAssign<f32> for Vec3 {
	fn mul_assign(&mut self, rhs: f32) {
		*self = *self * rhs;
	}
}

impl Div<Vec3> for Vec3 {
	type Output = Vec3;
	fn div(self, rhs: Vec3) -> Vec3 {
		Vec3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
	}
}

impl Div<f32> for Vec3 {
	type Output = Vec3;
	fn div(self, rhs: f32) -> Vec3 {
		Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
	}
}

impl DivAssign<f32> for Vec3 {
	fn div_assign(&mut self, rhs: f32) {
		*self = *self / rhs;
	}
}
