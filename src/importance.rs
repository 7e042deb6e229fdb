//! Per-channel color importance weighting for the BC1 block compressor.

use crate::vec3::Vec3;

/// Relative importances of the R, G, B channels with respect to squared
/// error, stored as their square roots.
///
/// Multiplying an 8-bit RGB triple component-wise by [`ColorImportance::scale`]
/// maps it into a space where ordinary squared Euclidean distance equals
/// the intended weighted squared error. Default is `(3, 4, 2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorImportance {
	scale: Vec3,
}

impl ColorImportance {
	/// Builds the importance from raw (non-square-rooted) weights, e.g.
	/// `(3.0, 4.0, 2.0)`.
	pub fn new(r: f32, g: f32, b: f32) -> ColorImportance {
		ColorImportance {
			scale: Vec3::new(r.sqrt(), g.sqrt(), b.sqrt()),
		}
	}

	/// Uniform importance, `(1, 1, 1)`: selected by the `-u` CLI flag.
	pub fn uniform() -> ColorImportance {
		ColorImportance::new(1.0, 1.0, 1.0)
	}

	/// The `(√Ir, √Ig, √Ib)` scale vector.
	pub fn scale(self) -> Vec3 {
		self.scale
	}

	/// The componentwise maximum weighted color, `scale() * 255`.
	pub fn max_color(self) -> Vec3 {
		self.scale * 255.0
	}

	/// `|scale|²`, i.e. `Ir + Ig + Ib`; used to un-weight reported errors.
	pub fn scale_length2(self) -> f32 {
		self.scale.length2()
	}
}

impl Default for ColorImportance {
	/// The format's default weighting, `(3, 4, 2)`.
	fn default() -> ColorImportance {
		ColorImportance::new(3.0, 4.0, 2.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_matches_spec() {
		let importance = ColorImportance::default();
		let scale = importance.scale();
		assert!((scale.x - 3.0f32.sqrt()).abs() < 1e-6);
		assert!((scale.y - 4.0f32.sqrt()).abs() < 1e-6);
		assert!((scale.z - 2.0f32.sqrt()).abs() < 1e-6);
	}

	#[test]
	fn uniform_is_identity_scale() {
		let importance = ColorImportance::uniform();
		assert_eq!(importance.scale(), Vec3::splat(1.0));
		assert_eq!(importance.scale_length2(), 3.0);
	}

	#[test]
	fn max_color_is_255_scaled() {
		let importance = ColorImportance::uniform();
		assert_eq!(importance.max_color(), Vec3::splat(255.0));
	}
}
