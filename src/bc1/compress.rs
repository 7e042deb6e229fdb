//! The BC1 block compressor: covariance analysis, power-iteration
//! eigen-estimation, gradient descent on the 6-dimensional endpoint space,
//! and palette/index encoding.

use crate::importance::ColorImportance;
use crate::pixmap::Pixmap;
use crate::vec3::Vec3;

use super::block::{DxtBlock, SIZE};
use super::palette::{encode_565, DxtPalette, PALETTE_WEIGHT};

/// Number of pixels in a block.
const N: usize = SIZE * SIZE;

/// Threshold below which a block's total covariance trace is treated as
/// constant-color, both as a fast path and as a guard against numerical
/// misbehavior of power iteration on near-singular data.
const CONSTANT_BLOCK_THRESHOLD: f32 = 0.1;

/// Fixed power-iteration step count. A deliberate cost/quality trade; the
/// value is not meant to be tuned.
const POWER_ITERATIONS: usize = 12;

/// One 4x4 window of source pixels, read in importance-weighted space and
/// ready for compression.
pub struct PixelBlock {
	data: [Vec3; N],
	importance: ColorImportance,
}

/// The result of one per-pixel palette lookup: which entry is nearest, how
/// far it is, and the resulting gradient contributions toward endpoints 0
/// and 1.
struct CodedPixel {
	index: usize,
	error: f32,
	gradient0: Vec3,
	gradient1: Vec3,
}

fn encode_pixel(pixel: Vec3, palette: &DxtPalette) -> CodedPixel {
	let mut best_index = 0;
	let mut best_error = f32::INFINITY;
	let mut best_delta = Vec3::default();

	for (i, &color) in palette.color.iter().enumerate() {
		let delta = color - pixel;
		let error = delta.length2();
		if error < best_error {
			best_error = error;
			best_delta = delta;
			best_index = i;
		}
	}

	let w = PALETTE_WEIGHT[best_index];
	CodedPixel {
		index: best_index,
		error: best_error,
		gradient0: best_delta * (1.0 - w),
		gradient1: best_delta * w,
	}
}

impl PixelBlock {
	/// Reads a 4x4 window of `pixmap` with its top-left corner at `(x, y)`
	/// into importance-weighted space, in the decoder's storage order
	/// (`dy` descending from 3 to 0, `dx` ascending from 0 to 3).
	pub fn read(pixmap: &Pixmap, x: usize, y: usize, importance: ColorImportance) -> PixelBlock {
		let scale = importance.scale();
		let mut data = [Vec3::default(); N];
		let mut i = 0;
		for dy in (0..SIZE).rev() {
			for dx in 0..SIZE {
				let pixel = pixmap.get(x + dx, y + dy);
				data[i] = Vec3::new(pixel.r as f32, pixel.g as f32, pixel.b as f32) * scale;
				i += 1;
			}
		}
		PixelBlock { data, importance }
	}

	fn mean(&self) -> Vec3 {
		let sum = self.data.iter().fold(Vec3::default(), |acc, &p| acc + p);
		sum / (N as f32)
	}

	/// Compresses this block's contents into a [`DxtBlock`], returning it
	/// together with the unweighted squared error (the weighted squared
	/// error divided by `|scale|^2`). Quantization error of the endpoints
	/// themselves is not included.
	pub fn compress(&self) -> (DxtBlock, f32) {
		let mean = self.mean();

		// Covariance matrix. Symmetric, so each Vec3 is both a row and a
		// column.
		let mut cov_x = Vec3::default();
		let mut cov_y = Vec3::default();
		let mut cov_z = Vec3::default();
		for &p in self.data.iter() {
			let d = p - mean;
			cov_x += d * d.x;
			cov_y += d * d.y;
			cov_z += d * d.z;
		}

		if cov_x.x + cov_y.y + cov_z.z < CONSTANT_BLOCK_THRESHOLD {
			return self.constant_block();
		}

		cov_x /= N as f32;
		cov_y /= N as f32;
		cov_z /= N as f32;

		// Principal direction by power iteration, starting from the
		// bounding-box diagonal (a cheap, non-degenerate initial guess
		// that already points roughly along the dominant variance axis).
		let mut mini = self.data[0];
		let mut maxi = self.data[0];
		for &p in &self.data[1..] {
			mini = Vec3::min(mini, p);
			maxi = Vec3::max(maxi, p);
		}

		let mut b = maxi - mini;
		let mut v = 0.0f32;
		for _ in 0..POWER_ITERATIONS {
			b = Vec3::new(Vec3::dot(b, cov_x), Vec3::dot(b, cov_y), Vec3::dot(b, cov_z));
			v = b.length();
			b /= v;
		}

		if !b.is_finite() {
			return self.constant_block();
		}

		// Three initial palettes along the principal axis; keep the best
		// after a short gradient descent from each.
		let mut palette = DxtPalette::from_endpoints(mean, mean, self.importance);
		let mut error = f32::INFINITY;

		for &factor in &[0.5f32, 1.0, 2.0] {
			let stdev = (factor * v).sqrt();
			let mut candidate = DxtPalette::from_endpoints(mean + b * stdev, mean - b * stdev, self.importance);
			let candidate_error = self.gradient_descent(8, &mut candidate);
			if candidate_error < error {
				palette = candidate;
				error = candidate_error;
			}
		}

		let _ = self.gradient_descent(64, &mut palette);

		self.finish_block(palette)
	}

	fn constant_block(&self) -> (DxtBlock, f32) {
		let block = DxtBlock {
			color0: encode_565(self.data[0], self.importance),
			color1: 0,
			bitmap: 0,
		};
		(block, 0.0)
	}

	fn finish_block(&self, palette: DxtPalette) -> (DxtBlock, f32) {
		let mut color0 = encode_565(palette.color[0], self.importance);
		let mut color1 = encode_565(palette.color[1], self.importance);
		let mut palette = palette;

		// DXT1 interprets color0 > color1 as the opaque (non-alpha)
		// encoding; swap endpoints (and the derived thirds, since their
		// weights are fixed while the endpoint roles flip) to enforce it.
		if color0 < color1 {
			std::mem::swap(&mut color0, &mut color1);
			palette.color.swap(0, 1);
			palette.color.swap(2, 3);
		}

		let mut bitmap: u32 = 0;
		let mut error = 0.0f32;
		for (i, &pixel) in self.data.iter().enumerate() {
			let coded = encode_pixel(pixel, &palette);
			error += coded.error;
			bitmap |= (coded.index as u32) << (i * 2);
		}

		// A 5-6-5 collision after quantization means all four palette
		// colors coincide; fall back to index 0 everywhere, which also
		// sidesteps an unintended alpha-path interpretation.
		if color0 == color1 {
			bitmap = 0;
		}

		error /= self.importance.scale_length2();

		log::debug!("block color0={:#06x} color1={:#06x} error={:.4}", color0, color1, error);

		(DxtBlock { color0, color1, bitmap }, error)
	}

	/// Refines `palette` in place to reduce total weighted squared error,
	/// for up to `max_iterations` steps, and returns the final error.
	///
	/// The per-pixel nearest-palette-entry assignment is recomputed on
	/// every trial step, so descent is free to cross Voronoi boundaries
	/// between iterations -- much of the achievable error reduction comes
	/// from exactly that.
	fn gradient_descent(&self, max_iterations: usize, palette: &mut DxtPalette) -> f32 {
		let mut step = 8.0 / N as f32;
		let min_step = step / 16.0;

		let mut error = 0.0f32;
		let mut gradient0 = Vec3::default();
		let mut gradient1 = Vec3::default();
		for &pixel in self.data.iter() {
			let coded = encode_pixel(pixel, palette);
			error += coded.error;
			gradient0 += coded.gradient0;
			gradient1 += coded.gradient1;
		}

		let mut iterations = 0;
		while iterations < max_iterations && step > min_step {
			let mut candidate = *palette;
			for i in 0..2 {
				candidate.color[i] = palette.color[i] - Vec3::lerp(gradient0, gradient1, PALETTE_WEIGHT[i]) * step;
			}
			candidate.complete(self.importance);

			let mut new_error = 0.0f32;
			let mut new_gradient0 = Vec3::default();
			let mut new_gradient1 = Vec3::default();
			for &pixel in self.data.iter() {
				let coded = encode_pixel(pixel, &candidate);
				new_error += coded.error;
				new_gradient0 += coded.gradient0;
				new_gradient1 += coded.gradient1;
			}

			if new_error < error {
				*palette = candidate;
				error = new_error;
				gradient0 = new_gradient0;
				gradient1 = new_gradient1;
				step *= 1.2;
			} else {
				step *= 0.5;
			}

			iterations += 1;
		}

		error
	}
}
