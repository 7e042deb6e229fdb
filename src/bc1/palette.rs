//! DXT1 palette construction and 5-6-5 endpoint coding.

use crate::importance::ColorImportance;
use crate::pixmap::Pixel;
use crate::vec3::Vec3;

/// Weighting factor of endpoint 1 for each of the four palette entries.
/// `w[i]` is the weight of endpoint 1 and `1 - w[i]` is the weight of
/// endpoint 0.
pub const PALETTE_WEIGHT: [f32; 4] = [0.0, 1.0, 1.0 / 3.0, 2.0 / 3.0];

/// A length-4 sequence of endpoint/derived colors in importance-weighted
/// space.
///
/// Indices 0 and 1 are the block's two coded endpoints; indices 2 and 3 are
/// always [`DxtPalette::complete`]-derived from them, never set directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DxtPalette {
	/// The four palette colors, in weighted space.
	pub color: [Vec3; 4],
}

impl DxtPalette {
	/// Builds a palette from the two endpoint colors, clamping and
	/// deriving entries 2 and 3.
	pub fn from_endpoints(color0: Vec3, color1: Vec3, importance: ColorImportance) -> DxtPalette {
		let mut palette = DxtPalette {
			color: [color0, color1, Vec3::default(), Vec3::default()],
		};
		palette.complete(importance);
		palette
	}

	/// Clamps colors 0 and 1 to `[0, 255 * scale]` and re-derives colors 2
	/// and 3 as `lerp(color[0], color[1], 1/3)` and `lerp(.., 2/3)`.
	///
	/// Idempotent: calling this twice in a row leaves the palette unchanged,
	/// since the clamp bounds are fixed and colors 2/3 are pure functions
	/// of (already-clamped) colors 0/1.
	pub fn complete(&mut self, importance: ColorImportance) {
		let max_color = importance.max_color();
		for i in 0..2 {
			self.color[i] = self.color[i].clamp(Vec3::splat(0.0), max_color);
		}
		for i in 2..4 {
			self.color[i] = Vec3::lerp(self.color[0], self.color[1], PALETTE_WEIGHT[i]);
		}
	}
}

/// Converts an 8-bit value to the 5-bit code whose bit-replicated 8-bit
/// expansion is nearest to `round(f)`. Inverse of `(v5 << 3) | (v5 >> 2)`.
pub fn q5(f: f32) -> u16 {
	let x = f.round() as i32;
	let r5 = x - ((x - 124) >> 5);
	(r5 >> 3) as u16
}

/// Converts an 8-bit value to the 6-bit code whose bit-replicated 8-bit
/// expansion is nearest to `round(f)`. Inverse of `(v6 << 2) | (v6 >> 4)`.
pub fn q6(f: f32) -> u16 {
	let x = f.round() as i32 + 2;
	let r6 = x - (x >> 6);
	(r6 >> 2) as u16
}

/// Encodes an importance-weighted RGB triple into its R5G6B5 code: the
/// blue component occupies the most-significant 5 bits, green the middle 6,
/// red the low 5.
pub fn encode_565(color: Vec3, importance: ColorImportance) -> u16 {
	let color8 = color / importance.scale();
	(q5(color8.z) << 11) | (q6(color8.y) << 5) | q5(color8.x)
}

fn r_565(code: u16) -> u8 {
	let r = (code & 0x1f) as u32;
	((r << 3) | (r >> 2)) as u8
}

fn g_565(code: u16) -> u8 {
	let g = ((code >> 5) & 0x3f) as u32;
	((g << 2) | (g >> 4)) as u8
}

fn b_565(code: u16) -> u8 {
	let b = ((code >> 11) & 0x1f) as u32;
	((b << 3) | (b >> 2)) as u8
}

/// Decodes an R5G6B5 code into an 8-bit RGB pixel, by bit replication.
/// This is purely a format-side operation and never applies importance
/// weighting: weighting is an encode-time-only measure.
pub fn decode_565(code: u16) -> Pixel {
	Pixel::new(r_565(code), g_565(code), b_565(code))
}
