//! # Algorithm information
//! This section is recommended reading for people who want to decide which BCn algorithm to use.
//! Also for people who want to learn about BC1 internals.
//!
//! The Block-Compression 1 algorithm (also known as DXT1) is a fixed block-size texture
//! compression algorithm.
//!
//! **Input data**: an uncompressed R8-G8-B8 image, one 4x4 tile at a time.
//! **Output data**: compressed "blocks" - each block is 8 bytes long, and stores information for
//! a 4x4 pixel area in the original image.
//!
//! Block structure:
//! ```rust,no_run
//! #[repr(C)]
//! struct Block {
//! 	color0: u16, // R5G6B5
//! 	color1: u16, // R5G6B5
//! 	bitmap: u32, // 16 x 2-bit palette indices
//! }
//! ```
//! A block represents a "line" in the RGB color space (`color0` and `color1` being the two
//! endpoints), and the bitmap selects, per pixel, one of four colors on or near that line. This
//! can produce banding artifacts, which is why higher quality algorithms like BC7 exist.
//!
//! # Reference
//!
//! - [DXT1 on Wikipedia](https://en.wikipedia.org/wiki/S3_Texture_Compression#DXT1)
//! - [BC1 on Microsoft Docs](https://docs.microsoft.com/en-us/windows/uwp/graphics-concepts/block-compression#bc1)
//! - [Nathan Reed's article](http://reedbeta.com/blog/understanding-bcn-texture-compression-formats/#bc1)

mod block;
mod compress;
mod palette;

pub use block::{DxtBlock, BYTE_SIZE, SIZE};
pub use compress::PixelBlock;
pub use palette::{decode_565, encode_565, DxtPalette, PALETTE_WEIGHT};
