//! Container codecs: the thin adapters that read and write the fixed
//! headers and pixel/byte streams around the BC1 block codec.

/// Support for reading and writing 24-bit uncompressed BMP files.
pub mod bmp;

/// Support for reading and writing DDS (Direct Draw Surface) files
/// carrying DXT1-compressed data.
pub mod dds;

pub use crate::error::{Error, Result};
