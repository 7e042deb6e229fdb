//! Command-line argument parsing for the `bimdexter` binary.
//!
//! Kept as a hand-rolled argv loop rather than a `clap` parser: the spec's
//! exit-code contract (usage text on stderr, exit **0**, for any malformed
//! argv) doesn't match `clap`'s default behavior of exiting 2 on a parse
//! error, and the surface here is small enough that reproducing it exactly
//! by hand is simpler than fighting a derive macro's defaults.

use crate::importance::ColorImportance;

/// Which direction a conversion runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
	/// Read a BMP, write a DDS.
	BmpToDds,
	/// Read a DDS, write a BMP.
	DdsToBmp,
}

/// Parsed command-line options.
pub struct Options {
	/// Explicit mode, if `-b`/`-d` were given; `None` means dispatch by
	/// the input file's suffix.
	pub mode: Option<Mode>,
	/// Suppress diagnostic logging (`-q`).
	pub quiet: bool,
	/// Color importance to use for encoding (`-u` selects uniform).
	pub importance: ColorImportance,
	/// Input file path.
	pub input: String,
	/// Output file path.
	pub output: String,
}

/// The usage text, printed to stderr whenever argv cannot be parsed.
pub fn usage() {
	eprintln!("Usage: bimdexter [-b | -d] [-q] [-u] {{input file}} {{output file}}");
	eprintln!("Converts between .BMP (24-bit uncompressed) and .DDS (DXT1) files.");
	eprintln!("If not specified, the mode is chosen based on the extension of the input file.");
	eprintln!("Options:");
	eprintln!("  -b  Set mode: input BMP and output DDS.");
	eprintln!("  -d  Set mode: input DDS and output BMP.");
	eprintln!("  -q  Suppress diagnostic output to stderr.");
	eprintln!("  -u  Choose uniform color component weighting. Default is (3, 4, 2) (R, G, B).");
}

/// Parses `argv` (excluding the program name). Returns `None` on any
/// malformed input; the caller should print usage and exit 0 in that case.
pub fn parse_args(args: &[String]) -> Option<Options> {
	let mut mode = None;
	let mut quiet = false;
	let mut uniform = false;
	let mut filenames: Vec<String> = Vec::with_capacity(2);

	for arg in args {
		match arg.as_str() {
			"-b" => mode = Some(Mode::BmpToDds),
			"-d" => mode = Some(Mode::DdsToBmp),
			"-q" => quiet = true,
			"-u" => uniform = true,
			_ if filenames.len() < 2 => filenames.push(arg.clone()),
			_ => return None,
		}
	}

	let (input, output) = match filenames.as_slice() {
		[_, _] => {
			let mut filenames = filenames.into_iter();
			(filenames.next()?, filenames.next()?)
		}
		_ => return None,
	};

	Some(Options {
		mode,
		quiet,
		importance: if uniform { ColorImportance::uniform() } else { ColorImportance::default() },
		input,
		output,
	})
}

/// Checks whether `s` ends with `suffix`, ignoring case.
pub fn has_suffix(s: &str, suffix: &str) -> bool {
	if s.len() < suffix.len() {
		return false;
	}
	let tail = &s[s.len() - suffix.len()..];
	tail.eq_ignore_ascii_case(suffix)
}

/// Resolves the conversion direction for `input`, given any explicit mode
/// flag. Returns `None` when dispatch must fall back to the suffix and the
/// suffix is not recognized.
pub fn resolve_mode(explicit: Option<Mode>, input: &str) -> Option<Mode> {
	if let Some(mode) = explicit {
		return Some(mode);
	}
	if has_suffix(input, ".dds") {
		Some(Mode::DdsToBmp)
	} else if has_suffix(input, ".bmp") {
		Some(Mode::BmpToDds)
	} else {
		None
	}
}
