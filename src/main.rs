//! `bimdexter`: converts between 24-bit uncompressed BMP images and
//! DXT1-compressed DDS textures.

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use std::time::Instant;

use bimdexter::format::{bmp, dds};

mod cli;

use cli::Mode;

fn init_logging(quiet: bool) {
	let level = if quiet { log::LevelFilter::Off } else { log::LevelFilter::Info };
	env_logger::Builder::new().filter_level(level).format_timestamp(None).format_module_path(false).init();
}

fn run(options: cli::Options) -> Result<(), String> {
	let mode = cli::resolve_mode(options.mode, &options.input)
		.ok_or_else(|| "Cannot deduce mode from input file extension.".to_string())?;

	let mut input = File::open(&options.input).map_err(|e| format!("Cannot open input file: {e}"))?;
	let output = File::create(&options.output).map_err(|e| format!("Cannot open output file: {e}"))?;
	let mut output = BufWriter::new(output);

	match mode {
		Mode::BmpToDds => {
			let pixmap = bmp::read(&mut input).map_err(|e| e.to_string())?;
			let start = Instant::now();
			dds::write(&mut output, &pixmap, options.importance).map_err(|e| e.to_string())?;
			log::info!("Time taken: {:.3} seconds.", start.elapsed().as_secs_f64());
		}
		Mode::DdsToBmp => {
			let pixmap = dds::read(&mut input).map_err(|e| e.to_string())?;
			bmp::write(&mut output, &pixmap).map_err(|e| e.to_string())?;
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	let args: Vec<String> = std::env::args().skip(1).collect();

	let options = match cli::parse_args(&args) {
		Some(options) => options,
		None => {
			cli::usage();
			return ExitCode::SUCCESS;
		}
	};

	init_logging(options.quiet);

	match run(options) {
		Ok(()) => ExitCode::SUCCESS,
		Err(message) => {
			eprintln!("Error: {message}");
			ExitCode::FAILURE
		}
	}
}
