use std::{fs::File, path::PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::{
    decode::FfmpegDecoder,
    dump::{dump, DumpOptions, PromptConfirm},
};

/// Read an audio or video FILEPATH with ffmpeg and dump its audio as WAV.
///
/// By default the output is `<basename>.wav` in the current directory.
#[derive(Debug, Parser)]
#[command(name = "audiodumper", author, version, about, max_term_width = 80)]
pub struct Args {
    /// Input audio or video file
    #[arg(value_name = "FILEPATH", value_parser = existing_file)]
    pub filepath: PathBuf,

    /// Output file path (defaults to input basename with .wav)
    #[arg(short, long, value_name = "FILE", value_parser = output_file)]
    pub output: Option<PathBuf>,

    /// Transpose audio by N semitones (e.g. +3, -4)
    #[arg(short, long, value_name = "INTEGER", allow_negative_numbers = true)]
    pub transpose: Option<i32>,

    /// Overwrite output without prompting (non-interactive)
    #[arg(short, long)]
    pub yes: bool,

    /// ffmpeg executable used for decoding
    #[arg(
        long,
        value_name = "PATH",
        env = "AUDIODUMPER_FFMPEG",
        default_value = "ffmpeg"
    )]
    pub ffmpeg: PathBuf,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            input: self.filepath.clone(),
            output: self.output.clone(),
            transpose: self.transpose,
            overwrite: self.yes,
        }
    }
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if !path.exists() {
        return Err(format!("file '{s}' does not exist"));
    }
    if !path.is_file() {
        return Err(format!("'{s}' is not a file"));
    }
    File::open(&path).map_err(|e| format!("file '{s}' is not readable: {e}"))?;
    Ok(path)
}

fn output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        return Err(format!("'{s}' is a directory"));
    }
    Ok(path)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn entry(args: &Args) -> Result<()> {
    init_logging(args.verbose);

    let decoder = FfmpegDecoder::new(args.ffmpeg.clone());
    let report = dump(&args.dump_options(), &decoder, &mut PromptConfirm::stdio())?;
    println!("{report}");
    Ok(())
}
