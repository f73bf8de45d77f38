//! The decode -> transpose -> write pipeline behind the command line.

use std::{
    ffi::OsStr,
    fmt,
    fs::File,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    decode::Decode,
    error::{Error, Result},
    power, transpose, wav,
};

#[derive(Clone, Debug)]
pub struct DumpOptions {
    pub input: PathBuf,
    /// Defaults to [`default_output_path`] of the input.
    pub output: Option<PathBuf>,
    /// Semitones; `None` leaves the pitch alone.
    pub transpose: Option<i32>,
    /// Replace an existing output without asking.
    pub overwrite: bool,
}

impl DumpOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            transpose: None,
            overwrite: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `<input basename without extension>.wav`, relative to the working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("output"))
        .to_os_string();
    name.push(".wav");
    PathBuf::from(name)
}

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Line-based confirmation; anything but `y`/`yes` (including EOF) means no.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt} [y/N]: ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// What a successful dump produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub output: PathBuf,
    pub transpose: Option<i32>,
    pub frames: usize,
    pub sample_rate: u32,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote: {}", self.output.display())?;
        if let Some(semitones) = self.transpose {
            write!(f, " (transpose: {semitones:+} semitones)")?;
        }
        Ok(())
    }
}

fn check_input(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::InputUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_file() {
        return Err(Error::InputNotAFile(path.to_path_buf()));
    }
    File::open(path).map_err(|source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Rejects an output that is a directory or the input file itself.
fn check_output(input: &Path, output: &Path) -> Result<()> {
    if output.is_dir() {
        return Err(Error::OutputIsADirectory(output.to_path_buf()));
    }
    if output.exists() && std::fs::canonicalize(output)? == std::fs::canonicalize(input)? {
        return Err(Error::OutputIsInput(output.to_path_buf()));
    }
    Ok(())
}

/// Decodes `opts.input`, transposes it if asked and writes one WAV file.
///
/// Nothing is written unless every step before the write succeeds. An existing
/// output is only replaced when `opts.overwrite` is set or `confirm` agrees.
pub fn dump(
    opts: &DumpOptions,
    decoder: &impl Decode,
    confirm: &mut impl Confirm,
) -> Result<Report> {
    check_input(&opts.input)?;
    if let Some(semitones) = opts.transpose {
        transpose::pitch_ratio(semitones)?;
    }

    let output = opts.output_path();
    check_output(&opts.input, &output)?;
    if output.exists() && !opts.overwrite {
        let prompt = format!(
            "Output file '{}' already exists. Overwrite?",
            output.display()
        );
        if !confirm.confirm(&prompt)? {
            return Err(Error::Declined(output));
        }
    }

    info!(input = %opts.input.display(), "decoding");
    let buffer = decoder.decode(&opts.input)?;
    debug!(
        frames = buffer.frames(),
        sample_rate = buffer.sample_rate(),
        channels = buffer.channels(),
        rms = power(buffer.samples()),
        "decoded"
    );

    let buffer = match opts.transpose {
        Some(semitones) => {
            info!(semitones, "transposing");
            transpose::transpose(&buffer, semitones)?
        }
        None => buffer,
    };

    info!(output = %output.display(), "writing");
    wav::write(&output, &buffer)?;

    Ok(Report {
        output,
        transpose: opts.transpose,
        frames: buffer.frames(),
        sample_rate: buffer.sample_rate(),
    })
}
